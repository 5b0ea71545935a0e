//! Footer copyright year.

use chrono::{Datelike, Local};

/// Year shown in the footer's `#year` element.
#[must_use]
pub fn copyright_year() -> i32 {
    Local::now().year()
}
