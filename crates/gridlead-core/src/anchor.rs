//! In-page anchor navigation.
//!
//! Only same-page fragment links (`#id`) are handled; everything else is
//! left to the user agent. The target briefly receives keyboard focus so
//! screen readers follow the scroll.

use std::time::Duration;

/// How long the scrolled-to element keeps its temporary `tabindex`.
pub const FOCUS_HOLD: Duration = Duration::from_millis(1200);

/// Where a clicked anchor should scroll to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    pub id: String,
    /// Remove the temporary `tabindex` after this long.
    pub focus_hold: Duration,
}

/// Element id named by a same-page fragment link.
///
/// `"#pricing"` yields `Some("pricing")`; a bare `"#"`, an empty href, and
/// links to other pages yield `None`.
#[must_use]
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Resolve a clicked link to a scroll target.
///
/// `exists` reports whether the page has an element with the given id.
/// Returns `None` when the click should fall through to default handling.
pub fn resolve<F>(href: &str, exists: F) -> Option<ScrollTarget>
where
    F: Fn(&str) -> bool,
{
    let id = fragment_id(href)?;
    exists(id).then(|| ScrollTarget {
        id: id.to_owned(),
        focus_hold: FOCUS_HOLD,
    })
}
