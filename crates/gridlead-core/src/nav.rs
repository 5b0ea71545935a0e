//! Mobile navigation toggle.

/// Open/closed state of the collapsible mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavToggle {
    open: bool,
}

impl NavToggle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self.open
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// A link inside the menu was followed.
    pub fn on_link_activated(&mut self) {
        self.close();
    }

    /// A key was pressed while the menu had focus. Returns whether the
    /// key was consumed.
    pub fn on_key(&mut self, key: &str) -> bool {
        if self.open && key == "Escape" {
            self.close();
            return true;
        }
        false
    }

    /// Value for the toggle button's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(self) -> &'static str {
        if self.open { "true" } else { "false" }
    }
}
