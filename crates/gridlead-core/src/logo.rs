//! Logo image fallback.
//!
//! When the brand logo fails to load, the page tries the element's
//! `data-fallback-src`, then its `data-fallback-root`, and finally hides the
//! element. Each candidate is tried at most once, so a broken fallback can
//! never cause a reload loop.

use tracing::warn;

/// Candidate sources read from one `<img>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoSources {
    pub src: String,
    /// `data-fallback-src`.
    pub fallback_src: Option<String>,
    /// `data-fallback-root`.
    pub fallback_root: Option<String>,
}

/// What the element should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoAction {
    /// Point `src` at this URL.
    Load(String),
    /// Give up and hide the element.
    Hide,
}

/// Per-element fallback state.
#[derive(Debug, Clone)]
pub struct LogoFallback {
    queue: Vec<String>,
    tried: Vec<String>,
    hidden: bool,
}

impl LogoFallback {
    #[must_use]
    pub fn new(sources: LogoSources) -> Self {
        let mut queue: Vec<String> = [sources.fallback_src, sources.fallback_root]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
        queue.reverse();
        Self {
            queue,
            tried: vec![sources.src],
            hidden: false,
        }
    }

    /// Source currently shown, or `None` once hidden.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        if self.hidden {
            None
        } else {
            self.tried.last().map(String::as_str)
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The current source failed to load.
    pub fn on_error(&mut self) -> LogoAction {
        if self.hidden {
            return LogoAction::Hide;
        }
        while let Some(next) = self.queue.pop() {
            if self.tried.contains(&next) {
                continue;
            }
            warn!(failed = ?self.current(), next = %next, "logo failed to load, trying fallback");
            self.tried.push(next.clone());
            return LogoAction::Load(next);
        }
        warn!(tried = self.tried.len(), "logo failed to load from every source, hiding it");
        self.hidden = true;
        LogoAction::Hide
    }

    /// The current source finished loading with the given natural width.
    ///
    /// A zero width means the file was not a usable image and is handled as
    /// a load error.
    pub fn on_load(&mut self, natural_width: u32) -> Option<LogoAction> {
        (natural_width == 0).then(|| self.on_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(fallback_src: Option<&str>, fallback_root: Option<&str>) -> LogoSources {
        LogoSources {
            src: "./the-grid-logo.png".to_owned(),
            fallback_src: fallback_src.map(str::to_owned),
            fallback_root: fallback_root.map(str::to_owned),
        }
    }

    #[test]
    fn tries_src_then_root_then_hides() {
        let mut logo = LogoFallback::new(sources(Some("/img/logo.png"), Some("/logo.png")));
        assert_eq!(logo.current(), Some("./the-grid-logo.png"));
        assert_eq!(logo.on_error(), LogoAction::Load("/img/logo.png".to_owned()));
        assert_eq!(logo.on_error(), LogoAction::Load("/logo.png".to_owned()));
        assert_eq!(logo.on_error(), LogoAction::Hide);
        assert!(logo.is_hidden());
        assert_eq!(logo.current(), None);
        assert_eq!(logo.on_error(), LogoAction::Hide);
    }

    #[test]
    fn missing_fallbacks_hide_immediately() {
        let mut logo = LogoFallback::new(sources(None, Some("  ")));
        assert_eq!(logo.on_error(), LogoAction::Hide);
    }

    #[test]
    fn duplicate_candidates_are_tried_once() {
        let mut logo = LogoFallback::new(sources(Some("./the-grid-logo.png"), Some("/a.png")));
        assert_eq!(logo.on_error(), LogoAction::Load("/a.png".to_owned()));
        assert_eq!(logo.on_error(), LogoAction::Hide);

        let mut logo = LogoFallback::new(sources(Some("/a.png"), Some("/a.png")));
        assert_eq!(logo.on_error(), LogoAction::Load("/a.png".to_owned()));
        assert_eq!(logo.on_error(), LogoAction::Hide);
    }

    #[test]
    fn zero_width_load_counts_as_error() {
        let mut logo = LogoFallback::new(sources(Some("/b.png"), None));
        assert_eq!(logo.on_load(240), None);
        assert_eq!(logo.on_load(0), Some(LogoAction::Load("/b.png".to_owned())));
    }
}
