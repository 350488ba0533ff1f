//! Per-command status feedback.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
}

/// A short status message owned by the command that produced it.
///
/// Notices start hidden; the caller decides when to [`show`](Self::show)
/// one and is expected to [`hide`](Self::hide) it after
/// [`duration`](Self::duration).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusNotice {
    text: String,
    kind: NoticeKind,
    duration: Duration,
    visible: bool,
}

impl StatusNotice {
    pub fn success(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text, NoticeKind::Success, duration)
    }

    pub fn info(text: impl Into<String>, duration: Duration) -> Self {
        Self::new(text, NoticeKind::Info, duration)
    }

    fn new(text: impl Into<String>, kind: NoticeKind, duration: Duration) -> Self {
        Self {
            text: text.into(),
            kind,
            duration,
            visible: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

impl fmt::Display for StatusNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NoticeKind::Success => write!(f, "✔ {}", self.text),
            NoticeKind::Info => f.write_str(&self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_hide_lifecycle() {
        let mut notice = StatusNotice::success("Debug mode was enabled", Duration::from_secs(2));
        assert!(!notice.is_visible());

        notice.show();
        assert!(notice.is_visible());
        notice.hide();
        assert!(!notice.is_visible());
    }

    #[test]
    fn test_display() {
        let ok = StatusNotice::success("Debug mode was enabled", Duration::ZERO);
        assert_eq!(ok.to_string(), "✔ Debug mode was enabled");

        let info = StatusNotice::info("Home URL: https://example.test", Duration::ZERO);
        assert_eq!(info.to_string(), "Home URL: https://example.test");
    }
}
