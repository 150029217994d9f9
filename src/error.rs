//! Error types for the navigation core.
//!
//! Nothing here is fatal: callers degrade to the entry or previous screen.

use thiserror::Error;

use crate::registry::ScreenName;
use crate::state::{Section, StepKind};

/// A rejected store transition. The store is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// Target screen is not part of the active registry.
    #[error("unknown screen `{0}`")]
    UnknownScreen(String),
    /// The payload does not match what the current screen produces.
    #[error("screen `{screen}` produces {expected:?} data, got {got:?}")]
    PayloadMismatch {
        screen: ScreenName,
        expected: StepKind,
        got: StepKind,
    },
    /// The screen needs sections the session has not collected.
    #[error("screen `{screen}` needs {missing:?} first")]
    MissingSections {
        screen: ScreenName,
        missing: Vec<Section>,
    },
}

/// Failure reading or writing a persistence mirror.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MirrorError {
    /// Nothing stored yet (first visit, cleared storage).
    #[error("mirror is empty")]
    Missing,
    /// Stored value could not be understood.
    #[error("mirror value is corrupt: {0}")]
    Corrupt(String),
    /// The medium itself is not reachable (no window, storage disabled).
    #[error("mirror medium unavailable: {0}")]
    Unavailable(String),
    /// The medium refused a write.
    #[error("mirror write failed: {0}")]
    Write(String),
}

/// A mirror that no longer agrees with the store's last published screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleMirror {
    pub mirror: String,
    pub expected: ScreenName,
    pub found: Option<String>,
}

impl StaleMirror {
    /// The mirrored screen, when it names a real screen.
    pub fn found_screen(&self) -> Option<ScreenName> {
        self.found.as_deref().and_then(ScreenName::from_tag)
    }
}

impl std::fmt::Display for StaleMirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.found {
            Some(found) => write!(
                f,
                "{} holds `{}` but store is on `{}`",
                self.mirror,
                found,
                self.expected.tag()
            ),
            None => write!(
                f,
                "{} is empty but store is on `{}`",
                self.mirror,
                self.expected.tag()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_screen_message_names_tag() {
        let err = NavError::UnknownScreen("not-a-real-screen".into());
        assert_eq!(err.to_string(), "unknown screen `not-a-real-screen`");
    }

    #[test]
    fn stale_mirror_parses_found_screen() {
        let stale = StaleMirror {
            mirror: "hash".into(),
            expected: ScreenName::Login,
            found: Some("candidate-page".into()),
        };
        assert_eq!(stale.found_screen(), Some(ScreenName::CandidatePage));
        assert!(stale.to_string().contains("candidate-page"));

        let garbage = StaleMirror {
            found: Some("???".into()),
            ..stale
        };
        assert_eq!(garbage.found_screen(), None);
    }
}
