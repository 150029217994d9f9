//! Persistence mirrors: write-only shadows of the current screen.
//!
//! A mirror records every published screen into its medium (local storage,
//! URL hash, memory). It may be read once at startup to seed the store; after
//! that the store never adopts a mirrored value on its own. Divergence is
//! reported through [`Mirror::check`] and resolved only by an explicit
//! `NavigationStore::resume`.
//!
//! ## Local storage record versioning
//!
//! - `RECORD_VERSION`: current record format. Bump when adding fields.
//! - `MIN_COMPATIBLE_VERSION`: oldest record still readable. Bump only on
//!   breaking changes; older records are discarded on read.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{MirrorError, StaleMirror};
use crate::registry::{Registry, ScreenName};
use crate::store::{NavObserver, Notification};

const RECORD_VERSION: u32 = 1;

const MIN_COMPATIBLE_VERSION: u32 = 1;

/// A place a screen tag can be written to and read back from.
pub trait MirrorMedium {
    fn name(&self) -> &str;

    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, MirrorError>;

    fn write(&mut self, tag: &str) -> Result<(), MirrorError>;

    fn clear(&mut self) -> Result<(), MirrorError>;
}

// ── Memory medium ──────────────────────────────────────────────────

/// In-memory medium. Clones share the same cell, so a clone can play the
/// part of "another tab" changing the stored value.
#[derive(Clone, Debug, Default)]
pub struct MemoryMedium {
    cell: Rc<RefCell<Option<String>>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(tag: &str) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Some(tag.to_string()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.cell.borrow().clone()
    }
}

impl MirrorMedium for MemoryMedium {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self) -> Result<Option<String>, MirrorError> {
        Ok(self.cell.borrow().clone())
    }

    fn write(&mut self, tag: &str) -> Result<(), MirrorError> {
        *self.cell.borrow_mut() = Some(tag.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), MirrorError> {
        *self.cell.borrow_mut() = None;
        Ok(())
    }
}

// ── Record codec (local storage) ───────────────────────────────────

#[derive(Serialize, Deserialize)]
struct MirrorRecord {
    version: u32,
    screen: String,
}

pub fn encode_record(tag: &str) -> Result<String, MirrorError> {
    serde_json::to_string(&MirrorRecord {
        version: RECORD_VERSION,
        screen: tag.to_string(),
    })
    .map_err(|e| MirrorError::Write(e.to_string()))
}

/// Decode a stored record into its screen tag.
pub fn decode_record(json: &str) -> Result<String, MirrorError> {
    let record: MirrorRecord =
        serde_json::from_str(json).map_err(|e| MirrorError::Corrupt(e.to_string()))?;
    if record.version < MIN_COMPATIBLE_VERSION {
        return Err(MirrorError::Corrupt(format!(
            "record version {} is older than {}",
            record.version, MIN_COMPATIBLE_VERSION
        )));
    }
    if record.version < RECORD_VERSION {
        tracing::info!(
            saved = record.version,
            current = RECORD_VERSION,
            "migrating older mirror record"
        );
    }
    Ok(record.screen)
}

/// Extract a screen tag from a location hash (`#/login`, `#login`).
pub fn parse_hash(hash: &str) -> Option<String> {
    let tag = hash.trim_start_matches('#').trim_start_matches('/');
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_string())
    }
}

pub fn format_hash(tag: &str) -> String {
    format!("#/{tag}")
}

#[cfg(target_arch = "wasm32")]
pub use browser::{HashMedium, LocalStorageMedium};

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;

    fn get_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// `localStorage` under a fixed key, as a versioned JSON record.
    pub struct LocalStorageMedium {
        key: String,
    }

    impl LocalStorageMedium {
        pub fn new(key: impl Into<String>) -> Self {
            Self { key: key.into() }
        }
    }

    impl MirrorMedium for LocalStorageMedium {
        fn name(&self) -> &str {
            "local-storage"
        }

        fn read(&self) -> Result<Option<String>, MirrorError> {
            let storage = get_storage()
                .ok_or_else(|| MirrorError::Unavailable("localStorage".into()))?;
            let json = match storage.get_item(&self.key) {
                Ok(Some(json)) => json,
                Ok(None) => return Ok(None),
                Err(e) => return Err(MirrorError::Unavailable(format!("{e:?}"))),
            };
            match decode_record(&json) {
                Ok(tag) => Ok(Some(tag)),
                Err(e) => {
                    // Unreadable records are dropped so the next start is clean.
                    let _ = storage.remove_item(&self.key);
                    Err(e)
                }
            }
        }

        fn write(&mut self, tag: &str) -> Result<(), MirrorError> {
            let json = encode_record(tag)?;
            let storage = get_storage()
                .ok_or_else(|| MirrorError::Unavailable("localStorage".into()))?;
            storage
                .set_item(&self.key, &json)
                .map_err(|e| MirrorError::Write(format!("{e:?}")))
        }

        fn clear(&mut self) -> Result<(), MirrorError> {
            let storage = get_storage()
                .ok_or_else(|| MirrorError::Unavailable("localStorage".into()))?;
            storage
                .remove_item(&self.key)
                .map_err(|e| MirrorError::Write(format!("{e:?}")))
        }
    }

    /// The location hash, as `#/<tag>`.
    pub struct HashMedium;

    fn location() -> Result<web_sys::Location, MirrorError> {
        web_sys::window()
            .map(|w| w.location())
            .ok_or_else(|| MirrorError::Unavailable("window".into()))
    }

    impl MirrorMedium for HashMedium {
        fn name(&self) -> &str {
            "url-hash"
        }

        fn read(&self) -> Result<Option<String>, MirrorError> {
            let hash = location()?
                .hash()
                .map_err(|e| MirrorError::Unavailable(format!("{e:?}")))?;
            Ok(parse_hash(&hash))
        }

        fn write(&mut self, tag: &str) -> Result<(), MirrorError> {
            location()?
                .set_hash(&format_hash(tag))
                .map_err(|e| MirrorError::Write(format!("{e:?}")))
        }

        fn clear(&mut self) -> Result<(), MirrorError> {
            location()?
                .set_hash("")
                .map_err(|e| MirrorError::Write(format!("{e:?}")))
        }
    }
}

// ── Mirror ─────────────────────────────────────────────────────────

/// Write counters of one mirror, shown in the diagnostics overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct MirrorHealth {
    pub name: String,
    /// Successful writes so far.
    pub writes: u64,
    /// Error of the latest write, cleared by the next successful one.
    pub last_error: Option<MirrorError>,
}

/// Observer-side view of a mirror, object safe so the app can hold
/// different media together.
pub trait ScreenMirror: NavObserver {
    fn name(&self) -> &str;

    /// One-shot startup read.
    fn seed(&self, registry: &Registry) -> Result<ScreenName, MirrorError>;

    /// Compare the medium with the last screen this mirror published.
    fn check(&self) -> Option<StaleMirror>;

    fn health(&self) -> MirrorHealth;

    /// Forget the stored screen (logout). Nothing is reported stale until the
    /// next write.
    fn clear(&mut self) -> Result<(), MirrorError>;
}

pub struct Mirror<M: MirrorMedium> {
    medium: M,
    last_published: Option<ScreenName>,
    last_error: Option<MirrorError>,
    writes: u64,
}

impl<M: MirrorMedium> Mirror<M> {
    pub fn new(medium: M) -> Self {
        Self {
            medium,
            last_published: None,
            last_error: None,
            writes: 0,
        }
    }
}

impl<M: MirrorMedium> NavObserver for Mirror<M> {
    fn on_change(&mut self, notification: &Notification) {
        self.last_published = Some(notification.screen);
        match self.medium.write(notification.screen.tag()) {
            Ok(()) => {
                self.writes += 1;
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(mirror = self.medium.name(), error = %e, "mirror write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<M: MirrorMedium> ScreenMirror for Mirror<M> {
    fn name(&self) -> &str {
        self.medium.name()
    }

    fn seed(&self, registry: &Registry) -> Result<ScreenName, MirrorError> {
        let tag = self.medium.read()?.ok_or(MirrorError::Missing)?;
        registry
            .resolve_tag(&tag)
            .map(|b| b.screen)
            .ok_or_else(|| MirrorError::Corrupt(format!("`{tag}` is not a registered screen")))
    }

    fn check(&self) -> Option<StaleMirror> {
        let expected = self.last_published?;
        let found = match self.medium.read() {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(mirror = self.medium.name(), error = %e, "mirror read failed");
                None
            }
        };
        if found.as_deref() == Some(expected.tag()) {
            return None;
        }
        let stale = StaleMirror {
            mirror: self.medium.name().to_string(),
            expected,
            found,
        };
        tracing::warn!(%stale, "mirror diverged from store");
        Some(stale)
    }

    fn health(&self) -> MirrorHealth {
        MirrorHealth {
            name: self.medium.name().to_string(),
            writes: self.writes,
            last_error: self.last_error.clone(),
        }
    }

    fn clear(&mut self) -> Result<(), MirrorError> {
        self.last_published = None;
        self.medium.clear()
    }
}
