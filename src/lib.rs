//! RAVYZ onboarding navigator.
//!
//! The navigation core ([`store`], [`registry`], [`state`], [`mirror`]) is
//! plain Rust and testable natively. The browser pieces ([`app`], [`screens`],
//! [`widgets`]) render through ratzilla and are driven from `main.rs`.

pub mod api;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod logging;
pub mod mirror;
pub mod registry;
pub mod screens;
pub mod state;
pub mod store;
pub mod time;
pub mod widgets;

pub use error::{MirrorError, NavError, StaleMirror};
pub use registry::{Registry, ScreenName};
pub use state::{ApplicationState, StepData};
pub use store::{NavigationStore, Notification, TransitionCause};
