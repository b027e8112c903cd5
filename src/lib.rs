//! simplenotes - Personal notes with optional image attachments
//!
//! Notes live in a local SQLite table; attached images are copied into a
//! private directory. Screens are modelled as view-models that hold a
//! replaying state snapshot and a one-shot effect channel, and the CLI drives
//! them the way a UI would.

pub mod app;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::App;
pub use error::NotesError;
