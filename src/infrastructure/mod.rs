//! Infrastructure layer - Storage and configuration

pub mod config;
pub mod database;
pub mod file_store;
pub mod repository;

pub use config::Config;
pub use database::{NoteDatabase, NoteRecord};
pub use file_store::FileStore;
pub use repository::LocalNoteRepository;
