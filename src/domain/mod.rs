//! Domain layer - Note model and repository contract

pub mod clock;
pub mod note;
pub mod repository;

pub use clock::{Clock, FixedClock, SystemClock};
pub use note::{Note, NoteId};
pub use repository::{NoteRepository, NoteStream};
