//! CLI command definitions

use crate::domain::NoteId;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "simplenotes")]
#[command(about = "Personal notes with optional image attachments", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all notes
    List {
        /// Print notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        /// Note id
        id: NoteId,
    },

    /// Create a note
    New {
        #[command(flatten)]
        fields: NoteFields,
    },

    /// Change an existing note
    Edit {
        /// Note id
        id: NoteId,

        #[command(flatten)]
        fields: NoteFields,

        /// Detach the current image (the stored file is kept)
        #[arg(long, conflicts_with = "image")]
        clear_image: bool,
    },

    /// Delete a note and its image
    Delete {
        /// Note id
        id: NoteId,
    },

    /// Render the screen behind a route (e.g. notes_list, note_editor?noteId=3)
    Open {
        #[arg(value_name = "ROUTE")]
        route: String,
    },
}

/// Field values typed into the editor
#[derive(Args, Debug, Default, Clone)]
pub struct NoteFields {
    /// Note title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Note body
    #[arg(short, long)]
    pub content: Option<String>,

    /// Image file to attach
    #[arg(short, long, value_name = "PATH")]
    pub image: Option<PathBuf>,
}
