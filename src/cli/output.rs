//! Output formatting utilities

use crate::domain::Note;
use chrono::DateTime;

fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%d-%m-%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn display_title(note: &Note) -> &str {
    match note.display_title() {
        "" => "(untitled)",
        title => title,
    }
}

/// Format notes for display, one per line
pub fn format_note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for note in notes {
        output.push_str(&format!(
            "{:>4}  {}  {}{}\n",
            note.id.0,
            format_timestamp(note.updated_at),
            display_title(note),
            if note.image_uri.is_some() { "  [image]" } else { "" }
        ));
    }
    output
}

/// Format a single note with its metadata and full content
pub fn format_note(note: &Note) -> String {
    let mut output = String::new();

    if note.id.is_unset() {
        output.push_str("New note (unsaved)\n");
    } else {
        output.push_str(&format!("#{}  {}\n", note.id, display_title(note)));
        output.push_str(&format!(
            "Created: {}  Updated: {}\n",
            format_timestamp(note.created_at),
            format_timestamp(note.updated_at)
        ));
    }

    if let Some(image) = &note.image_uri {
        output.push_str(&format!("Image: {}\n", image));
    }

    if !note.content.is_empty() {
        output.push('\n');
        output.push_str(&note.content);
        if !note.content.ends_with('\n') {
            output.push('\n');
        }
    }

    output
}
