use crate::mvi::{Intent, UiEvent};
use crate::store::MovieNote;

#[derive(Debug, Clone)]
pub enum MovieIntent {
    LoadMovieData,
    /// Re-issues the details request after a failure.
    Retry,
    LoadFavoriteStatus,
    LoadNotes,
    ToggleFavorite,
    AddNote(String),
    RemoveNote(MovieNote),
    SwitchNoteSelection(MovieNote),
    ClearSelectedNotes,
    DeleteSelectedNotes,
    SelectNoteForEditing(MovieNote),
    /// Replaces the text of the note being edited.
    SaveNoteEdits(String),
    ExitNoteEditing,
}

impl Intent for MovieIntent {}

#[derive(Debug, Clone, PartialEq)]
pub enum MovieEvent {
    ShowMessage(String),
}

impl UiEvent for MovieEvent {}
