// Error families for the pcsets crate.
//
// Each failure family gets its own enum so callers can match on exactly the
// errors an operation can produce: set construction only yields
// `DefinitionError`, note parsing only `TranslationError`, and so on.
// `PcSetError` gathers them for callers that just want one type to `?` into.
//
// Search operations never fail on well-formed sets. A broken internal
// invariant (e.g. matching prime forms but an empty operator search) is a
// bug in this crate and panics instead of surfacing here.

use thiserror::Error;

/// Malformed input to a `PcSet` (or `ToneRow`) definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A spec-string character or list token that is not `0-9`, `A` or `B`.
    #[error("illegal character {0:?} in pitch class definition (allowed: 0-9, A, B)")]
    IllegalCharacter(String),

    /// The definition was a scalar or map rather than a sequence or string.
    #[error("pitch class definition must be a sequence or a spec string, found {0}")]
    NonIterable(String),
}

/// An unknown search polarity name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown polarity {0:?} (expected \"normal\" or \"reverse\")")]
pub struct PolarityError(pub String);

/// Failure to build a twelve-tone row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToneRowError {
    #[error("tone row must contain all 12 pitch classes, found {len}: {found:?}")]
    Incomplete { found: String, len: usize },

    #[error(transparent)]
    Definition(#[from] DefinitionError),
}

/// Failure to read a string of note names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// More than a letter plus one accidental (e.g. `Cbb`, or `ABC` with no
    /// separating spaces).
    #[error("note {0:?} is not a letter A-G with at most one accidental")]
    NoteFormat(String),

    #[error("note {0:?} does not start with a letter A-G")]
    IllegalNote(String),

    #[error("illegal accidental {modifier:?} in note {note:?} (allowed: b, #, \u{266D}, \u{266F}, \u{266E})")]
    IllegalModifier { modifier: char, note: String },
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PcSetError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Polarity(#[from] PolarityError),
    #[error(transparent)]
    ToneRow(#[from] ToneRowError),
    #[error(transparent)]
    Translation(#[from] TranslationError),
}
