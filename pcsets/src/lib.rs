// Pitch Class Set Analysis
//
// Post-tonal set theory over the twelve pitch classes: canonical forms
// (normal, reduced, prime), transformation search between sets, and the
// classical similarity relations (Rp, R0, R1, R2, Z-pairs). Every operation
// is a pure function of immutable values; sets are never mutated in place.
//
// Architecture:
// - pcset.rs: `PcSet` value type, `Definition` input boundary, single-set
//   operators (T, I, complement, shift, zero, interval/common-tone vectors)
// - canon.rs: normal/reduced/prime forms, ranked by the 12-bit mask
// - transform.rs: `Transform` trait shared by sets and tone rows
// - relations.rs: `OpSet` transformation search and set relations
// - notes.rs: note-name parsing and minimum-conflict spelling
// - tone_row.rs: ordered twelve-tone rows (P/R/I/RI forms, equivalence)
// - error.rs: error enums for each failure family
//
// Library code logs through `tracing` and never installs a subscriber.

mod canon;
pub mod error;
pub mod notes;
pub mod pcset;
pub mod relations;
pub mod tone_row;
pub mod transform;

pub use error::{DefinitionError, PcSetError, PolarityError, ToneRowError, TranslationError};
pub use notes::{NoteStyle, Spelling, notes, pcfor};
pub use pcset::{Definition, PITCH_CLASSES, PcSet, pitch_class};
pub use relations::{OpSet, Polarity};
pub use tone_row::ToneRow;
pub use transform::Transform;
