// Translation between pitch class sets and note names.
//
// Reading (`pcfor`) accepts whitespace-separated note names: a letter A-G
// plus at most one accidental. Writing (`notes`) has three spellings. Flats
// and Sharps spell every black key the same way. MinimumConflict tries every
// flat/sharp combination for the black keys in the set and keeps the one
// that reads best:
//
//   1. fewest letters used twice or more (a letter used twice costs 1, three
//      or more times costs 5)
//   2. fewest adjacent notes sharing a letter
//   3. most common accidental spellings (see POPULARITY)
//   4. alphabetically first
//
// Each stage only breaks ties left by the previous one. A set has at most 5
// black keys, so at most 32 candidates are scored.

use serde::{Deserialize, Serialize};

use crate::error::TranslationError;
use crate::pcset::{PITCH_CLASSES, PcSet};

const FLAT_NAMES: [&str; PITCH_CLASSES] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

const SHARP_NAMES: [&str; PITCH_CLASSES] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Accidental spellings from least to most common. A spelling scores its
/// index; naturals score 0.
const POPULARITY: [&str; 10] = ["A#", "Gb", "D#", "Db", "G#", "Ab", "C#", "Eb", "F#", "Bb"];

const LETTERS: &str = "CDEFGAB";

const FLAT: char = '\u{266D}';
const SHARP: char = '\u{266F}';
const NATURAL: char = '\u{266E}';

/// How black keys are named when rendering a set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    MinimumConflict,
    Flats,
    Sharps,
}

/// Rendering options for `notes`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteStyle {
    pub spelling: Spelling,
    /// Use the music symbols U+266D and U+266F instead of `b` and `#`.
    pub unicode: bool,
}

impl NoteStyle {
    pub fn flats() -> Self {
        Self {
            spelling: Spelling::Flats,
            unicode: false,
        }
    }

    pub fn sharps() -> Self {
        Self {
            spelling: Spelling::Sharps,
            unicode: false,
        }
    }

    pub fn with_unicode(self) -> Self {
        Self {
            unicode: true,
            ..self
        }
    }
}

// ---- reading ----

fn natural(letter: char) -> Option<i64> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

fn pitch_class_of(note: &str) -> Result<i64, TranslationError> {
    let mut chars = note.chars();
    if note.chars().count() > 2 {
        return Err(TranslationError::NoteFormat(note.to_string()));
    }
    let base = chars
        .next()
        .and_then(natural)
        .ok_or_else(|| TranslationError::IllegalNote(note.to_string()))?;
    match chars.next() {
        None | Some(NATURAL) => Ok(base),
        Some('b' | FLAT) => Ok(base - 1),
        Some('#' | SHARP) => Ok(base + 1),
        Some(modifier) => Err(TranslationError::IllegalModifier {
            modifier,
            note: note.to_string(),
        }),
    }
}

/// Parse whitespace-separated note names into a set, in the order given.
/// Enharmonic duplicates collapse to the first occurrence. Empty text gives
/// the empty set.
pub fn pcfor(text: &str) -> Result<PcSet, TranslationError> {
    let pcs = text
        .split_whitespace()
        .map(pitch_class_of)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PcSet::from_pcs(pcs))
}

// ---- writing ----

/// Space-separated note names for `pcs`, in set order.
pub fn notes(pcs: &PcSet, style: NoteStyle) -> String {
    let text = match style.spelling {
        Spelling::Flats => spell_with(pcs, &FLAT_NAMES),
        Spelling::Sharps => spell_with(pcs, &SHARP_NAMES),
        Spelling::MinimumConflict => minimum_conflict(pcs),
    };
    if style.unicode {
        text.chars()
            .map(|c| match c {
                'b' => FLAT,
                '#' => SHARP,
                other => other,
            })
            .collect()
    } else {
        text
    }
}

fn spell_with(pcs: &PcSet, names: &[&str; PITCH_CLASSES]) -> String {
    pcs.iter()
        .map(|pc| names[usize::from(pc)])
        .collect::<Vec<_>>()
        .join(" ")
}

fn minimum_conflict(pcs: &PcSet) -> String {
    let mut candidates: Vec<Vec<&'static str>> = vec![Vec::with_capacity(pcs.len())];
    for pc in pcs {
        let flat = FLAT_NAMES[usize::from(pc)];
        let sharp = SHARP_NAMES[usize::from(pc)];
        if flat == sharp {
            for candidate in &mut candidates {
                candidate.push(flat);
            }
        } else {
            let mut sharps = candidates.clone();
            for candidate in &mut candidates {
                candidate.push(flat);
            }
            for candidate in &mut sharps {
                candidate.push(sharp);
            }
            candidates.extend(sharps);
        }
    }

    keep_best(&mut candidates, |names| letter_conflict(&names.join(" ")));
    keep_best(&mut candidates, neighbor_conflict);
    keep_best(&mut candidates, popularity);

    candidates
        .into_iter()
        .map(|names| names.join(" "))
        .min()
        .unwrap_or_default()
}

/// Retain only the candidates with the highest score.
fn keep_best(candidates: &mut Vec<Vec<&'static str>>, score: impl Fn(&[&str]) -> i32) {
    if candidates.len() < 2 {
        return;
    }
    let scores: Vec<i32> = candidates.iter().map(|c| score(c.as_slice())).collect();
    let Some(&best) = scores.iter().max() else {
        return;
    };
    let mut scores = scores.into_iter();
    candidates.retain(|_| scores.next() == Some(best));
}

/// Letters repeated anywhere in the spelling.
fn letter_conflict(text: &str) -> i32 {
    LETTERS
        .chars()
        .map(|letter| match text.matches(letter).count() {
            0 | 1 => 0,
            2 => -1,
            _ => -5,
        })
        .sum()
}

/// Adjacent names sharing a letter, e.g. `Eb E`.
fn neighbor_conflict(names: &[&str]) -> i32 {
    -(names
        .windows(2)
        .filter(|pair| pair[0].chars().next() == pair[1].chars().next())
        .count() as i32)
}

fn popularity(names: &[&str]) -> i32 {
    names
        .iter()
        .filter_map(|name| POPULARITY.iter().position(|p| p == name))
        .map(|rank| rank as i32)
        .sum()
}
