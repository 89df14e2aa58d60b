// Ordered twelve-tone rows.
//
// A `ToneRow` holds all 12 pitch classes in a fixed order. Unlike `PcSet`,
// its order is its identity: there are no canonical forms, and the four
// classical row forms (P, R, I, RI) are all expressed as "derive an ordering,
// then transpose so it starts on n".
//
// Row equivalence compares every form's P0 against the other row's P0, so
// it ignores transposition but not rotation; `rotequiv` extends that across
// all 12 rotations.

use std::fmt;
use std::str::FromStr;

use pcsets_prng::RowRng;
use serde::{Deserialize, Serialize};

use crate::error::ToneRowError;
use crate::pcset::{Definition, PITCH_CLASSES, PcSet, pitch_class};
use crate::transform::Transform;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ToneRow {
    row: [u8; PITCH_CLASSES],
}

impl ToneRow {
    /// Build a row from any set definition. Duplicates collapse as they do
    /// for `PcSet`, so the definition must name all 12 classes.
    pub fn new(definition: impl Into<Definition>) -> Result<Self, ToneRowError> {
        let set = PcSet::new(definition)?;
        Self::from_pcset(&set)
    }

    pub fn from_pcset(set: &PcSet) -> Result<Self, ToneRowError> {
        if set.len() != PITCH_CLASSES {
            return Err(ToneRowError::Incomplete {
                found: set.to_string(),
                len: set.len(),
            });
        }
        let mut row = [0u8; PITCH_CLASSES];
        row.copy_from_slice(set.as_slice());
        Ok(Self { row })
    }

    /// A uniformly shuffled row, reproducible from the generator's seed.
    pub fn random(rng: &mut RowRng) -> Self {
        let mut row: [u8; PITCH_CLASSES] = std::array::from_fn(|pc| pc as u8);
        rng.shuffle(&mut row);
        Self { row }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.row
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.row.iter().copied()
    }

    pub fn first(&self) -> u8 {
        self.row[0]
    }

    /// The row as a (complete) pitch class set, keeping its order.
    pub fn as_pcset(&self) -> PcSet {
        PcSet::from_pcs(self.row.iter().map(|&pc| i64::from(pc)))
    }

    fn map(&self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            row: self.row.map(f),
        }
    }

    fn reversed(&self) -> Self {
        let mut row = self.row;
        row.reverse();
        Self { row }
    }

    /// Transpose so the row begins on `n`.
    fn starting_on(&self, n: i64) -> Self {
        self.transpose(n - i64::from(self.first()))
    }

    // ---- row forms ----

    /// Prime form starting on `n`.
    pub fn p(&self, n: i64) -> Self {
        self.starting_on(n)
    }

    /// Retrograde starting on `n`.
    pub fn r(&self, n: i64) -> Self {
        self.reversed().starting_on(n)
    }

    /// Inversion starting on `n`.
    pub fn i(&self, n: i64) -> Self {
        self.invert().starting_on(n)
    }

    /// Retrograde of the inversion, starting on `n`.
    pub fn ri(&self, n: i64) -> Self {
        self.invert().reversed().starting_on(n)
    }

    /// Rotate right by `i` positions (`shift(1)` moves the last element to
    /// the front). Negative amounts rotate left.
    pub fn shift(&self, i: i64) -> Self {
        let mut row = self.row;
        row.rotate_right(i.rem_euclid(PITCH_CLASSES as i64) as usize);
        Self { row }
    }

    /// Shift by `i`, then start on `n`.
    pub fn rotate(&self, i: i64, n: i64) -> Self {
        self.shift(i).starting_on(n)
    }

    /// Ascending interval from each element to the next, wrapping from the
    /// last element back to the first.
    pub fn contour(&self) -> [u8; PITCH_CLASSES] {
        std::array::from_fn(|k| {
            let here = i64::from(self.row[k]);
            let next = i64::from(self.row[(k + 1) % PITCH_CLASSES]);
            pitch_class(next - here)
        })
    }
}

impl Transform for ToneRow {
    fn invert(&self) -> Self {
        self.map(|pc| pitch_class(-i64::from(pc)))
    }

    fn transpose(&self, n: i64) -> Self {
        let n = i64::from(pitch_class(n));
        self.map(|pc| pitch_class(i64::from(pc) + n))
    }
}

/// True when `b` is some transposition of `a`'s prime, retrograde,
/// inversion, or retrograde-inversion.
pub fn equivalent(a: &ToneRow, b: &ToneRow) -> bool {
    let target = b.p(0);
    [a.p(0), a.i(0), a.r(0), a.ri(0)].contains(&target)
}

/// True when some rotation of `a` is `equivalent` to `b`.
pub fn rotequiv(a: &ToneRow, b: &ToneRow) -> bool {
    (0..PITCH_CLASSES as i64).any(|i| equivalent(&a.shift(i), b))
}

impl FromStr for ToneRow {
    type Err = ToneRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ToneRow {
    type Error = ToneRowError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl TryFrom<&PcSet> for ToneRow {
    type Error = ToneRowError;

    fn try_from(set: &PcSet) -> Result<Self, Self::Error> {
        Self::from_pcset(set)
    }
}

impl From<ToneRow> for String {
    fn from(row: ToneRow) -> Self {
        row.to_string()
    }
}

impl fmt::Display for ToneRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_pcset(), f)
    }
}
