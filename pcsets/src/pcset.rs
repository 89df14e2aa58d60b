// The pitch class set value type and its single-set operators.
//
// A `PcSet` is an ordered, duplicate-free sequence of pitch classes 0-11.
// Order is preserved because several operators (shift, zero, reverse) and
// exact equality depend on it, even though most relations treat the set as
// unordered. Every operator returns a new set; nothing mutates in place.
//
// Construction goes through `Definition`, a tagged union with one variant
// per accepted input shape. Each variant is validated on its own and then
// reduced mod 12 and de-duplicated (first occurrence wins). Integer and
// bitmask constructors that cannot fail skip `Definition` entirely.
//
// Canonical forms (normal/reduced/prime) live in `canon.rs`; relations
// between two sets live in `relations.rs`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;

use crate::error::DefinitionError;

/// Number of pitch classes in the octave.
pub const PITCH_CLASSES: usize = 12;

const SPEC_CHARS: &[u8; PITCH_CLASSES] = b"0123456789AB";

/// Reduce any integer to its pitch class (Euclidean remainder, so -1 is 11).
pub fn pitch_class(n: i64) -> u8 {
    n.rem_euclid(PITCH_CLASSES as i64) as u8
}

/// Source material for a `PcSet`, one variant per accepted input shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Definition {
    /// Compact spec string: `0-9`, then `A` = 10 and `B` = 11.
    Spec(String),
    /// Arbitrary integers, each reduced mod 12.
    Integers(Vec<i64>),
    /// Real numbers, truncated toward zero and then reduced mod 12.
    Reals(Vec<f64>),
    /// Textual tokens: decimal integers, or `A` / `B`. Surrounding
    /// whitespace is ignored.
    Tokens(Vec<String>),
}

impl Definition {
    fn into_pitch_classes(self) -> Result<Vec<u8>, DefinitionError> {
        match self {
            Definition::Spec(spec) => spec.chars().map(spec_char).collect(),
            Definition::Integers(values) => Ok(values.into_iter().map(pitch_class).collect()),
            Definition::Reals(values) => values.into_iter().map(real_pitch_class).collect(),
            Definition::Tokens(tokens) => tokens
                .iter()
                .map(|t| token_value(t).map(pitch_class))
                .collect(),
        }
    }
}

impl From<&str> for Definition {
    fn from(spec: &str) -> Self {
        Definition::Spec(spec.to_owned())
    }
}

impl From<Vec<i64>> for Definition {
    fn from(values: Vec<i64>) -> Self {
        Definition::Integers(values)
    }
}

impl From<Vec<f64>> for Definition {
    fn from(values: Vec<f64>) -> Self {
        Definition::Reals(values)
    }
}

/// JSON strings are spec strings and JSON arrays are element lists. Any
/// other JSON value is rejected as non-iterable.
impl TryFrom<Value> for Definition {
    type Error = DefinitionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(spec) => Ok(Definition::Spec(spec)),
            Value::Array(items) => items
                .iter()
                .map(json_element)
                .collect::<Result<Vec<_>, _>>()
                .map(Definition::Integers),
            other => Err(DefinitionError::NonIterable(format!(
                "{other} ({})",
                json_kind(&other)
            ))),
        }
    }
}

fn spec_char(ch: char) -> Result<u8, DefinitionError> {
    match ch {
        '0'..='9' => Ok(ch as u8 - b'0'),
        'A' => Ok(10),
        'B' => Ok(11),
        _ => Err(DefinitionError::IllegalCharacter(ch.to_string())),
    }
}

fn token_value(token: &str) -> Result<i64, DefinitionError> {
    match token.trim() {
        "A" => Ok(10),
        "B" => Ok(11),
        trimmed => trimmed
            .parse::<i64>()
            .map_err(|_| DefinitionError::IllegalCharacter(token.to_owned())),
    }
}

/// Truncate toward zero, then reduce mod 12. The reduction happens on the
/// float so magnitudes past the `i64` range still land on the right class.
fn real_pitch_class(x: f64) -> Result<u8, DefinitionError> {
    if x.is_finite() {
        Ok(x.trunc().rem_euclid(PITCH_CLASSES as f64) as u8)
    } else {
        Err(DefinitionError::IllegalCharacter(x.to_string()))
    }
}

fn json_element(value: &Value) -> Result<i64, DefinitionError> {
    match value {
        Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Ok(i),
            (None, Some(u)) => Ok((u % PITCH_CLASSES as u64) as i64),
            (None, None) => real_pitch_class(n.as_f64().unwrap_or(f64::NAN)).map(i64::from),
        },
        Value::String(token) => token_value(token),
        other => Err(DefinitionError::IllegalCharacter(other.to_string())),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An ordered, duplicate-free collection of pitch classes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "Value")]
pub struct PcSet {
    pcs: SmallVec<[u8; PITCH_CLASSES]>,
}

impl PcSet {
    /// Build a set from any accepted definition shape.
    pub fn new(definition: impl Into<Definition>) -> Result<Self, DefinitionError> {
        let pcs = definition.into().into_pitch_classes()?;
        Ok(Self::from_unique(pcs))
    }

    /// Build a set from integers; never fails since every integer has a
    /// pitch class.
    pub fn from_pcs<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self::from_unique(values.into_iter().map(pitch_class))
    }

    /// Decode a 12-bit membership mask (bit `i` set means pitch class `i`
    /// is present) into an ascending set. Bits above 11 are ignored.
    pub fn from_bits(bits: u16) -> Self {
        Self::from_unique((0..PITCH_CLASSES as u8).filter(|&pc| bits & (1 << pc) != 0))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// All twelve pitch classes, ascending.
    pub fn chromatic() -> Self {
        Self::from_bits(0x0FFF)
    }

    /// Keep the first occurrence of each value. Inputs must already be < 12.
    fn from_unique<I: IntoIterator<Item = u8>>(values: I) -> Self {
        let mut seen = 0u16;
        let mut pcs = SmallVec::new();
        for pc in values {
            debug_assert!((pc as usize) < PITCH_CLASSES);
            if seen & (1 << pc) == 0 {
                seen |= 1 << pc;
                pcs.push(pc);
            }
        }
        PcSet { pcs }
    }

    pub fn len(&self) -> usize {
        self.pcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pcs.is_empty()
    }

    /// Elements in their current order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.pcs.iter().copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.pcs
    }

    pub fn contains(&self, pc: u8) -> bool {
        self.pcs.contains(&pc)
    }

    /// The 12-bit membership mask: the sum of `2^pc` over all elements.
    /// Unique per unordered set, so it doubles as the packing metric used by
    /// the canonical forms.
    pub fn binary_value(&self) -> u16 {
        self.pcs.iter().fold(0, |acc, &pc| acc | (1 << pc))
    }

    // -----------------------------------------------------------------------
    // Fundamental operators
    // -----------------------------------------------------------------------

    /// Map every element `e` to `(12 - e) mod 12`.
    pub fn invert(&self) -> PcSet {
        self.map(|pc| pitch_class(PITCH_CLASSES as i64 - pc as i64))
    }

    /// Add `n` (any integer, reduced mod 12) to every element.
    pub fn transpose(&self, n: i64) -> PcSet {
        let n = pitch_class(n);
        self.map(|pc| (pc + n) % PITCH_CLASSES as u8)
    }

    fn map(&self, f: impl Fn(u8) -> u8) -> PcSet {
        // Inversion and transposition are bijections on 0..12, so the
        // result can never contain a duplicate.
        PcSet {
            pcs: self.pcs.iter().map(|&pc| f(pc)).collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Set operations
    // -----------------------------------------------------------------------

    /// The pitch classes not in this set, ascending.
    pub fn complement(&self) -> PcSet {
        PcSet::from_bits(!self.binary_value() & 0x0FFF)
    }

    pub fn reverse(&self) -> PcSet {
        PcSet {
            pcs: self.pcs.iter().rev().copied().collect(),
        }
    }

    /// Elements in ascending numeric order.
    pub fn sort(&self) -> PcSet {
        let mut pcs = self.pcs.clone();
        pcs.sort_unstable();
        PcSet { pcs }
    }

    /// Rotate the element order right by `n` places: with `n = 1` the last
    /// element becomes the first. Negative `n` rotates left. Sets of length
    /// 0 or 1 come back unchanged.
    pub fn shift(&self, n: i64) -> PcSet {
        let mut pcs = self.pcs.clone();
        if pcs.len() > 1 {
            let places = n.rem_euclid(pcs.len() as i64) as usize;
            pcs.rotate_right(places);
        }
        PcSet { pcs }
    }

    /// Transpose so the first element (in current order) becomes 0.
    pub fn zero(&self) -> PcSet {
        match self.pcs.first() {
            Some(&first) => self.transpose(-(first as i64)),
            None => self.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // Analysis
    // -----------------------------------------------------------------------

    /// Interval-class vector: how many unordered pairs of elements lie 1, 2,
    /// ... 6 semitones apart (the tritone counted once).
    pub fn ivec(&self) -> [u8; 6] {
        let mut ivec = [0u8; 6];
        for (i, &a) in self.pcs.iter().enumerate() {
            for &b in &self.pcs[i + 1..] {
                let distance = (a + PITCH_CLASSES as u8 - b) % PITCH_CLASSES as u8;
                let class = distance.min(PITCH_CLASSES as u8 - distance);
                ivec[class as usize - 1] += 1;
            }
        }
        ivec
    }

    /// Common-tone vector: entry `n` is the number of elements this set
    /// shares with its `TnI(n)` image. Tallies `(x + y) mod 12` over every
    /// ordered pair, since `y = n - x` is exactly the condition for `x` to
    /// land on `y` under `TnI(n)`.
    pub fn cvec(&self) -> [u8; PITCH_CLASSES] {
        let mut cvec = [0u8; PITCH_CLASSES];
        for &x in &self.pcs {
            for &y in &self.pcs {
                cvec[((x + y) as usize) % PITCH_CLASSES] += 1;
            }
        }
        cvec
    }

    // -----------------------------------------------------------------------
    // Shorthand
    // -----------------------------------------------------------------------

    /// `Tn`: shorthand for `transpose(n)`.
    pub fn tn(&self, n: i64) -> PcSet {
        self.transpose(n)
    }

    /// `TnI`: invert, then transpose by `n`.
    pub fn tni(&self, n: i64) -> PcSet {
        self.invert().transpose(n)
    }

    /// Inversion about the axis that swaps `x` and `y`.
    pub fn ixy(&self, x: i64, y: i64) -> PcSet {
        self.tni(x + y)
    }
}

impl FromStr for PcSet {
    type Err = DefinitionError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        PcSet::new(spec)
    }
}

impl TryFrom<Value> for PcSet {
    type Error = DefinitionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        PcSet::new(Definition::try_from(value)?)
    }
}

impl FromIterator<u8> for PcSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        PcSet::from_unique(iter.into_iter().map(|pc| pc % PITCH_CLASSES as u8))
    }
}

impl<'a> IntoIterator for &'a PcSet {
    type Item = u8;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pcs.iter().copied()
    }
}

impl From<PcSet> for String {
    fn from(pcs: PcSet) -> Self {
        pcs.to_string()
    }
}

/// Renders the spec string, e.g. `9B12468`. The empty set renders as `""`.
impl fmt::Display for PcSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &pc in &self.pcs {
            write!(f, "{}", SPEC_CHARS[pc as usize] as char)?;
        }
        Ok(())
    }
}
