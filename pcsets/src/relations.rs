// Relations between two pitch class sets.
//
// The core is `OpSet::search`: given a relation R and two sets, test R
// against all 24 members of the T/TnI group (12 transpositions of the set and
// 12 of its inversion) and record which `n` satisfy it. The search is
// exhaustive by construction; the group is tiny and fixed, so there is no
// pruning inside it. Pruning happens before it: `op_path` rejects on
// differing prime forms, and the subset searches reject when the container
// is smaller than the candidate.
//
// Polarity picks which operand is transformed. `Normal` tests R(Tn(a), b),
// `Reverse` tests R(a, Tn(b)). Polarity names coming in as text go through
// `Polarity::from_str`, the only place a bad value can appear.
//
// Everything else here is a pure predicate or a thin wrapper over a search:
// equality flavors, union/intersection, complement and subset relations,
// and Forte's similarity relations (Rp, R0, R1, R2, Z-pairs) computed from
// interval-class vectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::PolarityError;
use crate::pcset::{PITCH_CLASSES, PcSet};

/// Which operand a search transforms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Polarity {
    /// Transform `a`, hold `b` fixed.
    #[default]
    Normal,
    /// Hold `a` fixed, transform `b`.
    Reverse,
}

impl FromStr for Polarity {
    type Err = PolarityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Polarity::Normal),
            "reverse" => Ok(Polarity::Reverse),
            other => Err(PolarityError(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Polarity {
    type Error = PolarityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// The transformations under which a relation holds.
///
/// `tn` lists every `n` for which the relation holds after `Tn`; `tni` every
/// `n` for which it holds after `TnI`. Both ascending, either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OpSetFields")]
pub struct OpSet {
    tn: SmallVec<[u8; PITCH_CLASSES]>,
    tni: SmallVec<[u8; PITCH_CLASSES]>,
}

/// Unchecked wire shape of an `OpSet`.
#[derive(Deserialize)]
struct OpSetFields {
    tn: SmallVec<[u8; PITCH_CLASSES]>,
    tni: SmallVec<[u8; PITCH_CLASSES]>,
}

impl TryFrom<OpSetFields> for OpSet {
    type Error = String;

    fn try_from(fields: OpSetFields) -> Result<Self, Self::Error> {
        for (name, branch) in [("tn", &fields.tn), ("tni", &fields.tni)] {
            let ascending = branch.windows(2).all(|pair| pair[0] < pair[1]);
            let in_range = branch.iter().all(|&n| (n as usize) < PITCH_CLASSES);
            if !ascending || !in_range {
                return Err(format!(
                    "operator branch {name} must be strictly ascending values 0-11, found {branch:?}"
                ));
            }
        }
        Ok(Self {
            tn: fields.tn,
            tni: fields.tni,
        })
    }
}

impl OpSet {
    /// The result of a search that cannot match.
    pub fn none() -> Self {
        Self::default()
    }

    /// Run the 24-way search of `relation` over the T/TnI group.
    pub fn search<R>(relation: R, a: &PcSet, b: &PcSet, polarity: Polarity) -> Self
    where
        R: Fn(&PcSet, &PcSet) -> bool,
    {
        let mut result = OpSet::none();
        for n in 0..PITCH_CLASSES as u8 {
            let shift = n as i64;
            let (tn_holds, tni_holds) = match polarity {
                Polarity::Normal => (
                    relation(&a.transpose(shift), b),
                    relation(&a.tni(shift), b),
                ),
                Polarity::Reverse => (
                    relation(a, &b.transpose(shift)),
                    relation(a, &b.tni(shift)),
                ),
            };
            if tn_holds {
                result.tn.push(n);
            }
            if tni_holds {
                result.tni.push(n);
            }
        }
        tracing::trace!(%a, %b, ?polarity, result = %result, "operator search");
        result
    }

    /// Every `n` for which the relation holds after `Tn`, ascending.
    pub fn tn(&self) -> &[u8] {
        &self.tn
    }

    /// Every `n` for which the relation holds after `TnI`, ascending.
    pub fn tni(&self) -> &[u8] {
        &self.tni
    }

    /// True if any transformation matched.
    pub fn any(&self) -> bool {
        !self.tn.is_empty() || !self.tni.is_empty()
    }
}

/// Renders e.g. `T(7) T(9)I`, or `None` when nothing matched.
impl fmt::Display for OpSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.any() {
            return f.write_str("None");
        }
        let items = self
            .tn
            .iter()
            .map(|n| format!("T({n})"))
            .chain(self.tni.iter().map(|n| format!("T({n})I")));
        for (i, item) in items.enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&item)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

/// Same elements in the same order.
pub fn exact_equality(a: &PcSet, b: &PcSet) -> bool {
    a.as_slice() == b.as_slice()
}

/// Same elements, order ignored.
pub fn set_equality(a: &PcSet, b: &PcSet) -> bool {
    a.binary_value() == b.binary_value()
}

/// Members of the same Tn/TnI class.
pub fn same_prime(a: &PcSet, b: &PcSet) -> bool {
    exact_equality(&a.prime(), &b.prime())
}

// ---------------------------------------------------------------------------
// Transformation relationships
// ---------------------------------------------------------------------------

/// Every `Tn` and `TnI` taking `a` onto `b` (as unordered sets).
///
/// Sets with different prime forms are rejected without searching. When the
/// primes match, at least one transformation must exist; an empty search
/// then means the canonical forms or the search are broken, and panics.
pub fn op_path(a: &PcSet, b: &PcSet) -> OpSet {
    if !same_prime(a, b) {
        tracing::debug!(%a, %b, "op_path: prime forms differ, skipping search");
        return OpSet::none();
    }
    let result = OpSet::search(set_equality, a, b, Polarity::Normal);
    assert!(
        result.any(),
        "sets {a} and {b} share prime form {} but no Tn/TnI maps one onto the other",
        a.prime()
    );
    result
}

/// Number of inversion axes that map the set onto itself.
pub fn symmetry(a: &PcSet) -> usize {
    let size = a.len();
    a.cvec().iter().filter(|&&count| count as usize == size).count()
}

/// `b == Tn(a)` for some `n`.
pub fn rel_tn(a: &PcSet, b: &PcSet) -> bool {
    !op_path(a, b).tn().is_empty()
}

/// `b == TnI(a)` for some `n`.
pub fn rel_tni(a: &PcSet, b: &PcSet) -> bool {
    !op_path(a, b).tni().is_empty()
}

// ---------------------------------------------------------------------------
// Set operations
// ---------------------------------------------------------------------------

/// Elements of either set: `a` in order, then what `b` adds.
pub fn union(a: &PcSet, b: &PcSet) -> PcSet {
    a.iter().chain(b.iter()).collect()
}

/// Elements present in both sets, ascending.
pub fn common(a: &PcSet, b: &PcSet) -> PcSet {
    PcSet::from_bits(a.binary_value() & b.binary_value())
}

// ---------------------------------------------------------------------------
// Set relationships
// ---------------------------------------------------------------------------

/// Together the two sets cover all twelve pitch classes.
pub fn is_complement(a: &PcSet, b: &PcSet) -> bool {
    union(a, b).len() == PITCH_CLASSES
}

/// Some Tn/TnI image of `b` is the complement of `a`.
pub fn is_prime_complement(a: &PcSet, b: &PcSet) -> bool {
    same_prime(&a.complement(), b)
}

/// Every element of `b` is in `a`.
pub fn subset_of(a: &PcSet, b: &PcSet) -> bool {
    (b.binary_value() & !a.binary_value()) == 0
}

/// Transformations of `a` that contain `b`: `b ⊆ Tn(a)`, `b ⊆ TnI(a)`.
pub fn harmonize(a: &PcSet, b: &PcSet) -> OpSet {
    if a.len() < b.len() {
        return OpSet::none();
    }
    OpSet::search(subset_of, a, b, Polarity::Normal)
}

/// Transformations of `b` that fit inside `a`: `Tn(b) ⊆ a`, `TnI(b) ⊆ a`.
pub fn fit_in(a: &PcSet, b: &PcSet) -> OpSet {
    if a.len() < b.len() {
        return OpSet::none();
    }
    OpSet::search(subset_of, a, b, Polarity::Reverse)
}

/// Some Tn/TnI image of `b` is a subset of `a`.
pub fn prime_subset_of(a: &PcSet, b: &PcSet) -> bool {
    fit_in(a, b).any()
}

// ---------------------------------------------------------------------------
// Similarity (Forte)
// ---------------------------------------------------------------------------

/// Same size, and all but one element in common.
pub fn rp(a: &PcSet, b: &PcSet) -> bool {
    a.len() == b.len() && common(a, b).len() + 1 == a.len()
}

/// Transformations of `a` that stand in relation Rp to `b`.
pub fn rp_path(a: &PcSet, b: &PcSet) -> OpSet {
    if a.len() != b.len() {
        return OpSet::none();
    }
    OpSet::search(rp, a, b, Polarity::Normal)
}

/// Some Tn/TnI image of `a` is in relation Rp with `b`.
pub fn rp_prime(a: &PcSet, b: &PcSet) -> bool {
    rp_path(a, b).any()
}

/// Minimum similarity: same size, interval vectors differ at every position.
pub fn r0(a: &PcSet, b: &PcSet) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ivec().iter().zip(b.ivec().iter()).all(|(x, y)| x != y)
}

/// How two same-size interval vectors differ, for R1/R2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VectorDifference {
    /// Anything other than exactly two differing positions.
    Other,
    /// Exactly two positions differ and their values are swapped.
    Interchange,
    /// Exactly two positions differ, not by a swap.
    TwoPositions,
}

fn vector_difference(a: &PcSet, b: &PcSet) -> VectorDifference {
    if a.len() != b.len() {
        return VectorDifference::Other;
    }
    let (va, vb) = (a.ivec(), b.ivec());
    let misfits: SmallVec<[(u8, u8); 6]> = va
        .iter()
        .zip(vb.iter())
        .filter(|(x, y)| x != y)
        .map(|(&x, &y)| (x, y))
        .collect();
    match misfits.as_slice() {
        [(a0, b0), (a1, b1)] if a0 == b1 && b0 == a1 => VectorDifference::Interchange,
        [_, _] => VectorDifference::TwoPositions,
        _ => VectorDifference::Other,
    }
}

/// Maximum similarity by interchange: interval vectors differ in exactly two
/// positions whose values are swapped.
pub fn r1(a: &PcSet, b: &PcSet) -> bool {
    vector_difference(a, b) == VectorDifference::Interchange
}

/// Maximum similarity without interchange: interval vectors differ in
/// exactly two positions, not by a swap.
pub fn r2(a: &PcSet, b: &PcSet) -> bool {
    vector_difference(a, b) == VectorDifference::TwoPositions
}

/// Identical interval vectors. Does not exclude testing a set against
/// itself or against another member of its own class.
pub fn zpair(a: &PcSet, b: &PcSet) -> bool {
    a.ivec() == b.ivec()
}
