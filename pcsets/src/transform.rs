// The transposition/inversion group action shared by sets and rows.
//
// `PcSet` and `ToneRow` both support T and I, but only sets have canonical
// forms; rows keep their order as their identity. The trait captures the
// part they share so generic code (e.g. searching a transformation family)
// can work over either without pulling in set-only operations.

use crate::pcset::PcSet;

pub trait Transform: Sized {
    /// Map every element `e` to `(12 - e) mod 12`.
    fn invert(&self) -> Self;

    /// Add `n` mod 12 to every element.
    fn transpose(&self, n: i64) -> Self;

    /// Invert, then transpose by `n`.
    fn tni(&self, n: i64) -> Self {
        self.invert().transpose(n)
    }

    /// Inversion about the axis exchanging `x` and `y`.
    fn ixy(&self, x: i64, y: i64) -> Self {
        self.tni(x + y)
    }

    /// All 24 images under T0..T11 followed by T0I..T11I.
    fn orbit(&self) -> Vec<Self> {
        let inverted = self.invert();
        (0..12)
            .map(|n| self.transpose(n))
            .chain((0..12).map(|n| inverted.transpose(n)))
            .collect()
    }
}

impl Transform for PcSet {
    fn invert(&self) -> Self {
        PcSet::invert(self)
    }

    fn transpose(&self, n: i64) -> Self {
        PcSet::transpose(self, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family_primes<T: Transform>(item: &T, prime_of: impl Fn(&T) -> PcSet) -> Vec<PcSet> {
        item.orbit().iter().map(prime_of).collect()
    }

    #[test]
    fn test_trait_agrees_with_inherent_methods() {
        let set: PcSet = "0146".parse().unwrap();
        assert_eq!(Transform::invert(&set), set.invert());
        assert_eq!(Transform::transpose(&set, 5), set.transpose(5));
        assert_eq!(Transform::tni(&set, 5), set.tni(5));
        assert_eq!(Transform::ixy(&set, 1, 4), set.ixy(1, 4));
    }

    #[test]
    fn test_orbit_shares_one_prime() {
        let set: PcSet = "047A".parse().unwrap();
        let orbit = set.orbit();
        assert_eq!(orbit.len(), 24);
        assert_eq!(orbit[0], set);
        assert_eq!(orbit[12], set.invert());
        let primes = family_primes(&set, PcSet::prime);
        assert!(primes.iter().all(|p| *p == set.prime()));
    }
}
