// Canonical forms: normal, reduced, and prime.
//
// All three rank candidate arrangements by `binary_value()` of the
// zero-transposed candidate. That mask is smallest when elements are packed
// toward pitch class 0, which picks the smallest span first and the most
// left-packed arrangement among equal spans.
//
// Normal form scans the rotations of the sorted set. The scan is seeded with
// the last rotation and only a strictly smaller mask replaces the current
// best, so for rotationally symmetric sets (where several rotations tie) the
// last rotation is the one returned. Reduced and prime forms are unaffected
// by that choice because tied rotations zero-transpose to the same sequence.

use crate::pcset::PcSet;

impl PcSet {
    /// The rotation of the sorted set packed most tightly to the left.
    /// Sets with fewer than two elements are returned as-is.
    pub fn normal(&self) -> PcSet {
        let size = self.len();
        if size < 2 {
            return self.clone();
        }
        let sorted = self.sort();
        let last = size as i64 - 1;

        let mut best = sorted.shift(last);
        let mut best_value = best.zero().binary_value();
        for n in 0..last {
            let candidate = sorted.shift(n);
            let value = candidate.zero().binary_value();
            if value < best_value {
                best = candidate;
                best_value = value;
            }
        }
        best
    }

    /// Normal form transposed to start on 0. Equal for every member of a
    /// transposition class.
    pub fn reduced(&self) -> PcSet {
        self.normal().zero()
    }

    /// The representative of the set's full Tn/TnI class: whichever of the
    /// reduced form and the inversion's reduced form has the smaller mask.
    pub fn prime(&self) -> PcSet {
        let original = self.reduced();
        let inverted = self.invert().reduced();
        if original.binary_value() < inverted.binary_value() {
            original
        } else {
            inverted
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pcset::PcSet;

    fn pcs(spec: &str) -> PcSet {
        spec.parse().unwrap()
    }

    #[test]
    fn test_normal_dominant_seventh() {
        let g7 = pcs("7B25");
        assert_eq!(g7.normal().as_slice(), &[11, 2, 5, 7]);
    }

    #[test]
    fn test_normal_is_order_independent() {
        assert_eq!(pcs("52B7").normal(), pcs("7B25").normal());
    }

    #[test]
    fn test_normal_triads() {
        assert_eq!(pcs("047").normal().to_string(), "047");
        assert_eq!(pcs("914").normal().to_string(), "914");
        assert_eq!(pcs("904").normal().to_string(), "904");
    }

    #[test]
    fn test_normal_symmetric_set_keeps_last_rotation() {
        // Every rotation of the augmented triad ties; the seed rotation wins.
        assert_eq!(pcs("048").normal().to_string(), "480");
        assert_eq!(pcs("048").reduced().to_string(), "048");
    }

    #[test]
    fn test_normal_short_sets() {
        assert!(PcSet::empty().normal().is_empty());
        assert_eq!(pcs("5").normal().to_string(), "5");
    }

    #[test]
    fn test_reduced() {
        assert_eq!(PcSet::from_pcs([9, 1, 4]).reduced().as_slice(), &[0, 4, 7]);
        assert_eq!(pcs("904").reduced().to_string(), "037");
        assert_eq!(pcs("5").reduced().to_string(), "0");
        assert!(PcSet::empty().reduced().is_empty());
    }

    #[test]
    fn test_prime_major_scale_family() {
        assert_eq!(pcs("9B12468").prime().to_string(), "013568A");
        assert_eq!(pcs("024579B").prime().to_string(), "013568A");
    }

    #[test]
    fn test_prime_half_diminished() {
        assert_eq!(pcs("7B25").prime().to_string(), "0258");
    }

    #[test]
    fn test_prime_major_and_minor_triads_agree() {
        for spec in ["047", "914", "904", "037"] {
            assert_eq!(pcs(spec).prime().to_string(), "037", "prime of {spec}");
        }
    }

    #[test]
    fn test_prime_empty_and_full() {
        assert!(PcSet::empty().prime().is_empty());
        assert_eq!(PcSet::chromatic().prime().to_string(), "0123456789AB");
    }
}
