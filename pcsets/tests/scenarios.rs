// End-to-end checks through the public API: the worked examples from set
// theory texts, boundary cases around the empty set, and the note-name and
// tone-row layers on top of the core.

use pcsets::relations::{fit_in, op_path, prime_subset_of, symmetry, zpair};
use pcsets::{NoteStyle, PcSet, PcSetError, ToneRow, Transform, notes, pcfor};

fn pcs(spec: &str) -> PcSet {
    spec.parse().unwrap()
}

#[test]
fn major_scale_prime_form() {
    let a_major: PcSet = PcSet::from_pcs([9, 11, 1, 2, 4, 6, 8]);
    assert_eq!(a_major.prime().to_string(), "013568A");
}

#[test]
fn major_and_minor_triads_are_related_by_transposition() {
    let ops = op_path(&pcs("047"), &pcs("914"));
    assert_eq!(ops.tn(), &[9]);
    assert!(ops.tni().is_empty());
    assert_eq!(ops.to_string(), "T(9)");
}

#[test]
fn dominant_seventh_fits_in_major_scale() {
    let ops = fit_in(&pcs("024579B"), &pcs("047A"));
    assert_eq!(ops.tn(), &[7]);
    assert_eq!(ops.tni(), &[9]);
    assert_eq!(ops.to_string(), "T(7) T(9)I");
    assert!(prime_subset_of(&pcs("024579B"), &pcs("047A")));
}

#[test]
fn classic_z_pair() {
    let a = PcSet::from_pcs([0, 1, 3, 5, 6]);
    let b = PcSet::from_pcs([0, 1, 2, 4, 7]);
    assert!(zpair(&a, &b));
    assert_ne!(a.prime(), b.prime());
}

#[test]
fn augmented_triad_symmetry() {
    assert_eq!(symmetry(&pcs("048")), 3);
}

#[test]
fn empty_set_boundary() {
    let empty = PcSet::empty();
    assert!(empty.prime().is_empty());
    assert!(empty.normal().is_empty());
    assert!(empty.reduced().is_empty());

    let ops = op_path(&empty, &empty);
    let all: Vec<u8> = (0..12).collect();
    assert_eq!(ops.tn(), all.as_slice());
    assert_eq!(ops.tni(), all.as_slice());
}

#[test]
fn orbit_members_share_op_paths() {
    let set = pcs("0137");
    for image in set.orbit() {
        assert!(op_path(&set, &image).any(), "no path to {image}");
    }
}

#[test]
fn note_names_round_trip_through_sets() {
    let g7 = pcfor("G B D F").unwrap();
    assert_eq!(g7.to_string(), "7B25");
    assert_eq!(g7.prime().to_string(), "0258");
    assert_eq!(notes(&g7, NoteStyle::default()), "G B D F");
    assert_eq!(notes(&g7.transpose(6), NoteStyle::default()), "C# F Ab B");
}

#[test]
fn tone_row_bridges_to_set_analysis() {
    let row: ToneRow = "015762AB3984".parse().unwrap();
    let set = row.as_pcset();
    assert_eq!(set.len(), 12);
    assert_eq!(set.prime(), PcSet::chromatic());
    assert_eq!(row.p(0).to_string(), "015762AB3984");
}

#[test]
fn errors_convert_into_umbrella() {
    fn analyse(notes: &str, row: &str) -> Result<String, PcSetError> {
        let set = pcfor(notes)?;
        let row: ToneRow = row.parse()?;
        Ok(format!("{} {}", set.prime(), row.i(0)))
    }

    assert!(analyse("C E G", "0123456789AB").is_ok());
    assert!(matches!(analyse("C H", "0123456789AB"), Err(PcSetError::Translation(_))));
    assert!(matches!(analyse("C E G", "0123"), Err(PcSetError::ToneRow(_))));
}

#[test]
fn sets_serialize_as_spec_strings() {
    let set = pcs("B30");
    let json = serde_json::to_string(&set).unwrap();
    assert_eq!(json, "\"B30\"");
    let from_list: PcSet = serde_json::from_str("[11, 3, 0]").unwrap();
    assert_eq!(from_list, set);
}
