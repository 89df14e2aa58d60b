// Catalog contents: page sizes, placement of well-known primes, and
// agreement between the serial and parallel builds.

use pcsets::relations::zpair;
use pcsets::{PcSet, ToneRow};
use pcsets_catalog::{CatalogConfig, PAGES, SetCatalog};

const PAGE_SIZES: [usize; PAGES] = [1, 1, 6, 12, 29, 38, 50, 38, 29, 12, 6, 1, 1];

fn serial() -> SetCatalog {
    SetCatalog::build(&CatalogConfig { parallel: false })
}

fn pcs(spec: &str) -> PcSet {
    spec.parse().unwrap()
}

#[test]
fn page_sizes() {
    let catalog = serial();
    for (n, &expected) in PAGE_SIZES.iter().enumerate() {
        assert_eq!(catalog.page(n).len(), expected, "page {n}");
    }
    assert_eq!(catalog.len(), 224);
    assert!(!catalog.is_empty());
    assert_eq!(catalog.iter().count(), 224);
}

#[test]
fn serial_and_parallel_builds_agree() {
    let parallel = SetCatalog::build(&CatalogConfig::default());
    assert_eq!(parallel, serial());
}

#[test]
fn entries_are_their_own_primes() {
    let catalog = serial();
    for (n, page) in (0..PAGES).map(|n| (n, catalog.page(n))) {
        for entry in page {
            assert_eq!(entry.len(), n);
            assert_eq!(&entry.prime(), entry);
        }
    }
}

#[test]
fn well_known_primes_are_listed() {
    let catalog = serial();
    for spec in ["037", "0258", "013568A", "048", "0369", "02468A"] {
        assert!(catalog.contains_prime(&pcs(spec)), "{spec} missing");
    }
    // Inverted forms are not primes.
    assert!(!catalog.contains_prime(&pcs("047")));
    assert!(catalog.contains_prime(&PcSet::empty()));
    assert!(catalog.contains_prime(&PcSet::chromatic()));
}

#[test]
fn pages_start_in_bitmask_order() {
    let catalog = serial();
    assert_eq!(catalog.page(1)[0].to_string(), "0");
    assert_eq!(catalog.page(2)[0].to_string(), "01");
    assert_eq!(catalog.page(3)[0].to_string(), "012");
    assert_eq!(catalog.page(12)[0].to_string(), "0123456789AB");
}

#[test]
fn iteration_runs_page_by_page() {
    let catalog = serial();
    let sizes: Vec<usize> = (&catalog).into_iter().map(PcSet::len).collect();
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn z_related_hexachords_exist() {
    let catalog = serial();
    let hexachords = catalog.page(6);
    let z_pairs = hexachords
        .iter()
        .enumerate()
        .flat_map(|(i, a)| hexachords[i + 1..].iter().map(move |b| (a, b)))
        .filter(|(a, b)| zpair(a, b))
        .count();
    assert_eq!(z_pairs, 15);
}

#[test]
fn random_rows_reduce_to_the_chromatic_prime() {
    let mut rng = pcsets_prng::RowRng::new(224);
    let catalog = serial();
    for _ in 0..8 {
        let row = ToneRow::random(&mut rng);
        assert!(catalog.contains_prime(&row.as_pcset().prime()));
    }
}

#[test]
fn serializes_as_pages_of_spec_strings() {
    let catalog = serial();
    let json = serde_json::to_value(&catalog).unwrap();
    assert_eq!(json["pages"][3][0], "012");
    let back: SetCatalog = serde_json::from_value(json).unwrap();
    assert_eq!(back, catalog);
}
