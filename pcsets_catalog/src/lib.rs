// Prime Set Catalog
//
// Every one of the 4096 subsets of the twelve pitch classes reduces to one
// of 224 prime forms. `SetCatalog` finds them by brute force: enumerate each
// subset from its bitmask, take its prime form, and keep the first
// occurrence of each distinct prime. Entries are grouped into "pages" by
// cardinality (page 3 holds the 12 trichords, page 6 the 50 hexachords).
//
// The prime computations are independent, so they run on the rayon pool
// when `CatalogConfig::parallel` is set. Deduplication always runs
// sequentially in bitmask order afterwards, so page order is identical
// either way. Two primes are the same entry only if their ordered
// sequences match.
//
// The catalog is rebuilt on demand; nothing is cached on disk.

use std::fmt::Write as _;

use pcsets::{PITCH_CLASSES, PcSet};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Number of subsets of the twelve pitch classes.
pub const SUBSETS: u16 = 1 << PITCH_CLASSES;

/// Number of pages: one per cardinality 0..=12.
pub const PAGES: usize = PITCH_CLASSES + 1;

/// Build options.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Compute prime forms on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl CatalogConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The prime sets, paged by cardinality, each page in discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCatalog {
    pages: Vec<Vec<PcSet>>,
}

impl SetCatalog {
    pub fn build(config: &CatalogConfig) -> Self {
        tracing::debug!(parallel = config.parallel, "computing prime forms");
        let primes: Vec<PcSet> = if config.parallel {
            (0..SUBSETS)
                .into_par_iter()
                .map(|bits| PcSet::from_bits(bits).prime())
                .collect()
        } else {
            (0..SUBSETS)
                .map(|bits| PcSet::from_bits(bits).prime())
                .collect()
        };

        let mut seen: FxHashSet<PcSet> = FxHashSet::default();
        let mut pages: Vec<Vec<PcSet>> = vec![Vec::new(); PAGES];
        for prime in primes {
            if seen.insert(prime.clone()) {
                pages[prime.len()].push(prime);
            }
        }

        let catalog = Self { pages };
        tracing::debug!(primes = catalog.len(), "catalog built");
        catalog
    }

    /// Prime sets of cardinality `n`. Empty past 12.
    pub fn page(&self, n: usize) -> &[PcSet] {
        self.pages.get(n).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of prime sets.
    pub fn len(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every prime, smallest cardinality first.
    pub fn iter(&self) -> impl Iterator<Item = &PcSet> {
        self.pages.iter().flatten()
    }

    /// True if `set` is one of the catalog's entries, element order included.
    pub fn contains_prime(&self, set: &PcSet) -> bool {
        self.page(set.len()).contains(set)
    }

    /// The human-readable listing: a summary line, then each page's
    /// entries wrapped to roughly 60 columns.
    // Pages are separated by a blank line before each page (none trailing),
    // and entries wrap before a line would pass 60 columns, not after.
    pub fn listing(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Pitch Class Set Catalog: {} prime sets total", self.len());
        for n in 0..PAGES {
            let _ = writeln!(out);
            self.write_page(&mut out, n);
        }
        out
    }

    /// One page of the listing.
    pub fn page_listing(&self, n: usize) -> String {
        let mut out = String::new();
        self.write_page(&mut out, n);
        out
    }

    fn write_page(&self, out: &mut String, n: usize) {
        let page = self.page(n);
        let noun = if page.len() == 1 { "set" } else { "sets" };
        let _ = writeln!(out, "Cardinality {n}: {} prime {noun}", page.len());

        let mut line = String::new();
        for entry in page {
            let text = if entry.is_empty() {
                "[]".to_string()
            } else {
                entry.to_string()
            };
            if !line.is_empty() && line.len() + text.len() + 1 > 60 {
                let _ = writeln!(out, "    {line}");
                line.clear();
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&text);
        }
        if !line.is_empty() {
            let _ = writeln!(out, "    {line}");
        }
    }
}

impl<'a> IntoIterator for &'a SetCatalog {
    type Item = &'a PcSet;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Vec<PcSet>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter().flatten()
    }
}
