//! Heuristic category classifier.
//!
//! Scraped product listings rarely carry a usable category, so the catalog
//! category is inferred from well-known compound-name fragments. Lowercase
//! substring matching, first table that hits wins, `other` as the fallback.

use labstock_catalog_engine::types::Category;

const SARM_MARKERS: &[&str] = &["sarm", "mk-", "rad-", "lgd-"];
const PEPTIDE_MARKERS: &[&str] = &["peptide", "bpc", "tb-"];
const PCT_MARKERS: &[&str] = &["pct", "nolva", "clomid"];
const STEROID_MARKERS: &[&str] = &["test", "tren", "deca", "mast"];

/// Classify a product name into a catalog category.
pub fn classify(name: &str) -> Category {
    let name = name.to_lowercase();

    if SARM_MARKERS.iter().any(|m| name.contains(m)) {
        Category::Sarms
    } else if PEPTIDE_MARKERS.iter().any(|m| name.contains(m)) {
        Category::Peptides
    } else if PCT_MARKERS.iter().any(|m| name.contains(m)) {
        Category::Pct
    } else if STEROID_MARKERS.iter().any(|m| name.contains(m)) {
        Category::Steroids
    } else {
        Category::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_sarm_fragments() {
        assert_eq!(classify("Ostarine MK-2866"), Category::Sarms);
        assert_eq!(classify("RAD-140"), Category::Sarms);
        assert_eq!(classify("Some SARM blend"), Category::Sarms);
    }

    #[test]
    fn recognizes_peptides_and_pct() {
        assert_eq!(classify("BPC-157 5mg"), Category::Peptides);
        assert_eq!(classify("TB-500"), Category::Peptides);
        assert_eq!(classify("Nolvadex"), Category::Pct);
        assert_eq!(classify("clomid 50"), Category::Pct);
    }

    #[test]
    fn recognizes_steroid_fragments() {
        assert_eq!(classify("Testosterone Enanthate"), Category::Steroids);
        assert_eq!(classify("Tren Ace"), Category::Steroids);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("TESTOSTERONE"), Category::Steroids);
    }

    #[test]
    fn sarm_table_wins_over_steroid_table() {
        // "Testolone RAD-140" contains both "test" and "rad-"; the SARM
        // table is consulted first.
        assert_eq!(classify("Testolone RAD-140"), Category::Sarms);
    }

    #[test]
    fn unknown_names_fall_back_to_other() {
        assert_eq!(classify("Modafinil"), Category::Other);
        assert_eq!(classify(""), Category::Other);
    }
}
