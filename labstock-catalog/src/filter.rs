// ---------------------------------------------------------------------------
// Catalog filter
// ---------------------------------------------------------------------------
//
// Pure view over the record list: free-text search ANDed with a category
// facet. No stored index — a linear scan is fine at catalog scale (tens to
// low hundreds of records).
// ---------------------------------------------------------------------------

use crate::types::Compound;

/// Category value that disables the facet predicate.
pub const ALL_CATEGORIES: &str = "all";

/// Filter records by a case-insensitive substring search over name,
/// description, and category, combined with an exact category facet.
///
/// Returns a fresh vector each call; the input is never mutated. An empty
/// `search` matches everything, as does `category == "all"`.
pub fn filter(compounds: &[Compound], search: &str, category: &str) -> Vec<Compound> {
	let needle = search.to_lowercase();

	compounds
		.iter()
		.filter(|c| matches_search(c, &needle))
		.filter(|c| category == ALL_CATEGORIES || c.category.as_str() == category)
		.cloned()
		.collect()
}

fn matches_search(compound: &Compound, needle: &str) -> bool {
	if needle.is_empty() {
		return true;
	}
	compound.name.to_lowercase().contains(needle)
		|| compound.description.to_lowercase().contains(needle)
		|| compound.category.as_str().contains(needle)
}
