// ---------------------------------------------------------------------------
// Default catalog seed
// ---------------------------------------------------------------------------
//
// Installed by `CompoundStore` when the persistence slot is empty so the
// catalog is never blank on first launch. Nothing is written back until the
// first explicit save.
// ---------------------------------------------------------------------------

use crate::types::{Category, Compound, Source};

fn source(vendor: &str, price: f64, min_order: f64, shipping: f64) -> Source {
	Source {
		vendor: vendor.to_string(),
		price,
		min_order,
		shipping,
	}
}

fn compound(
	id: &str,
	name: &str,
	category: Category,
	description: &str,
	sources: Vec<Source>,
	dosage: &str,
	cycle: &str,
) -> Compound {
	Compound {
		id: id.to_string(),
		name: name.to_string(),
		category,
		description: description.to_string(),
		dosage: dosage.to_string(),
		cycle: cycle.to_string(),
		sources,
	}
}

/// The demo catalog shown before any user data exists.
pub fn default_compounds() -> Vec<Compound> {
	vec![
		compound(
			"1",
			"Ostarine (MK-2866)",
			Category::Sarms,
			"Mild SARM for muscle preservation and lean gains",
			vec![
				source("Source A", 45.99, 150.0, 15.0),
				source("Source B", 49.99, 200.0, 10.0),
				source("Source C", 42.99, 100.0, 20.0),
			],
			"10-25mg/day",
			"8-12 weeks",
		),
		compound(
			"2",
			"RAD-140 (Testolone)",
			Category::Sarms,
			"Potent SARM for strength and muscle gains",
			vec![
				source("Source A", 69.99, 150.0, 15.0),
				source("Source D", 64.99, 150.0, 12.0),
			],
			"10-20mg/day",
			"8-10 weeks",
		),
		compound(
			"3",
			"LGD-4033 (Ligandrol)",
			Category::Sarms,
			"Popular SARM for bulking cycles",
			vec![
				source("Source B", 59.99, 200.0, 10.0),
				source("Source E", 54.99, 175.0, 15.0),
			],
			"5-10mg/day",
			"8-10 weeks",
		),
		compound(
			"4",
			"BPC-157",
			Category::Peptides,
			"Healing peptide for injury recovery",
			vec![
				source("Source F", 89.99, 200.0, 20.0),
				source("Source G", 94.99, 150.0, 15.0),
			],
			"250-500mcg/day",
			"4-6 weeks",
		),
		compound(
			"5",
			"TB-500",
			Category::Peptides,
			"Recovery and healing peptide",
			vec![
				source("Source F", 119.99, 200.0, 20.0),
				source("Source H", 109.99, 250.0, 10.0),
			],
			"2-5mg/week",
			"4-8 weeks",
		),
		compound(
			"6",
			"Nolvadex (Tamoxifen)",
			Category::Pct,
			"SERM for post cycle therapy",
			vec![
				source("Source I", 34.99, 100.0, 15.0),
				source("Source J", 39.99, 150.0, 10.0),
			],
			"20-40mg/day",
			"4-6 weeks",
		),
		compound(
			"7",
			"Clomid (Clomiphene)",
			Category::Pct,
			"SERM for PCT and testosterone recovery",
			vec![
				source("Source I", 44.99, 100.0, 15.0),
				source("Source K", 49.99, 200.0, 12.0),
			],
			"25-50mg/day",
			"4-6 weeks",
		),
		compound(
			"8",
			"Modafinil",
			Category::Nootropics,
			"Wakefulness and focus enhancer",
			vec![
				source("Source L", 79.99, 150.0, 20.0),
				source("Source M", 74.99, 200.0, 15.0),
			],
			"100-200mg/day",
			"As needed",
		),
	]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seed_is_well_formed() {
		let compounds = default_compounds();
		assert_eq!(compounds.len(), 8);
		for c in &compounds {
			assert!(!c.id.is_empty());
			assert!(!c.name.is_empty());
			assert!(!c.sources.is_empty(), "{} has no sources", c.name);
		}
	}

	#[test]
	fn seed_ids_are_unique() {
		let compounds = default_compounds();
		let mut ids: Vec<_> = compounds.iter().map(|c| c.id.clone()).collect();
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), compounds.len());
	}
}
