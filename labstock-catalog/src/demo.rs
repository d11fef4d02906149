// ---------------------------------------------------------------------------
// Demo data batch
// ---------------------------------------------------------------------------
//
// Fictional prop compounds over a made-up vendor roster, for showcase
// environments. Ingested through `merge_append` like any scraped batch, so
// loading it twice duplicates it, same as any other merge.
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
	dosage: &str,
	cycle: &str,
	sources: Vec<Source>,
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

/// A batch of fictional demo compounds. Ids live in a dedicated range so
/// they read apart from seeded and user records.
pub fn demo_compounds() -> Vec<Compound> {
	vec![
		compound(
			"101",
			"Hypertrophy Test Base (Prop)",
			Category::Steroids,
			"Fictional testosterone base for demo environments",
			"250-500mg/week",
			"12-16 weeks",
			vec![
				source("Hypertrophy Labs", 55.00, 150.0, 15.0),
				source("Viper Flex Labs", 59.99, 200.0, 10.0),
			],
		),
		compound(
			"102",
			"Deca-Max 300 (Prop)",
			Category::Steroids,
			"Fictional nandrolone compound",
			"300-600mg/week",
			"12-16 weeks",
			vec![
				source("Hypertrophy Labs", 65.00, 150.0, 15.0),
				source("Phoenix Pharma", 69.99, 175.0, 12.0),
			],
		),
		compound(
			"103",
			"Anavar-Demo 50",
			Category::Steroids,
			"Prop oxandrolone for staged scenes",
			"50-100mg/day",
			"6-8 weeks",
			vec![
				source("Hypertrophy Labs", 89.99, 150.0, 15.0),
				source("Titan Sciences", 94.99, 200.0, 10.0),
			],
		),
		compound(
			"104",
			"HGH Cinema Blue",
			Category::Peptides,
			"Fictional growth hormone prop",
			"2-4 IU/day",
			"6 months",
			vec![
				source("Hypertrophy Labs", 250.00, 150.0, 15.0),
				source("Zeus Laboratories", 240.00, 300.0, 0.0),
			],
		),
		compound(
			"105",
			"Aromasin-Demo 25",
			Category::Pct,
			"Prop aromatase inhibitor",
			"12.5-25mg/day",
			"As needed",
			vec![
				source("Hypertrophy Labs", 54.99, 150.0, 15.0),
				source("Apollo Sciences", 59.99, 100.0, 18.0),
			],
		),
		compound(
			"106",
			"Cialis-Demo 20",
			Category::Other,
			"Fictional tadalafil prop",
			"10-20mg/day",
			"As needed",
			vec![
				source("Hypertrophy Labs", 39.99, 150.0, 15.0),
				source("Hercules Biotech", 44.99, 125.0, 17.0),
			],
		),
	]
}
