use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Closed set of catalog categories. Serialized lowercase on the wire and in
/// the persistence slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	Sarms,
	Peptides,
	Pct,
	Steroids,
	Nootropics,
	#[default]
	Other,
}

impl Category {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Sarms => "sarms",
			Self::Peptides => "peptides",
			Self::Pct => "pct",
			Self::Steroids => "steroids",
			Self::Nootropics => "nootropics",
			Self::Other => "other",
		}
	}
}

// ---------------------------------------------------------------------------
// Catalog records
// ---------------------------------------------------------------------------

/// One vendor's offer for a compound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Source {
	#[serde(default)]
	pub vendor: String,
	#[serde(default)]
	pub price: f64,
	#[serde(default)]
	pub min_order: f64,
	#[serde(default)]
	pub shipping: f64,
}

/// A catalog entry: one purchasable compound and its vendor offers.
///
/// Every field carries a serde default so that bulk-imported or merged data
/// deserializes without per-record validation (records created through
/// `CompoundStore::add` are the only validated path).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Compound {
	#[serde(default)]
	pub id: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub category: Category,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub dosage: String,
	#[serde(default)]
	pub cycle: String,
	#[serde(default)]
	pub sources: Vec<Source>,
}

/// Input for `CompoundStore::add` — a compound without an id.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompound {
	pub name: String,
	#[serde(default)]
	pub category: Category,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub dosage: String,
	#[serde(default)]
	pub cycle: String,
	#[serde(default)]
	pub sources: Vec<Source>,
}

// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------

/// One line of a prospective order. References the catalog record by id; the
/// store stays the sole owner of the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
	pub compound_id: String,
	pub quantity: u32,
	/// Index into the record's `sources`. While unset the entry is unpriced
	/// and excluded from totals.
	pub selected_source: Option<usize>,
}

// ---------------------------------------------------------------------------
// Derived order views
// ---------------------------------------------------------------------------

/// A cart entry resolved against its selected source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedEntry {
	pub compound_id: String,
	pub name: String,
	pub quantity: u32,
	pub unit_price: f64,
	pub line_total: f64,
}

/// Cart entries sharing a vendor, aggregated for subtotal/shipping purposes.
/// Computed fresh on every aggregation; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorGroup {
	pub vendor: String,
	pub entries: Vec<PricedEntry>,
	pub subtotal: f64,
	/// Raw shipping fee of the last entry grouped under this vendor. Whether
	/// it is actually charged is decided by the minimum-order gate.
	pub shipping: f64,
	pub min_order: f64,
}

/// Totals over all vendor groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
	pub groups: Vec<VendorGroup>,
	pub subtotal: f64,
	pub shipping: f64,
	pub total: f64,
}

/// Outcome of an aggregation pass. A cart with unpriced entries reports
/// `IncompleteSelection` instead of totals; no partial total is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum OrderOutcome {
	#[serde(rename = "incompleteSelection")]
	IncompleteSelection { unpriced: usize },
	#[serde(rename = "priced")]
	Priced(OrderTotals),
}

// ---------------------------------------------------------------------------
// Store stats
// ---------------------------------------------------------------------------

/// Headline numbers for the catalog view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
	pub total_products: usize,
	pub unique_vendors: usize,
}
