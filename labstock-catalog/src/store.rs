// ---------------------------------------------------------------------------
// CompoundStore — catalog state owner
// ---------------------------------------------------------------------------
//
// In-memory record list loaded from (and saved to) a single JSON slot file.
// The store is the sole owner of catalog records; the cart and the order
// aggregator only reference them by id.
// ---------------------------------------------------------------------------

use std::collections::HashSet;
use std::path::PathBuf;

use uuid::Uuid;

use crate::error::CatalogError;
use crate::persistence;
use crate::types::{CatalogStats, Compound, NewCompound};

pub struct CompoundStore {
	compounds: Vec<Compound>,
	storage_path: Option<PathBuf>,
	dirty: bool,
}

impl CompoundStore {
	// -- Lifecycle -----------------------------------------------------------

	/// Open the store: load the slot file if it exists, otherwise install the
	/// caller-supplied seed. Seeding marks nothing dirty; defaults are not
	/// persisted until the first explicit save.
	pub fn open(storage_path: Option<PathBuf>, seed: Vec<Compound>) -> Result<Self, CatalogError> {
		let compounds = match &storage_path {
			Some(path) => persistence::load_slot(path)?.unwrap_or(seed),
			None => seed,
		};

		Ok(Self {
			compounds,
			storage_path,
			dirty: false,
		})
	}

	/// Persist the current record list to the slot and return a snapshot for
	/// the cross-context update notification. With no slot configured the
	/// write is skipped but the snapshot is still produced.
	pub fn save(&mut self) -> Result<Vec<Compound>, CatalogError> {
		if let Some(path) = &self.storage_path {
			persistence::save_slot(path, &self.compounds)?;
		}
		self.dirty = false;
		Ok(self.compounds.clone())
	}

	// -- CRUD ----------------------------------------------------------------

	/// Append a new record under a fresh UUID. This is the only validated
	/// ingestion path: a name and at least one source are required.
	pub fn add(&mut self, new: NewCompound) -> Result<String, CatalogError> {
		if new.name.trim().is_empty() {
			return Err(CatalogError::Validation("Compound name is required".into()));
		}
		if new.sources.is_empty() {
			return Err(CatalogError::Validation(
				"At least one source is required".into(),
			));
		}

		let id = Uuid::new_v4().to_string();
		self.compounds.push(Compound {
			id: id.clone(),
			name: new.name,
			category: new.category,
			description: new.description,
			dosage: new.dosage,
			cycle: new.cycle,
			sources: new.sources,
		});
		self.dirty = true;

		Ok(id)
	}

	/// Delete a record by id. Returns true if found and removed; an absent
	/// id is a no-op.
	pub fn delete(&mut self, id: &str) -> bool {
		let before = self.compounds.len();
		self.compounds.retain(|c| c.id != id);
		let removed = self.compounds.len() != before;
		if removed {
			self.dirty = true;
		}
		removed
	}

	/// Replace the whole record list from a raw JSON value. The top-level
	/// value must be an array; anything else fails with `Validation` and
	/// leaves the existing records untouched. Individual records are
	/// deserialized leniently, with no per-record validation.
	pub fn replace_all(&mut self, value: serde_json::Value) -> Result<usize, CatalogError> {
		if !value.is_array() {
			return Err(CatalogError::Validation(
				"Import payload must be a JSON array".into(),
			));
		}

		let compounds: Vec<Compound> = serde_json::from_value(value)
			.map_err(|e| CatalogError::Validation(format!("Malformed record array: {}", e)))?;

		let count = compounds.len();
		self.compounds = compounds;
		self.dirty = true;
		Ok(count)
	}

	/// Append a batch of records as-is. No id-collision checking; scraped
	/// batches arrive with their own ids.
	pub fn merge_append(&mut self, records: Vec<Compound>) -> usize {
		let count = records.len();
		self.compounds.extend(records);
		if count > 0 {
			self.dirty = true;
		}
		count
	}

	// -- Views ---------------------------------------------------------------

	pub fn get(&self, id: &str) -> Option<&Compound> {
		self.compounds.iter().find(|c| c.id == id)
	}

	pub fn get_all(&self) -> &[Compound] {
		&self.compounds
	}

	pub fn len(&self) -> usize {
		self.compounds.len()
	}

	pub fn is_empty(&self) -> bool {
		self.compounds.is_empty()
	}

	pub fn is_dirty(&self) -> bool {
		self.dirty
	}

	/// Headline numbers: product count and distinct vendor count across all
	/// sources.
	pub fn stats(&self) -> CatalogStats {
		let mut vendors: HashSet<&str> = HashSet::new();
		for c in &self.compounds {
			for s in &c.sources {
				vendors.insert(s.vendor.as_str());
			}
		}
		CatalogStats {
			total_products: self.compounds.len(),
			unique_vendors: vendors.len(),
		}
	}
}
