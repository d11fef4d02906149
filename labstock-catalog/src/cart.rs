// ---------------------------------------------------------------------------
// Cart
// ---------------------------------------------------------------------------
//
// Ordered list of (record id, quantity, selected source) entries. Entries
// reference catalog records by id only; the store stays the owner.
// ---------------------------------------------------------------------------

use crate::error::CatalogError;
use crate::store::CompoundStore;
use crate::types::CartEntry;

#[derive(Debug, Default)]
pub struct Cart {
	entries: Vec<CartEntry>,
}

impl Cart {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a record to the order. An existing entry for the record gains one
	/// unit; otherwise a new unpriced entry with quantity 1 is appended. An
	/// unknown id is a no-op.
	pub fn add(&mut self, store: &CompoundStore, compound_id: &str) {
		if store.get(compound_id).is_none() {
			return;
		}

		if let Some(entry) = self
			.entries
			.iter_mut()
			.find(|e| e.compound_id == compound_id)
		{
			entry.quantity += 1;
			return;
		}

		self.entries.push(CartEntry {
			compound_id: compound_id.to_string(),
			quantity: 1,
			selected_source: None,
		});
	}

	/// Set or clear an entry's selected source. Both the entry index and the
	/// source index are caller contract; out-of-range fails explicitly.
	pub fn set_source(
		&mut self,
		store: &CompoundStore,
		entry_index: usize,
		source: Option<usize>,
	) -> Result<(), CatalogError> {
		let len = self.entries.len();
		let entry = self
			.entries
			.get_mut(entry_index)
			.ok_or(CatalogError::EntryIndexOutOfRange {
				index: entry_index,
				len,
			})?;

		if let Some(source_index) = source {
			let sources_len = store
				.get(&entry.compound_id)
				.map(|c| c.sources.len())
				.ok_or_else(|| CatalogError::NotFound(entry.compound_id.clone()))?;
			if source_index >= sources_len {
				return Err(CatalogError::SourceIndexOutOfRange {
					index: source_index,
					len: sources_len,
				});
			}
		}

		entry.selected_source = source;
		Ok(())
	}

	/// Adjust an entry's quantity by a signed delta. A result of zero or
	/// below removes the entry.
	pub fn adjust_quantity(&mut self, entry_index: usize, delta: i64) -> Result<(), CatalogError> {
		let len = self.entries.len();
		let entry = self
			.entries
			.get_mut(entry_index)
			.ok_or(CatalogError::EntryIndexOutOfRange {
				index: entry_index,
				len,
			})?;

		let quantity = entry.quantity as i64 + delta;
		if quantity <= 0 {
			self.entries.remove(entry_index);
		} else {
			entry.quantity = quantity as u32;
		}
		Ok(())
	}

	/// Remove an entry outright.
	pub fn remove(&mut self, entry_index: usize) -> Result<(), CatalogError> {
		if entry_index >= self.entries.len() {
			return Err(CatalogError::EntryIndexOutOfRange {
				index: entry_index,
				len: self.entries.len(),
			});
		}
		self.entries.remove(entry_index);
		Ok(())
	}

	pub fn entries(&self) -> &[CartEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::seed::default_compounds;

	fn store() -> CompoundStore {
		CompoundStore::open(None, default_compounds()).unwrap()
	}

	#[test]
	fn add_new_entry_starts_unpriced_at_one() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");
		assert_eq!(cart.len(), 1);
		assert_eq!(cart.entries()[0].quantity, 1);
		assert!(cart.entries()[0].selected_source.is_none());
	}

	#[test]
	fn add_existing_entry_increments_quantity() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.add(&store, "1");
		assert_eq!(cart.len(), 1);
		assert_eq!(cart.entries()[0].quantity, 2);
	}

	#[test]
	fn add_unknown_id_is_a_no_op() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "missing");
		assert!(cart.is_empty());
	}

	#[test]
	fn set_source_validates_both_indexes() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");

		assert!(cart.set_source(&store, 0, Some(2)).is_ok());
		// Ostarine has three sources; index 3 is out of range.
		let err = cart.set_source(&store, 0, Some(3)).unwrap_err();
		assert_eq!(err.code(), "CART_SOURCE_RANGE");
		let err = cart.set_source(&store, 1, Some(0)).unwrap_err();
		assert_eq!(err.code(), "CART_ENTRY_RANGE");
	}

	#[test]
	fn set_source_none_clears_selection() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.set_source(&store, 0, Some(0)).unwrap();
		cart.set_source(&store, 0, None).unwrap();
		assert!(cart.entries()[0].selected_source.is_none());
	}

	#[test]
	fn quantity_dropping_to_zero_removes_entry() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.adjust_quantity(0, -1).unwrap();
		assert!(cart.is_empty());
	}

	#[test]
	fn adjust_quantity_accumulates() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.adjust_quantity(0, 3).unwrap();
		assert_eq!(cart.entries()[0].quantity, 4);
		cart.adjust_quantity(0, -2).unwrap();
		assert_eq!(cart.entries()[0].quantity, 2);
	}

	#[test]
	fn remove_deletes_exactly_one_entry() {
		let store = store();
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.add(&store, "2");
		cart.remove(0).unwrap();
		assert_eq!(cart.len(), 1);
		assert_eq!(cart.entries()[0].compound_id, "2");
		assert!(cart.remove(5).is_err());
	}
}
