// ---------------------------------------------------------------------------
// Order aggregation
// ---------------------------------------------------------------------------
//
// Groups priced cart entries by vendor, applies the minimum-order shipping
// gate, and renders per-vendor order-request documents. Everything here is
// recomputed from scratch on every call — no aggregation state survives a
// cart mutation.
// ---------------------------------------------------------------------------

use std::fmt::Write;

use crate::cart::Cart;
use crate::error::CatalogError;
use crate::store::CompoundStore;
use crate::types::{OrderOutcome, OrderTotals, PricedEntry, VendorGroup};

/// Aggregate the cart into per-vendor groups and totals.
///
/// Any entry without a selected source short-circuits the whole computation
/// into `IncompleteSelection` with no partial totals. A cart entry whose record
/// has been deleted from the store fails with `NotFound`.
pub fn totals(store: &CompoundStore, cart: &Cart) -> Result<OrderOutcome, CatalogError> {
	let unpriced = cart
		.entries()
		.iter()
		.filter(|e| e.selected_source.is_none())
		.count();
	if unpriced > 0 {
		return Ok(OrderOutcome::IncompleteSelection { unpriced });
	}

	let groups = vendor_groups(store, cart)?;

	let subtotal: f64 = groups.iter().map(|g| g.subtotal).sum();
	let shipping: f64 = groups.iter().map(charged_shipping).sum();

	Ok(OrderOutcome::Priced(OrderTotals {
		subtotal,
		shipping,
		total: subtotal + shipping,
		groups,
	}))
}

/// Shipping fee a group actually incurs: the vendor's fee is charged exactly
/// when the group subtotal meets the vendor minimum, zero otherwise.
fn charged_shipping(group: &VendorGroup) -> f64 {
	if group.subtotal >= group.min_order {
		group.shipping
	} else {
		0.0
	}
}

/// Partition priced entries into vendor groups, in first-seen vendor order.
/// Vendor names match case-sensitively and unnormalized: "Source A" and
/// "source a" are distinct vendors.
fn vendor_groups(store: &CompoundStore, cart: &Cart) -> Result<Vec<VendorGroup>, CatalogError> {
	let mut groups: Vec<VendorGroup> = Vec::new();

	for entry in cart.entries() {
		let source_index = match entry.selected_source {
			Some(i) => i,
			None => continue,
		};
		let compound = store
			.get(&entry.compound_id)
			.ok_or_else(|| CatalogError::NotFound(entry.compound_id.clone()))?;
		let source = compound
			.sources
			.get(source_index)
			.ok_or(CatalogError::SourceIndexOutOfRange {
				index: source_index,
				len: compound.sources.len(),
			})?;

		let line_total = source.price * entry.quantity as f64;
		let priced = PricedEntry {
			compound_id: compound.id.clone(),
			name: compound.name.clone(),
			quantity: entry.quantity,
			unit_price: source.price,
			line_total,
		};

		match groups.iter_mut().find(|g| g.vendor == source.vendor) {
			Some(group) => {
				group.entries.push(priced);
				group.subtotal += line_total;
				// Each entry overwrites the group's displayed terms: the
				// last entry processed wins even when offers differ.
				group.shipping = source.shipping;
				group.min_order = source.min_order;
			}
			None => groups.push(VendorGroup {
				vendor: source.vendor.clone(),
				subtotal: line_total,
				shipping: source.shipping,
				min_order: source.min_order,
				entries: vec![priced],
			}),
		}
	}

	Ok(groups)
}

/// Render one plain-text order request per vendor group.
///
/// Fails with `IncompleteSelection` while any entry is unpriced. The text is
/// regenerated from the current cart state on every call.
pub fn document(store: &CompoundStore, cart: &Cart) -> Result<String, CatalogError> {
	let unpriced = cart
		.entries()
		.iter()
		.filter(|e| e.selected_source.is_none())
		.count();
	if unpriced > 0 {
		return Err(CatalogError::IncompleteSelection(unpriced));
	}

	let groups = vendor_groups(store, cart)?;
	let mut out = String::new();

	for group in &groups {
		let shipping = charged_shipping(group);

		let _ = write!(
			out,
			"--- Email for {} ---\n\n\
			 Subject: Research Order Inquiry\n\n\
			 Hello,\n\n\
			 I am interested in placing an order for research purposes. \
			 Here are the items I would like to purchase:\n\n",
			group.vendor
		);

		for entry in &group.entries {
			let _ = writeln!(
				out,
				"- {} x {} units @ ${:.2} each = ${:.2}",
				entry.name, entry.quantity, entry.unit_price, entry.line_total
			);
		}

		let _ = write!(
			out,
			"\nSubtotal: ${:.2}\nShipping: ${:.2}\nTotal: ${:.2}\n\n\
			 Please confirm availability and provide payment instructions.\n\n\
			 Thank you,\n[Your Name]\n\n-------------------\n\n",
			group.subtotal,
			shipping,
			group.subtotal + shipping
		);
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{Category, Compound, Source};

	fn source(vendor: &str, price: f64, min_order: f64, shipping: f64) -> Source {
		Source {
			vendor: vendor.to_string(),
			price,
			min_order,
			shipping,
		}
	}

	fn compound(id: &str, name: &str, sources: Vec<Source>) -> Compound {
		Compound {
			id: id.to_string(),
			name: name.to_string(),
			category: Category::Sarms,
			description: String::new(),
			dosage: String::new(),
			cycle: String::new(),
			sources,
		}
	}

	fn store_with(compounds: Vec<Compound>) -> CompoundStore {
		CompoundStore::open(None, compounds).unwrap()
	}

	fn assert_close(actual: f64, expected: f64) {
		assert!(
			(actual - expected).abs() < 1e-9,
			"expected {expected}, got {actual}"
		);
	}

	#[test]
	fn empty_cart_prices_to_zero() {
		let store = store_with(vec![]);
		let cart = Cart::new();
		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => {
				assert!(t.groups.is_empty());
				assert_close(t.total, 0.0);
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn unpriced_entry_short_circuits_totals() {
		let store = store_with(vec![compound(
			"1",
			"Ostarine",
			vec![source("Source A", 45.99, 150.0, 15.0)],
		)]);
		let mut cart = Cart::new();
		cart.add(&store, "1");

		match totals(&store, &cart).unwrap() {
			OrderOutcome::IncompleteSelection { unpriced } => assert_eq!(unpriced, 1),
			other => panic!("expected incomplete selection, got {other:?}"),
		}
	}

	#[test]
	fn below_minimum_waives_shipping() {
		let store = store_with(vec![compound(
			"1",
			"Ostarine",
			vec![source("Source A", 45.99, 150.0, 15.0)],
		)]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.set_source(&store, 0, Some(0)).unwrap();

		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => {
				assert_close(t.subtotal, 45.99);
				assert_close(t.shipping, 0.0);
				assert_close(t.total, 45.99);
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn meeting_minimum_charges_shipping() {
		let store = store_with(vec![compound(
			"1",
			"Ostarine",
			vec![source("Source A", 45.99, 150.0, 15.0)],
		)]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.set_source(&store, 0, Some(0)).unwrap();
		cart.adjust_quantity(0, 3).unwrap();

		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => {
				assert_close(t.subtotal, 183.96);
				assert_close(t.shipping, 15.0);
				assert_close(t.total, 198.96);
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn shipping_gates_per_vendor() {
		let store = store_with(vec![
			compound("1", "Alpha", vec![source("Vendor A", 200.0, 150.0, 15.0)]),
			compound("2", "Beta", vec![source("Vendor B", 40.0, 100.0, 10.0)]),
		]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.add(&store, "2");
		cart.set_source(&store, 0, Some(0)).unwrap();
		cart.set_source(&store, 1, Some(0)).unwrap();

		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => {
				assert_eq!(t.groups.len(), 2);
				assert_close(t.subtotal, 240.0);
				// Vendor A meets its minimum, Vendor B does not.
				assert_close(t.shipping, 15.0);
				assert_close(t.total, 255.0);
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn vendor_names_group_case_sensitively() {
		let store = store_with(vec![
			compound("1", "Alpha", vec![source("Vendor A", 10.0, 100.0, 5.0)]),
			compound("2", "Beta", vec![source("vendor a", 10.0, 100.0, 5.0)]),
		]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.add(&store, "2");
		cart.set_source(&store, 0, Some(0)).unwrap();
		cart.set_source(&store, 1, Some(0)).unwrap();

		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => assert_eq!(t.groups.len(), 2),
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn last_entry_overrides_group_terms() {
		// Two offers from the same vendor with different terms: subtotal sums
		// both lines, but the group's shipping/minOrder are the last entry's.
		let store = store_with(vec![
			compound("1", "Alpha", vec![source("Vendor A", 50.0, 150.0, 15.0)]),
			compound("2", "Beta", vec![source("Vendor A", 60.0, 90.0, 7.0)]),
		]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.add(&store, "2");
		cart.set_source(&store, 0, Some(0)).unwrap();
		cart.set_source(&store, 1, Some(0)).unwrap();

		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => {
				assert_eq!(t.groups.len(), 1);
				let group = &t.groups[0];
				assert_close(group.subtotal, 110.0);
				assert_close(group.min_order, 90.0);
				assert_close(group.shipping, 7.0);
				// 110 >= 90, so the (last) fee is charged.
				assert_close(t.total, 117.0);
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn groups_keep_first_seen_vendor_order() {
		let store = store_with(vec![
			compound("1", "Alpha", vec![source("Vendor B", 10.0, 100.0, 5.0)]),
			compound("2", "Beta", vec![source("Vendor A", 10.0, 100.0, 5.0)]),
			compound("3", "Gamma", vec![source("Vendor B", 10.0, 100.0, 5.0)]),
		]);
		let mut cart = Cart::new();
		for id in ["1", "2", "3"] {
			cart.add(&store, id);
		}
		for i in 0..3 {
			cart.set_source(&store, i, Some(0)).unwrap();
		}

		match totals(&store, &cart).unwrap() {
			OrderOutcome::Priced(t) => {
				let vendors: Vec<_> = t.groups.iter().map(|g| g.vendor.as_str()).collect();
				assert_eq!(vendors, ["Vendor B", "Vendor A"]);
				assert_eq!(t.groups[0].entries.len(), 2);
			}
			other => panic!("unexpected outcome: {other:?}"),
		}
	}

	#[test]
	fn dangling_cart_reference_is_not_found() {
		let mut store = store_with(vec![compound(
			"1",
			"Alpha",
			vec![source("Vendor A", 10.0, 100.0, 5.0)],
		)]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.set_source(&store, 0, Some(0)).unwrap();
		store.delete("1");

		let err = totals(&store, &cart).unwrap_err();
		assert_eq!(err.code(), "CATALOG_NOT_FOUND");
	}

	#[test]
	fn document_requires_complete_selection() {
		let store = store_with(vec![compound(
			"1",
			"Ostarine",
			vec![source("Source A", 45.99, 150.0, 15.0)],
		)]);
		let mut cart = Cart::new();
		cart.add(&store, "1");

		let err = document(&store, &cart).unwrap_err();
		assert_eq!(err.code(), "ORDER_INCOMPLETE_SELECTION");
	}

	#[test]
	fn document_renders_one_request_per_vendor() {
		let store = store_with(vec![
			compound("1", "Ostarine", vec![source("Source A", 45.99, 150.0, 15.0)]),
			compound("2", "BPC-157", vec![source("Source F", 89.99, 50.0, 20.0)]),
		]);
		let mut cart = Cart::new();
		cart.add(&store, "1");
		cart.add(&store, "2");
		cart.set_source(&store, 0, Some(0)).unwrap();
		cart.set_source(&store, 1, Some(0)).unwrap();

		let text = document(&store, &cart).unwrap();
		assert!(text.contains("--- Email for Source A ---"));
		assert!(text.contains("--- Email for Source F ---"));
		assert!(text.contains("- Ostarine x 1 units @ $45.99 each = $45.99"));
		// Source A misses its minimum: no shipping charged in its request.
		assert!(text.contains("Subtotal: $45.99\nShipping: $0.00\nTotal: $45.99"));
		// Source F meets its minimum: fee charged.
		assert!(text.contains("Subtotal: $89.99\nShipping: $20.00\nTotal: $109.99"));
	}
}
