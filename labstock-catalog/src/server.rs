// ---------------------------------------------------------------------------
// CatalogServer — JSON-RPC dispatcher
// ---------------------------------------------------------------------------
//
// Routes incoming JSON-RPC 2.0 requests (NDJSON over stdin) to the store,
// cart, and order-aggregation operations. One session per process: the
// store and cart live together in a single session context and are only
// mutated on this logical thread.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead};
use std::path::PathBuf;

use serde::Deserialize;

use crate::cart::Cart;
use crate::demo::demo_compounds;
use crate::error::CatalogError;
use crate::filter::{filter, ALL_CATEGORIES};
use crate::order;
use crate::parse::parse_listing;
use crate::persistence;
use crate::protocol::*;
use crate::seed::default_compounds;
use crate::store::CompoundStore;
use crate::transport::NdjsonTransport;
use crate::types::{Compound, NewCompound};

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

struct Session {
	store: CompoundStore,
	cart: Cart,
}

/// JSON-RPC server that dispatches requests to a catalog session.
pub struct CatalogServer {
	transport: NdjsonTransport,
	session: Option<Session>,
}

impl CatalogServer {
	/// Create a new server with the given transport. The session is created
	/// lazily when `catalog/initialize` is called.
	pub fn new(transport: NdjsonTransport) -> Self {
		Self {
			transport,
			session: None,
		}
	}

	/// Main loop: read JSON-RPC messages from stdin, dispatch to handlers.
	pub fn run(&mut self) -> Result<(), CatalogError> {
		let stdin = io::stdin();
		let reader = stdin.lock();

		for line_result in reader.lines() {
			let line = line_result?;
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(&line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			self.dispatch(request);
		}

		Ok(())
	}

	// ── Dispatch ──────────────────────────────────────────────────────────

	fn dispatch(&mut self, req: JsonRpcRequest) {
		let id = req.id;

		// Saving doubles as the cross-context sync point: the notification
		// goes out before the response, at most once per save.
		if req.method == "catalog/save" {
			let saved = self.with_session_mut(|s| {
				let snapshot = s.store.save()?;
				serde_json::to_value(snapshot)
					.map_err(|e| CatalogError::Serialization(e.to_string()))
			});
			match saved {
				Ok(compounds) => {
					self.transport.write_notification(
						"catalog/updated",
						serde_json::json!({
							"type": "updateCompounds",
							"compounds": compounds,
						}),
					);
					self.transport.write_response(id, serde_json::json!({}));
				}
				Err(e) => self.write_catalog_error(id, e),
			}
			return;
		}

		let result = match req.method.as_str() {
			// -- Lifecycle -----------------------------------------------
			"catalog/initialize" => self.handle_initialize(req.params),

			// -- CRUD ----------------------------------------------------
			"catalog/add" => self.with_session_mut(|s| handle_add(s, req.params)),
			"catalog/delete" => self.with_session_mut(|s| handle_delete(s, req.params)),
			"catalog/replaceAll" => {
				self.with_session_mut(|s| handle_replace_all(s, req.params))
			}
			"catalog/mergeAppend" => {
				self.with_session_mut(|s| handle_merge_append(s, req.params))
			}
			"catalog/get" => self.with_session(|s| handle_get(s, req.params)),
			"catalog/getAll" => self.with_session(|s| {
				Ok(serde_json::json!({ "compounds": s.store.get_all() }))
			}),
			"catalog/stats" => self.with_session(|s| {
				serde_json::to_value(s.store.stats())
					.map_err(|e| CatalogError::Serialization(e.to_string()))
			}),

			// -- Views ---------------------------------------------------
			"catalog/filter" => self.with_session(|s| handle_filter(s, req.params)),

			// -- Import / export -----------------------------------------
			"catalog/import" => self.with_session_mut(|s| handle_import(s, req.params)),
			"catalog/export" => self.with_session(|s| handle_export(s, req.params)),
			"catalog/loadDemo" => self.with_session_mut(|s| {
				let added = s.store.merge_append(demo_compounds());
				Ok(serde_json::json!({ "added": added }))
			}),

			// -- Paste parsing -------------------------------------------
			"catalog/parseText" => handle_parse_text(req.params),

			// -- Cart ----------------------------------------------------
			"cart/add" => self.with_session_mut(|s| handle_cart_add(s, req.params)),
			"cart/setSource" => {
				self.with_session_mut(|s| handle_cart_set_source(s, req.params))
			}
			"cart/adjustQuantity" => {
				self.with_session_mut(|s| handle_cart_adjust_quantity(s, req.params))
			}
			"cart/remove" => self.with_session_mut(|s| handle_cart_remove(s, req.params)),
			"cart/list" => self.with_session(|s| {
				Ok(serde_json::json!({ "entries": s.cart.entries() }))
			}),

			// -- Order ---------------------------------------------------
			"order/totals" => self.with_session(|s| {
				let outcome = order::totals(&s.store, &s.cart)?;
				serde_json::to_value(outcome)
					.map_err(|e| CatalogError::Serialization(e.to_string()))
			}),
			"order/document" => self.with_session(|s| {
				let text = order::document(&s.store, &s.cart)?;
				Ok(serde_json::json!({ "document": text }))
			}),

			// -- Unknown -------------------------------------------------
			_ => {
				self.transport.write_error(
					id,
					METHOD_NOT_FOUND,
					format!("Unknown method: {}", req.method),
					None,
				);
				return;
			}
		};

		match result {
			Ok(value) => self.transport.write_response(id, value),
			Err(e) => self.write_catalog_error(id, e),
		}
	}

	fn write_catalog_error(&self, id: u64, e: CatalogError) {
		self.transport
			.write_error(id, CATALOG_ERROR, e.to_string(), Some(e.to_json_rpc_error()));
	}

	// ── Session accessors ─────────────────────────────────────────────────

	fn with_session<F>(&self, f: F) -> Result<serde_json::Value, CatalogError>
	where
		F: FnOnce(&Session) -> Result<serde_json::Value, CatalogError>,
	{
		match &self.session {
			Some(s) => f(s),
			None => Err(CatalogError::NotInitialized),
		}
	}

	fn with_session_mut<F>(&mut self, f: F) -> Result<serde_json::Value, CatalogError>
	where
		F: FnOnce(&mut Session) -> Result<serde_json::Value, CatalogError>,
	{
		match &mut self.session {
			Some(s) => f(s),
			None => Err(CatalogError::NotInitialized),
		}
	}

	// ── Initialize ────────────────────────────────────────────────────────

	fn handle_initialize(
		&mut self,
		params: serde_json::Value,
	) -> Result<serde_json::Value, CatalogError> {
		let p: InitializeParams = parse_params(params)?;

		let seed = if p.seed_defaults.unwrap_or(true) {
			default_compounds()
		} else {
			Vec::new()
		};

		let store = CompoundStore::open(p.storage_path.map(PathBuf::from), seed)?;
		let count = store.len();
		self.session = Some(Session {
			store,
			cart: Cart::new(),
		});

		Ok(serde_json::json!({ "count": count }))
	}
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn parse_params<T: serde::de::DeserializeOwned>(
	params: serde_json::Value,
) -> Result<T, CatalogError> {
	serde_json::from_value(params)
		.map_err(|e| CatalogError::Serialization(format!("Invalid params: {}", e)))
}

fn handle_add(s: &mut Session, params: serde_json::Value) -> Result<serde_json::Value, CatalogError> {
	let new: NewCompound = parse_params(params)?;
	let id = s.store.add(new)?;
	Ok(serde_json::json!({ "id": id }))
}

fn handle_delete(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: IdParams = parse_params(params)?;
	let removed = s.store.delete(&p.id);
	Ok(serde_json::json!({ "removed": removed }))
}

fn handle_replace_all(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: ReplaceAllParams = parse_params(params)?;
	let count = s.store.replace_all(p.compounds)?;
	Ok(serde_json::json!({ "count": count }))
}

fn handle_merge_append(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: MergeAppendParams = parse_params(params)?;
	let added = s.store.merge_append(p.compounds);
	Ok(serde_json::json!({ "added": added }))
}

fn handle_get(s: &Session, params: serde_json::Value) -> Result<serde_json::Value, CatalogError> {
	let p: IdParams = parse_params(params)?;
	let compound = s
		.store
		.get(&p.id)
		.ok_or_else(|| CatalogError::NotFound(p.id.clone()))?;
	Ok(serde_json::json!({ "compound": compound }))
}

fn handle_filter(
	s: &Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: FilterParams = parse_params(params)?;
	let search = p.search.unwrap_or_default();
	let category = p.category.unwrap_or_else(|| ALL_CATEGORIES.to_string());
	let compounds = filter(s.store.get_all(), &search, &category);
	Ok(serde_json::json!({ "compounds": compounds }))
}

fn handle_import(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: PathParams = parse_params(params)?;
	let value = persistence::read_import(&PathBuf::from(p.path))?;
	let count = s.store.replace_all(value)?;
	Ok(serde_json::json!({ "count": count }))
}

fn handle_export(s: &Session, params: serde_json::Value) -> Result<serde_json::Value, CatalogError> {
	let p: DirParams = parse_params(params)?;
	let path = persistence::export_file(&PathBuf::from(p.dir), s.store.get_all())?;
	Ok(serde_json::json!({ "path": path }))
}

fn handle_parse_text(params: serde_json::Value) -> Result<serde_json::Value, CatalogError> {
	let p: TextParams = parse_params(params)?;
	let items = parse_listing(&p.text);
	Ok(serde_json::json!({ "count": items.len(), "items": items }))
}

fn handle_cart_add(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: IdParams = parse_params(params)?;
	s.cart.add(&s.store, &p.id);
	Ok(serde_json::json!({ "count": s.cart.len() }))
}

fn handle_cart_set_source(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: SetSourceParams = parse_params(params)?;
	s.cart.set_source(&s.store, p.index, p.source)?;
	Ok(serde_json::json!({}))
}

fn handle_cart_adjust_quantity(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: AdjustQuantityParams = parse_params(params)?;
	s.cart.adjust_quantity(p.index, p.delta)?;
	Ok(serde_json::json!({ "count": s.cart.len() }))
}

fn handle_cart_remove(
	s: &mut Session,
	params: serde_json::Value,
) -> Result<serde_json::Value, CatalogError> {
	let p: IndexParams = parse_params(params)?;
	s.cart.remove(p.index)?;
	Ok(serde_json::json!({ "count": s.cart.len() }))
}

// ---------------------------------------------------------------------------
// Param types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
	storage_path: Option<String>,
	seed_defaults: Option<bool>,
}

#[derive(Deserialize)]
struct IdParams {
	id: String,
}

#[derive(Deserialize)]
struct ReplaceAllParams {
	compounds: serde_json::Value,
}

#[derive(Deserialize)]
struct MergeAppendParams {
	compounds: Vec<Compound>,
}

#[derive(Deserialize)]
struct FilterParams {
	search: Option<String>,
	category: Option<String>,
}

#[derive(Deserialize)]
struct PathParams {
	path: String,
}

#[derive(Deserialize)]
struct DirParams {
	dir: String,
}

#[derive(Deserialize)]
struct TextParams {
	text: String,
}

#[derive(Deserialize)]
struct SetSourceParams {
	index: usize,
	#[serde(default)]
	source: Option<usize>,
}

#[derive(Deserialize)]
struct AdjustQuantityParams {
	index: usize,
	delta: i64,
}

#[derive(Deserialize)]
struct IndexParams {
	index: usize,
}
