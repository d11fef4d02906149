// ---------------------------------------------------------------------------
// JSON slot persistence + import/export files
// ---------------------------------------------------------------------------
//
// The whole record list lives in one file as a JSON array — a single
// key-value slot, no schema versioning, no migration path. Import reads any
// JSON file whose top-level value is an array; export writes a pretty-printed
// array named with the current date.
// ---------------------------------------------------------------------------

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::types::Compound;

/// Load the record list from the slot file. A missing file yields `None`
/// (the caller seeds defaults); an unreadable or malformed file is an error.
pub fn load_slot(path: &Path) -> Result<Option<Vec<Compound>>, CatalogError> {
	if !path.exists() {
		return Ok(None);
	}
	let raw = fs::read_to_string(path)?;
	let compounds = serde_json::from_str(&raw)
		.map_err(|e| CatalogError::Serialization(format!("Corrupt slot {}: {}", path.display(), e)))?;
	Ok(Some(compounds))
}

/// Overwrite the slot file with the full record list as a compact JSON array.
pub fn save_slot(path: &Path, compounds: &[Compound]) -> Result<(), CatalogError> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent)?;
		}
	}
	let raw = serde_json::to_string(compounds)
		.map_err(|e| CatalogError::Serialization(e.to_string()))?;
	fs::write(path, raw)?;
	Ok(())
}

/// Read an import file into a raw JSON value. Shape validation (top-level
/// array) happens in `CompoundStore::replace_all` so a failed import leaves
/// the existing record set untouched.
pub fn read_import(path: &Path) -> Result<serde_json::Value, CatalogError> {
	let raw = fs::read_to_string(path)?;
	serde_json::from_str(&raw)
		.map_err(|e| CatalogError::Validation(format!("Import is not valid JSON: {}", e)))
}

/// Write the full record list to `<dir>/labstock-data-<YYYY-MM-DD>.json`,
/// pretty-printed. Returns the path written.
pub fn export_file(dir: &Path, compounds: &[Compound]) -> Result<PathBuf, CatalogError> {
	let date = chrono::Local::now().format("%Y-%m-%d");
	let path = dir.join(format!("labstock-data-{}.json", date));
	let raw = serde_json::to_string_pretty(compounds)
		.map_err(|e| CatalogError::Serialization(e.to_string()))?;
	fs::create_dir_all(dir)?;
	fs::write(&path, raw)?;
	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::{Category, Source};

	fn sample() -> Vec<Compound> {
		vec![Compound {
			id: "1".into(),
			name: "Ostarine (MK-2866)".into(),
			category: Category::Sarms,
			description: "Mild SARM".into(),
			dosage: "10-25mg/day".into(),
			cycle: "8-12 weeks".into(),
			sources: vec![Source {
				vendor: "Source A".into(),
				price: 45.99,
				min_order: 150.0,
				shipping: 15.0,
			}],
		}]
	}

	#[test]
	fn missing_slot_yields_none() {
		let dir = tempfile::tempdir().unwrap();
		let slot = dir.path().join("compounds.json");
		assert!(load_slot(&slot).unwrap().is_none());
	}

	#[test]
	fn slot_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let slot = dir.path().join("compounds.json");
		let compounds = sample();
		save_slot(&slot, &compounds).unwrap();
		let loaded = load_slot(&slot).unwrap().unwrap();
		assert_eq!(loaded, compounds);
	}

	#[test]
	fn empty_persisted_array_is_not_none() {
		// An empty slot file is real data, not an invitation to re-seed.
		let dir = tempfile::tempdir().unwrap();
		let slot = dir.path().join("compounds.json");
		save_slot(&slot, &[]).unwrap();
		assert_eq!(load_slot(&slot).unwrap(), Some(vec![]));
	}

	#[test]
	fn export_then_import_preserves_records() {
		let dir = tempfile::tempdir().unwrap();
		let compounds = sample();
		let path = export_file(dir.path(), &compounds).unwrap();
		assert!(path
			.file_name()
			.unwrap()
			.to_string_lossy()
			.starts_with("labstock-data-"));

		let value = read_import(&path).unwrap();
		let imported: Vec<Compound> = serde_json::from_value(value).unwrap();
		assert_eq!(imported, compounds);
	}

	#[test]
	fn unparseable_import_is_a_validation_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("garbage.json");
		fs::write(&path, "not json").unwrap();
		let err = read_import(&path).unwrap_err();
		assert_eq!(err.code(), "CATALOG_VALIDATION");
	}
}
