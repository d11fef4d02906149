use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
	#[error("Catalog not initialized: call catalog/initialize first")]
	NotInitialized,
	#[error("Validation failed: {0}")]
	Validation(String),
	#[error("Order has {0} item(s) without a selected source")]
	IncompleteSelection(usize),
	#[error("Cart entry index {index} out of range for {len} entries")]
	EntryIndexOutOfRange { index: usize, len: usize },
	#[error("Source index {index} out of range for {len} sources")]
	SourceIndexOutOfRange { index: usize, len: usize },
	#[error("Compound not found: {0}")]
	NotFound(String),
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl CatalogError {
	pub fn code(&self) -> &str {
		match self {
			Self::NotInitialized => "CATALOG_NOT_LOADED",
			Self::Validation(_) => "CATALOG_VALIDATION",
			Self::IncompleteSelection(_) => "ORDER_INCOMPLETE_SELECTION",
			Self::EntryIndexOutOfRange { .. } => "CART_ENTRY_RANGE",
			Self::SourceIndexOutOfRange { .. } => "CART_SOURCE_RANGE",
			Self::NotFound(_) => "CATALOG_NOT_FOUND",
			Self::Io(_) => "CATALOG_IO",
			Self::Serialization(_) => "CATALOG_SERIALIZATION",
		}
	}

	pub fn to_json_rpc_error(&self) -> serde_json::Value {
		serde_json::json!({
			"catalogCode": self.code(),
			"message": self.to_string(),
		})
	}
}
