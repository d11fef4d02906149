//! Mapping from the extraction API's response into catalog records.
//!
//! The upstream LLM extraction returns a loose products/vendor-info shape;
//! everything here is optional except the product name. Missing terms fall
//! back to vendor-level defaults, and those to fixed defaults.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use labstock_catalog_engine::types::{Compound, Source};

use crate::classify::classify;
use crate::error::ScrapeError;

/// Default vendor terms applied when the extraction found none.
pub const DEFAULT_SHIPPING: f64 = 15.0;
pub const DEFAULT_MIN_ORDER: f64 = 150.0;
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

// ── Wire shapes ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ScrapeEnvelope {
    #[serde(default)]
    data: Option<ScrapeData>,
    #[serde(rename = "sourceUrl", default)]
    source_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    llm_extraction: Option<LlmExtraction>,
}

#[derive(Debug, Deserialize, Default)]
struct LlmExtraction {
    #[serde(default)]
    products: Option<Vec<ExtractedProduct>>,
    #[serde(rename = "vendorInfo", default)]
    vendor_info: Option<VendorInfo>,
}

#[derive(Debug, Deserialize)]
struct ExtractedProduct {
    name: String,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    dosage: Option<String>,
    #[serde(rename = "minOrder", default)]
    min_order: Option<f64>,
    #[serde(default)]
    notes: Option<String>,
}

/// Vendor-level terms extracted alongside the product list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub min_order_amount: Option<f64>,
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    #[serde(default)]
    pub accepted_payments: Option<Vec<String>>,
}

// ── Result ────────────────────────────────────────────────────────────────

/// One page's worth of scraped catalog records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub compounds: Vec<Compound>,
    pub vendor_info: Option<VendorInfo>,
    pub source_url: String,
    pub scraped_at: String,
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Map a raw extraction API response into catalog records.
///
/// Fails with `Extraction` when the response carries no extraction payload.
/// Each extracted product becomes a single-source record under a fresh UUID,
/// categorized by name heuristics.
pub fn parse_extraction(
    value: serde_json::Value,
    requested_url: &str,
) -> Result<ScrapeResult, ScrapeError> {
    let envelope: ScrapeEnvelope = serde_json::from_value(value)
        .map_err(|e| ScrapeError::Serialization(format!("Malformed response: {}", e)))?;

    let extraction = envelope
        .data
        .and_then(|d| d.llm_extraction)
        .ok_or_else(|| ScrapeError::Extraction("No extraction data found".into()))?;

    let vendor_name = extraction
        .vendor_info
        .as_ref()
        .and_then(|v| v.name.clone())
        .unwrap_or_else(|| UNKNOWN_VENDOR.to_string());
    let default_shipping = extraction
        .vendor_info
        .as_ref()
        .and_then(|v| v.shipping_cost)
        .unwrap_or(DEFAULT_SHIPPING);
    let default_min_order = extraction
        .vendor_info
        .as_ref()
        .and_then(|v| v.min_order_amount)
        .unwrap_or(DEFAULT_MIN_ORDER);

    let compounds = extraction
        .products
        .unwrap_or_default()
        .into_iter()
        .map(|p| map_product(p, &vendor_name, default_min_order, default_shipping))
        .collect();

    Ok(ScrapeResult {
        compounds,
        vendor_info: extraction.vendor_info,
        source_url: envelope
            .source_url
            .unwrap_or_else(|| requested_url.to_string()),
        scraped_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn map_product(
    product: ExtractedProduct,
    vendor_name: &str,
    default_min_order: f64,
    default_shipping: f64,
) -> Compound {
    let description = match product.notes {
        Some(notes) if !notes.trim().is_empty() => notes,
        _ => format!("Research compound from {}", vendor_name),
    };
    let dosage = match product.dosage {
        Some(dosage) if !dosage.trim().is_empty() => dosage,
        _ => "See vendor guidelines".to_string(),
    };

    Compound {
        id: Uuid::new_v4().to_string(),
        category: classify(&product.name),
        name: product.name,
        description,
        dosage,
        cycle: "Consult research protocols".to_string(),
        sources: vec![Source {
            vendor: vendor_name.to_string(),
            price: product.price.unwrap_or(0.0),
            min_order: product.min_order.unwrap_or(default_min_order),
            shipping: default_shipping,
        }],
    }
}
