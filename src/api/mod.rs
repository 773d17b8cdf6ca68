//! Call surfaces over the gateway client
//!
//! The backend is inconsistent about response shapes: list endpoints answer
//! with either a bare JSON array or an object wrapping the array under a
//! resource key. The helpers here normalize those shapes; the client structs
//! expose the storefront and admin operations built on top of them.

pub mod admin;
pub mod storefront;

pub use admin::{AdminClient, AdminError, Dashboard};
pub use storefront::{BrandCatalog, ContactMessage, HomePage, StorefrontClient};

use std::collections::HashMap;

use serde_json::Value;

/// Extracts a resource list from a payload of either supported shape
///
/// Accepts a bare array, an object carrying the array under `key`, and
/// anything else (including a missing payload), which yields an empty list.
pub fn extract_list(payload: Option<Value>, key: &str) -> Vec<Value> {
    match payload {
        Some(Value::Array(items)) => items,
        Some(Value::Object(mut map)) => match map.remove(key) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Whether a product record is flagged as featured
pub(crate) fn is_featured(product: &Value) -> bool {
    product
        .get("featured")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

/// Returns up to `limit` products flagged as featured
pub fn featured_products(products: &[Value], limit: usize) -> Vec<Value> {
    products
        .iter()
        .filter(|product| is_featured(product))
        .take(limit)
        .cloned()
        .collect()
}

/// Groups products under each brand, keyed by both brand id and brand name
///
/// Products reference their brand by name, while the brand pages look the
/// grouping up by id or by name; both keys map to the same product list.
/// Brands without a name are skipped.
pub fn products_by_brand(
    brands: &[Value],
    products: &[Value],
) -> HashMap<String, Vec<Value>> {
    let mut grouped = HashMap::new();
    for brand in brands {
        let Some(name) = brand.get("name").and_then(Value::as_str) else {
            continue;
        };

        let matching: Vec<Value> = products
            .iter()
            .filter(|product| product.get("brand").and_then(Value::as_str) == Some(name))
            .cloned()
            .collect();

        let id = brand
            .get("_id")
            .or_else(|| brand.get("id"))
            .and_then(Value::as_str);
        if let Some(id) = id {
            grouped.insert(id.to_string(), matching.clone());
        }
        grouped.insert(name.to_string(), matching);
    }
    grouped
}
