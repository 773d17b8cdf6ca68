//! Public storefront reads over the gateway
//!
//! One thin method per catalog page. Reads degrade to empty data on failure,
//! matching how the storefront pages render; the single-resource lookups
//! return `None` so a page can answer 404 instead.

use std::collections::HashMap;

use futures::join;
use serde::Serialize;
use serde_json::Value;

use super::{extract_list, featured_products, products_by_brand};
use crate::gateway::{GatewayClient, GatewayError};
use crate::session::Session;

/// Number of featured products shown on the home page
const HOME_FEATURED_LIMIT: usize = 6;

/// Number of brands shown on the home page
const HOME_BRAND_LIMIT: usize = 6;

/// View data for the storefront home page
#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    /// Up to six products flagged as featured
    pub featured_products: Vec<Value>,
    /// All categories
    pub categories: Vec<Value>,
    /// First six brands
    pub brands: Vec<Value>,
}

/// View data for the shop-by-brand page
#[derive(Debug, Clone, Serialize)]
pub struct BrandCatalog {
    /// All brands
    pub brands: Vec<Value>,
    /// Products grouped per brand, keyed by both brand id and brand name
    pub products_by_brand: HashMap<String, Vec<Value>>,
}

/// A visitor message relayed to the backend contact endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Client for the public catalog pages
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    gateway: GatewayClient,
}

impl StorefrontClient {
    /// Creates a storefront surface over an existing gateway
    pub fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    /// All products
    pub async fn products(&self, session: &Session) -> Vec<Value> {
        extract_list(self.gateway.get("/products", session).await, "products")
    }

    /// A single product by id, `None` when missing or unavailable
    pub async fn product(&self, id: &str, session: &Session) -> Option<Value> {
        self.gateway
            .get(&format!("/products/{}", id), session)
            .await
    }

    /// Products belonging to a category
    pub async fn products_by_category(&self, category_id: &str, session: &Session) -> Vec<Value> {
        let path = format!("/products/category/{}", category_id);
        extract_list(self.gateway.get(&path, session).await, "products")
    }

    /// Products matching a search query
    pub async fn search(&self, query: &str, session: &Session) -> Vec<Value> {
        let path = format!("/products?search={}", urlencoded(query));
        extract_list(self.gateway.get(&path, session).await, "products")
    }

    /// All categories
    pub async fn categories(&self, session: &Session) -> Vec<Value> {
        extract_list(self.gateway.get("/categories", session).await, "categories")
    }

    /// A single category by id, `None` when missing or unavailable
    pub async fn category(&self, id: &str, session: &Session) -> Option<Value> {
        self.gateway
            .get(&format!("/categories/{}", id), session)
            .await
    }

    /// All brands
    pub async fn brands(&self, session: &Session) -> Vec<Value> {
        extract_list(self.gateway.get("/brands", session).await, "brands")
    }

    /// A single brand by id, `None` when missing or unavailable
    pub async fn brand(&self, id: &str, session: &Session) -> Option<Value> {
        self.gateway.get(&format!("/brands/{}", id), session).await
    }

    /// Home page data: the three catalog lists fetched concurrently
    pub async fn home(&self, session: &Session) -> HomePage {
        let (products, categories, brands) = join!(
            self.products(session),
            self.categories(session),
            self.brands(session),
        );

        HomePage {
            featured_products: featured_products(&products, HOME_FEATURED_LIMIT),
            categories,
            brands: brands.into_iter().take(HOME_BRAND_LIMIT).collect(),
        }
    }

    /// Shop-by-brand data: brands and products fetched concurrently
    pub async fn brand_catalog(&self, session: &Session) -> BrandCatalog {
        let (brands, products) = join!(self.brands(session), self.products(session));
        let grouped = products_by_brand(&brands, &products);

        BrandCatalog {
            brands,
            products_by_brand: grouped,
        }
    }

    /// Relays a contact form submission to the backend
    ///
    /// Write semantics: failures propagate so the form can surface them.
    pub async fn submit_contact(
        &self,
        message: &ContactMessage,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway.post("/contact", message, session).await
    }
}

/// Minimal percent-encoding for search queries embedded in a path
fn urlencoded(s: &str) -> String {
    s.replace('%', "%25")
        .replace(' ', "%20")
        .replace('&', "%26")
        .replace('#', "%23")
        .replace('?', "%3F")
}
