//! Admin console operations over the gateway
//!
//! Login against the backend, the dashboard summary, and the catalog CRUD
//! passthroughs. All writes are throwing: the console maps failures to a
//! user-facing message, and nothing here retries a mutation.

use futures::join;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{extract_list, is_featured};
use crate::gateway::{GatewayClient, GatewayError};
use crate::session::Session;

/// Number of recent products shown on the dashboard
const DASHBOARD_RECENT_LIMIT: usize = 10;

/// Errors from admin operations
#[derive(Debug, Error)]
pub enum AdminError {
    /// The gateway call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The login response did not carry a token
    #[error("login response did not include a token")]
    MissingToken,
}

/// Credentials submitted to the backend login endpoint
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Token issued by the backend on successful login
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

/// View data for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub total_products: usize,
    pub total_categories: usize,
    pub total_brands: usize,
    pub featured_products: usize,
    /// The ten most recent products, in backend order
    pub recent_products: Vec<Value>,
}

/// Client for the admin console
#[derive(Debug, Clone)]
pub struct AdminClient {
    gateway: GatewayClient,
}

impl AdminClient {
    /// Creates an admin surface over an existing gateway
    pub fn new(gateway: GatewayClient) -> Self {
        Self { gateway }
    }

    /// Logs an admin in against the backend and installs the issued token
    ///
    /// The login call itself is unauthenticated. On failure the session is
    /// left untouched, so a fresh session stays anonymous.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        session: &Session,
    ) -> Result<(), AdminError> {
        let credentials = LoginRequest { username, password };
        let payload = self
            .gateway
            .post("/admin/login", &credentials, session)
            .await?;
        let response: LoginResponse =
            serde_json::from_value(payload).map_err(|_| AdminError::MissingToken)?;
        session.authorize(response.token);
        Ok(())
    }

    /// Logs the admin out by destroying the session token
    pub fn logout(&self, session: &Session) {
        session.invalidate();
    }

    /// Dashboard data: the three catalog lists fetched concurrently
    ///
    /// Degrading read: an unavailable list simply counts as empty.
    pub async fn dashboard(&self, session: &Session) -> Dashboard {
        let (products, categories, brands) = join!(
            self.gateway.get("/products", session),
            self.gateway.get("/categories", session),
            self.gateway.get("/brands", session),
        );

        summarize(
            extract_list(products, "products"),
            extract_list(categories, "categories"),
            extract_list(brands, "brands"),
        )
    }

    /// Creates a product
    pub async fn create_product(
        &self,
        product: &Value,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway.post("/products", product, session).await
    }

    /// Updates a product by id
    pub async fn update_product(
        &self,
        id: &str,
        product: &Value,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway
            .put(&format!("/products/{}", id), product, session)
            .await
    }

    /// Deletes a product by id
    pub async fn delete_product(&self, id: &str, session: &Session) -> Result<Value, GatewayError> {
        self.gateway
            .delete(&format!("/products/{}", id), session)
            .await
    }

    /// Creates a category
    pub async fn create_category(
        &self,
        category: &Value,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway.post("/categories", category, session).await
    }

    /// Updates a category by id
    pub async fn update_category(
        &self,
        id: &str,
        category: &Value,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway
            .put(&format!("/categories/{}", id), category, session)
            .await
    }

    /// Deletes a category by id
    pub async fn delete_category(
        &self,
        id: &str,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway
            .delete(&format!("/categories/{}", id), session)
            .await
    }

    /// Creates a brand
    pub async fn create_brand(
        &self,
        brand: &Value,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway.post("/brands", brand, session).await
    }

    /// Updates a brand by id
    pub async fn update_brand(
        &self,
        id: &str,
        brand: &Value,
        session: &Session,
    ) -> Result<Value, GatewayError> {
        self.gateway
            .put(&format!("/brands/{}", id), brand, session)
            .await
    }

    /// Deletes a brand by id
    pub async fn delete_brand(&self, id: &str, session: &Session) -> Result<Value, GatewayError> {
        self.gateway
            .delete(&format!("/brands/{}", id), session)
            .await
    }
}

/// Builds the dashboard summary from the normalized catalog lists
fn summarize(products: Vec<Value>, categories: Vec<Value>, brands: Vec<Value>) -> Dashboard {
    Dashboard {
        total_products: products.len(),
        total_categories: categories.len(),
        total_brands: brands.len(),
        featured_products: products.iter().filter(|p| is_featured(p)).count(),
        recent_products: products
            .into_iter()
            .take(DASHBOARD_RECENT_LIMIT)
            .collect(),
    }
}
