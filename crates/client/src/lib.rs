//! Typed HTTP client for the FitHub storefront API.
//!
//! Catalog reads are anonymous. Admin calls take a [`Credential`] argument
//! on every call; the client itself never stores one.
//!
//! ```no_run
//! # async fn demo() -> fithub_client::ClientResult<()> {
//! use fithub_client::{Credential, ProductQuery, StorefrontClient};
//!
//! let client = StorefrontClient::new("http://localhost:5000")?;
//! let page = client
//!     .products(&ProductQuery::new().category("cardio").page(1, 20))
//!     .await?;
//! println!("{} of {}", page.data.len(), page.pagination.total);
//!
//! let admin = Credential::new(std::env::var("FITHUB_TOKEN").unwrap_or_default());
//! let stats = client.dashboard(&admin).await?;
//! println!("revenue {}", stats.stats.revenue);
//! # Ok(())
//! # }
//! ```

mod error;
mod types;

use std::fmt;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;
use uuid::Uuid;

pub use error::{ClientError, ClientResult};
pub use types::{
    Dashboard, DashboardStats, Facet, NewProduct, OrderCustomer, Pagination, Product,
    ProductPage, ProductPatch, ProductQuery, RecentOrder, Role, User,
};

use error::FailureBody;
use types::{DataEnvelope, MessageEnvelope};

/// A bearer API token, passed explicitly to each admin call.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    fn authorization(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// API paths, relative to the base URL.
#[derive(Debug, Clone, Copy)]
enum Endpoint {
    Products,
    Featured,
    Categories,
    Brands,
    Product(Uuid),
    Stats,
    Users,
    User(Uuid),
    UserRole(Uuid),
}

impl Endpoint {
    fn path(self) -> String {
        match self {
            Endpoint::Products => "api/products".to_string(),
            Endpoint::Featured => "api/products/featured".to_string(),
            Endpoint::Categories => "api/products/categories".to_string(),
            Endpoint::Brands => "api/products/brands".to_string(),
            Endpoint::Product(id) => format!("api/products/{id}"),
            Endpoint::Stats => "api/admin/stats".to_string(),
            Endpoint::Users => "api/admin/users".to_string(),
            Endpoint::User(id) => format!("api/admin/users/{id}"),
            Endpoint::UserRole(id) => format!("api/admin/users/{id}/role"),
        }
    }
}

/// Storefront API client.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Create a client for a server root such as `http://localhost:5000`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Self::with_http_client(http, base_url)
    }

    /// Create a client around a preconfigured `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(
        &self,
        method: Method,
        endpoint: Endpoint,
        credential: Option<&Credential>,
    ) -> ClientResult<RequestBuilder> {
        let url = self.base_url.join(&endpoint.path())?;
        let mut builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        if let Some(credential) = credential {
            builder = builder.header(header::AUTHORIZATION, credential.authorization());
        }
        Ok(builder)
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "storefront response");

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await?;
        Err(FailureBody::into_error(status, &body))
    }

    // Catalog

    /// One page of products matching `query`.
    pub async fn products(&self, query: &ProductQuery) -> ClientResult<ProductPage> {
        let builder = self
            .request(Method::GET, Endpoint::Products, None)?
            .query(query);
        self.send(builder).await
    }

    /// Highest-rated featured products; server default size when `limit` is `None`.
    pub async fn featured(&self, limit: Option<u32>) -> ClientResult<Vec<Product>> {
        let mut builder = self.request(Method::GET, Endpoint::Featured, None)?;
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        let envelope: DataEnvelope<Vec<Product>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    pub async fn categories(&self) -> ClientResult<Vec<Facet>> {
        let builder = self.request(Method::GET, Endpoint::Categories, None)?;
        let envelope: DataEnvelope<Vec<Facet>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    pub async fn brands(&self) -> ClientResult<Vec<Facet>> {
        let builder = self.request(Method::GET, Endpoint::Brands, None)?;
        let envelope: DataEnvelope<Vec<Facet>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    pub async fn product(&self, id: Uuid) -> ClientResult<Product> {
        let builder = self.request(Method::GET, Endpoint::Product(id), None)?;
        let envelope: DataEnvelope<Product> = self.send(builder).await?;
        Ok(envelope.data)
    }

    // Admin: products

    pub async fn create_product(
        &self,
        credential: &Credential,
        product: &NewProduct,
    ) -> ClientResult<Product> {
        let builder = self
            .request(Method::POST, Endpoint::Products, Some(credential))?
            .json(product);
        let envelope: DataEnvelope<Product> = self.send(builder).await?;
        Ok(envelope.data)
    }

    pub async fn update_product(
        &self,
        credential: &Credential,
        id: Uuid,
        patch: &ProductPatch,
    ) -> ClientResult<Product> {
        let builder = self
            .request(Method::PUT, Endpoint::Product(id), Some(credential))?
            .json(patch);
        let envelope: DataEnvelope<Product> = self.send(builder).await?;
        Ok(envelope.data)
    }

    /// Delete a product, returning the server's confirmation message.
    pub async fn delete_product(&self, credential: &Credential, id: Uuid) -> ClientResult<String> {
        let builder = self.request(Method::DELETE, Endpoint::Product(id), Some(credential))?;
        let envelope: MessageEnvelope = self.send(builder).await?;
        Ok(envelope.message)
    }

    // Admin: back-office

    pub async fn dashboard(&self, credential: &Credential) -> ClientResult<Dashboard> {
        let builder = self.request(Method::GET, Endpoint::Stats, Some(credential))?;
        self.send(builder).await
    }

    pub async fn users(&self, credential: &Credential) -> ClientResult<Vec<User>> {
        let builder = self.request(Method::GET, Endpoint::Users, Some(credential))?;
        let envelope: DataEnvelope<Vec<User>> = self.send(builder).await?;
        Ok(envelope.data)
    }

    pub async fn delete_user(&self, credential: &Credential, id: Uuid) -> ClientResult<String> {
        let builder = self.request(Method::DELETE, Endpoint::User(id), Some(credential))?;
        let envelope: MessageEnvelope = self.send(builder).await?;
        Ok(envelope.message)
    }

    pub async fn set_user_role(
        &self,
        credential: &Credential,
        id: Uuid,
        role: Role,
    ) -> ClientResult<User> {
        let builder = self
            .request(Method::PUT, Endpoint::UserRole(id), Some(credential))?
            .json(&serde_json::json!({ "role": role }));
        let envelope: DataEnvelope<User> = self.send(builder).await?;
        Ok(envelope.data)
    }
}
