//! # tablecheck-http
//!
//! Client for fetching documents from the document service.
//!
//! Connection settings travel in an explicit [`FetchConfig`]; nothing is read
//! from or written to the process environment.

use reqwest::Client;
use std::time::Duration;
use tablecheck_core::{Document, FetchConfig, TableCheckError, TableCheckResult};

/// Header carrying the service token.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Client for the document service.
pub struct DocumentClient {
    client: Client,
    config: FetchConfig,
}

impl DocumentClient {
    /// Constructs a client for the given service settings.
    ///
    /// # Errors
    ///
    /// Returns `TableCheckError::Config` if the host or token is empty, and
    /// `TableCheckError::Http` if building the underlying HTTP client fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablecheck_core::FetchConfig;
    /// use tablecheck_http::DocumentClient;
    /// let client = DocumentClient::new(FetchConfig::new("https://docs.example", "token"))
    ///     .expect("failed to create DocumentClient");
    /// ```
    pub fn new(config: FetchConfig) -> TableCheckResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            // Disable system proxy lookup to avoid macOS system-configuration issues
            .no_proxy()
            .build()
            .map_err(|e| TableCheckError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// URL of one document within a recipe.
    pub fn document_url(&self, recipe_id: &str, document_id: &str) -> String {
        format!(
            "{}/api/v1/recipes/{}/documents/{}",
            self.config.api_host.trim_end_matches('/'),
            recipe_id,
            document_id
        )
    }

    /// Fetch and decode a document.
    ///
    /// # Errors
    ///
    /// Returns `TableCheckError::Config` for empty ids, `TableCheckError::Http`
    /// if the request fails or the service answers with a non-success status,
    /// and `TableCheckError::Json` if the body is not a valid document.
    pub async fn fetch_document(
        &self,
        recipe_id: &str,
        document_id: &str,
    ) -> TableCheckResult<Document> {
        if recipe_id.trim().is_empty() || document_id.trim().is_empty() {
            return Err(TableCheckError::config(
                "recipe id and document id are required",
            ));
        }

        let url = self.document_url(recipe_id, document_id);
        tracing::debug!("Fetching document {} from {}", document_id, url);

        let response = self
            .client
            .get(&url)
            .header(AUTH_HEADER, &self.config.auth_token)
            .send()
            .await
            .map_err(|e| TableCheckError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TableCheckError::Http(format!(
                "HTTP {} - {}",
                response.status(),
                response.status().canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TableCheckError::Http(format!("Failed to read body: {e}")))?;

        let document = Document::from_json_str(&body)?;
        tracing::info!(
            "Fetched document {} with {} categories",
            document.id,
            document.x.len()
        );
        Ok(document)
    }
}
