//! HTTP client for GraphQL endpoints.
//!
//! One client covers both operations the harness needs: the introspection
//! POST (`{query: <introspection-query>}`) and operation execution
//! (`{query, variables}`). Custom headers and timeouts are supported;
//! retries and response caching are deliberately out of scope.

use std::collections::HashMap;
use std::time::Duration;

use crate::{ClientError, IntrospectionReply, Result, INTROSPECTION_QUERY};

/// Default timeout for the whole request (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// A configurable client for a GraphQL HTTP endpoint.
///
/// # Examples
///
/// ```no_run
/// use workbench_introspect::GraphQLClient;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GraphQLClient::new()
///     .with_header("Authorization", "Bearer my-token");
/// let reply = client.introspect("https://api.example.com/graphql").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GraphQLClient {
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
}

impl Default for GraphQLClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphQLClient {
    /// Creates a client with default timeouts and no custom headers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Adds a custom HTTP header, e.g. for authentication.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the maximum time allowed for the entire request.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum time allowed to establish a connection.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Executes the introspection query and parses the response.
    #[tracing::instrument(skip(self))]
    pub async fn introspect(&self, url: &str) -> Result<IntrospectionReply> {
        let body = serde_json::json!({ "query": INTROSPECTION_QUERY });
        let response = self.post(url, &body).await?;

        tracing::debug!("parsing introspection response");
        let reply = parse_introspection(response)?;

        tracing::info!(
            types = reply.data.schema.types.len(),
            directives = reply.data.schema.directives.len(),
            "introspection successful"
        );
        Ok(reply)
    }

    /// Executes the introspection query and returns the raw JSON response.
    #[tracing::instrument(skip(self))]
    pub async fn introspect_raw(&self, url: &str) -> Result<serde_json::Value> {
        let body = serde_json::json!({ "query": INTROSPECTION_QUERY });
        self.post(url, &body).await
    }

    /// Executes an operation: POST `{query, variables}`.
    ///
    /// `variables` is the variables document's text, forwarded verbatim; the
    /// response is the server's `{data, errors}` payload as raw JSON.
    #[tracing::instrument(skip(self, query, variables))]
    pub async fn execute(
        &self,
        url: &str,
        query: &str,
        variables: &str,
    ) -> Result<serde_json::Value> {
        let body = serde_json::json!({ "query": query, "variables": variables });
        self.post(url, &body).await
    }

    /// Issues one POST request and returns the response body as JSON.
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to create HTTP client: {e}")))?;

        let mut request = client.post(url).header("Content-Type", "application/json");
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "received response");

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %error_body, "HTTP error response");
            return Err(ClientError::Http(status.as_u16(), error_body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}

/// Interprets a response body as an introspection reply.
///
/// A body that is valid JSON but does not carry the `{data: {__schema}}`
/// shape is an [`ClientError::Invalid`] response, distinct from a body
/// that is not JSON at all.
fn parse_introspection(response: serde_json::Value) -> Result<IntrospectionReply> {
    serde_json::from_value(response).map_err(|e| {
        tracing::error!(error = %e, "response is not an introspection result");
        ClientError::Invalid(e.to_string())
    })
}
