//! Network adapters: session traits implemented over the introspection
//! client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use workbench_introspect::{introspection_to_sdl, GraphQLClient};
use workbench_session::{OperationRunner, SchemaLoader};

/// Parses a header string in "Name: Value" format.
pub fn parse_header(header: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = header.splitn(2, ':').collect();
    if parts.len() != 2 {
        anyhow::bail!("Invalid header format: '{header}'. Expected 'Header-Name: Header-Value'");
    }
    let name = parts[0].trim().to_string();
    let value = parts[1].trim().to_string();
    if name.is_empty() {
        anyhow::bail!("Header name cannot be empty");
    }
    Ok((name, value))
}

/// Builds a client carrying the given "Name: Value" headers.
pub fn client_with_headers(headers: &[String]) -> Result<GraphQLClient> {
    let mut client = GraphQLClient::new();
    for header in headers {
        let (name, value) = parse_header(header)?;
        client = client.with_header(name, value);
    }
    Ok(client)
}

/// Loads schemas by introspecting the endpoint and converting to SDL.
pub struct IntrospectLoader {
    client: GraphQLClient,
}

impl IntrospectLoader {
    #[must_use]
    pub const fn new(client: GraphQLClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SchemaLoader for IntrospectLoader {
    async fn load(&self, endpoint: &str) -> Result<String> {
        let reply = self
            .client
            .introspect(endpoint)
            .await
            .context("introspection failed")?;
        Ok(introspection_to_sdl(&reply))
    }
}

/// Runs operations as `{query, variables}` POSTs.
pub struct HttpRunner {
    client: GraphQLClient,
}

impl HttpRunner {
    #[must_use]
    pub const fn new(client: GraphQLClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OperationRunner for HttpRunner {
    async fn run(
        &self,
        endpoint: &str,
        query: &str,
        variables: &str,
    ) -> Result<serde_json::Value> {
        self.client
            .execute(endpoint, query, variables)
            .await
            .context("operation request failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_parsing() {
        assert_eq!(
            parse_header("Authorization: Bearer abc").unwrap(),
            ("Authorization".to_string(), "Bearer abc".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }
}
