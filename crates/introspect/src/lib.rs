//! GraphQL endpoint access for graphql-workbench.
//!
//! This crate owns the network contract of the harness: fetching a remote
//! schema via the standard introspection query, converting the response to
//! SDL so it can be handed to a schema parser, and executing the edited
//! operation as a `{query, variables}` POST.
//!
//! # Examples
//!
//! ```no_run
//! use workbench_introspect::introspect_url_to_sdl;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let sdl = introspect_url_to_sdl("https://api.example.com/graphql").await?;
//! println!("{sdl}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod query;
mod sdl;
mod types;

pub use client::GraphQLClient;
pub use error::{ClientError, Result};
pub use query::INTROSPECTION_QUERY;
pub use sdl::introspection_to_sdl;
pub use types::*;

/// Introspects an endpoint and returns its schema as SDL.
///
/// Convenience wrapper combining [`GraphQLClient::introspect`] and
/// [`introspection_to_sdl`].
#[tracing::instrument]
pub async fn introspect_url_to_sdl(url: &str) -> Result<String> {
    tracing::info!("starting introspection");
    let reply = GraphQLClient::new().introspect(url).await?;
    let sdl = introspection_to_sdl(&reply);
    tracing::info!(sdl_length = sdl.len(), "introspection complete");
    Ok(sdl)
}
