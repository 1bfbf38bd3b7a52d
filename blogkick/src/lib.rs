//! blogkick - Sidekick actions for a Helix-hosted blog
//!
//! This library implements the operator actions of a blog's authoring
//! sidekick: switching between the editor, staging and production views,
//! publishing with cache purges, predicting the public URL of a draft and
//! exporting article metadata.
//!
//! # High-Level API
//!
//! The [`sidekick`] module drives everything through a [`gateway::HostGateway`]:
//!
//! ```ignore
//! use blogkick::actions::ActionId;
//! use blogkick::http::ReqwestClient;
//! use blogkick::sidekick::Sidekick;
//!
//! let http = ReqwestClient::new()?;
//! let sidekick = Sidekick::new(&gateway, &http, &config.services);
//! sidekick.execute(ActionId::Publish).await?;
//! ```

pub mod actions;
pub mod config;
pub mod document;
pub mod environment;
pub mod gateway;
pub mod http;
pub mod logging;
pub mod metadata;
pub mod predict;
pub mod preview;
pub mod publish;
pub mod purge;
pub mod sidekick;

/// Version of the blogkick library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
