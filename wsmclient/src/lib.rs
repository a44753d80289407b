//! # wsmclient - WS-Management client
//!
//! Envoie les enveloppes construites par [`wsmsoap`] à un endpoint
//! WS-Management en HTTP(S) et décode les réponses.
//!
//! ## Fonctionnalités
//!
//! - Authentification Digest (MD5, `qop=auth`) et Basic, un seul nouvel essai sur challenge
//! - Requête et réponse brutes gardées avec chaque résultat et chaque erreur
//! - [`Service`] générique liant une classe de ressource aux verbes WS-Management
//! - Configuration YAML avec surcharges d'environnement `WSMAN_CONFIG__`
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wsmclient::{ClientConfig, Service, WsmanClient};
//!
//! let config = ClientConfig::load("wsman.yaml")?;
//! let client = Arc::new(WsmanClient::new(&config)?);
//! let boot: Service<BootCapabilities> = Service::new(
//!     client,
//!     "http://intel.com/wbem/wscim/1/amt-schema/1/AMT_BootCapabilities",
//! );
//!
//! let response = boot.get(None).await?;
//! println!("{}", response.to_json());
//! ```

mod client;
pub mod config;
pub mod digest;
mod error;
#[cfg(any(test, feature = "testing"))]
mod mock;
mod service;
pub mod transport;

pub use client::{Response, WsmanClient};
pub use config::{AuthScheme, ClientConfig};
pub use error::{CallError, RawExchange, Result};
#[cfg(any(test, feature = "testing"))]
pub use mock::MockTransport;
pub use service::Service;
pub use transport::{HttpTransport, Transport};
