//! Async client for the Rachio irrigation controller public API.
//!
//! This crate defines:
//! - An authenticated transport over the remote HTTP endpoints
//! - A per-resource client ([`RachioClient`]) covering people, devices,
//!   schedules, events, forecasts and webhooks
//! - Client-side filtering and time-windowing over event and forecast
//!   records
//!
//! Responses are passed through as raw JSON values; only the light
//! extractions each method documents are applied on top.
//!
//! ```no_run
//! use rachio::RachioClient;
//!
//! # async fn run() -> rachio::Result<()> {
//! let client = RachioClient::new("access-token");
//! for device in client.get_devices().await? {
//!     println!("{}", device["name"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod transport;

pub use client::RachioClient;
pub use config::{Config, Units};
pub use error::{Error, Result};
pub use filter::Criteria;
pub use transport::{HttpTransport, Transport};
