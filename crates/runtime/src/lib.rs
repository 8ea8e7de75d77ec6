//! Odoo Runtime - transport channel for the XML-RPC endpoints
//!
//! This crate provides the I/O layer underneath the session:
//!
//! - **Address**: scheme/host/port resolution and secure-channel selection
//! - **Transport**: one XML-RPC round trip per call, as a trait object
//! - **Errors**: raw transport, HTTP, fault and codec failures
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   odoo-rs    │  Session, ModelClient
//! └──────┬───────┘
//!        │ Arc<dyn Transport>
//! ┌──────▼───────┐
//! │ odoo-runtime │  This crate
//! │  ┌────────┐  │
//! │  │ Trans  │  │  HTTP(S) POST of text/xml
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ Codec  │  │  odoo-protocol
//! │  └────────┘  │
//! └──────────────┘
//! ```
//!
//! Errors here are raw; `odoo-rs` normalizes them at its public boundary.

pub mod address;
pub mod error;
pub mod transport;

pub use address::ServerAddress;
pub use error::{Error, Result};
pub use transport::{CallFuture, HttpTransport, Transport, USER_AGENT};
