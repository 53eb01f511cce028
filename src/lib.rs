//! Client for a Brazilian severance-pay (rescisão) calculation service.
//!
//! The crate holds everything on the client side of the calculation: the
//! form state and its coercion into a typed snapshot, validation, a
//! time-limited result cache, the HTTP call to the remote service and the
//! rendering of the returned breakdown. The arithmetic itself runs on the
//! server.
//!
//! [`pipeline::RequestPipeline`] ties the pieces together; the `rescisao`
//! binary drives it from the command line.

#![warn(missing_docs)]

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod format;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod service;
pub mod store;
pub mod ui;
pub mod validation;

pub use error::{RescisaoError, RescisaoResult};
