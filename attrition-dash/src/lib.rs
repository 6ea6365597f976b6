//! attrition-dash - terminal dashboard over the attrition API
//!
//! Holds no data of its own: every page is rendered from API responses.
//! Risk factors and recommendations are computed locally from the employee
//! record with `attrition_common`.

pub mod client;
pub mod filter;
pub mod render;
pub mod stats;

pub use client::{ApiClient, ClientError};
