//! # Attrition Common Library
//!
//! Shared code for the attrition API, the import tool and the dashboard:
//! - Employee record types
//! - Feature normalization onto the classifier schema
//! - Classifier interface and the logistic model artifact
//! - Risk tiers, risk factor analysis and recommendations
//! - Configuration loading
//! - Database schema and bulk load (feature `sqlx`)

pub mod classifier;
pub mod config;
pub mod dataset;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod factors;
pub mod features;
pub mod models;
pub mod predictor;
pub mod recommendations;
pub mod risk;

pub use error::{Error, Result};
pub use models::{Employee, EmployeeList, EmployeeProfile};
pub use risk::RiskTier;
