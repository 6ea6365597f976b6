//! HTTP API handlers for attrition-api

pub mod employees;
pub mod health;
pub mod model_status;
pub mod predict;
pub mod root;

pub use employees::employee_routes;
pub use health::health_routes;
pub use model_status::model_status_routes;
pub use predict::predict_routes;
pub use root::root_routes;
