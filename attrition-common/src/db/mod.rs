//! Employee database schema and bulk load

pub mod init;

pub use init::*;
