//! Configuration for unistore
//!
//! This crate provides:
//! - Config file discovery (CWD first, then home directory)
//! - Store tuning options (`StoreConfig`) and their validation

pub mod config_file;
pub mod store_config;

pub use config_file::load_config_file;
pub use store_config::{ReentrancyPolicy, StoreConfig};
