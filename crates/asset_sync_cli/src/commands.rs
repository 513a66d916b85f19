//! Command modules for the asset-sync CLI.
//!
//! - `assets_cmd`: local inspection (`list`, `status`)
//! - `config_cmd`: configuration file management
//! - `sync_cmd`: the one-time asset bootstrap

pub mod assets_cmd;
pub mod config_cmd;
pub mod sync_cmd;
