//! `odoo-rpc`: command-line access to an Odoo server over XML-RPC.
//!
//! Every command prints one result envelope (see [`output`]) and exits with
//! status 1 on failure. Connection settings come from a profile in the config
//! file, overridden by global flags.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod styles;
