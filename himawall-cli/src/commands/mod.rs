//! CLI command implementations.
//!
//! Each subcommand has its own module with its handler.
//!
//! - [`install`] - Register the LaunchAgent and run one update
//! - [`runonce`] - Single fetch-compose-publish cycle
//! - [`stop`] - Deregister the LaunchAgent
//! - [`restore`] - Restore the system default background

pub mod install;
pub mod restore;
pub mod runonce;
pub mod stop;
