//! Himawall - Himawari-8 full-disk satellite wallpaper engine
//!
//! This library downloads the latest published full-disk frame of a
//! geostationary satellite as an ND×ND grid of image tiles, composites the
//! tiles into one raster, scales it to the target display, and maintains a
//! bounded on-disk history of generated wallpapers.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use himawall::config::Config;
//! use himawall::provider::ReqwestClient;
//! use himawall::publisher::DesktopPublisher;
//! use himawall::service::WallpaperService;
//!
//! let config = Config::load()?;
//! let service = WallpaperService::new(config, ReqwestClient::new()?, DesktopPublisher)?;
//! let report = service.run_once().await?;
//! ```

pub mod config;
pub mod fitter;
pub mod grid;
pub mod history;
pub mod logging;
pub mod provider;
pub mod publisher;
pub mod service;
pub mod timeslot;

/// Version of the Himawall library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
