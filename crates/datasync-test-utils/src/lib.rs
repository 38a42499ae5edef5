//! Shared test utilities for the sheet data sync workspace.
//!
//! A dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`server`]: [`FixtureServer`], a loopback HTTP server with canned routes
//! - [`site`]: [`TestSite`], a temporary site directory with a sync config

pub mod server;
pub mod site;

pub use server::{FixtureServer, Route};
pub use site::TestSite;
