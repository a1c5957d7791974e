//! Podmix - print-on-demand design export
//!
//! Normalizes uploaded designs, applies CSS-style filters and composites
//! them onto print-ready 300 DPI canvases.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
