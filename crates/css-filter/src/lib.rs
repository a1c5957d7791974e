//! css-filter: CSS `filter` descriptors for raster print artwork
//!
//! This library turns a CSS-like filter descriptor (the string a browser
//! preview applies through `filter: ...`) into a structured [`FilterSpec`]
//! and applies that spec to raw RGBA8 pixel buffers with fixed, documented
//! numeric semantics.
//!
//! Parsing and application are two independent pure functions:
//!
//! ```
//! use css_filter::{apply, parse};
//!
//! let spec = parse("brightness(1.05) contrast(1.1)");
//! assert_eq!(spec.brightness, 1.05);
//! assert_eq!(spec.contrast, 1.1);
//!
//! // One opaque mid-gray pixel
//! let out = apply(&spec, &[128, 128, 128, 255]).unwrap();
//! assert_eq!(out.len(), 4);
//! assert_eq!(out[3], 255); // alpha is never touched
//! ```
//!
//! # Supported tokens
//!
//! | Token | Field | Neutral |
//! |---|---|---|
//! | `brightness(x)` | [`FilterSpec::brightness`] | `1.0` |
//! | `contrast(x)` | [`FilterSpec::contrast`] | `1.0` |
//! | `saturate(x)` / `saturation(x)` | [`FilterSpec::saturation`] | `1.0` |
//! | `sepia(x)` | [`FilterSpec::sepia`] | `0.0` |
//! | `invert(x)` | [`FilterSpec::invert`] | `false` |
//!
//! Values are plain numbers or percentages (`110%` is `1.1`). Tokens are
//! matched case-insensitively and whitespace is ignored. Anything else in
//! the descriptor is skipped without error.
//!
//! # Application order
//!
//! [`apply`] runs the adjustments in a fixed order:
//!
//! 1. brightness and saturation, combined in one pass
//! 2. contrast, `out = c * in + 128 * (1 - c)`
//! 3. invert, `out = 255 - in`
//!
//! Every stage leaves the alpha channel alone. `sepia` is carried through
//! parsing but has no rendering stage.

mod apply;
mod error;
mod filter_spec;
mod parse;

pub use apply::{apply, apply_in_place};
pub use error::FilterError;
pub use filter_spec::FilterSpec;
pub use parse::parse;
