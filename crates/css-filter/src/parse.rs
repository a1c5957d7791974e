//! Filter descriptor parser.
//!
//! The descriptor is a sequence of function-call tokens such as
//! `brightness(1.05) contrast(110%)`. Whitespace is removed before
//! tokenizing, so `brightness( 1.05 )` and `brightness(1.05)` are the same.

use std::sync::OnceLock;

use regex::Regex;

use crate::FilterSpec;

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"([a-z-]+)\(([^()]*)\)").expect("static token pattern"))
}

/// Parse a CSS-like filter descriptor into a [`FilterSpec`].
///
/// Never fails. Unknown functions, negative or unparsable values, and stray
/// text are skipped, leaving the affected field at its neutral value. When a
/// function appears more than once the last occurrence wins. `"none"` and
/// the empty string yield [`FilterSpec::NEUTRAL`].
///
/// `invert` is a switch: it is on when its amount is at least `0.5`, and
/// `invert()` with no amount means `invert(1)`.
///
/// # Example
///
/// ```
/// use css_filter::{parse, FilterSpec};
///
/// assert_eq!(parse("none"), FilterSpec::NEUTRAL);
///
/// let spec = parse("Saturate(150%) blur(2px) invert(1)");
/// assert_eq!(spec.saturation, 1.5);
/// assert!(spec.invert);
/// ```
pub fn parse(descriptor: &str) -> FilterSpec {
    let compact: String = descriptor
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let mut spec = FilterSpec::NEUTRAL;
    if compact.is_empty() || compact == "none" {
        return spec;
    }

    for caps in token_regex().captures_iter(&compact) {
        let name = &caps[1];
        let raw = &caps[2];

        match name {
            "brightness" => {
                if let Some(v) = parse_amount(raw) {
                    spec.brightness = v;
                }
            }
            "contrast" => {
                if let Some(v) = parse_amount(raw) {
                    spec.contrast = v;
                }
            }
            "saturate" | "saturation" => {
                if let Some(v) = parse_amount(raw) {
                    spec.saturation = v;
                }
            }
            "sepia" => {
                if let Some(v) = parse_amount(raw) {
                    spec.sepia = v;
                }
            }
            "invert" => {
                let amount = if raw.is_empty() {
                    Some(1.0)
                } else {
                    parse_amount(raw)
                };
                if let Some(v) = amount {
                    spec.invert = v >= 0.5;
                }
            }
            _ => {}
        }
    }

    spec
}

/// Parse a number or percentage. Rejects negative and non-finite amounts.
fn parse_amount(raw: &str) -> Option<f32> {
    let value = match raw.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? / 100.0,
        None => raw.parse::<f32>().ok()?,
    };
    (value.is_finite() && value >= 0.0).then_some(value)
}
