//! Single-field extractors over the tokenized intro.
//!
//! CPU, RAM and storage sit at fixed positions in the retailer's intro;
//! screen size and weight wander, so those are found by content.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ExtractError;

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

pub const CPU_INDEX: usize = 1;
pub const RAM_INDEX: usize = 2;
pub const STORAGE_INDEX: usize = 3;

/// First run of digits, with an optional decimal part, anywhere in `s`.
pub fn first_number(s: &str) -> Option<&str> {
    NUMBER_RE.find(s).map(|m| m.as_str())
}

pub fn name(tokens: &[String]) -> Result<&str, ExtractError> {
    tokens
        .first()
        .map(String::as_str)
        .ok_or_else(|| ExtractError::MalformedIntro("no fields".into()))
}

/// The first word of the product name is the brand.
pub fn brand(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or_default()
}

/// CPU text is kept verbatim, clock speed and all.
pub fn cpu(tokens: &[String]) -> Result<&str, ExtractError> {
    tokens
        .get(CPU_INDEX)
        .map(String::as_str)
        .ok_or(ExtractError::MissingField("cpu"))
}

/// Total RAM in GB. Composite fields like "8GB (1x 8GB) RAM" list the total
/// first.
pub fn ram_gb(tokens: &[String]) -> Result<&str, ExtractError> {
    tokens
        .get(RAM_INDEX)
        .and_then(|t| first_number(t))
        .ok_or(ExtractError::MissingField("ram"))
}

pub fn screen_size_in(tokens: &[String]) -> Option<&str> {
    let field = tokens.iter().find(|t| t.to_lowercase().contains("inch"))?;
    first_number(field)
}

pub fn weight_kg(tokens: &[String]) -> Option<&str> {
    let field = tokens.iter().find(|t| t.ends_with("kg"))?;
    first_number(field)
}
