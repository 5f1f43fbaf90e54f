use std::path::Path;

use anyhow::{Context, Result};

use sitewalk_core::CustomFormField;

/// Seed routes as either a JSON array of strings or one route per line.
/// Blank lines and `#` comments are ignored in the line form.
pub fn parse_seed_routes(text: &str) -> Result<Vec<String>> {
    if text.trim_start().starts_with('[') {
        let routes: Vec<String> = serde_json::from_str(text).context("seed routes are not a JSON string array")?;
        return Ok(routes);
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

pub fn load_seed_routes(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed routes from {}", path.display()))?;
    parse_seed_routes(&text)
}

pub fn load_form_fields(path: impl AsRef<Path>) -> Result<Vec<CustomFormField>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read form fields from {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not a JSON array of {{selector, value}}", path.display()))
}
