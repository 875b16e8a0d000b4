use std::collections::BTreeMap;
use std::path::Path;

/// Variables parsed from a `.env` file, plus the keys whose values look
/// malformed (unbalanced quotes, leading whitespace after the `=`).
#[derive(Debug, Default)]
pub struct DotenvVars {
    pub vars: BTreeMap<String, String>,
    pub bad_values: Vec<String>,
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse one `KEY=VALUE` line. Returns `(key, value, malformed)` or `None`
/// for blank lines, comments, and lines that are not assignments.
fn parse_line(line: &str) -> Option<(String, String, bool)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let assignment = trimmed.strip_prefix("export ").unwrap_or(trimmed);
    let (key, raw_value) = assignment.split_once('=')?;
    let key = key.trim_end();
    if !is_valid_key(key) {
        return None;
    }

    // Whitespace between `=` and the value is suspicious in a .env file:
    // many loaders keep it as part of the value.
    let mut malformed = raw_value.starts_with(|c: char| c.is_whitespace());

    let mut value = raw_value.trim().to_string();
    if let Some(quote) = value.chars().next().filter(|c| *c == '"' || *c == '\'') {
        if value.len() >= 2 && value.ends_with(quote) {
            value = value[1..value.len() - 1].to_string();
        } else {
            malformed = true;
        }
    }

    Some((key.to_string(), value, malformed))
}

/// Load variable declarations from a `.env` file. A missing file yields an
/// empty result rather than an error.
pub fn load_dotenv_vars(path: &Path) -> std::io::Result<DotenvVars> {
    let mut result = DotenvVars::default();
    if !path.exists() {
        return Ok(result);
    }

    let content = std::fs::read_to_string(path)?;
    for line in content.lines() {
        if let Some((key, value, malformed)) = parse_line(line) {
            if malformed && !result.bad_values.contains(&key) {
                result.bad_values.push(key.clone());
            }
            result.vars.insert(key, value);
        }
    }
    Ok(result)
}
