use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Environment variable names declared in a compose manifest, with the
/// `path:line` location of each declaration.
#[derive(Debug, Default)]
pub struct ComposeEnv {
    pub names: BTreeSet<String>,
    pub sources: BTreeMap<String, Vec<String>>,
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Extract the variable name from a list item like `- KEY=VALUE`, `- KEY`,
/// or a quoted variant of either.
fn list_item_key(item: &str) -> Option<String> {
    let mut entry = item.trim();
    for quote in ['"', '\''] {
        if entry.len() >= 2 && entry.starts_with(quote) && entry.ends_with(quote) {
            entry = &entry[1..entry.len() - 1];
        }
    }
    let key = entry.split_once('=').map_or(entry, |(k, _)| k).trim();
    is_valid_key(key).then(|| key.to_string())
}

/// Best-effort extraction of `environment:` list entries from a
/// docker-compose style file. This deliberately avoids a full YAML parser:
/// it tracks `environment:` blocks by indentation and reads `- KEY=VALUE`
/// list items inside them. Mapping-style blocks are not recognized.
pub fn load_compose_env_names(path: &Path) -> std::io::Result<ComposeEnv> {
    let mut result = ComposeEnv::default();
    if !path.exists() {
        return Ok(result);
    }

    let content = std::fs::read_to_string(path)?;
    let display = path.display().to_string();

    // Indentation of the `environment:` key we are currently inside, if any.
    let mut block_indent: Option<usize> = None;

    for (lineno, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let indent = indent_of(line);
        if let Some(env_indent) = block_indent {
            if indent <= env_indent {
                block_indent = None;
            } else if let Some(item) = trimmed.strip_prefix("- ") {
                if let Some(key) = list_item_key(item) {
                    result.names.insert(key.clone());
                    result
                        .sources
                        .entry(key)
                        .or_default()
                        .push(format!("{}:{}", display, lineno + 1));
                }
                continue;
            }
        }

        if trimmed == "environment:" {
            block_indent = Some(indent);
        }
    }

    Ok(result)
}
