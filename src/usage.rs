use std::collections::BTreeSet;

use tree_sitter::{Node, Parser};

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("Failed to initialize parser: {0}")]
    Init(String),

    #[error("Failed to parse source file")]
    ParseFailed,
}

/// Collect environment variable names accessed in a Rust source string.
///
/// Recognized accessor shapes:
///   - `env::var("NAME")` (any path ending in `env::var`, e.g. `std::env::var`)
///   - `env::var_os("NAME")`
///   - `env!("NAME")` and `option_env!("NAME")`
///
/// Only string-literal first arguments are collected; dynamic names are
/// invisible to this pass.
pub fn extract_env_names(source: &str) -> Result<BTreeSet<String>, UsageError> {
    let mut parser = Parser::new();
    let language = tree_sitter_rust::LANGUAGE;
    parser
        .set_language(&language.into())
        .map_err(|e| UsageError::Init(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or(UsageError::ParseFailed)?;

    let mut names = BTreeSet::new();
    collect_names(tree.root_node(), source.as_bytes(), &mut names);
    Ok(names)
}

fn collect_names(node: Node, source: &[u8], names: &mut BTreeSet<String>) {
    match node.kind() {
        "call_expression" => {
            if let Some(name) = env_call_argument(node, source) {
                names.insert(name);
            }
        }
        "macro_invocation" => {
            if let Some(name) = env_macro_argument(node, source) {
                names.insert(name);
            }
        }
        _ => {}
    }

    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_names(child, source, names);
        }
    }
}

/// `env::var("NAME")` / `env::var_os("NAME")`, with or without a leading path.
fn env_call_argument(node: Node, source: &[u8]) -> Option<String> {
    let function = node.child_by_field_name("function")?;
    if function.kind() != "scoped_identifier" {
        return None;
    }

    let path = function.utf8_text(source).ok()?;
    let mut segments = path.rsplit("::");
    let last = segments.next()?;
    let parent = segments.next()?;
    if parent != "env" || !matches!(last, "var" | "var_os") {
        return None;
    }

    let arguments = node.child_by_field_name("arguments")?;
    string_literal_text(arguments.named_child(0)?, source)
}

/// `env!("NAME")` / `option_env!("NAME")`.
fn env_macro_argument(node: Node, source: &[u8]) -> Option<String> {
    let mac = node.child_by_field_name("macro")?;
    let path = mac.utf8_text(source).ok()?;
    let last = path.rsplit("::").next()?;
    if !matches!(last, "env" | "option_env") {
        return None;
    }

    // Arguments live in a token tree; the name is the first string token.
    for i in 0..node.child_count() {
        let child = node.child(i)?;
        if child.kind() == "token_tree" {
            for j in 0..child.named_child_count() {
                let token = child.named_child(j)?;
                if let Some(name) = string_literal_text(token, source) {
                    return Some(name);
                }
            }
        }
    }
    None
}

fn string_literal_text(node: Node, source: &[u8]) -> Option<String> {
    if !matches!(node.kind(), "string_literal" | "raw_string_literal") {
        return None;
    }
    for i in 0..node.named_child_count() {
        let child = node.named_child(i)?;
        if child.kind() == "string_content" {
            return child.utf8_text(source).ok().map(str::to_string);
        }
    }
    // Empty string literal has no content node
    None
}
