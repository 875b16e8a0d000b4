use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::compose;
use crate::dotenv;
use crate::usage;

/// Path components that are never scanned, flag or no flag.
const DEFAULT_EXCLUDES: [&str; 4] = ["target", ".git", "vendor", "node_modules"];

/// Result of one full analysis pass over a project.
#[derive(Debug, Default, Serialize)]
pub struct Findings {
    /// Names accessed in source code.
    pub used: BTreeSet<String>,
    /// Names declared in .env / compose.
    pub declared: BTreeSet<String>,
    /// Used but declared nowhere.
    pub missing: Vec<String>,
    /// Declared but never used.
    pub unused: Vec<String>,
    /// (missing name, declared near-match) pairs.
    pub typos: Vec<(String, String)>,
    /// Declared keys whose values look malformed.
    pub bad_values: Vec<String>,
    /// Declared name -> where it was declared.
    pub sources: BTreeMap<String, Vec<String>>,
    /// Source files successfully analyzed.
    pub files_scanned: usize,
}

impl Findings {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
            && self.unused.is_empty()
            && self.typos.is_empty()
            && self.bad_values.is_empty()
    }
}

/// Whether two variable names are close enough that one is probably a typo
/// of the other. Case-insensitive; equal names are never typos.
pub fn similar_names(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    if a == b {
        return false;
    }
    if a.len().abs_diff(b.len()) > 2 {
        return false;
    }
    let prefix = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .count();
    let longest = a.chars().count().max(b.chars().count());
    prefix * 10 >= longest * 8 || a.contains(&b) || b.contains(&a)
}

fn is_excluded(rel: &Path, excludes: &[String]) -> bool {
    if rel
        .components()
        .any(|c| matches!(c.as_os_str().to_str(), Some(s) if DEFAULT_EXCLUDES.contains(&s)))
    {
        return true;
    }
    let rel_str = rel.to_string_lossy();
    excludes.iter().any(|ex| {
        rel.starts_with(ex)
            || glob::Pattern::new(ex)
                .map(|p| p.matches(&rel_str))
                .unwrap_or(false)
    })
}

/// Enumerate source files under `root` matching the include glob, minus
/// default and user excludes.
pub fn collect_source_files(root: &Path, include: &str, excludes: &[String]) -> Vec<PathBuf> {
    let pattern = root.join("**").join(include);
    let pattern_str = pattern.to_string_lossy();

    let mut files = Vec::new();
    if let Ok(paths) = glob::glob(&pattern_str) {
        for entry in paths.flatten() {
            if !entry.is_file() {
                continue;
            }
            let rel = entry.strip_prefix(root).unwrap_or(&entry);
            if is_excluded(rel, excludes) {
                continue;
            }
            files.push(entry);
        }
    }
    files.sort();
    files
}

/// Run the full analysis: collect used names from source, declared names
/// from the given declaration files, and diff the two sets.
pub fn scan_project(
    root: &Path,
    dotenv_path: Option<&Path>,
    compose_path: Option<&Path>,
    include: &str,
    excludes: &[String],
) -> std::io::Result<Findings> {
    let mut findings = Findings::default();

    for file in collect_source_files(root, include, excludes) {
        let Ok(source) = std::fs::read_to_string(&file) else {
            continue;
        };
        let Ok(names) = usage::extract_env_names(&source) else {
            continue;
        };
        findings.used.extend(names);
        findings.files_scanned += 1;
    }

    if let Some(path) = dotenv_path {
        let parsed = dotenv::load_dotenv_vars(path)?;
        findings.bad_values = parsed.bad_values;
        for key in parsed.vars.keys() {
            findings
                .sources
                .entry(key.clone())
                .or_default()
                .push(path.display().to_string());
        }
        findings.declared.extend(parsed.vars.into_keys());
    }

    if let Some(path) = compose_path {
        let parsed = compose::load_compose_env_names(path)?;
        for (key, locations) in parsed.sources {
            findings.sources.entry(key).or_default().extend(locations);
        }
        findings.declared.extend(parsed.names);
    }

    findings.missing = findings.used.difference(&findings.declared).cloned().collect();
    findings.unused = findings.declared.difference(&findings.used).cloned().collect();

    for name in &findings.missing {
        if let Some(declared) = findings
            .declared
            .iter()
            .find(|d| similar_names(name, d))
        {
            findings.typos.push((name.clone(), declared.clone()));
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_similar_names_heuristic() {
        assert!(similar_names("DATABASE_URI", "DATABASE_URL"));
        assert!(similar_names("SECRET", "SECRET_K"));
        assert!(!similar_names("PORT", "DATABASE_URL"));
        // identical (even case-insensitively) is not a typo
        assert!(!similar_names("PORT", "PORT"));
        assert!(!similar_names("port", "PORT"));
        // too far apart in length
        assert!(!similar_names("A", "ABCD"));
    }

    #[test]
    fn test_scan_project_diff() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("main.rs"),
            "fn main() {\n    let _ = std::env::var(\"A\");\n    let _ = std::env::var(\"B\");\n    let _ = std::env::var_os(\"C\");\n}\n",
        )
        .unwrap();
        let envf = dir.path().join(".env");
        fs::write(&envf, "A=1\nB=2\n").unwrap();

        let findings =
            scan_project(dir.path(), Some(&envf), None, "*.rs", &[]).unwrap();
        assert!(findings.used.is_superset(&BTreeSet::from([
            "A".to_string(),
            "B".to_string(),
            "C".to_string()
        ])));
        assert_eq!(findings.missing, vec!["C"]);
        assert!(findings.declared.contains("A") && findings.declared.contains("B"));
        assert_eq!(findings.files_scanned, 1);
    }

    #[test]
    fn test_default_excludes_skip_vendor_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let vendored = dir.path().join("vendor").join("dep").join("src");
        fs::create_dir_all(&vendored).unwrap();
        fs::write(
            vendored.join("lib.rs"),
            "pub fn f() { let _ = std::env::var(\"VENDORED_NAME\"); }\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("app.rs"),
            "fn main() { let _ = std::env::var(\"FOO\"); }\n",
        )
        .unwrap();
        let envf = dir.path().join(".env");
        fs::write(&envf, "FOO=1\n").unwrap();

        let findings =
            scan_project(dir.path(), Some(&envf), None, "*.rs", &[]).unwrap();
        assert!(!findings.used.contains("VENDORED_NAME"));
        assert!(findings.missing.is_empty());
    }

    #[test]
    fn test_user_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let demos = dir.path().join("demos");
        fs::create_dir_all(&demos).unwrap();
        fs::write(
            demos.join("demo.rs"),
            "fn main() { let _ = std::env::var(\"DEMO_ONLY\"); }\n",
        )
        .unwrap();

        let findings = scan_project(
            dir.path(),
            None,
            None,
            "*.rs",
            &["demos".to_string()],
        )
        .unwrap();
        assert!(findings.used.is_empty());
    }

    #[test]
    fn test_typo_detection_against_declared() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("main.rs"),
            "fn main() { let _ = std::env::var(\"DATABASE_URI\"); }\n",
        )
        .unwrap();
        let envf = dir.path().join(".env");
        fs::write(&envf, "DATABASE_URL=postgres://localhost\n").unwrap();

        let findings =
            scan_project(dir.path(), Some(&envf), None, "*.rs", &[]).unwrap();
        assert_eq!(findings.missing, vec!["DATABASE_URI"]);
        assert_eq!(
            findings.typos,
            vec![("DATABASE_URI".to_string(), "DATABASE_URL".to_string())]
        );
    }

    #[test]
    fn test_compose_and_dotenv_merge_sources() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("main.rs"),
            "fn main() { let _ = std::env::var(\"PORT\"); }\n",
        )
        .unwrap();
        let envf = dir.path().join(".env");
        fs::write(&envf, "PORT=8080\n").unwrap();
        let composef = dir.path().join("docker-compose.yml");
        fs::write(
            &composef,
            "services:\n  web:\n    environment:\n      - PORT=8080\n",
        )
        .unwrap();

        let findings =
            scan_project(dir.path(), Some(&envf), Some(&composef), "*.rs", &[]).unwrap();
        assert!(findings.is_clean());
        assert_eq!(findings.declared.len(), 1);
        assert_eq!(findings.sources["PORT"].len(), 2);
    }
}
