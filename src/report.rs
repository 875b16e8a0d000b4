use colored::Colorize;

use crate::scanner::Findings;

/// Render findings for terminal display.
pub fn format_console(findings: &Findings) -> String {
    let mut out = String::new();

    if !findings.missing.is_empty() {
        out.push_str(&format!(
            "{} used in code but not declared:\n",
            "missing:".red().bold()
        ));
        for name in &findings.missing {
            out.push_str(&format!("  {name}\n"));
        }
    }

    if !findings.typos.is_empty() {
        out.push_str(&format!(
            "{} possible typos:\n",
            "typos:".red().bold()
        ));
        for (used, declared) in &findings.typos {
            out.push_str(&format!("  {used} (did you mean {}?)\n", declared.bold()));
        }
    }

    if !findings.unused.is_empty() {
        out.push_str(&format!(
            "{} declared but never used:\n",
            "unused:".yellow()
        ));
        for name in &findings.unused {
            let locations = findings
                .sources
                .get(name)
                .map(|locs| locs.join(", "))
                .unwrap_or_default();
            if locations.is_empty() {
                out.push_str(&format!("  {name}\n"));
            } else {
                out.push_str(&format!("  {name} ({locations})\n"));
            }
        }
    }

    if !findings.bad_values.is_empty() {
        out.push_str(&format!(
            "{} values look malformed:\n",
            "bad-values:".yellow()
        ));
        for name in &findings.bad_values {
            out.push_str(&format!("  {name}\n"));
        }
    }

    out.push_str(&format!(
        "\n  Files scanned: {}   used: {}   declared: {}\n",
        findings.files_scanned,
        findings.used.len(),
        findings.declared.len()
    ));

    if findings.is_clean() {
        out.push_str(&format!("  {}\n", "All checks passed.".green().bold()));
    } else {
        out.push_str(&format!(
            "  {} {} missing, {} typos, {} unused, {} bad values\n",
            "FAIL:".red().bold(),
            findings.missing.len(),
            findings.typos.len(),
            findings.unused.len(),
            findings.bad_values.len()
        ));
    }

    out
}

/// Render findings as pretty-printed JSON. Collections are sorted, so the
/// output is stable for a given project state.
pub fn format_json(findings: &Findings) -> serde_json::Result<String> {
    serde_json::to_string_pretty(findings)
}
