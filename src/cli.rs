use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, FailCategory};
use crate::report;
use crate::scanner::{self, Findings};

#[derive(Parser)]
#[command(
    name = "envlint",
    version,
    about = "Cross-check environment variables used in Rust code against .env and compose declarations"
)]
pub struct Cli {
    /// Project root to analyze (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to .env file (default: <path>/.env if present)
    #[arg(long)]
    pub dotenv: Option<PathBuf>,

    /// Path to docker-compose manifest (optional)
    #[arg(long)]
    pub compose: Option<PathBuf>,

    /// Glob for source files to scan under <path> (default: *.rs)
    #[arg(long)]
    pub include: Option<String>,

    /// Relative path or glob to exclude (can be given multiple times)
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Emit a JSON report to stdout instead of human-readable text
    #[arg(long)]
    pub json: bool,

    /// Comma-separated categories that cause a nonzero exit
    #[arg(long, value_delimiter = ',', value_enum)]
    pub fail_on: Option<Vec<FailCategory>>,

    /// Fail on every category (missing, typos, unused, bad-values)
    #[arg(long)]
    pub strict: bool,
}

/// Resolve the failure policy: --strict beats an explicit --fail-on, which
/// beats the manifest, which beats the built-in default.
pub fn resolve_fail_on(
    strict: bool,
    cli_fail_on: Option<Vec<FailCategory>>,
    manifest_fail_on: Option<Vec<FailCategory>>,
) -> Vec<FailCategory> {
    if strict {
        return FailCategory::ALL.to_vec();
    }
    cli_fail_on
        .or(manifest_fail_on)
        .unwrap_or_else(config::default_fail_on)
}

/// Exit code for a set of findings under the given policy.
pub fn exit_code(findings: &Findings, fail_on: &[FailCategory]) -> i32 {
    let should_fail = fail_on.iter().any(|category| match category {
        FailCategory::Missing => !findings.missing.is_empty(),
        FailCategory::Typos => !findings.typos.is_empty(),
        FailCategory::Unused => !findings.unused.is_empty(),
        FailCategory::BadValues => !findings.bad_values.is_empty(),
    });
    if should_fail { 1 } else { 0 }
}

pub fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let root = cli.path;

    let manifest = match config::load_config(&root.join("envlint.toml")) {
        Ok(c) => c.envlint,
        Err(e) => {
            eprintln!("warn: could not load envlint.toml: {e}");
            config::EnvlintSection::default()
        }
    };

    let include = cli
        .include
        .or(manifest.include)
        .unwrap_or_else(|| "*.rs".to_string());

    let mut excludes = cli.exclude;
    excludes.extend(manifest.exclude);

    let dotenv_path = cli
        .dotenv
        .or_else(|| manifest.dotenv.as_ref().map(|p| root.join(p)))
        .unwrap_or_else(|| root.join(".env"));
    let compose_path = cli
        .compose
        .or_else(|| manifest.compose.as_ref().map(|p| root.join(p)));

    let findings = scanner::scan_project(
        &root,
        dotenv_path.exists().then_some(dotenv_path.as_path()),
        compose_path
            .as_deref()
            .filter(|p| p.exists()),
        &include,
        &excludes,
    )?;

    if cli.json {
        println!("{}", report::format_json(&findings)?);
    } else {
        print!("{}", report::format_console(&findings));
    }

    let fail_on = resolve_fail_on(cli.strict, cli.fail_on, manifest.fail_on);
    Ok(exit_code(&findings, &fail_on))
}
