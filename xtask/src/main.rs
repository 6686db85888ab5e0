use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{fs, path::{Path, PathBuf}};

use sprinkler_console::{clock, Configuration, Draft};

#[derive(Parser)]
#[command(name = "xtask", about = "Sprinkler-console workspace tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate a configuration JSON file against schemas/configuration.schema.json
    ValidateConfig { file: PathBuf },
    /// Print a configuration file's schedule as clock times
    Render { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::ValidateConfig { file } => validate_config(&file),
        Cmd::Render { file } => render(&file),
    }
}

fn validate_config(path: &Path) -> Result<()> {
    let schema_text = include_str!("../../schemas/configuration.schema.json");
    let schema: serde_json::Value = serde_json::from_str(schema_text)?;
    let compiled = jsonschema::validator_for(&schema)?;
    let data_text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let data: serde_json::Value = serde_json::from_str(&data_text).with_context(|| "parse json")?;
    let errors: Vec<_> = compiled.iter_errors(&data).collect();
    if !errors.is_empty() {
        eprintln!("Invalid: {}", path.display());
        for e in errors {
            eprintln!("- {}", e);
        }
        std::process::exit(1);
    }
    let document: Configuration = serde_json::from_str(&data_text)?;
    for warning in lint(&document) {
        eprintln!("warning: {warning}");
    }
    println!("OK: {}", path.display());
    Ok(())
}

/// Non-fatal checks the schema cannot express. The wire contract does not
/// enforce these, so they warn instead of failing.
fn lint(document: &Configuration) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, event) in document.schedule.events.iter().enumerate() {
        if event.to < event.from {
            warnings.push(format!(
                "event {index} ends before it starts ({} .. {})",
                clock::encode(event.from),
                clock::encode(event.to)
            ));
        }
        if event.from >= clock::DAY_MS || event.to >= clock::DAY_MS {
            warnings.push(format!(
                "event {index} reaches past midnight ({} .. {})",
                clock::encode(event.from),
                clock::encode(event.to)
            ));
        }
    }
    warnings
}

fn render(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let document: Configuration =
        serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?;
    let draft = Draft::from_wire(&document);
    println!("enabled: {}  overwrite: {}", draft.enabled, draft.overwrite);
    for (index, event) in draft.schedule.events.iter().enumerate() {
        println!("{index:>3}  {} .. {}", event.from, event.to);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn lint_flags_inverted_and_overlong_events() {
        let document: Configuration = serde_json::from_str(
            r#"{"enabled":true,"overwrite":false,"schedule":{"events":[
                {"from":3600000,"to":0},
                {"from":86400000,"to":90000000}
            ]}}"#,
        )
        .unwrap();
        let warnings = lint(&document);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("ends before it starts"));
        assert!(warnings[1].contains("past midnight"));
    }

    #[test]
    fn well_formed_documents_validate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"enabled":false,"overwrite":false,"schedule":{{"events":[{{"from":0,"to":60000}}]}}}}"#
        )
        .unwrap();
        validate_config(file.path()).unwrap();
    }
}
