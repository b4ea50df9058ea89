use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// Fixture entry for one version with the given guide titles (orders 1..) and
/// package members.
pub fn version_entry(name: &str, guides: &[&str], packages: Value) -> Value {
    let guides: Vec<Value> = guides
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            json!({
                "title": title,
                "body": format!("{title} body.\n\nSecond paragraph."),
                "group": "Guides",
                "order": idx + 1,
            })
        })
        .collect();
    json!({
        "name": name,
        "channel": "stable",
        "publishedAt": "2024-06-01T12:00:00Z",
        "pages": {"guides": guides},
        "api": {"packages": packages},
    })
}

pub fn write_fixture(value: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to allocate fixture file")?;
    serde_json::to_writer_pretty(&mut file, value)?;
    Ok(file)
}

pub fn scenario_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_scenario"))
}

pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to run command: {:?}", cmd))?;
    if output.status.success() {
        Ok(output)
    } else {
        bail!(
            "command {:?} failed: status {:?}\nstdout: {}\nstderr: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    }
}
