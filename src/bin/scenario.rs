//! Build a scenario dataset from a fixture and inspect it.
//!
//! Loads the fixture (explicit `--fixture`, then `DOCCATALOG_FIXTURE`, then the
//! bundled demo data), builds it into a fresh in-memory store and prints a
//! JSON report. `--key` resolves members by composite key instead, and
//! `--check` audits the built store. Logs go to stderr under `RUST_LOG`.

use anyhow::{Context, Result, bail};
use doccatalog::{
    CatalogIndex, EntityKind, MemberKey, MemberKind, RecordStore, build_report, load_scenario,
    resolve_fixture_path, validate_store,
};
use serde_json::{Value, json};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let path = resolve_fixture_path(args.fixture.as_deref())?;
    let (mut store, summary) = load_scenario(&path)?;
    tracing::info!(
        fixture = %path.display(),
        versions = summary.versions,
        members = summary.members(),
        "fixture loaded"
    );

    if args.addons > 0 {
        store
            .create_many(EntityKind::Addon, args.addons)
            .context("creating addon records")?;
    }

    if args.check {
        let errors = validate_store(&store);
        if !errors.is_empty() {
            for error in &errors {
                eprintln!("{error}");
            }
            bail!("{} problem(s) found in {}", errors.len(), path.display());
        }
    }

    let output = if args.keys.is_empty() {
        serde_json::to_value(build_report(&store))?
    } else {
        let index = CatalogIndex::build(&store)?;
        let mut resolved = Vec::new();
        for key in &args.keys {
            let Some(member) = index.member(key) else {
                bail!("no member with key {key}");
            };
            let ancestry: Vec<&str> = match member.record.kind() {
                MemberKind::Interface => index
                    .interface_ancestry(key)?
                    .into_iter()
                    .map(|parent| parent.record.name())
                    .collect(),
                _ => Vec::new(),
            };
            resolved.push(json!({
                "key": key,
                "id": member.id,
                "member": member.record,
                "ancestry": ancestry,
            }));
        }
        Value::Array(resolved)
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[derive(Debug, Default)]
struct CliArgs {
    fixture: Option<PathBuf>,
    keys: Vec<MemberKey>,
    addons: usize,
    check: bool,
}

impl CliArgs {
    fn parse(mut args: impl Iterator<Item = OsString>) -> Result<Self> {
        let mut parsed = CliArgs::default();

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--fixture" => {
                    if parsed.fixture.is_some() {
                        bail!("--fixture may only be provided once");
                    }
                    parsed.fixture = Some(PathBuf::from(next_value(&mut args, "--fixture")?));
                }
                "--key" => {
                    let raw = next_value(&mut args, "--key")?;
                    let key = MemberKey(raw);
                    if key.split().is_none() {
                        bail!("--key must look like VERSION:PACKAGE:NAME, got {key}");
                    }
                    parsed.keys.push(key);
                }
                "--addons" => {
                    let raw = next_value(&mut args, "--addons")?;
                    parsed.addons = raw
                        .parse()
                        .with_context(|| format!("invalid count for --addons: {raw}"))?;
                }
                "--check" => parsed.check = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(parsed)
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: scenario [--fixture PATH] [--key VERSION:PACKAGE:NAME]... [--addons N] [--check]\n\
Builds the fixture into an in-memory store and prints a JSON report, or the members named by --key.\n\
The fixture defaults to $DOCCATALOG_FIXTURE, then the bundled fixtures/catalog.json.\n"
}

fn print_usage() {
    print!("{}", usage());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliArgs> {
        CliArgs::parse(args.iter().map(OsString::from))
    }

    #[test]
    fn parses_repeated_keys_and_flags() {
        let args = parse(&[
            "--key",
            "5.4.0:router:Route",
            "--key",
            "5.4.0:runloop:later",
            "--check",
            "--addons",
            "3",
        ])
        .unwrap();
        assert_eq!(args.keys.len(), 2);
        assert!(args.check);
        assert_eq!(args.addons, 3);
        assert!(args.fixture.is_none());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse(&["--key", "5.4.0:router"]).is_err());
        assert!(parse(&["--addons", "many"]).is_err());
        assert!(parse(&["--fixture"]).is_err());
        assert!(parse(&["--fixture", "a.json", "--fixture", "b.json"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }
}
