//! Data model and scenario fixtures for a versioned API-documentation catalog.
//!
//! The crate exposes the typed entities (versions, guides, API surface
//! members), the composite-key scheme that identifies members across
//! versions, an in-memory record store, and the scenario builder that fills a
//! store from a nested fixture. Public functions here cover fixture discovery
//! for the `scenario` binary and for tests that want the bundled demo data.

use anyhow::{Result, bail};
use std::env;
use std::path::{Path, PathBuf};

pub mod catalog;
pub mod error;
pub mod fixture;
pub mod report;
pub mod scenario;
pub mod store;
pub mod validation;

pub use catalog::{
    Addon, Api, ApiClass, ApiFunction, ApiInterface, ApiMember, CatalogIndex, Channel, Guide,
    MemberDocs, MemberKey, MemberKind, MemberLink, RecordId, Version, VersionId, VersionRef,
    composite_key,
};
pub use error::CatalogError;
pub use fixture::{Fixture, fixture_schema, load_fixture_from_path, validate_fixture_value};
pub use report::{ScenarioReport, build_report};
pub use scenario::{ScenarioSummary, build_scenario};
pub use store::{EntityKind, MockStore, NewRecord, RecordRef, RecordStore, Stored};
pub use validation::validate_store;

/// Environment variable naming a fixture file to use instead of the bundled one.
pub const FIXTURE_ENV: &str = "DOCCATALOG_FIXTURE";
const BUNDLED_FIXTURE: &str = "fixtures/catalog.json";

/// Path of the demo fixture shipped with the crate.
pub fn bundled_fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_FIXTURE)
}

/// Locate the fixture to load.
///
/// An explicit path wins and must exist. Otherwise `DOCCATALOG_FIXTURE` is
/// honored when it names a file, and the bundled fixture is the fallback.
pub fn resolve_fixture_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        bail!("fixture {} does not exist", path.display());
    }

    if let Ok(hint) = env::var(FIXTURE_ENV) {
        let hint = hint.trim();
        if !hint.is_empty() {
            let candidate = PathBuf::from(hint);
            if candidate.is_file() {
                return Ok(candidate);
            }
            tracing::warn!(
                path = %candidate.display(),
                "{FIXTURE_ENV} does not name a file; using the bundled fixture"
            );
        }
    }

    let bundled = bundled_fixture_path();
    if bundled.is_file() {
        return Ok(bundled);
    }
    bail!(
        "Unable to locate a fixture. Pass --fixture or set {FIXTURE_ENV} to a fixture file."
    )
}

/// Load a fixture and build it into a fresh store.
///
/// Convenience for demos and tests that do not need to inject their own
/// store implementation.
pub fn load_scenario(path: &Path) -> Result<(MockStore, ScenarioSummary)> {
    let fixture = load_fixture_from_path(path)?;
    let mut store = MockStore::new();
    let summary = build_scenario(&fixture, &mut store)?;
    Ok((store, summary))
}
