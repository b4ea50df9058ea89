//! Deserializable representation of a scenario fixture.
//!
//! A fixture is the static nested description the scenario builder turns into
//! records: versions keyed by semantic version, each with its guides and the
//! packages of its API surface. Decoding is strict about the fields the
//! builder reads; a missing nested key surfaces as
//! [`CatalogError::MalformedFixture`] with serde's description of the gap.
//! Files on disk are additionally checked against
//! `schema/fixture.schema.json` so every violation is reported at once.

use crate::catalog::identity::{Channel, VersionId};
use crate::catalog::model::MemberDocs;
use crate::error::{CatalogError, Result};
use anyhow::Context;
use chrono::{DateTime, Utc};
use jsonschema::JSONSchema;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const FIXTURE_SCHEMA: &str = include_str!("../schema/fixture.schema.json");

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
/// Whole fixture tree, keyed by version identifier.
pub struct Fixture {
    pub versions: BTreeMap<VersionId, VersionFixture>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionFixture {
    pub name: String,
    pub channel: Channel,
    pub published_at: DateTime<Utc>,
    pub pages: PagesFixture,
    pub api: ApiFixture,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PagesFixture {
    pub guides: Vec<GuideFixture>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GuideFixture {
    pub title: String,
    pub body: String,
    pub group: String,
    pub order: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiFixture {
    pub packages: BTreeMap<String, PackageFixture>,
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Members of one package. Absent collections are empty.
pub struct PackageFixture {
    #[serde(default)]
    pub classes: Vec<MemberDocs>,
    #[serde(default)]
    pub functions: Vec<FunctionFixture>,
    #[serde(default)]
    pub interfaces: Vec<InterfaceFixture>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FunctionFixture {
    #[serde(flatten)]
    pub docs: MemberDocs,
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub returns: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceFixture {
    #[serde(flatten)]
    pub docs: MemberDocs,
    #[serde(default)]
    pub parent_class: Option<String>,
    #[serde(default)]
    pub parent_interface: Option<String>,
}

impl Fixture {
    /// Decode an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Number of guides across every version.
    pub fn guide_count(&self) -> usize {
        self.versions.values().map(|v| v.pages.guides.len()).sum()
    }

    /// Number of surface members across every version and package.
    pub fn member_count(&self) -> usize {
        self.versions
            .values()
            .flat_map(|v| v.api.packages.values())
            .map(PackageFixture::member_count)
            .sum()
    }
}

impl PackageFixture {
    pub fn member_count(&self) -> usize {
        self.classes.len() + self.functions.len() + self.interfaces.len()
    }
}

/// Compile the bundled fixture schema.
pub fn fixture_schema() -> anyhow::Result<JSONSchema> {
    let schema: Value =
        serde_json::from_str(FIXTURE_SCHEMA).context("parsing bundled fixture schema")?;
    JSONSchema::compile(&schema)
        .map_err(|err| anyhow::anyhow!("compiling bundled fixture schema: {err}"))
}

/// Check a raw fixture against the schema, listing every violation.
pub fn validate_fixture_value(schema: &JSONSchema, value: &Value) -> Result<()> {
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| format!("{} (at {})", err, err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CatalogError::MalformedFixture {
            message: format!("fixture failed schema validation:\n{details}"),
        });
    }
    Ok(())
}

/// Read, schema-check and decode a fixture file.
pub fn load_fixture_from_path(path: &Path) -> anyhow::Result<Fixture> {
    let data =
        fs::read_to_string(path).with_context(|| format!("reading fixture {}", path.display()))?;
    let value: Value = serde_json::from_str(&data)
        .with_context(|| format!("parsing fixture {}", path.display()))?;
    let schema = fixture_schema()?;
    validate_fixture_value(&schema, &value)
        .with_context(|| format!("validating fixture {}", path.display()))?;
    let fixture = Fixture::from_value(value)
        .with_context(|| format!("decoding fixture {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        versions = fixture.len(),
        "loaded fixture"
    );
    Ok(fixture)
}
