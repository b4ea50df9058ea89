//! Typed records for the documentation catalog.
//!
//! One struct per entity variant with every attribute enumerated. Surface
//! members (classes, functions, interfaces) share a [`MemberLink`] for their
//! identity contract and are stored behind the [`ApiMember`] union. Records
//! are immutable once handed to a store; relations are expressed by
//! [`VersionId`] and [`RecordId`] values, never by ownership.

use crate::catalog::identity::{Channel, MemberKey, VersionId, VersionRef, composite_key};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier, unique across every record kind in one store.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// One documented release.
pub struct Version {
    pub id: VersionId,
    pub name: String,
    pub channel: Channel,
    pub published_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Narrative page attached to a version; `group` drives sidebar sections and
/// `order` the position inside a group.
pub struct Guide {
    pub title: String,
    pub body: String,
    pub group: String,
    pub order: i64,
    pub version: VersionId,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// The API surface of one version. Exactly one per version.
pub struct Api {
    pub version: VersionId,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Documentation attributes shared by every surface member.
///
/// Only `name` is required in fixtures; the rest default to empty values.
pub struct MemberDocs {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub line: Option<u32>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub since: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Identity contract of a surface member: package, owning version and the
/// Api grouping record it hangs off.
pub struct MemberLink {
    pub package: String,
    pub version: VersionId,
    pub api: RecordId,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ApiClass {
    pub link: MemberLink,
    pub docs: MemberDocs,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ApiFunction {
    pub link: MemberLink,
    pub docs: MemberDocs,
    pub params: Vec<String>,
    pub returns: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Interface member; the parent names are resolved within the same version
/// and package by the catalog index.
pub struct ApiInterface {
    pub link: MemberLink,
    pub docs: MemberDocs,
    pub parent_class: Option<String>,
    pub parent_interface: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Class,
    Function,
    Interface,
}

impl MemberKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberKind::Class => "class",
            MemberKind::Function => "function",
            MemberKind::Interface => "interface",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
/// Any API surface member.
pub enum ApiMember {
    Class(ApiClass),
    Function(ApiFunction),
    Interface(ApiInterface),
}

impl ApiMember {
    pub fn kind(&self) -> MemberKind {
        match self {
            ApiMember::Class(_) => MemberKind::Class,
            ApiMember::Function(_) => MemberKind::Function,
            ApiMember::Interface(_) => MemberKind::Interface,
        }
    }

    pub fn link(&self) -> &MemberLink {
        match self {
            ApiMember::Class(member) => &member.link,
            ApiMember::Function(member) => &member.link,
            ApiMember::Interface(member) => &member.link,
        }
    }

    pub fn docs(&self) -> &MemberDocs {
        match self {
            ApiMember::Class(member) => &member.docs,
            ApiMember::Function(member) => &member.docs,
            ApiMember::Interface(member) => &member.docs,
        }
    }

    pub fn name(&self) -> &str {
        &self.docs().name
    }

    pub fn package(&self) -> &str {
        &self.link().package
    }

    pub fn version(&self) -> &VersionId {
        &self.link().version
    }

    /// Composite key of this member within the whole dataset.
    pub fn key(&self) -> Result<MemberKey> {
        composite_key(self.version(), self.package(), self.name())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// Free-standing record with no relations; only ever bulk-created.
pub struct Addon {
    pub name: String,
}

impl<'a> From<&'a Version> for VersionRef<'a> {
    fn from(version: &'a Version) -> Self {
        VersionRef::from(&version.id)
    }
}
