//! Per-version tallies of a populated store.
//!
//! The report is read back from the store, not from the fixture, so it shows
//! what a consumer of the dataset would actually see. Output is keyed by
//! version and package in sorted order for deterministic JSON.

use crate::catalog::identity::{Channel, VersionId};
use crate::catalog::model::MemberKind;
use crate::store::MockStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ScenarioReport {
    pub versions: BTreeMap<VersionId, VersionTally>,
    pub addons: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// What one version holds: its metadata, guide titles in reading order, and
/// member counts per package.
pub struct VersionTally {
    pub name: String,
    pub channel: Channel,
    pub published_at: DateTime<Utc>,
    pub has_api: bool,
    pub guides: Vec<String>,
    pub packages: BTreeMap<String, PackageTally>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct PackageTally {
    pub classes: usize,
    pub functions: usize,
    pub interfaces: usize,
}

impl PackageTally {
    fn count(&mut self, kind: MemberKind) {
        match kind {
            MemberKind::Class => self.classes += 1,
            MemberKind::Function => self.functions += 1,
            MemberKind::Interface => self.interfaces += 1,
        }
    }
}

pub fn build_report(store: &MockStore) -> ScenarioReport {
    let versions = store
        .versions()
        .map(|version| {
            let id = &version.record.id;
            let mut packages: BTreeMap<String, PackageTally> = BTreeMap::new();
            for member in store.members_for(id) {
                packages
                    .entry(member.record.package().to_string())
                    .or_default()
                    .count(member.record.kind());
            }
            let tally = VersionTally {
                name: version.record.name.clone(),
                channel: version.record.channel.clone(),
                published_at: version.record.published_at,
                has_api: store.api_for(id).is_some(),
                guides: store
                    .guides_for(id)
                    .map(|guide| guide.record.title.clone())
                    .collect(),
                packages,
            };
            (id.clone(), tally)
        })
        .collect();

    ScenarioReport {
        versions,
        addons: store.addons().count(),
    }
}
