//! Scenario builder: materializes a fixture tree into a record store.
//!
//! Each version entry becomes, in this order, one Version record, its Guides
//! in declaration order, one Api grouping, and one record per package member.
//! Every reference points at a record created earlier in the same pass, so the
//! store never sees a dangling link. Versions are visited in key order and do
//! not depend on each other.

use crate::catalog::identity::VersionId;
use crate::catalog::model::{
    Api, ApiClass, ApiFunction, ApiInterface, ApiMember, Guide, MemberLink, RecordId, Version,
};
use crate::error::Result;
use crate::fixture::{Fixture, PackageFixture, VersionFixture};
use crate::store::{NewRecord, RecordStore};
use serde::Serialize;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
/// Counts of records created by one builder pass.
pub struct ScenarioSummary {
    pub versions: usize,
    pub guides: usize,
    pub apis: usize,
    pub classes: usize,
    pub functions: usize,
    pub interfaces: usize,
}

impl ScenarioSummary {
    pub fn members(&self) -> usize {
        self.classes + self.functions + self.interfaces
    }
}

/// Populate `store` from `fixture`.
///
/// The first store error aborts the pass and is returned as-is. Records
/// created before the failure stay in the store; callers reset or drop it.
pub fn build_scenario<S>(fixture: &Fixture, store: &mut S) -> Result<ScenarioSummary>
where
    S: RecordStore + ?Sized,
{
    let mut summary = ScenarioSummary::default();
    for (version_id, entry) in &fixture.versions {
        let _span = tracing::debug_span!("version", id = %version_id).entered();
        build_version(version_id, entry, store, &mut summary)?;
    }
    tracing::info!(
        versions = summary.versions,
        guides = summary.guides,
        members = summary.members(),
        "scenario built"
    );
    Ok(summary)
}

fn build_version<S>(
    version_id: &VersionId,
    entry: &VersionFixture,
    store: &mut S,
    summary: &mut ScenarioSummary,
) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    store.create(NewRecord::Version(Version {
        id: version_id.clone(),
        name: entry.name.clone(),
        channel: entry.channel.clone(),
        published_at: entry.published_at,
    }))?;
    summary.versions += 1;

    for guide in &entry.pages.guides {
        store.create(NewRecord::Guide(Guide {
            title: guide.title.clone(),
            body: guide.body.clone(),
            group: guide.group.clone(),
            order: guide.order,
            version: version_id.clone(),
        }))?;
        summary.guides += 1;
    }

    let api = store.create(NewRecord::Api(Api {
        version: version_id.clone(),
    }))?;
    summary.apis += 1;

    for (package, members) in &entry.api.packages {
        tracing::debug!(package = %package, count = members.member_count(), "building package");
        build_package(version_id, api.id, package, members, store, summary)?;
    }
    Ok(())
}

fn build_package<S>(
    version_id: &VersionId,
    api: RecordId,
    package: &str,
    members: &PackageFixture,
    store: &mut S,
    summary: &mut ScenarioSummary,
) -> Result<()>
where
    S: RecordStore + ?Sized,
{
    let link = || MemberLink {
        package: package.to_string(),
        version: version_id.clone(),
        api,
    };

    for docs in &members.classes {
        store.create(NewRecord::Member(ApiMember::Class(ApiClass {
            link: link(),
            docs: docs.clone(),
        })))?;
        summary.classes += 1;
    }
    for function in &members.functions {
        store.create(NewRecord::Member(ApiMember::Function(ApiFunction {
            link: link(),
            docs: function.docs.clone(),
            params: function.params.clone(),
            returns: function.returns.clone(),
        })))?;
        summary.functions += 1;
    }
    for interface in &members.interfaces {
        store.create(NewRecord::Member(ApiMember::Interface(ApiInterface {
            link: link(),
            docs: interface.docs.clone(),
            parent_class: interface.parent_class.clone(),
            parent_interface: interface.parent_interface.clone(),
        })))?;
        summary.interfaces += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::identity::MemberKey;
    use crate::error::CatalogError;
    use crate::store::{EntityKind, MockStore, RecordRef};
    use serde_json::json;

    /// Store that records the order of creates and can fail on demand.
    #[derive(Default)]
    struct RecordingStore {
        inner: MockStore,
        kinds: Vec<EntityKind>,
        fail_on: Option<EntityKind>,
    }

    impl RecordStore for RecordingStore {
        fn create(&mut self, record: NewRecord) -> Result<RecordRef> {
            let kind = record.kind();
            if self.fail_on == Some(kind) {
                return Err(CatalogError::InvalidArgument(format!("refusing {kind}")));
            }
            self.kinds.push(kind);
            self.inner.create(record)
        }

        fn create_many(&mut self, kind: EntityKind, count: usize) -> Result<Vec<RecordRef>> {
            self.inner.create_many(kind, count)
        }
    }

    fn fixture() -> Fixture {
        Fixture::from_value(json!({
            "1.0.0": {
                "name": "v1",
                "channel": "stable",
                "publishedAt": "2024-01-01T00:00:00Z",
                "pages": {"guides": [
                    {"title": "Intro", "group": "g", "order": 1, "body": "one"},
                    {"title": "Next", "group": "g", "order": 2, "body": "two"}
                ]},
                "api": {"packages": {"core": {
                    "classes": [{"name": "Foo"}],
                    "functions": [{"name": "bar", "params": ["x"]}],
                    "interfaces": [{"name": "Baz"}]
                }}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn creates_records_in_dependency_order() {
        let mut store = RecordingStore::default();
        let summary = build_scenario(&fixture(), &mut store).unwrap();
        assert_eq!(
            store.kinds,
            [
                EntityKind::Version,
                EntityKind::Guide,
                EntityKind::Guide,
                EntityKind::Api,
                EntityKind::ApiClass,
                EntityKind::ApiFunction,
                EntityKind::ApiInterface,
            ]
        );
        assert_eq!(summary.versions, 1);
        assert_eq!(summary.guides, 2);
        assert_eq!(summary.members(), 3);
    }

    #[test]
    fn members_share_version_and_api_links() {
        let mut store = MockStore::new();
        build_scenario(&fixture(), &mut store).unwrap();
        let version = VersionId("1.0.0".to_string());
        let api = store.api_for(&version).expect("api created");
        let members: Vec<_> = store.members_for(&version).collect();
        assert_eq!(members.len(), 3);
        for member in members {
            assert_eq!(member.record.link().api, api.id);
            assert_eq!(member.record.version(), &version);
            assert_eq!(member.record.package(), "core");
        }
        let bar = store
            .member(&MemberKey("1.0.0:core:bar".to_string()))
            .expect("function stored");
        match &bar.record {
            ApiMember::Function(function) => assert_eq!(function.params, ["x"]),
            other => panic!("unexpected member {other:?}"),
        }
    }

    #[test]
    fn store_error_aborts_the_pass() {
        let mut store = RecordingStore {
            fail_on: Some(EntityKind::Api),
            ..RecordingStore::default()
        };
        let err = build_scenario(&fixture(), &mut store).expect_err("api create fails");
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert!(!store.kinds.contains(&EntityKind::ApiClass));
    }

    #[test]
    fn works_through_trait_object() {
        let mut store = MockStore::new();
        let dyn_store: &mut dyn RecordStore = &mut store;
        let summary = build_scenario(&fixture(), dyn_store).unwrap();
        assert_eq!(summary.apis, 1);
        assert_eq!(store.len(), 1 + 2 + 1 + 3);
    }
}
