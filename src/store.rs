//! Record store consumed by the scenario builder.
//!
//! [`RecordStore`] is the injected interface: the builder only ever creates
//! records through it. [`MockStore`] is the in-memory implementation used for
//! tests and demos. It lives exactly as long as its owner keeps it, can be
//! emptied with [`MockStore::reset`], and refuses records that would break
//! referential integrity or key uniqueness at the moment they are created.

use crate::catalog::identity::{MemberKey, VersionId};
use crate::catalog::model::{Addon, Api, ApiMember, Guide, MemberKind, RecordId, Version};
use crate::error::{CatalogError, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Entity type of a stored record.
pub enum EntityKind {
    Version,
    Guide,
    Api,
    ApiClass,
    ApiFunction,
    ApiInterface,
    Addon,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Version => "version",
            EntityKind::Guide => "guide",
            EntityKind::Api => "api",
            EntityKind::ApiClass => "api_class",
            EntityKind::ApiFunction => "api_function",
            EntityKind::ApiInterface => "api_interface",
            EntityKind::Addon => "addon",
        }
    }
}

impl From<MemberKind> for EntityKind {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Class => EntityKind::ApiClass,
            MemberKind::Function => EntityKind::ApiFunction,
            MemberKind::Interface => EntityKind::ApiInterface,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
/// Attributes for one record about to be created.
pub enum NewRecord {
    Version(Version),
    Guide(Guide),
    Api(Api),
    Member(ApiMember),
    Addon(Addon),
}

impl NewRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecord::Version(_) => EntityKind::Version,
            NewRecord::Guide(_) => EntityKind::Guide,
            NewRecord::Api(_) => EntityKind::Api,
            NewRecord::Member(member) => member.kind().into(),
            NewRecord::Addon(_) => EntityKind::Addon,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
/// Handle to a created record.
pub struct RecordRef {
    pub id: RecordId,
    pub kind: EntityKind,
}

/// Store interface the scenario builder writes through.
pub trait RecordStore {
    /// Create one record and return its handle.
    fn create(&mut self, record: NewRecord) -> Result<RecordRef>;

    /// Create `count` records of a kind that needs no attributes.
    fn create_many(&mut self, kind: EntityKind, count: usize) -> Result<Vec<RecordRef>>;
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
/// A record together with the id the store assigned to it.
pub struct Stored<T> {
    pub id: RecordId,
    pub record: T,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// In-memory record store.
///
/// Records are kept in creation order per kind; ids come from one counter so
/// they are unique across kinds. Two stores fed the same sequence of creates
/// compare equal.
pub struct MockStore {
    next_id: u64,
    versions: Vec<Stored<Version>>,
    guides: Vec<Stored<Guide>>,
    apis: Vec<Stored<Api>>,
    members: Vec<Stored<ApiMember>>,
    addons: Vec<Stored<Addon>>,
    version_index: BTreeMap<VersionId, usize>,
    api_index: BTreeMap<RecordId, usize>,
    member_index: BTreeMap<MemberKey, usize>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every record and restart id assignment.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Total number of records of every kind.
    pub fn len(&self) -> usize {
        self.versions.len()
            + self.guides.len()
            + self.apis.len()
            + self.members.len()
            + self.addons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn versions(&self) -> impl Iterator<Item = &Stored<Version>> {
        self.versions.iter()
    }

    pub fn version(&self, id: &VersionId) -> Option<&Stored<Version>> {
        self.version_index.get(id).map(|&idx| &self.versions[idx])
    }

    pub fn guides(&self) -> impl Iterator<Item = &Stored<Guide>> {
        self.guides.iter()
    }

    /// Guides of one version in the order they were created.
    pub fn guides_for<'a>(
        &'a self,
        version: &'a VersionId,
    ) -> impl Iterator<Item = &'a Stored<Guide>> + 'a {
        self.guides
            .iter()
            .filter(move |guide| &guide.record.version == version)
    }

    pub fn apis(&self) -> impl Iterator<Item = &Stored<Api>> {
        self.apis.iter()
    }

    pub fn api(&self, id: RecordId) -> Option<&Stored<Api>> {
        self.api_index.get(&id).map(|&idx| &self.apis[idx])
    }

    /// The Api grouping attached to a version, if it was created.
    pub fn api_for(&self, version: &VersionId) -> Option<&Stored<Api>> {
        self.apis.iter().find(|api| &api.record.version == version)
    }

    pub fn members(&self) -> impl Iterator<Item = &Stored<ApiMember>> {
        self.members.iter()
    }

    pub fn members_for<'a>(
        &'a self,
        version: &'a VersionId,
    ) -> impl Iterator<Item = &'a Stored<ApiMember>> + 'a {
        self.members
            .iter()
            .filter(move |member| member.record.version() == version)
    }

    /// Resolve a member by composite key.
    pub fn member(&self, key: &MemberKey) -> Option<&Stored<ApiMember>> {
        self.member_index.get(key).map(|&idx| &self.members[idx])
    }

    pub fn addons(&self) -> impl Iterator<Item = &Stored<Addon>> {
        self.addons.iter()
    }

    fn allocate(&mut self) -> RecordId {
        self.next_id += 1;
        RecordId(self.next_id)
    }

    fn require_version(&self, kind: EntityKind, version: &VersionId) -> Result<()> {
        if self.version_index.contains_key(version) {
            Ok(())
        } else {
            Err(CatalogError::DanglingReference {
                kind: kind.as_str(),
                target: format!("version {version}"),
            })
        }
    }

    fn insert_version(&mut self, version: Version) -> Result<RecordId> {
        if self.version_index.contains_key(&version.id) {
            return Err(CatalogError::DuplicateKey(format!("version {}", version.id)));
        }
        let id = self.allocate();
        self.version_index
            .insert(version.id.clone(), self.versions.len());
        self.versions.push(Stored {
            id,
            record: version,
        });
        Ok(id)
    }

    fn insert_guide(&mut self, guide: Guide) -> Result<RecordId> {
        self.require_version(EntityKind::Guide, &guide.version)?;
        let id = self.allocate();
        self.guides.push(Stored { id, record: guide });
        Ok(id)
    }

    fn insert_api(&mut self, api: Api) -> Result<RecordId> {
        self.require_version(EntityKind::Api, &api.version)?;
        if self.api_for(&api.version).is_some() {
            return Err(CatalogError::DuplicateKey(format!(
                "api for version {}",
                api.version
            )));
        }
        let id = self.allocate();
        self.api_index.insert(id, self.apis.len());
        self.apis.push(Stored { id, record: api });
        Ok(id)
    }

    fn insert_member(&mut self, member: ApiMember) -> Result<RecordId> {
        let kind = EntityKind::from(member.kind());
        self.require_version(kind, member.version())?;
        let link = member.link();
        match self.api(link.api) {
            Some(api) if api.record.version == link.version => {}
            _ => {
                return Err(CatalogError::DanglingReference {
                    kind: kind.as_str(),
                    target: format!("api {} of version {}", link.api.0, link.version),
                });
            }
        }
        let key = member.key()?;
        if self.member_index.contains_key(&key) {
            return Err(CatalogError::DuplicateKey(key.0));
        }
        let id = self.allocate();
        self.member_index.insert(key, self.members.len());
        self.members.push(Stored { id, record: member });
        Ok(id)
    }

    fn insert_addon(&mut self, addon: Addon) -> RecordId {
        let id = self.allocate();
        self.addons.push(Stored { id, record: addon });
        id
    }
}

impl RecordStore for MockStore {
    fn create(&mut self, record: NewRecord) -> Result<RecordRef> {
        let kind = record.kind();
        let id = match record {
            NewRecord::Version(version) => self.insert_version(version)?,
            NewRecord::Guide(guide) => self.insert_guide(guide)?,
            NewRecord::Api(api) => self.insert_api(api)?,
            NewRecord::Member(member) => self.insert_member(member)?,
            NewRecord::Addon(addon) => self.insert_addon(addon),
        };
        tracing::trace!(kind = kind.as_str(), id = id.0, "created record");
        Ok(RecordRef { id, kind })
    }

    fn create_many(&mut self, kind: EntityKind, count: usize) -> Result<Vec<RecordRef>> {
        if kind != EntityKind::Addon {
            return Err(CatalogError::InvalidArgument(format!(
                "{kind} records cannot be created without attributes"
            )));
        }
        let mut created = Vec::with_capacity(count);
        for _ in 0..count {
            let name = format!("addon-{}", self.addons.len() + 1);
            let id = self.insert_addon(Addon { name });
            created.push(RecordRef { id, kind });
        }
        Ok(created)
    }
}
