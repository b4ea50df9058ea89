//! Indexed view of the members held by a populated store.
//!
//! The index is what a routing layer uses to answer "this class, in this
//! version, in this package". Building it re-derives every composite key and
//! refuses duplicates or members whose version is missing, so a store that
//! was filled by something other than the scenario builder is still checked.

use crate::catalog::identity::{MemberKey, VersionId, VersionRef, composite_key};
use crate::catalog::model::ApiMember;
use crate::store::{MockStore, Stored};
use anyhow::{Result, bail};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
/// Members of one store keyed by composite key.
pub struct CatalogIndex<'a> {
    by_key: BTreeMap<MemberKey, &'a Stored<ApiMember>>,
}

impl<'a> CatalogIndex<'a> {
    pub fn build(store: &'a MockStore) -> Result<Self> {
        let mut by_key = BTreeMap::new();
        for member in store.members() {
            let record = &member.record;
            if store.version(record.version()).is_none() {
                bail!(
                    "{} {} references unknown version {}",
                    record.kind().as_str(),
                    record.name(),
                    record.version()
                );
            }
            let key = record.key()?;
            if by_key.contains_key(&key) {
                bail!("duplicate member key {key}");
            }
            by_key.insert(key, member);
        }
        Ok(Self { by_key })
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Iterates keys in stable order.
    pub fn keys(&self) -> impl Iterator<Item = &MemberKey> {
        self.by_key.keys()
    }

    pub fn member(&self, key: &MemberKey) -> Option<&'a Stored<ApiMember>> {
        self.by_key.get(key).copied()
    }

    /// Resolve a member from its (version, package, name) triple.
    pub fn resolve<'v>(
        &self,
        version: impl Into<VersionRef<'v>>,
        package: &str,
        name: &str,
    ) -> Result<Option<&'a Stored<ApiMember>>> {
        let key = composite_key(version, package, name)?;
        Ok(self.member(&key))
    }

    /// Members of one package in one version, ordered by name.
    pub fn package_members(
        &self,
        version: &VersionId,
        package: &str,
    ) -> Vec<&'a Stored<ApiMember>> {
        self.by_key
            .values()
            .filter(|member| {
                member.record.version() == version && member.record.package() == package
            })
            .copied()
            .collect()
    }

    /// Walk the parents of an interface within its version and package.
    ///
    /// Each step follows `parent_interface` when this package defines it, and
    /// `parent_class` otherwise. The walk stops at a class or when neither
    /// parent resolves. The starting member is not part of the result.
    pub fn interface_ancestry(&self, key: &MemberKey) -> Result<Vec<&'a Stored<ApiMember>>> {
        let Some(start) = self.member(key) else {
            bail!("unknown member {key}");
        };
        if !matches!(start.record, ApiMember::Interface(_)) {
            bail!(
                "{key} is a {}, not an interface",
                start.record.kind().as_str()
            );
        }

        let mut chain = Vec::new();
        let mut seen = BTreeSet::from([key.clone()]);
        let mut current = start;
        while let ApiMember::Interface(interface) = &current.record {
            let mut found = None;
            for parent in [
                interface.parent_interface.as_deref(),
                interface.parent_class.as_deref(),
            ]
            .into_iter()
            .flatten()
            {
                let parent_key = composite_key(
                    &interface.link.version,
                    &interface.link.package,
                    parent,
                )?;
                if let Some(member) = self.member(&parent_key) {
                    found = Some((parent_key, member));
                    break;
                }
            }
            let Some((parent_key, next)) = found else {
                break;
            };
            if !seen.insert(parent_key.clone()) {
                bail!("inheritance cycle through {parent_key}");
            }
            chain.push(next);
            current = next;
        }
        Ok(chain)
    }
}
