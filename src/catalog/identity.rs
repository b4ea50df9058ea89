use crate::error::{CatalogError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Separator between the version, package and name parts of a [`MemberKey`].
pub const KEY_DELIMITER: char = ':';

/// Semantic version string identifying one documented release (e.g. `3.28.0`).
///
/// Fixtures key their top-level entries by this value and every surface member
/// carries it as a linkage field.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(pub String);

impl VersionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Composite identity of an API surface member: `<version>:<package>:<name>`.
///
/// Keys are plain strings on the wire so routing layers can pass them around
/// without knowing the record types.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberKey(pub String);

impl MemberKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into `(version, package, name)`.
    ///
    /// Only the first two delimiters are structural, so a name containing `:`
    /// stays intact. Returns `None` when the key has fewer than three parts.
    pub fn split(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.0.splitn(3, KEY_DELIMITER);
        Some((parts.next()?, parts.next()?, parts.next()?))
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Borrowed version identity accepted by [`composite_key`].
///
/// Built from a raw identifier (`&str`, `&String`, `&VersionId`) or from a
/// whole `Version` entity, which normalizes to its identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VersionRef<'a>(&'a str);

impl<'a> VersionRef<'a> {
    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

impl<'a> From<&'a str> for VersionRef<'a> {
    fn from(value: &'a str) -> Self {
        VersionRef(value)
    }
}

impl<'a> From<&'a String> for VersionRef<'a> {
    fn from(value: &'a String) -> Self {
        VersionRef(value.as_str())
    }
}

impl<'a> From<&'a VersionId> for VersionRef<'a> {
    fn from(value: &'a VersionId) -> Self {
        VersionRef(value.as_str())
    }
}

/// Derive the composite key for a member of `pkg` named `name` in `version`.
///
/// Pure and deterministic. `pkg` and `name` are used verbatim; a delimiter
/// inside `pkg` can make two distinct triples render the same key, so callers
/// must keep package names free of `:`. A blank version identifier is
/// rejected rather than rendered into a placeholder key.
pub fn composite_key<'a>(
    version: impl Into<VersionRef<'a>>,
    pkg: &str,
    name: &str,
) -> Result<MemberKey> {
    let version = version.into();
    if version.as_str().trim().is_empty() {
        return Err(CatalogError::InvalidArgument(format!(
            "member {pkg}{KEY_DELIMITER}{name} has no version identifier"
        )));
    }
    Ok(MemberKey(format!(
        "{}{KEY_DELIMITER}{pkg}{KEY_DELIMITER}{name}",
        version.as_str()
    )))
}

/// Release channel a version was published on.
///
/// `Other` keeps fixtures that introduce new channels loadable. Channels
/// compare by their wire name, so `Other("beta")` equals `Beta`; build values
/// from strings with `Channel::from` to get the named variant.
#[derive(Clone, Debug, Eq)]
pub enum Channel {
    Stable,
    Beta,
    Canary,
    Lts,
    Other(String),
}

impl Serialize for Channel {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from(value.as_str()))
    }
}

impl PartialEq for Channel {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Hash for Channel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for Channel {
    fn from(value: &str) -> Self {
        match value {
            "stable" => Channel::Stable,
            "beta" => Channel::Beta,
            "canary" => Channel::Canary,
            "lts" => Channel::Lts,
            other => Channel::Other(other.to_string()),
        }
    }
}

impl Channel {
    pub fn as_str(&self) -> &str {
        match self {
            Channel::Stable => "stable",
            Channel::Beta => "beta",
            Channel::Canary => "canary",
            Channel::Lts => "lts",
            Channel::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_key_renders_triple() {
        let key = composite_key("1.0.0", "core", "Foo").unwrap();
        assert_eq!(key.as_str(), "1.0.0:core:Foo");
        assert_eq!(key.split(), Some(("1.0.0", "core", "Foo")));
    }

    #[test]
    fn composite_key_accepts_every_version_form() {
        let raw = String::from("2.1.0");
        let id = VersionId(raw.clone());
        let from_str = composite_key(raw.as_str(), "pkg", "Bar").unwrap();
        let from_string = composite_key(&raw, "pkg", "Bar").unwrap();
        let from_id = composite_key(&id, "pkg", "Bar").unwrap();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str, from_id);
        assert_eq!(id.as_str(), "2.1.0");
    }

    #[test]
    fn composite_key_rejects_blank_version() {
        let err = composite_key("  ", "core", "Foo").expect_err("blank version must fail");
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert!(err.to_string().contains("core:Foo"));
    }

    #[test]
    fn composite_key_distinguishes_each_component() {
        let base = composite_key("1.0.0", "core", "Foo").unwrap();
        assert_ne!(base, composite_key("1.0.1", "core", "Foo").unwrap());
        assert_ne!(base, composite_key("1.0.0", "data", "Foo").unwrap());
        assert_ne!(base, composite_key("1.0.0", "core", "Bar").unwrap());
        assert_eq!(base, composite_key("1.0.0", "core", "Foo").unwrap());
    }

    #[test]
    fn split_keeps_delimiters_inside_name() {
        let key = MemberKey("1.0.0:core:Foo:bar".to_string());
        assert_eq!(key.split(), Some(("1.0.0", "core", "Foo:bar")));
        assert_eq!(MemberKey("1.0.0:core".to_string()).split(), None);
    }

    #[test]
    fn channel_round_trips_known_and_unknown() {
        let known = Channel::Canary;
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json, "\"canary\"");
        let back: Channel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let parsed: Channel = serde_json::from_str("\"nightly\"").unwrap();
        assert_eq!(parsed, Channel::Other("nightly".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"nightly\"");
    }

    #[test]
    fn other_holding_known_name_matches_named_channel() {
        let spelled = Channel::Other("beta".to_string());
        let json = serde_json::to_string(&spelled).unwrap();
        let back: Channel = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Channel::Beta));
        assert_eq!(back, spelled);
        assert!(matches!(Channel::from("lts"), Channel::Lts));
        assert_ne!(Channel::from("nightly"), Channel::Canary);

        let set: std::collections::HashSet<Channel> = [spelled, Channel::Beta].into();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ids_serialize_transparently() {
        let key = MemberKey("1.0.0:core:Foo".to_string());
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"1.0.0:core:Foo\"");
        let id: VersionId = serde_json::from_str("\"1.0.0\"").unwrap();
        assert_eq!(id, VersionId("1.0.0".to_string()));
    }
}
