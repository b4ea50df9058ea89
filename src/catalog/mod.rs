//! Catalog entities and their identities.
//!
//! `identity` holds the composite-key scheme and the small value types every
//! other module shares; `model` the typed records; `index` the read-side
//! lookup over a populated store.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{Channel, KEY_DELIMITER, MemberKey, VersionId, VersionRef, composite_key};
pub use index::CatalogIndex;
pub use model::{
    Addon, Api, ApiClass, ApiFunction, ApiInterface, ApiMember, Guide, MemberDocs, MemberKind,
    MemberLink, RecordId, Version,
};
