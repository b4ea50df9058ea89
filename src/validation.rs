//! Audit helpers for a populated store.
//!
//! The store already refuses dangling references and repeated keys when a
//! record is created. These checks cover what it cannot see record by record:
//! versions left without an Api grouping by an aborted pass, guides that
//! collide on their sidebar position, and members whose composite key would
//! not split back into the triple it was built from.

use crate::catalog::identity::KEY_DELIMITER;
use crate::store::MockStore;
use std::collections::BTreeMap;

/// Return every problem found rather than stopping at the first one.
pub fn validate_store(store: &MockStore) -> Vec<String> {
    let mut errors = Vec::new();

    for version in store.versions() {
        let id = &version.record.id;
        if id.as_str().contains(KEY_DELIMITER) {
            errors.push(format!(
                "version {id} contains '{KEY_DELIMITER}' and cannot be used in member keys"
            ));
        }
        if store.api_for(id).is_none() {
            errors.push(format!("version {id} has no api grouping"));
        }

        let mut positions: BTreeMap<(&str, i64), &str> = BTreeMap::new();
        for guide in store.guides_for(id) {
            let guide = &guide.record;
            if let Some(previous) = positions.insert((guide.group.as_str(), guide.order), &guide.title)
            {
                errors.push(format!(
                    "version {id}: guides '{previous}' and '{}' share order {} in group '{}'",
                    guide.title, guide.order, guide.group
                ));
            }
        }
    }

    for member in store.members() {
        let record = &member.record;
        let key = match record.key() {
            Ok(key) => key,
            Err(err) => {
                errors.push(format!("{} {}: {err}", record.kind().as_str(), record.name()));
                continue;
            }
        };
        let expected = (
            record.version().as_str(),
            record.package(),
            record.name(),
        );
        if key.split() != Some(expected) {
            errors.push(format!(
                "member key {key} does not split back into version {}, package {}, name {}",
                expected.0, expected.1, expected.2
            ));
        }
    }

    errors
}
