//! Tag reconciliation.
//!
//! Host tag maps may carry null values (`None`). Those entries are dropped
//! when converting to the wire list, so they never reach the control plane.

use std::collections::{BTreeSet, HashMap};

use crate::model::{Tag, WireTag};

/// Tag mapping as supplied by the host framework.
pub type TagMap = HashMap<String, Option<String>>;

/// Convert a tag mapping into the wire list, dropping null-valued entries.
pub fn to_wire_list(tags: Option<&TagMap>) -> Vec<WireTag> {
    let Some(tags) = tags else {
        return Vec::new();
    };
    tags.iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|value| WireTag {
                key: key.clone(),
                value: value.clone(),
            })
        })
        .collect()
}

/// Convert wire tags into resource-model tags.
pub fn to_domain_tags(tags: &[WireTag]) -> Vec<Tag> {
    tags.iter()
        .map(|t| Tag {
            key: t.key.clone(),
            value: t.value.clone(),
        })
        .collect()
}

/// Resource-model tags as a mapping.
pub fn tag_map(tags: &[Tag]) -> TagMap {
    tags.iter()
        .map(|t| (t.key.clone(), Some(t.value.clone())))
        .collect()
}

/// Tags to send with a create: system tags first, user tags win on collision.
pub fn tags_for_create(system: Option<&TagMap>, desired: Option<&TagMap>) -> TagMap {
    let mut merged = TagMap::new();
    if let Some(system) = system {
        merged.extend(system.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    if let Some(desired) = desired {
        merged.extend(desired.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

/// Entries of `desired` that are new or whose value changed.
pub fn tags_to_add(previous: Option<&TagMap>, desired: Option<&TagMap>) -> TagMap {
    let Some(desired) = desired else {
        return TagMap::new();
    };
    desired
        .iter()
        .filter(|(key, value)| previous.and_then(|p| p.get(*key)) != Some(*value))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Keys of `previous` that are absent from `desired`.
pub fn tags_to_remove(previous: Option<&TagMap>, desired: Option<&TagMap>) -> BTreeSet<String> {
    let Some(previous) = previous else {
        return BTreeSet::new();
    };
    previous
        .keys()
        .filter(|key| !desired.is_some_and(|d| d.contains_key(*key)))
        .cloned()
        .collect()
}
