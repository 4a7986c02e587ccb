//! Field ownership: reading `metadata.managedFields` and extracting the part of
//! an object that one field manager applied.

pub mod extract;
pub mod fieldpath;
pub mod schema;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ManagedFieldsEntry, ObjectMeta};
use serde::{de::DeserializeOwned, Serialize};
use tracing::*;

use crate::{Error, Result};
use fieldpath::Set;
pub use schema::{parser, ParseableType, Parser};

pub static OPERATION_APPLY: &str = "Apply";
pub static FIELDS_TYPE_V1: &str = "FieldsV1";

/// Extracts the fields `field_manager` owns on `object` (for `subresource`, `""`
/// meaning the main resource) and decodes them into `T`.
///
/// Returns `Ok(None)` when the manager has no apply entry for that subresource,
/// either because it never applied or because other managers took over all of
/// its fields.
pub fn extract_into<K, T>(
    object: &K,
    object_type: ParseableType<'_>,
    field_manager: &str,
    subresource: &str,
) -> Result<Option<T>>
where
    K: kube::Resource + Serialize,
    T: DeserializeOwned,
{
    let Some(entry) = find_managed_fields(object.meta(), field_manager, subresource) else {
        debug!(
            "No apply entry for manager {} (subresource {:?}) on {}",
            field_manager, subresource, object_type.name
        );
        return Ok(None);
    };
    let malformed = |reason: String| Error::MalformedManagedFields {
        manager: field_manager.to_string(),
        reason,
    };
    if let Some(fields_type) = entry.fields_type.as_deref() {
        if fields_type != FIELDS_TYPE_V1 {
            return Err(malformed(format!("unsupported fieldsType `{fields_type}`")));
        }
    }
    let raw = entry
        .fields_v1
        .as_ref()
        .ok_or_else(|| malformed("entry has no fieldsV1".to_string()))?;
    let set = Set::from_fields_v1(&raw.0).map_err(malformed)?.leaves();
    debug!(
        "Manager {} owns {} leaf fields of {}",
        field_manager,
        set.leaf_count(),
        object_type.name
    );

    let value = serde_json::to_value(object).map_err(Error::SerializationError)?;
    let extracted = object_type.extract_items(&value, &set)?;
    serde_json::from_value(extracted)
        .map(Some)
        .map_err(Error::SerializationError)
}

/// First managedFields entry applied by `field_manager` for `subresource`.
pub fn find_managed_fields<'a>(
    meta: &'a ObjectMeta,
    field_manager: &str,
    subresource: &str,
) -> Option<&'a ManagedFieldsEntry> {
    meta.managed_fields.as_ref()?.iter().find(|entry| {
        entry.manager.as_deref() == Some(field_manager)
            && entry.operation.as_deref() == Some(OPERATION_APPLY)
            && entry.subresource.as_deref().unwrap_or("") == subresource
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::FieldsV1;
    use serde_json::json;

    fn entry(manager: &str, operation: &str, subresource: Option<&str>) -> ManagedFieldsEntry {
        ManagedFieldsEntry {
            manager: Some(manager.into()),
            operation: Some(operation.into()),
            subresource: subresource.map(Into::into),
            fields_type: Some(FIELDS_TYPE_V1.into()),
            fields_v1: Some(FieldsV1(json!({ "f:reason": {} }))),
            ..ManagedFieldsEntry::default()
        }
    }

    #[test]
    fn finds_apply_entry_for_manager_and_subresource() {
        let meta = ObjectMeta {
            managed_fields: Some(vec![
                entry("kubectl", "Update", None),
                entry("kubectl", "Apply", Some("status")),
                entry("kubectl", "Apply", None),
            ]),
            ..ObjectMeta::default()
        };
        let main = find_managed_fields(&meta, "kubectl", "").unwrap();
        assert_eq!(main.subresource, None);
        let status = find_managed_fields(&meta, "kubectl", "status").unwrap();
        assert_eq!(status.subresource.as_deref(), Some("status"));
        assert!(find_managed_fields(&meta, "helm", "").is_none());
    }

    #[test]
    fn update_entries_are_not_ownership_by_apply() {
        let meta = ObjectMeta {
            managed_fields: Some(vec![entry("kube-controller-manager", "Update", None)]),
            ..ObjectMeta::default()
        };
        assert!(find_managed_fields(&meta, "kube-controller-manager", "").is_none());
    }

    #[test]
    fn no_managed_fields_at_all() {
        assert!(find_managed_fields(&ObjectMeta::default(), "kubectl", "").is_none());
    }
}
