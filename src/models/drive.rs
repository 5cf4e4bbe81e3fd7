//! The small slice of the Drive v3 resources the tools touch: files (copy,
//! name lookup) and permissions.
//! Derived from: https://developers.google.com/drive/api/reference/rest/v3

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A Drive file. Used both as a `files.copy` request body and as its response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Private key/value pairs visible only to the requesting app.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_properties: Option<IndexMap<String, String>>,
}

impl DriveFile {
    /// A copy request body that only renames.
    pub fn named(name: impl Into<String>) -> Self {
        DriveFile {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// Who a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GranteeType {
    User,
    Group,
    Domain,
    Anyone,
}

/// A permission on a Drive file.
/// Derived from: https://developers.google.com/drive/api/reference/rest/v3/permissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub grantee_type: GranteeType,
    /// "owner", "organizer", "fileOrganizer", "writer", "commenter" or "reader".
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_file_discovery: Option<bool>,
}

/// Response of `permissions.list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionList {
    #[serde(default)]
    pub permissions: Vec<Permission>,
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn copy_body_skips_unset_fields() {
        assert_eq!(
            serde_json::to_value(DriveFile::named("Deck - Slide 2")).unwrap(),
            json!({"name": "Deck - Slide 2"})
        );
    }

    #[test]
    fn permission_list_parses() {
        let list: PermissionList = serde_json::from_value(json!({
            "kind": "drive#permissionList",
            "permissions": [
                {"id": "123", "type": "user", "role": "owner", "emailAddress": "a@example.com"},
                {"id": "anyoneWithLink", "type": "anyone", "role": "reader"}
            ]
        }))
        .unwrap();
        assert_eq!(list.permissions.len(), 2);
        assert_eq!(list.permissions[1].grantee_type, GranteeType::Anyone);
        assert_eq!(list.next_page_token, None);
    }
}
