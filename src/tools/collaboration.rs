//! Sharing a presentation through Drive permissions.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::drive::{GranteeType, Permission};
use crate::models::tool_inputs::PermissionRole;
use crate::transport::Transport;
use log::info;

/// Grants `role` to a user. Drive emails them a notification.
pub async fn share_with_user<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    email_address: &str,
    role: PermissionRole,
) -> Result<Permission> {
    if !email_address.contains('@') {
        return Err(SlidesApiError::InvalidInput(format!(
            "'{}' is not an email address",
            email_address
        )));
    }
    let permission = Permission {
        id: None,
        grantee_type: GranteeType::User,
        role: role.as_str().to_string(),
        email_address: Some(email_address.to_string()),
        display_name: None,
        allow_file_discovery: None,
    };
    let created = client
        .create_permission(presentation_id, &permission, Some(true))
        .await?;
    info!(
        "Granted {} on {} to {}",
        role.as_str(),
        presentation_id,
        email_address
    );
    Ok(created)
}

pub async fn add_editor_permission<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    email_address: &str,
) -> Result<Permission> {
    share_with_user(client, presentation_id, email_address, PermissionRole::Writer).await
}

pub async fn add_viewer_permission<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    email_address: &str,
) -> Result<Permission> {
    share_with_user(client, presentation_id, email_address, PermissionRole::Reader).await
}

pub async fn add_commenter_permission<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    email_address: &str,
) -> Result<Permission> {
    share_with_user(client, presentation_id, email_address, PermissionRole::Commenter).await
}

pub async fn remove_permission<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    permission_id: &str,
) -> Result<()> {
    client
        .delete_permission(presentation_id, permission_id)
        .await?;
    info!("Removed permission {} from {}", permission_id, presentation_id);
    Ok(())
}

/// Every permission on the presentation, across all result pages.
pub async fn list_permissions<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
) -> Result<Vec<Permission>> {
    client.list_permissions(presentation_id).await
}

/// Lets anyone with the link view the presentation. It is not listed in
/// search results.
pub async fn make_public<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
) -> Result<Permission> {
    let permission = Permission {
        id: None,
        grantee_type: GranteeType::Anyone,
        role: PermissionRole::Reader.as_str().to_string(),
        email_address: None,
        display_name: None,
        allow_file_discovery: Some(false),
    };
    let created = client
        .create_permission(presentation_id, &permission, None)
        .await?;
    info!("Made {} viewable by link", presentation_id);
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::quiet_client;
    use crate::transport::mock::{json_body, MockTransport};
    use reqwest::Method;
    use serde_json::json;

    fn drive_backend() -> MockTransport {
        MockTransport::new(|request| match request.method {
            Method::POST => {
                let mut permission = request.body.clone().unwrap();
                permission["id"] = json!("perm1");
                json_body(permission)
            }
            Method::DELETE => Ok(Vec::new()),
            _ if request.query_value("pageToken").is_none() => json_body(json!({
                "permissions": [{"id": "owner1", "type": "user", "role": "owner"}],
                "nextPageToken": "page2"
            })),
            _ => json_body(json!({
                "permissions": [{"id": "anyoneWithLink", "type": "anyone", "role": "reader"}]
            })),
        })
    }

    #[tokio::test]
    async fn editor_permission_notifies_user() {
        let client = quiet_client(drive_backend());
        let created = add_editor_permission(&client, "p1", "ana@example.com")
            .await
            .unwrap();
        assert_eq!(created.id.as_deref(), Some("perm1"));
        assert_eq!(created.role, "writer");

        let request = client.transport().requests().remove(0);
        assert!(request.url.path().ends_with("/files/p1/permissions"));
        assert_eq!(request.query_value("sendNotificationEmail"), Some("true"));
        assert_eq!(
            request.body,
            Some(json!({"type": "user", "role": "writer", "emailAddress": "ana@example.com"}))
        );
    }

    #[tokio::test]
    async fn roles_map_to_drive_names() {
        let client = quiet_client(drive_backend());
        add_viewer_permission(&client, "p1", "a@example.com").await.unwrap();
        add_commenter_permission(&client, "p1", "b@example.com").await.unwrap();
        let roles: Vec<_> = client
            .transport()
            .requests()
            .iter()
            .map(|r| r.body.as_ref().unwrap()["role"].clone())
            .collect();
        assert_eq!(roles, vec![json!("reader"), json!("commenter")]);
    }

    #[tokio::test]
    async fn bad_email_is_rejected_locally() {
        let client = quiet_client(drive_backend());
        assert!(matches!(
            add_editor_permission(&client, "p1", "not-an-email").await,
            Err(SlidesApiError::InvalidInput(_))
        ));
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn make_public_is_link_only() {
        let client = quiet_client(drive_backend());
        make_public(&client, "p1").await.unwrap();
        let request = client.transport().requests().remove(0);
        assert_eq!(request.query_value("sendNotificationEmail"), None);
        assert_eq!(
            request.body,
            Some(json!({"type": "anyone", "role": "reader", "allowFileDiscovery": false}))
        );
    }

    #[tokio::test]
    async fn list_follows_pages() {
        let client = quiet_client(drive_backend());
        let permissions = list_permissions(&client, "p1").await.unwrap();
        let ids: Vec<_> = permissions.iter().filter_map(|p| p.id.as_deref()).collect();
        assert_eq!(ids, vec!["owner1", "anyoneWithLink"]);
        assert_eq!(client.transport().requests()[1].query_value("pageToken"), Some("page2"));
    }

    #[tokio::test]
    async fn remove_deletes_by_id() {
        let client = quiet_client(drive_backend());
        remove_permission(&client, "p1", "perm7").await.unwrap();
        let deletes = client.transport().matching(Method::DELETE, "/files/p1/permissions/perm7");
        assert_eq!(deletes.len(), 1);
    }
}
