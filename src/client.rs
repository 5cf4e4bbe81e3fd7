use crate::auth::Credentials;
use crate::errors::{Result, SlidesApiError};
use crate::models::drive::{DriveFile, Permission, PermissionList};
use crate::models::page::Thumbnail;
use crate::models::presentation::Presentation;
use crate::models::requests::{BatchUpdateRequest, BatchUpdateResponse, Request};
use crate::models::sheets::ValueRange;
use crate::models::tool_inputs::ThumbnailSize;
use crate::transport::{decode, ApiRequest, HttpTransport, Transport};
use log::debug;
use reqwest::{Method, Url};
use serde_json::{json, Value as JsonValue};
use std::env;
use std::path::PathBuf;

pub const SLIDES_API_BASE: &str = "https://slides.googleapis.com/v1";
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Base URLs of the three APIs. Overridable for proxies and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub slides: Url,
    pub drive: Url,
    pub sheets: Url,
}

impl Endpoints {
    pub fn new(slides: &str, drive: &str, sheets: &str) -> Result<Self> {
        let parse = |base: &str| {
            Url::parse(base)
                .map_err(|e| SlidesApiError::InvalidInput(format!("Invalid base URL '{}': {}", base, e)))
        };
        Ok(Endpoints {
            slides: parse(slides)?,
            drive: parse(drive)?,
            sheets: parse(sheets)?,
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            slides: Url::parse(SLIDES_API_BASE).expect("SLIDES_API_BASE is a valid URL"),
            drive: Url::parse(DRIVE_API_BASE).expect("DRIVE_API_BASE is a valid URL"),
            sheets: Url::parse(SHEETS_API_BASE).expect("SHEETS_API_BASE is a valid URL"),
        }
    }
}

/// Which PDF re-exports mutating tools perform afterwards, and where the
/// files go.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackOptions {
    /// Export the whole presentation after a change.
    pub presentation_pdf: bool,
    /// Export the affected slide after a change, when it can be located.
    pub slide_pdf: bool,
    pub output_dir: PathBuf,
}

impl FeedbackOptions {
    pub fn disabled() -> Self {
        FeedbackOptions {
            presentation_pdf: false,
            slide_pdf: false,
            output_dir: env::temp_dir(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.presentation_pdf || self.slide_pdf
    }
}

impl Default for FeedbackOptions {
    fn default() -> Self {
        FeedbackOptions {
            presentation_pdf: true,
            slide_pdf: true,
            output_dir: env::temp_dir(),
        }
    }
}

/// Typed access to the Slides, Drive and Sheets endpoints the tools use.
#[derive(Debug)]
pub struct GoogleClient<T = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
    feedback: FeedbackOptions,
}

impl GoogleClient<HttpTransport> {
    /// A client against the public Google endpoints.
    pub fn from_credentials(credentials: Credentials) -> Self {
        GoogleClient::new(HttpTransport::new(credentials))
    }
}

impl<T: Transport> GoogleClient<T> {
    pub fn new(transport: T) -> Self {
        GoogleClient {
            transport,
            endpoints: Endpoints::default(),
            feedback: FeedbackOptions::default(),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_feedback(mut self, feedback: FeedbackOptions) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn feedback(&self) -> &FeedbackOptions {
        &self.feedback
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // --- Slides ---

    /// `presentations.get`, parsed into the read model.
    pub async fn get_presentation(&self, presentation_id: &str) -> Result<Presentation> {
        let bytes = self.fetch_presentation(presentation_id, None).await?;
        decode(&bytes)
    }

    /// `presentations.get`, untouched. Keeps every field the read model drops.
    /// `fields` is an optional partial-response mask such as
    /// `slides(objectId,pageElements)`.
    pub async fn get_presentation_json(
        &self,
        presentation_id: &str,
        fields: Option<&str>,
    ) -> Result<JsonValue> {
        let bytes = self.fetch_presentation(presentation_id, fields).await?;
        decode(&bytes)
    }

    async fn fetch_presentation(
        &self,
        presentation_id: &str,
        fields: Option<&str>,
    ) -> Result<Vec<u8>> {
        require_id("Presentation ID", presentation_id)?;
        let url = join(&self.endpoints.slides, &["presentations", presentation_id])?;
        let mut request = ApiRequest::new(Method::GET, url);
        if let Some(fields) = fields {
            request = request.query("fields", fields);
        }
        self.transport.send(request).await
    }

    /// `presentations.create`.
    pub async fn create_presentation(&self, title: &str) -> Result<Presentation> {
        let url = join(&self.endpoints.slides, &["presentations"])?;
        let request = ApiRequest::new(Method::POST, url).json(json!({ "title": title }));
        decode(&self.transport.send(request).await?)
    }

    /// `presentations.batchUpdate`.
    pub async fn batch_update(
        &self,
        presentation_id: &str,
        requests: Vec<Request>,
    ) -> Result<BatchUpdateResponse> {
        require_id("Presentation ID", presentation_id)?;
        if requests.is_empty() {
            return Err(SlidesApiError::InvalidInput(
                "batchUpdate needs at least one request".to_string(),
            ));
        }
        debug!(
            "batchUpdate on {} with {} request(s)",
            presentation_id,
            requests.len()
        );
        let url = join(
            &self.endpoints.slides,
            &["presentations", &format!("{}:batchUpdate", presentation_id)],
        )?;
        let body = serde_json::to_value(BatchUpdateRequest { requests })?;
        decode(&self.transport.send(ApiRequest::new(Method::POST, url).json(body)).await?)
    }

    /// `presentations.pages.getThumbnail` as a PNG.
    pub async fn get_thumbnail(
        &self,
        presentation_id: &str,
        page_object_id: &str,
        size: ThumbnailSize,
    ) -> Result<Thumbnail> {
        require_id("Presentation ID", presentation_id)?;
        let url = join(
            &self.endpoints.slides,
            &[
                "presentations",
                presentation_id,
                "pages",
                page_object_id,
                "thumbnail",
            ],
        )?;
        let request = ApiRequest::new(Method::GET, url)
            .query("thumbnailProperties.mimeType", "PNG")
            .query("thumbnailProperties.thumbnailSize", size.as_str());
        decode(&self.transport.send(request).await?)
    }

    /// Downloads a pre-signed content URL such as a thumbnail.
    pub async fn download(&self, content_url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(content_url).map_err(|e| {
            SlidesApiError::InvalidInput(format!("Invalid content URL '{}': {}", content_url, e))
        })?;
        self.transport
            .send(ApiRequest::new(Method::GET, url).unauthorized())
            .await
    }

    // --- Drive ---

    /// `files.get` with `fields=name`.
    pub async fn drive_file_name(&self, file_id: &str) -> Result<String> {
        require_id("File ID", file_id)?;
        let url = join(&self.endpoints.drive, &["files", file_id])?;
        let request = ApiRequest::new(Method::GET, url).query("fields", "name");
        let file: DriveFile = decode(&self.transport.send(request).await?)?;
        file.name.ok_or_else(|| {
            SlidesApiError::Unknown(format!("Drive returned no name for file {}", file_id))
        })
    }

    /// `files.copy`. `body` carries the new name and metadata.
    pub async fn copy_file(&self, file_id: &str, body: &DriveFile) -> Result<DriveFile> {
        require_id("File ID", file_id)?;
        let url = join(&self.endpoints.drive, &["files", file_id, "copy"])?;
        let request = ApiRequest::new(Method::POST, url).json(serde_json::to_value(body)?);
        let copy: DriveFile = decode(&self.transport.send(request).await?)?;
        if copy.id.is_none() {
            return Err(SlidesApiError::Unknown(format!(
                "Drive returned no ID for the copy of {}",
                file_id
            )));
        }
        Ok(copy)
    }

    /// `files.delete`.
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        require_id("File ID", file_id)?;
        let url = join(&self.endpoints.drive, &["files", file_id])?;
        self.transport
            .send(ApiRequest::new(Method::DELETE, url))
            .await?;
        Ok(())
    }

    /// `files.export`: the raw bytes of the file converted to `mime_type`.
    pub async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>> {
        require_id("File ID", file_id)?;
        let url = join(&self.endpoints.drive, &["files", file_id, "export"])?;
        self.transport
            .send(ApiRequest::new(Method::GET, url).query("mimeType", mime_type))
            .await
    }

    /// `permissions.create`.
    pub async fn create_permission(
        &self,
        file_id: &str,
        permission: &Permission,
        send_notification_email: Option<bool>,
    ) -> Result<Permission> {
        require_id("File ID", file_id)?;
        let url = join(&self.endpoints.drive, &["files", file_id, "permissions"])?;
        let mut request = ApiRequest::new(Method::POST, url).json(serde_json::to_value(permission)?);
        if let Some(send) = send_notification_email {
            request = request.query("sendNotificationEmail", send.to_string());
        }
        decode(&self.transport.send(request).await?)
    }

    /// `permissions.list`, following page tokens.
    pub async fn list_permissions(&self, file_id: &str) -> Result<Vec<Permission>> {
        require_id("File ID", file_id)?;
        let url = join(&self.endpoints.drive, &["files", file_id, "permissions"])?;
        let mut permissions = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut request = ApiRequest::new(Method::GET, url.clone());
            if let Some(token) = page_token.take() {
                request = request.query("pageToken", token);
            }
            let page: PermissionList = decode(&self.transport.send(request).await?)?;
            permissions.extend(page.permissions);
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }
        Ok(permissions)
    }

    /// `permissions.delete`.
    pub async fn delete_permission(&self, file_id: &str, permission_id: &str) -> Result<()> {
        require_id("File ID", file_id)?;
        require_id("Permission ID", permission_id)?;
        let url = join(
            &self.endpoints.drive,
            &["files", file_id, "permissions", permission_id],
        )?;
        self.transport
            .send(ApiRequest::new(Method::DELETE, url))
            .await?;
        Ok(())
    }

    // --- Sheets ---

    /// `spreadsheets.values.get` for an A1 range such as `Sheet1!A1:D10`.
    pub async fn sheet_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        require_id("Spreadsheet ID", spreadsheet_id)?;
        let url = join(
            &self.endpoints.sheets,
            &["spreadsheets", spreadsheet_id, "values", range],
        )?;
        decode(&self.transport.send(ApiRequest::new(Method::GET, url)).await?)
    }
}

fn require_id(what: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(SlidesApiError::InvalidInput(format!(
            "{} cannot be empty",
            what
        )));
    }
    Ok(())
}

/// Appends percent-encoded path segments to `base`.
fn join(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SlidesApiError::InvalidInput(format!("Cannot use '{}' as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::transport::mock::MockTransport;

    /// A client over `transport` that writes feedback PDFs into `output_dir`.
    pub fn client_with(transport: MockTransport, output_dir: &std::path::Path) -> GoogleClient<MockTransport> {
        GoogleClient::new(transport).with_feedback(FeedbackOptions {
            presentation_pdf: true,
            slide_pdf: true,
            output_dir: output_dir.to_path_buf(),
        })
    }

    pub fn quiet_client(transport: MockTransport) -> GoogleClient<MockTransport> {
        GoogleClient::new(transport).with_feedback(FeedbackOptions::disabled())
    }
}
