//! PDF and thumbnail export.
//!
//! Results come back as an [`ExportOutput`]: a human-readable message plus an
//! artifact that is either the path written to or the file inlined as a
//! base64 data URL.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::drive::DriveFile;
use crate::models::requests::{DeleteObjectRequest, Request};
use crate::models::tool_inputs::ThumbnailSize;
use crate::transport::Transport;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const PNG_MIME_TYPE: &str = "image/png";

/// An exported file inlined as a data URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileData {
    pub filename: String,
    pub file_data: String,
}

/// The `{"type": "file", "file": {...}}` attachment agent frameworks accept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileArtifact {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub file: FileData,
}

impl FileArtifact {
    pub fn inline(filename: String, mime_type: &str, bytes: &[u8]) -> Self {
        FileArtifact {
            kind: "file",
            file: FileData {
                filename,
                file_data: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Artifact {
    /// The file was written to this path.
    Path(PathBuf),
    Files(Vec<FileArtifact>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportOutput {
    pub content: String,
    pub artifact: Artifact,
}

/// Writes `bytes` to `output_path`, or inlines them when no path is given.
/// A written file is reported as `"{message} {written} {path}"`.
fn deliver(
    bytes: &[u8],
    output_path: Option<&Path>,
    filename: String,
    mime_type: &str,
    message: String,
    written: &str,
) -> Result<ExportOutput> {
    match output_path {
        Some(path) => {
            std::fs::write(path, bytes)?;
            Ok(ExportOutput {
                content: format!("{} {} {}", message, written, path.display()),
                artifact: Artifact::Path(path.to_path_buf()),
            })
        }
        None => Ok(ExportOutput {
            content: message,
            artifact: Artifact::Files(vec![FileArtifact::inline(filename, mime_type, bytes)]),
        }),
    }
}

/// Exports the whole presentation as a PDF.
pub async fn export_presentation_as_pdf<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    output_path: Option<&Path>,
) -> Result<ExportOutput> {
    let pdf = client.export_file(presentation_id, PDF_MIME_TYPE).await?;
    info!("Exported presentation {} ({} bytes)", presentation_id, pdf.len());
    deliver(
        &pdf,
        output_path,
        format!("presentation_{}.pdf", presentation_id),
        PDF_MIME_TYPE,
        "Presentation exported as PDF".to_string(),
        "to",
    )
}

/// Exports a single slide as a PDF.
///
/// Drive can only export whole files, so this copies the presentation, drops
/// every other slide from the copy, exports it and deletes the copy again.
/// The copy is deleted even when an intermediate step fails; a failure to
/// delete it is logged rather than returned.
pub async fn export_slide_as_pdf<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_index: usize,
    output_path: Option<&Path>,
) -> Result<ExportOutput> {
    let name = client.drive_file_name(presentation_id).await?;
    let copy = client
        .copy_file(
            presentation_id,
            &DriveFile::named(format!("{} - Slide {}", name, slide_index + 1)),
        )
        .await?;
    let copy_id = copy.id.ok_or_else(|| {
        SlidesApiError::Unknown(format!("Copy of {} has no ID", presentation_id))
    })?;

    let exported = export_single_slide(client, &copy_id, slide_index).await;

    if let Err(e) = client.delete_file(&copy_id).await {
        warn!("Failed to delete temporary copy {}: {}", copy_id, e);
    }

    let pdf = exported?;
    info!(
        "Exported slide {} of {} ({} bytes)",
        slide_index,
        presentation_id,
        pdf.len()
    );
    deliver(
        &pdf,
        output_path,
        format!("slide_{}_{}.pdf", presentation_id, slide_index),
        PDF_MIME_TYPE,
        format!("Slide {} exported as PDF", slide_index + 1),
        "to",
    )
}

async fn export_single_slide<T: Transport>(
    client: &GoogleClient<T>,
    copy_id: &str,
    slide_index: usize,
) -> Result<Vec<u8>> {
    let copy = client.get_presentation(copy_id).await?;
    let slide_ids = copy.slide_ids();
    if slide_index >= slide_ids.len() {
        return Err(SlidesApiError::SlideIndexOutOfRange {
            index: slide_index,
            len: slide_ids.len(),
        });
    }

    let deletes: Vec<Request> = slide_ids
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != slide_index)
        .map(|(_, id)| {
            Request::DeleteObject(DeleteObjectRequest {
                object_id: id.to_string(),
            })
        })
        .collect();
    if !deletes.is_empty() {
        client.batch_update(copy_id, deletes).await?;
    }

    client.export_file(copy_id, PDF_MIME_TYPE).await
}

/// Renders a slide thumbnail as a PNG.
pub async fn get_presentation_thumbnail<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_index: usize,
    size: ThumbnailSize,
    output_path: Option<&Path>,
) -> Result<ExportOutput> {
    let presentation = client.get_presentation(presentation_id).await?;
    let slide_ids = presentation.slide_ids();
    let slide_id = crate::helpers::index_to_slide_id(&slide_ids, slide_index)?;

    let thumbnail = client
        .get_thumbnail(presentation_id, slide_id, size)
        .await?;
    let png = client.download(&thumbnail.content_url).await?;
    deliver(
        &png,
        output_path,
        format!("thumbnail_{}_{}.png", presentation_id, slide_index),
        PNG_MIME_TYPE,
        format!("Thumbnail of slide {}", slide_index + 1),
        "saved to",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::quiet_client;
    use crate::tools::test_support::{deck, fake_google, PDF};
    use crate::transport::mock::{api_error, json_body, MockTransport};
    use reqwest::Method;
    use serde_json::json;

    #[tokio::test]
    async fn slide_export_deletes_other_slides_and_the_copy() {
        let presentation = deck(&[("s1", &[]), ("s2", &[]), ("s3", &[])]);
        let client = quiet_client(MockTransport::new(fake_google(presentation, json!([]))));

        let output = export_slide_as_pdf(&client, "p1", 1, None).await.unwrap();
        assert_eq!(output.content, "Slide 2 exported as PDF");

        let copies = client.transport().matching(Method::POST, "/files/p1/copy");
        assert_eq!(copies[0].body, Some(json!({"name": "Deck - Slide 2"})));

        let updates = client.transport().matching(Method::POST, "copy1:batchUpdate");
        assert_eq!(
            updates[0].body,
            Some(json!({"requests": [
                {"deleteObject": {"objectId": "s1"}},
                {"deleteObject": {"objectId": "s3"}}
            ]}))
        );

        let exports = client.transport().matching(Method::GET, "/files/copy1/export");
        assert_eq!(exports[0].query_value("mimeType"), Some(PDF_MIME_TYPE));
        assert_eq!(client.transport().matching(Method::DELETE, "/files/copy1").len(), 1);

        match output.artifact {
            Artifact::Files(files) => {
                assert_eq!(files[0].file.filename, "slide_p1_1.pdf");
                assert_eq!(
                    files[0].file.file_data,
                    format!("data:application/pdf;base64,{}", STANDARD.encode(PDF))
                );
            }
            other => panic!("expected inline artifact, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn single_slide_deck_skips_batch_update() {
        let client = quiet_client(MockTransport::new(fake_google(
            deck(&[("only", &[])]),
            json!([]),
        )));
        export_slide_as_pdf(&client, "p1", 0, None).await.unwrap();
        assert!(client.transport().matching(Method::POST, ":batchUpdate").is_empty());
    }

    #[tokio::test]
    async fn out_of_range_still_deletes_the_copy() {
        let client = quiet_client(MockTransport::new(fake_google(
            deck(&[("s1", &[]), ("s2", &[])]),
            json!([]),
        )));

        let err = export_slide_as_pdf(&client, "p1", 5, None).await.unwrap_err();
        assert!(matches!(
            err,
            SlidesApiError::SlideIndexOutOfRange { index: 5, len: 2 }
        ));
        assert_eq!(client.transport().matching(Method::DELETE, "/files/copy1").len(), 1);
        assert!(client.transport().matching(Method::GET, "/export").is_empty());
    }

    #[tokio::test]
    async fn cleanup_failure_does_not_mask_result() {
        let inner = fake_google(deck(&[("s1", &[])]), json!([]));
        let client = quiet_client(MockTransport::new(move |request| {
            if request.method == Method::DELETE {
                api_error(500, "backend error")
            } else {
                inner(request)
            }
        }));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slide.pdf");
        let output = export_slide_as_pdf(&client, "p1", 0, Some(&path))
            .await
            .unwrap();
        assert_eq!(output.artifact, Artifact::Path(path.clone()));
        assert_eq!(std::fs::read(&path).unwrap(), PDF);
    }

    #[tokio::test]
    async fn export_failure_wins_over_cleanup_failure() {
        let inner = fake_google(deck(&[("s1", &[])]), json!([]));
        let client = quiet_client(MockTransport::new(move |request| {
            let path = request.url.path();
            if request.method == Method::DELETE {
                api_error(500, "cleanup failed")
            } else if path.ends_with("/export") {
                api_error(403, "export denied")
            } else {
                inner(request)
            }
        }));

        match export_slide_as_pdf(&client, "p1", 0, None).await {
            Err(SlidesApiError::ApiError { message, .. }) => assert_eq!(message, "export denied"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn presentation_export_writes_file() {
        let client = quiet_client(MockTransport::new(|_| Ok(PDF.to_vec())));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pdf");

        let output = export_presentation_as_pdf(&client, "p1", Some(&path))
            .await
            .unwrap();
        assert_eq!(
            output.content,
            format!("Presentation exported as PDF to {}", path.display())
        );
        assert_eq!(std::fs::read(&path).unwrap(), PDF);
    }

    #[tokio::test]
    async fn thumbnail_is_inlined_as_png() {
        let client = quiet_client(MockTransport::new(|request| {
            let path = request.url.path();
            if path.ends_with("/thumbnail") {
                json_body(json!({"contentUrl": "https://lh3.googleusercontent.com/t"}))
            } else if path.contains("/presentations/") {
                json_body(deck(&[("s1", &[]), ("s2", &[])]))
            } else {
                Ok(vec![1, 2, 3])
            }
        }));

        let output = get_presentation_thumbnail(&client, "p1", 1, ThumbnailSize::Large, None)
            .await
            .unwrap();
        assert_eq!(output.content, "Thumbnail of slide 2");
        let thumbnails = client.transport().matching(Method::GET, "/pages/s2/thumbnail");
        assert_eq!(thumbnails.len(), 1);
        assert_eq!(
            serde_json::to_value(&output.artifact).unwrap(),
            json!([{
                "type": "file",
                "file": {"filename": "thumbnail_p1_1.png", "file_data": "data:image/png;base64,AQID"}
            }])
        );
    }

    #[tokio::test]
    async fn written_thumbnail_reports_its_path() {
        let client = quiet_client(MockTransport::new(|request| {
            let path = request.url.path();
            if path.ends_with("/thumbnail") {
                json_body(json!({"contentUrl": "https://lh3.googleusercontent.com/t"}))
            } else if path.contains("/presentations/") {
                json_body(deck(&[("s1", &[])]))
            } else {
                Ok(vec![1, 2, 3])
            }
        }));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s1.png");

        let output = get_presentation_thumbnail(&client, "p1", 0, ThumbnailSize::Small, Some(&path))
            .await
            .unwrap();
        assert_eq!(
            output.content,
            format!("Thumbnail of slide 1 saved to {}", path.display())
        );
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn thumbnail_rejects_bad_index() {
        let client = quiet_client(MockTransport::new(|_| json_body(deck(&[("s1", &[])]))));
        let err = get_presentation_thumbnail(&client, "p1", 3, ThumbnailSize::Small, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SlidesApiError::SlideIndexOutOfRange { index: 3, len: 1 }
        ));
    }
}
