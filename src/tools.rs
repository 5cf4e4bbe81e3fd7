//! Agent-callable tools, grouped by API area. Every tool is a free async
//! function taking the client first.
//!
//! Mutating tools re-export PDFs afterwards so an agent can look at what it
//! changed; see [`FeedbackOptions`](crate::client::FeedbackOptions).

pub mod animations;
pub mod collaboration;
pub mod data;
pub mod export;
pub mod formatting;
pub mod lookup;
pub mod multimedia;
pub mod slides;
pub mod templates;

use crate::client::GoogleClient;
use crate::errors::Result;
use crate::transport::Transport;
use log::warn;
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// A tool result: the API response plus the feedback PDFs written for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutput<R> {
    #[serde(flatten)]
    pub response: R,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presentation_pdf_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_pdf_path: Option<PathBuf>,
}

impl<R> ToolOutput<R> {
    pub fn new(response: R) -> Self {
        ToolOutput {
            response,
            presentation_pdf_path: None,
            slide_pdf_path: None,
        }
    }

    fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.presentation_pdf_path = feedback.presentation_pdf_path;
        self.slide_pdf_path = feedback.slide_pdf_path;
        self
    }
}

/// A fresh object ID: `{prefix}_{32 hex digits}`.
pub(crate) fn new_object_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[derive(Debug, Default)]
struct Feedback {
    presentation_pdf_path: Option<PathBuf>,
    slide_pdf_path: Option<PathBuf>,
}

/// Where a change landed, for picking the slide to re-export.
enum Target<'a> {
    Presentation,
    Slide(&'a str),
    Element(&'a str),
}

async fn collect_feedback<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    target: Target<'_>,
) -> Feedback {
    let options = client.feedback();
    let mut feedback = Feedback::default();

    if options.presentation_pdf {
        let path = options
            .output_dir
            .join(format!("presentation_{}.pdf", presentation_id));
        match export::export_presentation_as_pdf(client, presentation_id, Some(&path)).await {
            Ok(_) => feedback.presentation_pdf_path = Some(path),
            Err(e) => warn!("Presentation PDF feedback for {} failed: {}", presentation_id, e),
        }
    }

    if options.slide_pdf && !matches!(target, Target::Presentation) {
        match locate_slide(client, presentation_id, &target).await {
            Ok(Some(index)) => {
                let path = options
                    .output_dir
                    .join(format!("slide_{}_{}.pdf", presentation_id, index));
                match export::export_slide_as_pdf(client, presentation_id, index, Some(&path)).await
                {
                    Ok(_) => feedback.slide_pdf_path = Some(path),
                    Err(e) => warn!(
                        "Slide PDF feedback for {} slide {} failed: {}",
                        presentation_id, index, e
                    ),
                }
            }
            Ok(None) => warn!("Could not locate the changed slide in {}", presentation_id),
            Err(e) => warn!("Slide lookup for feedback on {} failed: {}", presentation_id, e),
        }
    }

    feedback
}

async fn locate_slide<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    target: &Target<'_>,
) -> Result<Option<usize>> {
    let presentation = client.get_presentation(presentation_id).await?;
    Ok(match target {
        Target::Presentation => None,
        Target::Slide(slide_id) => presentation
            .slides()
            .iter()
            .position(|slide| slide.object_id == *slide_id),
        Target::Element(element_id) => presentation.slide_index_of_element(element_id),
    })
}

/// Attaches a presentation PDF to `response`.
pub(crate) async fn presentation_feedback<T: Transport, R>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    response: R,
) -> ToolOutput<R> {
    let feedback = collect_feedback(client, presentation_id, Target::Presentation).await;
    ToolOutput::new(response).with_feedback(feedback)
}

/// Attaches presentation and slide PDFs for a change on `slide_id`.
pub(crate) async fn slide_feedback<T: Transport, R>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    response: R,
) -> ToolOutput<R> {
    let feedback = collect_feedback(client, presentation_id, Target::Slide(slide_id)).await;
    ToolOutput::new(response).with_feedback(feedback)
}

/// Attaches presentation and slide PDFs for a change on a page element; the
/// slide is the one holding `element_id`.
pub(crate) async fn element_feedback<T: Transport, R>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    element_id: &str,
    response: R,
) -> ToolOutput<R> {
    let feedback = collect_feedback(client, presentation_id, Target::Element(element_id)).await;
    ToolOutput::new(response).with_feedback(feedback)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::errors::Result;
    use crate::transport::mock::json_body;
    use crate::transport::ApiRequest;
    use reqwest::Method;
    use serde_json::{json, Value as JsonValue};

    pub const PDF: &[u8] = b"%PDF-1.4 test";

    /// A canned Google backend: answers presentation gets with `presentation`,
    /// batchUpdates with `replies`, and serves every Drive call needed by the
    /// PDF feedback path.
    pub fn fake_google(
        presentation: JsonValue,
        replies: JsonValue,
    ) -> impl Fn(&ApiRequest) -> Result<Vec<u8>> + Send + Sync + 'static {
        move |request: &ApiRequest| {
            let path = request.url.path();
            match request.method {
                Method::POST if path.ends_with(":batchUpdate") => json_body(json!({
                    "presentationId": "p1",
                    "replies": replies.clone()
                })),
                Method::POST if path.ends_with("/copy") => {
                    json_body(json!({"id": "copy1", "name": "Deck - Slide"}))
                }
                Method::GET if path.ends_with("/export") => Ok(PDF.to_vec()),
                Method::GET if path.contains("/drive/v3/files/") => {
                    json_body(json!({"name": "Deck"}))
                }
                Method::DELETE => Ok(Vec::new()),
                Method::GET if path.contains("/presentations/") => {
                    json_body(presentation.clone())
                }
                _ => json_body(json!({})),
            }
        }
    }

    /// A presentation with the given slides, each holding the given element IDs.
    pub fn deck(slides: &[(&str, &[&str])]) -> JsonValue {
        let slides: Vec<JsonValue> = slides
            .iter()
            .map(|(slide_id, elements)| {
                json!({
                    "objectId": slide_id,
                    "pageElements": elements
                        .iter()
                        .map(|id| json!({"objectId": id, "shape": {"shapeType": "TEXT_BOX"}}))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        json!({"presentationId": "p1", "title": "Deck", "slides": slides})
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{deck, fake_google, PDF};
    use super::*;
    use crate::client::test_support::client_with;
    use crate::transport::mock::MockTransport;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn object_ids_are_unique_and_valid() {
        let a = new_object_id("TextBox");
        let b = new_object_id("TextBox");
        assert_ne!(a, b);
        assert!(a.starts_with("TextBox_"));
        assert!(a.len() >= 5 && a.len() <= 50);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn tool_output_flattens_response() {
        let output = ToolOutput {
            response: json!({"presentationId": "p1"}),
            presentation_pdf_path: Some(PathBuf::from("/tmp/presentation_p1.pdf")),
            slide_pdf_path: None,
        };
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({"presentationId": "p1", "presentationPdfPath": "/tmp/presentation_p1.pdf"})
        );
    }

    #[tokio::test]
    async fn element_feedback_finds_slide_by_element() {
        let dir = tempfile::tempdir().unwrap();
        let presentation = deck(&[("s1", &["a"]), ("s2", &["b", "c"])]);
        let client = client_with(
            MockTransport::new(fake_google(presentation, json!([]))),
            dir.path(),
        );

        let output = element_feedback(&client, "p1", "c", ()).await;
        assert_eq!(
            output.presentation_pdf_path,
            Some(dir.path().join("presentation_p1.pdf"))
        );
        assert_eq!(output.slide_pdf_path, Some(dir.path().join("slide_p1_1.pdf")));
        assert_eq!(std::fs::read(dir.path().join("slide_p1_1.pdf")).unwrap(), PDF);
    }

    #[tokio::test]
    async fn feedback_failures_do_not_fail_the_tool() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with(
            MockTransport::new(|request| {
                crate::transport::mock::api_error(
                    403,
                    &format!("denied {}", request.url.path()),
                )
            }),
            dir.path(),
        );

        let output = slide_feedback(&client, "p1", "s1", "done").await;
        assert_eq!(output.response, "done");
        assert_eq!(output.presentation_pdf_path, None);
        assert_eq!(output.slide_pdf_path, None);
    }

    #[tokio::test]
    async fn missing_slide_skips_slide_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let client = client_with(
            MockTransport::new(fake_google(deck(&[("s1", &[])]), json!([]))),
            dir.path(),
        );

        let output = slide_feedback(&client, "p1", "gone", ()).await;
        assert!(output.presentation_pdf_path.is_some());
        assert_eq!(output.slide_pdf_path, None);
        assert!(client.transport().matching(Method::POST, "/copy").is_empty());
    }
}
