use crate::models::{
    common::AffineTransform, elements::PageElement, page::Page, presentation::Presentation,
};
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::fmt::Write;

// --- Sorting ---

/// Extracts the translateY value from a PageElement's transform.
/// Returns f64::MAX if transform or translateY is None, placing such elements last.
fn get_translate_y(element: &PageElement) -> f64 {
    element
        .transform
        .as_ref()
        .and_then(|t: &AffineTransform| t.translate_y)
        .unwrap_or(f64::MAX)
}

/// Compares two PageElements based on their vertical position (translateY).
fn compare_elements_by_y(a: &PageElement, b: &PageElement) -> Ordering {
    get_translate_y(a)
        .partial_cmp(&get_translate_y(b))
        .unwrap_or(Ordering::Equal)
}

// --- Text Extraction ---

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Concatenated text runs of a raw `TextContent` object.
fn raw_text_content(text: &JsonValue) -> String {
    text["textElements"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|element| element["textRun"]["content"].as_str())
        .collect()
}

/// Extracts text from a raw Table element: one line per row, non-empty
/// cells separated by a space.
fn extract_text_from_table(table: &JsonValue) -> Option<String> {
    let rows: Vec<String> = table["tableRows"]
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|row| {
            let cells: Vec<String> = row["tableCells"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|cell| non_empty(&raw_text_content(&cell["text"])))
                .collect();
            (!cells.is_empty()).then(|| cells.join(" "))
        })
        .collect();
    (!rows.is_empty()).then(|| rows.join("\n"))
}

/// Extracts text from a single PageElement. Groups contribute their
/// children's text, top to bottom.
fn extract_text_from_page_element(element: &PageElement) -> Option<String> {
    if let Some(text) = element.shape_text() {
        return non_empty(&text);
    }
    if let Some(table) = &element.table {
        return extract_text_from_table(table);
    }
    if let Some(group) = &element.element_group {
        return extract_text_from_elements(&group.children);
    }
    None
}

fn extract_text_from_elements(elements: &[PageElement]) -> Option<String> {
    let mut sorted: Vec<&PageElement> = elements.iter().collect();
    sorted.sort_by(|a, b| compare_elements_by_y(a, b));
    let parts: Vec<String> = sorted
        .into_iter()
        .filter_map(extract_text_from_page_element)
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}

/// Extracts and concatenates text from all elements on a single slide, sorted vertically.
fn extract_text_from_slide(slide: &Page) -> Option<String> {
    extract_text_from_elements(slide.elements())
}

// --- Public API Function ---

/// Extracts text from all slides in a presentation, formatted as Markdown:
/// the title, then one `## Slide N` section per slide that has text,
/// separated by `---`. Within a slide, elements are ordered top to bottom.
pub fn extract_text_from_presentation(presentation: &Presentation) -> String {
    let mut full_text = String::new();

    full_text.push_str("# Presentation\n");
    match &presentation.title {
        Some(title) => {
            let _ = writeln!(full_text, "{}\n", title);
        }
        None => full_text.push('\n'),
    }

    let mut first_slide = true;
    for (index, slide) in presentation.slides().iter().enumerate() {
        if let Some(slide_content) = extract_text_from_slide(slide) {
            if !first_slide {
                full_text.push_str("\n---\n\n");
            }
            first_slide = false;

            let _ = writeln!(full_text, "## Slide {}\n", index + 1);
            let _ = writeln!(full_text, "{}", slide_content);
        }
    }

    full_text
}
