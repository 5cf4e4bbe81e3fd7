//! Sheets v4 `ValueRange`, as returned by `spreadsheets.values.get`.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Derived from: https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values#ValueRange
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    pub range: Option<String>,
    pub major_dimension: Option<String>,
    /// Rows of cells. Trailing empty rows and cells are omitted by the API,
    /// so rows can differ in length.
    #[serde(default)]
    pub values: Vec<Vec<JsonValue>>,
}

impl ValueRange {
    /// Widest row length.
    pub fn column_count(&self) -> usize {
        self.values.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Non-empty cells as `(row, column, text)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, String)> + '_ {
        self.values.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(column, cell)| {
                let text = match cell {
                    JsonValue::Null => return None,
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (!text.is_empty()).then_some((row, column, text))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ragged_rows_and_empty_cells() {
        let range: ValueRange = serde_json::from_value(json!({
            "range": "Sheet1!A1:C3",
            "majorDimension": "ROWS",
            "values": [["Name", "Score", "Rank"], ["Ada", 42], ["", "7", true]]
        }))
        .unwrap();
        assert_eq!(range.column_count(), 3);
        let cells: Vec<_> = range.cells().collect();
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[4], (1, 1, "42".to_string()));
        assert_eq!(cells[5], (2, 1, "7".to_string()));
        assert_eq!(cells[6], (2, 2, "true".to_string()));
    }

    #[test]
    fn missing_values_means_empty() {
        let range: ValueRange = serde_json::from_value(json!({"range": "Sheet1!A1:B2"})).unwrap();
        assert!(range.values.is_empty());
        assert_eq!(range.column_count(), 0);
    }
}
