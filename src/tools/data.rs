//! Bringing Google Sheets data into slides: linked charts and tables.

use crate::client::GoogleClient;
use crate::errors::{Result, SlidesApiError};
use crate::models::requests::{
    BatchUpdateResponse, CreateSheetsChartRequest, CreateTableRequest, InsertTextRequest,
    LinkingMode, Request, TableCellLocation,
};
use crate::models::tool_inputs::Position;
use crate::tools::{new_object_id, slide_feedback, ToolOutput};
use crate::transport::Transport;
use log::info;

/// Embeds chart `chart_id` of a spreadsheet. Linked charts can be refreshed
/// from the sheet later; unlinked ones are a static image.
pub async fn create_sheets_chart<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    spreadsheet_id: &str,
    chart_id: i64,
    position: Position,
    linking_mode: LinkingMode,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let chart_element_id = new_object_id("Chart");
    let response = client
        .batch_update(
            presentation_id,
            vec![Request::CreateSheetsChart(CreateSheetsChartRequest {
                object_id: chart_element_id.clone(),
                spreadsheet_id: spreadsheet_id.to_string(),
                chart_id,
                linking_mode,
                element_properties: position.element_properties(slide_id),
            })],
        )
        .await?;
    info!(
        "Added chart {} from {} to slide {}",
        chart_id, spreadsheet_id, slide_id
    );
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}

/// Reads `sheet_name!range_name` and lays it out as a table. The table is
/// sized to the widest row; empty cells stay empty.
pub async fn create_table_from_sheets<T: Transport>(
    client: &GoogleClient<T>,
    presentation_id: &str,
    slide_id: &str,
    spreadsheet_id: &str,
    sheet_name: &str,
    range_name: &str,
    position: Position,
) -> Result<ToolOutput<BatchUpdateResponse>> {
    let full_range = format!("{}!{}", sheet_name, range_name);
    let values = client.sheet_values(spreadsheet_id, &full_range).await?;
    let rows = values.values.len();
    let columns = values.column_count();
    if rows == 0 || columns == 0 {
        return Err(SlidesApiError::EmptyRange(full_range));
    }

    let table_id = new_object_id("Table");
    let mut requests = vec![Request::CreateTable(CreateTableRequest {
        object_id: table_id.clone(),
        element_properties: position.element_properties(slide_id),
        rows: rows as u32,
        columns: columns as u32,
    })];
    requests.extend(values.cells().map(|(row, column, text)| {
        Request::InsertText(InsertTextRequest {
            object_id: table_id.clone(),
            cell_location: Some(TableCellLocation {
                row_index: row as u32,
                column_index: column as u32,
            }),
            text,
        })
    }));

    let response = client.batch_update(presentation_id, requests).await?;
    info!(
        "Created {}x{} table {} from {} on slide {}",
        rows, columns, table_id, full_range, slide_id
    );
    Ok(slide_feedback(client, presentation_id, slide_id, response).await)
}
