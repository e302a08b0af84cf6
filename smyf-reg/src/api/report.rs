//! Stored-data report
//!
//! Renders every `submissions` row as an HTML table. Tags are not shown.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;
use smyf_common::db::{list_submissions, Submission};
use thiserror::Error;
use tracing::error;

use crate::AppState;

const REPORT_HEAD: &str = r#"<html>
    <head>
        <link rel="stylesheet" href="https://stackpath.bootstrapcdn.com/bootstrap/4.5.2/css/bootstrap.min.css">
        <style>
            body {
                background-color: #121212;
                color: #ffffff;
            }
            .table-dark {
                background-color: #333333;
            }
            .table-dark th {
                background-color: #444444;
            }
            .table-dark td {
                background-color: #222222;
            }
        </style>
    </head>
    <body>
        <div class="container mt-5">
            <h1 class="mb-4">Stored Data</h1>
            <table class="table table-dark table-striped">
                <thead>
                    <tr>
                        <th>ID</th>
                        <th>Church Name</th>
                        <th>Pastorate Name</th>
                        <th>Name</th>
                        <th>Phone No</th>
                        <th>Non-Veg Count</th>
                        <th>Veg Count</th>
                    </tr>
                </thead>
                <tbody>
"#;

const REPORT_TAIL: &str = r#"                </tbody>
            </table>
        </div>
    </body>
</html>
"#;

/// GET /retrieve
pub async fn retrieve(State(state): State<AppState>) -> Result<Html<String>, ReportError> {
    let rows = list_submissions(&state.db).await.map_err(|e| {
        error!("Error reading submissions: {}", e);
        ReportError::Database(e.to_string())
    })?;

    Ok(Html(render_report(&rows)))
}

/// Render the full report document, one `<tr>` per submission
pub fn render_report(rows: &[Submission]) -> String {
    let mut html = String::from(REPORT_HEAD);

    for row in rows {
        html.push_str("                    <tr>\n");
        for cell in [
            row.id.to_string(),
            html_escape(&row.chname),
            html_escape(&row.cpname),
            html_escape(&row.name),
            html_escape(&row.pnumber),
            html_escape(&display_value(&row.nvcount)),
            html_escape(&display_value(&row.vcount)),
        ] {
            html.push_str(&format!("                        <td>{}</td>\n", cell));
        }
        html.push_str("                    </tr>\n");
    }

    html.push_str(REPORT_TAIL);
    html
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Escape text for inclusion in HTML element content
pub fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Report errors
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        match self {
            ReportError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to retrieve submission data.",
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(id: i64, name: &str) -> Submission {
        Submission {
            id,
            chname: "St. Mark".to_string(),
            cpname: "Central".to_string(),
            name: name.to_string(),
            pnumber: "555-1212".to_string(),
            nvcount: json!(2),
            vcount: json!(1),
        }
    }

    #[test]
    fn test_empty_report_has_header_only() {
        let html = render_report(&[]);
        assert!(html.contains("<th>Church Name</th>"));
        assert!(!html.contains("<td>"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_one_row_per_submission() {
        let html = render_report(&[submission(1, "J Doe"), submission(2, "A Roe")]);
        assert_eq!(html.matches("<tr>").count(), 3); // header + 2 rows
        assert!(html.contains("<td>J Doe</td>"));
        assert!(html.contains("<td>A Roe</td>"));
        assert!(html.find("J Doe") < html.find("A Roe"));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render_report(&[submission(1, "<b>Tom & \"Jerry\"</b>")]);
        assert!(html.contains("<td>&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;</td>"));
    }

    #[test]
    fn test_text_counts_render_without_quotes() {
        let mut row = submission(1, "J Doe");
        row.vcount = json!("several");
        let html = render_report(&[row]);
        assert!(html.contains("<td>several</td>"));
    }
}
