pub mod a001_vehicle_reception;
pub mod d401_reception_stats;
pub mod d402_period_report;
pub mod d403_financial_report;

use axum::http::header;
use axum::response::{IntoResponse, Response};

/// CSV download with an attachment file name
pub(crate) fn csv_attachment(filename: &str, content: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", filename),
            ),
        ],
        content,
    )
        .into_response()
}
