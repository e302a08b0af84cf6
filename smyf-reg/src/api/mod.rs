//! HTTP API handlers for smyf-reg

pub mod body;
pub mod report;
pub mod submit;
pub mod ui;

pub use report::{render_report, retrieve, ReportError};
pub use submit::{submit, SubmissionRequest, SubmitError};
pub use ui::{asset_service, index_service};
