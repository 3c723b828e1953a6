//! Axum route handlers for the upload entry point and the results view.

use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::results::navigation::skills_param;
use crate::results::view::ResultsPage;
use crate::skills::data_uri::FileKind;
use crate::skills::models::Skill;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadInfo {
    pub accepted_extensions: Vec<&'static str>,
    pub max_file_size_bytes: u64,
    pub extract_endpoint: &'static str,
    pub upload_endpoint: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultsResponse {
    Empty,
    Skills {
        skills: Vec<Skill>,
        ranked: Vec<Skill>,
    },
}

/// GET /upload
///
/// Entry point of the flow and the redirect target for unreadable results.
pub async fn handle_upload_info(State(state): State<AppState>) -> Json<UploadInfo> {
    Json(UploadInfo {
        accepted_extensions: FileKind::ACCEPTED_EXTENSIONS.to_vec(),
        max_file_size_bytes: state.config.max_upload_bytes,
        extract_endpoint: "/api/extract",
        upload_endpoint: "/api/extract/upload",
    })
}

/// GET /results?skills=<percent-encoded JSON array>
///
/// Reads the raw query so the parameter is decoded exactly once, by the decoder.
/// Unreadable payloads answer with `303 See Other` to `/upload`.
pub async fn handle_results(RawQuery(query): RawQuery) -> Response {
    match ResultsPage::load(skills_param(query.as_deref())) {
        ResultsPage::Redirect { location } => Redirect::to(location).into_response(),
        ResultsPage::Empty => Json(ResultsResponse::Empty).into_response(),
        ResultsPage::Skills(view) => Json(ResultsResponse::Skills {
            ranked: view.ranked(),
            skills: view.skills().to_vec(),
        })
        .into_response(),
    }
}
