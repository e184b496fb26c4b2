use axum::Json;
use axum::extract::{Query, State};
use serde::{Deserialize, Serialize};

use carenote_core::models::kb::ApprovalStatus;
use carenote_kb::search::SearchHit;

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 50;

#[derive(Serialize)]
pub struct KbSummary {
    kb_version: String,
    effective_date: String,
    approval_status: ApprovalStatus,
    sources: usize,
    docs: usize,
    index_version: String,
    version_mismatch: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
    limit: Option<usize>,
}

pub async fn kb_summary(State(state): State<AppState>) -> Result<Json<KbSummary>, ApiError> {
    let kb = state.kb.get().await?;
    let snapshot = &kb.snapshot;

    Ok(Json(KbSummary {
        kb_version: snapshot.manifest.kb_version.clone(),
        effective_date: snapshot.manifest.effective_date.clone(),
        approval_status: snapshot.manifest.approval.status,
        sources: snapshot.sources.len(),
        docs: snapshot.search_index.docs.len(),
        index_version: snapshot.search_index.kb_version.clone(),
        version_mismatch: snapshot.version_mismatch(),
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let kb = state.kb.get().await?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let hits = kb.search.search(&params.q, limit)?;
    Ok(Json(hits))
}
