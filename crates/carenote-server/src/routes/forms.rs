use axum::Json;
use axum::extract::{Path, State};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use carenote_core::models::field_group::FieldGroup;
use carenote_core::models::preview::{MissingField, NotePreview};
use carenote_forms::derived::local_today;
use carenote_forms::schema::{DerivedDef, FieldDef};
use carenote_forms::session::NoteSession;
use carenote_polish::polish::{PolishStatus, polish_note};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct FormSummary {
    id: String,
    name: String,
}

#[derive(Serialize)]
pub struct FormDetail {
    id: String,
    name: String,
    fields: Vec<FieldDef>,
    derived: Vec<DerivedDef>,
}

/// Field values for one form instance. `today` defaults to the server's
/// local date.
#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    #[serde(default)]
    fields: FieldGroup,
    #[serde(default)]
    today: Option<Date>,
}

impl NoteRequest {
    fn today(&self) -> Date {
        self.today
            .unwrap_or_else(|| local_today(&jiff::Zoned::now()))
    }
}

/// The polished note plus the same copy gating `/preview` reports.
#[derive(Serialize)]
pub struct PolishResponse {
    note: String,
    status: PolishStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    can_copy: bool,
    missing: Vec<MissingField>,
}

pub async fn list_forms(State(state): State<AppState>) -> Json<Vec<FormSummary>> {
    let forms = state
        .forms
        .iter()
        .map(|s| FormSummary {
            id: s.id().to_string(),
            name: s.name().to_string(),
        })
        .collect();
    Json(forms)
}

pub async fn get_form_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FormDetail>, ApiError> {
    let schema = state.forms.require(&id)?;

    Ok(Json(FormDetail {
        id: schema.id().to_string(),
        name: schema.name().to_string(),
        fields: schema.fields().to_vec(),
        derived: schema.derived().to_vec(),
    }))
}

pub async fn preview(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<NotePreview>, ApiError> {
    let schema = state.forms.require(&id)?;
    let session = NoteSession::with_fields(schema, &request.fields)?;
    Ok(Json(session.preview(request.today())))
}

pub async fn polish(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<PolishResponse>, ApiError> {
    let schema = state.forms.require(&id)?;
    let session = NoteSession::with_fields(schema, &request.fields)?;
    let composed = session.composed(request.today());
    let validation = session.validation();

    let outcome = polish_note(state.polisher.as_deref(), &composed).await;
    tracing::info!(form = %id, status = ?outcome.status, "polish requested");

    Ok(Json(PolishResponse {
        note: outcome.text,
        status: outcome.status,
        reason: outcome.reason,
        can_copy: validation.is_complete(),
        missing: validation.missing,
    }))
}
