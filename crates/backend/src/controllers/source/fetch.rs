use axum::{extract::State, Json};

use crate::{
    env::state::AppState,
    models::{
        error::PipelineError,
        source::{RenderedSource, SourceRequest},
    },
    pipeline,
};

pub async fn get(
    State(state): State<AppState>,
    request: SourceRequest,
) -> Result<Json<RenderedSource>, PipelineError> {
    let rendered = pipeline::run(&state, request).await?;
    Ok(Json(rendered))
}
