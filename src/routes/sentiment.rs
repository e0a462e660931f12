use axum::{
    extract::{Multipart, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use serde::Deserialize;
use std::sync::Arc;
use crate::{
    AppState,
    error::AppError,
    services::{
        format::SheetFormat,
        summary::{summarize, SentimentSummary, SummarySettings},
    },
};
use tower_http::cors::{CorsLayer, Any};

pub fn routes() -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/sentiment/template", get(download_template))
        .route("/sentiment/score", post(score_sheet))
        .route("/sentiment/analyze", post(analyze_sheet))
        .layer(cors)
}

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    format: Option<SheetFormat>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeQuery {
    rows: Option<usize>,
}

struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<Upload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge { limit }
            } else {
                AppError::InvalidInput(format!("Failed to read uploaded file: {}", e))
            }
        })?;
        if data.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        return Ok(Upload { file_name, data });
    }
    Err(AppError::InvalidInput("No file provided".to_string()))
}

fn attachment(format: SheetFormat, stem: &str, data: Bytes) -> Response {
    let headers = [
        (header::CONTENT_TYPE, format.mime_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}.{}\"", stem, format.extension()),
        ),
    ];
    (headers, data).into_response()
}

async fn download_template(State(state): State<Arc<AppState>>) -> Response {
    tracing::debug!("Serving upload template");
    attachment(SheetFormat::Xlsx, "template", state.template.clone())
}

#[axum::debug_handler]
async fn score_sheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScoreQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let start = std::time::Instant::now();
    let upload = read_upload(multipart, state.config.max_file_size).await?;
    let input = SheetFormat::detect(upload.file_name.as_deref(), &upload.data)?;
    let output = query.format.unwrap_or(input);
    tracing::info!(
        "Scoring upload {:?} ({:?} -> {:?}), size: {}KB",
        upload.file_name,
        input,
        output,
        upload.data.len() / 1024
    );

    let pipeline = state.pipeline.clone();
    let export = tokio::task::spawn_blocking(move || pipeline.process(&upload.data, input, output))
        .await
        .map_err(|e| AppError::Internal(format!("Scoring task failed: {}", e)))??;

    tracing::info!(
        "Scored {} rows, request completed in {:?}",
        export.table.row_count(),
        start.elapsed()
    );
    Ok(attachment(export.format, "processed_data", export.data))
}

async fn analyze_sheet(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AnalyzeQuery>,
    multipart: Multipart,
) -> Result<Json<SentimentSummary>, AppError> {
    let start = std::time::Instant::now();
    let upload = read_upload(multipart, state.config.max_file_size).await?;
    let input = SheetFormat::detect(upload.file_name.as_deref(), &upload.data)?;
    tracing::info!("Analyzing upload {:?} ({:?})", upload.file_name, input);

    let pipeline = state.pipeline.clone();
    let settings = SummarySettings::from_config(&state.config);
    let summary = tokio::task::spawn_blocking(move || {
        let raw = pipeline.parse(&upload.data, input)?;
        let table = pipeline.score(raw)?;
        Ok::<_, AppError>(summarize(&table, query.rows, &settings))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))??;

    tracing::info!(
        "Analysis of {} rows completed in {:?}",
        summary.row_count,
        start.elapsed()
    );
    Ok(Json(summary))
}
