use crate::server::error::ApiError;
use crate::server::AppContext;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use coursereel_catalog::{queries, TranscriptExport, VideoSearchResult, VideoSummary};
use serde::{Deserialize, Serialize};

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health))
        .route("/videos/:module", get(list_module_videos))
        .route("/download/:video_id", get(download_transcript))
        .route("/search", get(search_videos))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideosResponse<T> {
    pub videos: Vec<T>,
}

async fn health(State(ctx): State<AppContext>) -> Result<impl IntoResponse, ApiError> {
    let dataset = ctx.load_dataset().await?;
    Ok(Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "videos": dataset.len(),
    })))
}

/// GET /api/videos/:module
///
/// Segments that are not a non-negative integer never reach the catalog;
/// they are answered like an unknown route. Integers too large for any
/// module tag list nothing.
async fn list_module_videos(
    State(ctx): State<AppContext>,
    Path(segment): Path<String>,
) -> Result<Json<VideosResponse<VideoSummary>>, ApiError> {
    let Some(module) = parse_module_segment(&segment)? else {
        return Ok(Json(VideosResponse { videos: Vec::new() }));
    };

    let dataset = ctx.load_dataset().await?;
    let videos =
        queries::list_by_module(&dataset, module, &ctx.config.catalog.storage_base_url);

    Ok(Json(VideosResponse { videos }))
}

/// Parse a module path segment. `Ok(None)` means all digits but beyond `u32`.
fn parse_module_segment(segment: &str) -> Result<Option<u32>, ApiError> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        tracing::debug!("Rejected module segment: {:?}", segment);
        return Err(ApiError::not_found("Not found"));
    }
    Ok(segment.parse().ok())
}

/// GET /api/download/:video_id
async fn download_transcript(
    State(ctx): State<AppContext>,
    Path(video_id): Path<String>,
) -> Result<Response, ApiError> {
    let dataset = ctx.load_dataset().await?;
    let export = queries::export_transcript(&dataset, &video_id)?;

    tracing::info!("Serving transcript for {}", video_id);
    Ok(attachment(export))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// GET /api/search?q=
async fn search_videos(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<VideosResponse<VideoSearchResult>>, ApiError> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Json(VideosResponse { videos: Vec::new() }));
    }

    let dataset = ctx.load_dataset().await?;
    let videos = queries::search(&dataset, &query, &ctx.config.catalog.storage_base_url);

    Ok(Json(VideosResponse { videos }))
}

fn attachment(export: TranscriptExport) -> Response {
    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(export.content_type),
            ),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&export.file_name),
            ),
        ],
        export.body,
    )
        .into_response()
}

/// `attachment` disposition with a quoted ASCII file name, plus an RFC 5987
/// `filename*` parameter when the real name needed substitutions.
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let ascii_name: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c == ' ' || c.is_ascii_graphic() => c,
            _ => '_',
        })
        .collect();

    let mut value = format!("attachment; filename=\"{ascii_name}\"");
    if ascii_name != file_name {
        value.push_str("; filename*=UTF-8''");
        value.push_str(&urlencoding::encode(file_name));
    }

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
