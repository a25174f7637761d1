//! HTTP Server for the converter.
//!
//! The browser (or any client) posts one export file and receives the
//! grouped CSV back as a download.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/convert`    | Upload one CSV, receive grouped CSV  |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, HeaderName, HeaderValue, Method},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use std::{convert::Infallible, time::Duration};
use tokio::net::TcpListener;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::logs::{log_error, log_info, log_success, LOG_BROADCASTER};
use super::types::{download_name, ErrorResponse, HealthResponse};
use crate::config::ServerConfig;
use crate::error::{ServerError, UploadError};
use crate::transform::pipeline::convert_bytes;

const JOB_ID_HEADER: &str = "x-job-id";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// A file part pulled out of a multipart body.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Build the application router.
pub fn router(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([
            header::CONTENT_TYPE,
            header::CONTENT_DISPOSITION,
            HeaderName::from_static(JOB_ID_HEADER),
        ]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/convert", post(convert_upload))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(cors)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let app = router(&config);

    eprintln!("🚀 BECU converter running on http://{}", addr);
    eprintln!("   POST /api/convert - Upload one CSV export");
    eprintln!("   GET  /api/logs    - SSE log stream");
    eprintln!("   GET  /health      - Health check");
    eprintln!();

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// A rejected request, tagged with its job id.
struct ApiError {
    job_id: String,
    error: ServerError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_error(format!("Job {}: {}", self.job_id, self.error));
        let body = ErrorResponse::new(self.job_id, self.error.to_string());
        (self.error.status(), Json(body)).into_response()
    }
}

/// Convert endpoint: exactly one file in, grouped CSV out.
async fn convert_upload(multipart: Multipart) -> Result<Response, ApiError> {
    let job_id = Uuid::new_v4().to_string();
    let fail = |error: ServerError| ApiError {
        job_id: job_id.clone(),
        error,
    };

    let files = collect_files(multipart).await.map_err(|e| fail(e.into()))?;
    let file = single_file(files).map_err(|e| fail(e.into()))?;

    eprintln!("\n{}", "=".repeat(70));
    log_info(format!(
        "📄 New upload: {} ({} bytes), job {}",
        file.name.as_deref().unwrap_or("unknown"),
        file.bytes.len(),
        job_id
    ));

    let conversion = convert_bytes(&file.bytes).map_err(|e| fail(e.into()))?;
    log_success(format!(
        "Converted {} records into {} parent categories",
        conversion.stats.record_count, conversion.stats.parent_count
    ));

    let disposition = format!(
        "attachment; filename=\"{}\"",
        download_name(file.name.as_deref())
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| fail(ServerError::Internal(e.to_string())))?;
    let job_header =
        HeaderValue::from_str(&job_id).map_err(|e| fail(ServerError::Internal(e.to_string())))?;

    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static(CSV_CONTENT_TYPE)),
        (header::CONTENT_DISPOSITION, disposition),
        (HeaderName::from_static(JOB_ID_HEADER), job_header),
    ];

    Ok((headers, conversion.csv).into_response())
}

/// Read every file part of the body.
///
/// A part counts as a file when it carries a filename or is named `file`.
async fn collect_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, UploadError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let is_file = field.file_name().is_some() || field.name() == Some("file");
        if !is_file {
            continue;
        }

        let name = field.file_name().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Multipart(e.to_string()))?;
        files.push(UploadedFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    Ok(files)
}

/// Accept exactly one file; anything else is rejected before conversion.
pub fn single_file(mut files: Vec<UploadedFile>) -> Result<UploadedFile, UploadError> {
    match files.len() {
        0 => Err(UploadError::NoFile),
        1 => Ok(files.remove(0)),
        n => Err(UploadError::MultipleFiles(n)),
    }
}
