// API request handlers
// Author: Gabriel Demetrios Lafis

use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use futures::StreamExt;
use serde_json::json;

use crate::data::{export, FileFormat};
use crate::processing::{CleaningOperation, CorrelationMatrix, DatasetInfo, Description, Histogram};
use crate::render::{render_heatmap, render_histogram, svg_data_uri};
use crate::session::Session;
use crate::storage::new_session_id;
use crate::utils::{validate_file_name, validate_selection, validate_upload_size};
use super::{models::*, ApiError, AppState};

const INDEX_HTML: &str = include_str!("../../static/index.html");

const NO_COLUMNS_SUMMARY: &str = "No columns available for summary statistics.";
const NO_NUMERIC_HEATMAP: &str = "No numeric columns available for correlation heatmap.";
const NO_NUMERIC_HISTOGRAMS: &str = "No numeric columns available for histogram plotting.";

/// Serve the single-page UI
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Health check handler
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Ingest an uploaded file into a new session.
///
/// The body is read chunk by chunk and refused as soon as it passes the
/// configured limit.
pub async fn upload(
    state: web::Data<AppState>,
    query: web::Query<UploadQuery>,
    mut payload: web::Payload,
) -> Result<HttpResponse, ApiError> {
    let name = query.into_inner().filename;
    validate_file_name(&name).map_err(ApiError::Validation)?;

    let limit = state.max_upload_bytes;
    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| ApiError::Validation(e.to_string()))?;
        let size = body.len() + chunk.len();
        validate_upload_size(size, limit).map_err(|_| ApiError::PayloadTooLarge { size, limit })?;
        body.extend_from_slice(&chunk);
    }

    let session = Session::from_upload(&name, &body)?;
    let id = new_session_id();
    state.storage.store(&id, &session)?;

    log::info!("Created session {} for '{}'", id, name);

    Ok(HttpResponse::Created().json(SessionView::new(&id, &session)))
}

/// Get the state of a session
pub async fn get_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let session = state.storage.load(&id)?;

    Ok(HttpResponse::Ok().json(SessionView::new(&id, &session)))
}

/// Discard a session
pub async fn delete_session(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    state.storage.delete(&id)?;

    log::info!("Deleted session {}", id);

    Ok(HttpResponse::NoContent().finish())
}

/// Change the column selection of a session
pub async fn select_columns(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<SelectColumnsRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let columns = payload.into_inner().columns;

    let mut outcome = Ok(());
    let session = state.storage.update(&id, &mut |session| {
        outcome = validate_selection(&columns, &session.all_columns())
            .map_err(ApiError::Validation)
            .and_then(|()| session.select_columns(columns.clone()).map_err(ApiError::from));
    })?;
    outcome?;

    Ok(HttpResponse::Ok().json(SessionView::new(&id, &session)))
}

/// Remove duplicate rows from the working table
pub async fn remove_duplicates(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    apply_cleaning(&state, &path.into_inner(), CleaningOperation::RemoveDuplicates)
}

/// Fill missing numeric values with column means
pub async fn fill_missing_mean(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    apply_cleaning(&state, &path.into_inner(), CleaningOperation::FillMissingMean)
}

fn apply_cleaning(state: &AppState, id: &str, operation: CleaningOperation) -> Result<HttpResponse, ApiError> {
    let mut outcome = Ok(0);
    let session = state
        .storage
        .update(id, &mut |session| outcome = session.apply(operation))?;
    let changed = outcome?;

    log::info!("Session {}: {:?} changed {}", id, operation, changed);

    Ok(HttpResponse::Ok().json(CleanResponse {
        message: operation.success_message().to_string(),
        changed,
        session: SessionView::new(id, &session),
    }))
}

/// Overview and descriptive statistics of the working table
pub async fn summary(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session = state.storage.load(&path.into_inner())?;
    let table = session.table();

    let info = DatasetInfo::compute(table);
    let description = Description::compute(table);
    let warning = match description {
        Some(_) => None,
        None => Some(NO_COLUMNS_SUMMARY.to_string()),
    };

    Ok(HttpResponse::Ok().json(SummaryResponse {
        info_text: info.render(),
        info,
        description,
        warning,
    }))
}

/// Correlation matrix of the numeric columns, with its heatmap
pub async fn correlation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session = state.storage.load(&path.into_inner())?;

    let response = match CorrelationMatrix::compute(session.table()) {
        Some(matrix) => {
            let image = svg_data_uri(&render_heatmap(&matrix)?);
            CorrelationResponse {
                matrix: Some(matrix),
                image: Some(image),
                warning: None,
            }
        }
        None => CorrelationResponse {
            matrix: None,
            image: None,
            warning: Some(NO_NUMERIC_HEATMAP.to_string()),
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// One histogram per numeric column
pub async fn histograms(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let session = state.storage.load(&path.into_inner())?;
    let histograms = Histogram::for_dataset(session.table());

    if histograms.is_empty() {
        return Ok(HttpResponse::Ok().json(HistogramsResponse {
            charts: Vec::new(),
            warning: Some(NO_NUMERIC_HISTOGRAMS.to_string()),
        }));
    }

    let charts = histograms
        .into_iter()
        .map(|histogram| -> Result<HistogramChart, ApiError> {
            let image = svg_data_uri(&render_histogram(&histogram)?);
            Ok(HistogramChart {
                column: histogram.column,
                edges: histogram.edges,
                counts: histogram.counts,
                image,
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(HttpResponse::Ok().json(HistogramsResponse { charts, warning: None }))
}

/// Download the working table as CSV or Excel
pub async fn export_table(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ExportQuery>,
) -> Result<HttpResponse, ApiError> {
    let format = FileFormat::from_choice(&query.format).map_err(|e| ApiError::Validation(e.to_string()))?;
    let session = state.storage.load(&path.into_inner())?;

    let buffer = export(session.table(), format)?;
    let disposition = format!("attachment; filename=\"{}\"", buffer.file_name());

    Ok(HttpResponse::Ok()
        .content_type(buffer.mime_type())
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .body(buffer.into_bytes()))
}
