use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    Json,
};
use axum::extract::multipart::Multipart;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::batch;
use crate::cache::ZoneCache;
use crate::output::geojson::feature_collection;
use crate::zones::{ZoneBuilder, ZoneRequest, ZoneSet};
use crate::Error;
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

/// Shared state of the HTTP handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub builder: Arc<ZoneBuilder>,
    pub cache: ZoneCache,
}

impl AppState {
    pub fn new(builder: ZoneBuilder, cache: ZoneCache) -> Self {
        Self {
            builder: Arc::new(builder),
            cache,
        }
    }

    fn zones_for(&self, request: &ZoneRequest) -> crate::Result<Arc<ZoneSet>> {
        self.cache.get_or_try_insert(request, || self.builder.build_all(request))
    }
}

fn api_error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidArgument { .. } | Error::InvalidOrientation(_) | Error::Csv(_) => {
            StatusCode::BAD_REQUEST
        }
        Error::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn resolve(
    state: &AppState,
    query: Result<Query<ZoneQuery>, QueryRejection>,
) -> Result<(ZoneRequest, Arc<ZoneSet>), ApiError> {
    let Query(query) = query.map_err(|rejection| {
        log::debug!("rejecting zone query: {}", rejection.body_text());
        api_error(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let build = || -> crate::Result<(ZoneRequest, Arc<ZoneSet>)> {
        let request = query.to_request()?;
        let zones = state.zones_for(&request)?;
        Ok((request, zones))
    };

    build().map_err(|e| {
        log::debug!("rejecting zone query: {}", e);
        api_error(status_for(&e), format!("Failed to build zones: {}", e))
    })
}

pub async fn get_zones(
    State(state): State<AppState>,
    query: Result<Query<ZoneQuery>, QueryRejection>,
) -> Result<Json<ZoneResponse>, ApiError> {
    let start = Instant::now();
    let (request, zones) = resolve(&state, query)?;

    Ok(Json(ZoneResponse {
        request,
        zones: (*zones).clone(),
        execution_time_ms: start.elapsed().as_secs_f64() * 1000.0,
    }))
}

pub async fn get_zones_geojson(
    State(state): State<AppState>,
    query: Result<Query<ZoneQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let (request, zones) = resolve(&state, query)?;
    let body = Json::<Value>(feature_collection(&zones, request.altitude));

    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
}

pub async fn upload_batch(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("csv") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Failed to read CSV: {}", e)))?;
            csv_data = Some(bytes.to_vec());
        }
    }

    let csv_data = csv_data.ok_or_else(|| {
        api_error(StatusCode::BAD_REQUEST, "Missing CSV file".to_string())
    })?;

    let builder = Arc::clone(&state.builder);
    let output = tokio::task::spawn_blocking(move || -> crate::Result<Vec<u8>> {
        let (outcomes, summary) = batch::run(&*builder, batch::read_rows(csv_data.as_slice()));
        let mut out = Vec::new();
        batch::write_csv(&mut out, &outcomes, &summary)?;
        Ok(out)
    })
    .await
    .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("Batch task failed: {}", e)))?
    .map_err(|e| api_error(status_for(&e), format!("Failed to process CSV: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref()),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"zones.csv\""),
        ],
        output,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::create_router;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    const QUERY: &str =
        "latitude=33.687607&longitude=-117.782648&altitude=50&width=2&height=1&orientation=north";

    async fn send(request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = create_router(AppState::default()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_get_zones() {
        let (status, body) = send(
            Request::get(format!("/api/zones?{}", QUERY)).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: ZoneResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.zones.sanitize.len(), 5);
        assert_eq!(response.zones.red2.len(), 15);
        assert!(response.zones.cap1.is_empty());
    }

    #[tokio::test]
    async fn test_bad_orientation_is_bad_request() {
        let query = QUERY.replace("north", "up");
        let (status, body) = send(
            Request::get(format!("/api/zones?{}", query)).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("Invalid orientation"));
    }

    #[tokio::test]
    async fn test_malformed_number_names_the_argument() {
        let query = QUERY.replace("width=2", "width=abc");
        let (status, body) = send(
            Request::get(format!("/api/zones?{}", query)).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("`width`"), "{}", err.error);
    }

    #[tokio::test]
    async fn test_missing_parameter_is_json_error() {
        let query = QUERY.replace("&height=1", "");
        let (status, body) = send(
            Request::get(format!("/api/zones.geojson?{}", query)).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let err: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(err.error.contains("height"), "{}", err.error);
    }

    #[tokio::test]
    async fn test_get_geojson() {
        let (status, body) = send(
            Request::get(format!("/api/zones.geojson?{}", QUERY)).body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["features"].as_array().unwrap().len(), 7);
        assert_eq!(value["features"][0]["geometry"]["type"], "Polygon");
    }

    #[tokio::test]
    async fn test_upload_batch() {
        let boundary = "zonekitboundary";
        let csv = "latitude,longitude,altitude,width,height,orientation\n33.6,-117.7,0,2,1,east\n";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"csv\"; filename=\"c.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
            b = boundary,
            csv = csv
        );

        let (status, body) = send(
            Request::post("/api/batch")
                .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
                .body(Body::from(body))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let text = String::from_utf8(body).unwrap();
        assert!(text.contains("# Successful: 1"));
        assert!(text.contains(",hostile,4,"));
    }

    #[tokio::test]
    async fn test_upload_batch_without_csv() {
        let boundary = "zonekitboundary";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--{b}--\r\n",
            b = boundary
        );

        let (status, _) = send(
            Request::post("/api/batch")
                .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", boundary))
                .body(Body::from(body))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
