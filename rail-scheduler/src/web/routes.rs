//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::domain::{ClockTime, StationId};
use crate::network::{CostModel, RouteError, RouteRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/schedule", get(full_schedule))
        .route("/stations", get(list_stations))
        .route("/stations/lookup", get(lookup_station))
        .route("/stations/:id", get(get_station))
        .route("/stations/:id/schedule", get(station_schedule))
        .route("/service", get(service_available))
        .route("/service/nonstop", get(nonstop_service))
        .route("/route", get(find_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with the station list and route form.
async fn index_page(State(state): State<AppState>) -> Result<Response, AppError> {
    let template = IndexTemplate {
        stations: state
            .timetable
            .stations()
            .map(StationView::from_station)
            .collect(),
    };
    render(&template)
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render(template: &impl Template) -> Result<Response, AppError> {
    let html = template.render().map_err(|e| AppError::Internal {
        message: format!("Template error: {e}"),
    })?;
    Ok(Html(html).into_response())
}

/// Parse a station id without checking it against the schedule.
fn parse_station_id(raw: &str) -> Result<StationId, AppError> {
    raw.trim()
        .parse::<u32>()
        .map(StationId::new)
        .map_err(|_| AppError::BadRequest {
            message: format!("Invalid station id: {raw:?}"),
        })
}

/// Parse a station id, rejecting ids outside the schedule.
fn require_station(state: &AppState, raw: &str) -> Result<StationId, AppError> {
    let id = parse_station_id(raw)?;
    match state.timetable.station(id) {
        Some(_) => Ok(id),
        None => Err(RouteError::InvalidStation(id).into()),
    }
}

/// Every station's departures and arrivals.
async fn full_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let timetable = &state.timetable;
    let schedules = timetable.full_schedule();

    if accepts_html(&headers) {
        render(&ScheduleTemplate {
            title: "Full schedule".to_string(),
            schedules: schedules
                .iter()
                .map(|s| StationScheduleView::from_schedule(timetable, s))
                .collect(),
        })
    } else {
        let stations = schedules
            .iter()
            .map(|s| StationScheduleResponse::from_schedule(timetable, s))
            .collect();
        Ok(Json(FullScheduleResponse { stations }).into_response())
    }
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    Json(StationListResponse::from_timetable(&state.timetable))
}

/// Find a station by name.
async fn lookup_station(
    State(state): State<AppState>,
    query: Result<Query<StationLookupRequest>, QueryRejection>,
) -> Result<Json<StationResult>, AppError> {
    let Query(req) = query?;
    let station = state
        .timetable
        .find_station_by_name(&req.name)
        .ok_or_else(|| AppError::NotFound {
            message: format!("No station named {:?}", req.name.trim()),
        })?;

    Ok(Json(StationResult::lookup(&state.timetable, station.id)))
}

/// Look up a station by id.
async fn get_station(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<StationResult>, AppError> {
    let Path(raw) = path?;
    let id = require_station(&state, &raw)?;
    Ok(Json(StationResult::lookup(&state.timetable, id)))
}

/// Departures and arrivals for one station.
async fn station_schedule(
    State(state): State<AppState>,
    headers: HeaderMap,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(raw) = path?;
    let id = require_station(&state, &raw)?;
    let timetable = &state.timetable;
    let schedule = timetable
        .station_schedule(id)
        .ok_or(RouteError::InvalidStation(id))?;

    if accepts_html(&headers) {
        let view = StationScheduleView::from_schedule(timetable, &schedule);
        render(&ScheduleTemplate {
            title: view.station.name.clone(),
            schedules: vec![view],
        })
    } else {
        Ok(Json(StationScheduleResponse::from_schedule(timetable, &schedule)).into_response())
    }
}

/// Whether any itinerary connects two stations.
async fn service_available(
    State(state): State<AppState>,
    query: Result<Query<StationPairRequest>, QueryRejection>,
) -> Result<Json<ServiceResponse>, AppError> {
    let Query(req) = query?;
    let from = require_station(&state, &req.from)?;
    let to = require_station(&state, &req.to)?;

    Ok(Json(ServiceResponse {
        from: StationResult::lookup(&state.timetable, from),
        to: StationResult::lookup(&state.timetable, to),
        nonstop: false,
        available: state.timetable.has_any_route(from, to),
    }))
}

/// Whether a single trip connects two stations.
async fn nonstop_service(
    State(state): State<AppState>,
    query: Result<Query<StationPairRequest>, QueryRejection>,
) -> Result<Json<ServiceResponse>, AppError> {
    let Query(req) = query?;
    let from = require_station(&state, &req.from)?;
    let to = require_station(&state, &req.to)?;

    Ok(Json(ServiceResponse {
        from: StationResult::lookup(&state.timetable, from),
        to: StationResult::lookup(&state.timetable, to),
        nonstop: true,
        available: state.timetable.has_direct_connection(from, to),
    }))
}

/// Find the best route between two stations.
async fn find_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RouteRequestParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(req) = query?;
    let from = parse_station_id(&req.from)?;
    let to = parse_station_id(&req.to)?;

    // Forms submit empty fields for unset options
    let cost_model = match non_empty(req.cost.as_deref()) {
        Some(raw) => raw.parse::<CostModel>().map_err(|e| AppError::BadRequest {
            message: format!("Invalid cost model: {e}"),
        })?,
        None => CostModel::TotalTravelTime,
    };
    let depart_after = non_empty(req.after.as_deref())
        .map(|s| s.parse::<ClockTime>())
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid departure time: {e}"),
        })?;

    let mut request = RouteRequest::new(from, to, cost_model);
    if let Some(time) = depart_after {
        request = request.departing_after(time);
    }

    let timetable = &state.timetable;
    let route = timetable.plan(&request)?;
    debug!(
        %from,
        %to,
        cost_model = cost_model.label(),
        cost_mins = route.cost_mins(),
        legs = route.legs().len(),
        "Route found"
    );

    if accepts_html(&headers) {
        render(&RouteTemplate {
            from: StationView::lookup(timetable, from),
            to: StationView::lookup(timetable, to),
            route: RouteView::from_route(timetable, &route),
        })
    } else {
        Ok(Json(RouteResponse::from_route(timetable, from, to, &route)).into_response())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::InvalidStation(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            RouteError::NoRoute { .. } => AppError::NotFound {
                message: e.to_string(),
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::BadRequest {
            message: e.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{HeaderValue, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::schedule::{StationRecord, TripRecord};
    use crate::timetable::Timetable;

    const HTML: &str = "text/html,*/*";

    fn state() -> AppState {
        let timetable = Timetable::from_records(
            vec![
                StationRecord::new(1, "Alpha"),
                StationRecord::new(2, "Beta"),
                StationRecord::new(3, "Gamma"),
                StationRecord::new(4, "Delta_Halt"),
            ],
            &[
                TripRecord::new(1, 2, 800, 900),
                TripRecord::new(2, 3, 930, 1030),
                TripRecord::new(1, 3, 1200, 1245),
            ],
        )
        .unwrap();
        AppState::new(timetable)
    }

    async fn send(uri: &str, accept: Option<&'static str>) -> Response {
        let mut request = Request::builder().uri(uri);
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }
        create_router(state())
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = send(uri, None).await;
        let status = response.status();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json")),
            "{uri} did not return JSON"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_html(uri: &str) -> (StatusCode, String) {
        let response = send(uri, Some(HTML)).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// Assert a 400 with a JSON error body mentioning `needle`.
    async fn assert_bad_request(uri: &str, needle: &str) {
        let (status, body) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let error = body["error"].as_str().unwrap();
        assert!(error.contains(needle), "{uri}: {error}");
    }

    #[test]
    fn accepts_html_checks_header() {
        let mut html = HeaderMap::new();
        html.insert(header::ACCEPT, HeaderValue::from_static(HTML));
        assert!(accepts_html(&html));
        assert!(!accepts_html(&HeaderMap::new()));

        let mut json = HeaderMap::new();
        json.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!accepts_html(&json));
    }

    #[test]
    fn parse_station_id_cases() {
        assert_eq!(parse_station_id("3").unwrap(), StationId::new(3));
        assert_eq!(parse_station_id(" 12 ").unwrap(), StationId::new(12));
        assert!(matches!(
            parse_station_id("abc"),
            Err(AppError::BadRequest { .. })
        ));
        assert!(parse_station_id("-1").is_err());
        assert!(parse_station_id("").is_err());
    }

    #[tokio::test]
    async fn health_check() {
        let response = send("/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn route_by_ride_time() {
        let (status, body) = get_json("/route?from=1&to=3&cost=ride").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cost_model"], "ride_time_only");
        assert_eq!(body["cost_mins"], 45);
        assert_eq!(body["legs"].as_array().unwrap().len(), 1);
        assert_eq!(body["departure_time"], "12:00");
        assert_eq!(body["to"]["name"], "Gamma");
    }

    #[tokio::test]
    async fn route_defaults_to_total_time() {
        let (status, body) = get_json("/route?from=1&to=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cost_model"], "total_travel_time");
        assert_eq!(body["cost_mins"], 45);
    }

    #[tokio::test]
    async fn route_ignores_empty_form_fields() {
        let (status, body) = get_json("/route?from=1&to=3&cost=&after=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cost_model"], "total_travel_time");
    }

    #[tokio::test]
    async fn route_departing_after() {
        let (status, body) = get_json("/route?from=2&to=3&cost=total&after=9:30").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["departure_time"], "09:30");
        assert_eq!(body["cost_mins"], 60);

        let (status, body) = get_json("/route?from=1&to=3&after=1300").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no route from station 1 to station 3");
    }

    #[tokio::test]
    async fn route_malformed_inputs_are_json_bad_requests() {
        assert_bad_request("/route?from=abc&to=2", "abc").await;
        assert_bad_request("/route?from=1&to=3&cost=fastest", "fastest").await;
        assert_bad_request("/route?from=1&to=3&after=25:00", "Invalid departure time").await;
        assert_bad_request("/route?from=1", "to").await;
        assert_bad_request("/route?from=1&to=9", "station 9 is not in the schedule").await;
    }

    #[tokio::test]
    async fn route_unreachable_is_not_found() {
        let (status, body) = get_json("/route?from=1&to=4").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn route_same_station_is_trivial() {
        let (status, body) = get_json("/route?from=2&to=2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cost_mins"], 0);
        assert!(body["legs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn route_html() {
        let (status, html) = get_html("/route?from=1&to=3&cost=ride").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Alpha to Gamma"));
        assert!(html.contains("45m"));
    }

    #[tokio::test]
    async fn service_endpoints() {
        let (status, body) = get_json("/service?from=1&to=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["available"], true);
        assert_eq!(body["nonstop"], false);

        let (_, body) = get_json("/service?from=3&to=1").await;
        assert_eq!(body["available"], false);

        let (_, body) = get_json("/service/nonstop?from=1&to=2").await;
        assert_eq!(body["available"], true);
        assert_eq!(body["nonstop"], true);

        let (_, body) = get_json("/service/nonstop?from=2&to=1").await;
        assert_eq!(body["available"], false);
    }

    #[tokio::test]
    async fn service_malformed_inputs_are_json_bad_requests() {
        assert_bad_request("/service?from=1", "to").await;
        assert_bad_request("/service?from=x&to=1", "x").await;
        assert_bad_request("/service/nonstop?from=0&to=1", "station 0").await;
    }

    #[tokio::test]
    async fn station_by_id() {
        let (status, body) = get_json("/stations/4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 4);
        assert_eq!(body["name"], "Delta Halt");

        assert_bad_request("/stations/5", "station 5").await;
        assert_bad_request("/stations/x", "x").await;
    }

    #[tokio::test]
    async fn station_lookup_by_name() {
        let (status, body) = get_json("/stations/lookup?name=delta%20halt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 4);

        let (_, body) = get_json("/stations/lookup?name=DELTA_HALT").await;
        assert_eq!(body["id"], 4);

        let (status, body) = get_json("/stations/lookup?name=Epsilon").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "No station named \"Epsilon\"");

        assert_bad_request("/stations/lookup", "name").await;
    }

    #[tokio::test]
    async fn station_list() {
        let (status, body) = get_json("/stations").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stations"].as_array().unwrap().len(), 4);
        assert_eq!(body["stations"][0]["name"], "Alpha");
    }

    #[tokio::test]
    async fn station_schedule_json_and_html() {
        let (status, body) = get_json("/stations/2/schedule").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["station"]["name"], "Beta");
        assert_eq!(body["departures"][0]["destination"]["id"], 3);
        assert_eq!(body["arrivals"][0]["origin"]["id"], 1);

        let (status, html) = get_html("/stations/2/schedule").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("09:30"));
        assert!(html.contains("Gamma"));

        assert_bad_request("/stations/7/schedule", "station 7").await;
        assert_bad_request("/stations/seven/schedule", "seven").await;
    }

    #[tokio::test]
    async fn full_schedule_json_and_html() {
        let (status, body) = get_json("/schedule").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stations"].as_array().unwrap().len(), 4);

        let (status, html) = get_html("/schedule").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Full schedule"));
        assert!(html.contains("Delta Halt"));
    }

    #[tokio::test]
    async fn index_renders() {
        let (status, html) = get_html("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Find a route"));
        assert!(html.contains("Delta Halt"));
    }
}
