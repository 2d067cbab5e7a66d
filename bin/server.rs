// Bangladesh Locations - Web Server
// Read-only JSON API over the location taxonomy

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use bd_locations::{load_default, Area, LocationTaxonomy, PathIndex};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared application state.
///
/// The taxonomy is immutable after load, so handlers share it lock-free via
/// Arc; the index is prebuilt once at startup.
#[derive(Clone)]
struct AppState {
    taxonomy: Arc<LocationTaxonomy>,
    index: Arc<PathIndex>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

/// Dataset metadata response
#[derive(Serialize)]
struct MetaResponse {
    version: String,
    published: String,
    fingerprint: String,
    divisions: usize,
    districts: usize,
    thanas: usize,
}

// ============================================================================
// API Handlers
// ============================================================================
//
// Unknown keys return 200 with an empty data list, never 404: the
// empty-list-on-miss contract of the library crosses the wire unchanged,
// so cascading selectors in the browser need no error handling.

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/meta - Dataset version, fingerprint, and level counts
async fn get_meta(State(state): State<AppState>) -> impl IntoResponse {
    let taxonomy = &state.taxonomy;

    Json(ApiResponse::ok(MetaResponse {
        version: taxonomy.version.clone(),
        published: taxonomy.published.to_rfc3339(),
        fingerprint: taxonomy.fingerprint(),
        divisions: taxonomy.divisions.len(),
        districts: taxonomy.district_count(),
        thanas: taxonomy.thana_count(),
    }))
}

/// GET /api/divisions - All division names
async fn get_divisions(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.index.divisions()))
}

/// GET /api/divisions/:division/districts - Districts within a division
async fn get_districts(
    State(state): State<AppState>,
    Path(division): Path<String>,
) -> impl IntoResponse {
    let division = decode(&division);
    Json(ApiResponse::ok(state.index.districts(&division)))
}

/// GET /api/divisions/:division/districts/:district/thanas
async fn get_thanas(
    State(state): State<AppState>,
    Path((division, district)): Path<(String, String)>,
) -> impl IntoResponse {
    let division = decode(&division);
    let district = decode(&district);
    Json(ApiResponse::ok(state.index.thanas(&division, &district)))
}

/// GET /api/divisions/:division/districts/:district/thanas/:thana/areas
async fn get_areas(
    State(state): State<AppState>,
    Path((division, district, thana)): Path<(String, String, String)>,
) -> impl IntoResponse {
    let division = decode(&division);
    let district = decode(&district);
    let thana = decode(&thana);
    let areas: Vec<Area> = state.index.areas(&division, &district, &thana);
    Json(ApiResponse::ok(areas))
}

/// GET /api/districts - Every district across every division, flattened
async fn get_all_districts(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.index.all_districts()))
}

/// GET /api/thanas - Every thana across the whole taxonomy, flattened
async fn get_all_thanas(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.index.all_thanas()))
}

/// Decode URL-encoded path segments so names like "Cox's Bazar" resolve.
fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// GET / - Serve the cascading-select demo page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() {
    println!("🌐 Bangladesh Locations - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    // Load and validate the embedded dataset before accepting traffic
    let taxonomy = match load_default() {
        Ok(taxonomy) => taxonomy,
        Err(e) => {
            eprintln!("❌ Failed to load dataset: {:#}", e);
            std::process::exit(1);
        }
    };

    println!(
        "✓ Dataset {} loaded: {} divisions, {} districts, {} thanas",
        taxonomy.version,
        taxonomy.divisions.len(),
        taxonomy.district_count(),
        taxonomy.thana_count()
    );

    let index = PathIndex::build(&taxonomy);

    // Create shared state
    let state = AppState {
        taxonomy: Arc::new(taxonomy),
        index: Arc::new(index),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/meta", get(get_meta))
        .route("/divisions", get(get_divisions))
        .route("/divisions/:division/districts", get(get_districts))
        .route(
            "/divisions/:division/districts/:district/thanas",
            get(get_thanas),
        )
        .route(
            "/divisions/:division/districts/:district/thanas/:thana/areas",
            get(get_areas),
        )
        .route("/districts", get(get_all_districts))
        .route("/thanas", get(get_all_thanas))
        .with_state(state.clone());

    // Build main router
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    // Start server
    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    println!("\n🚀 Server running on http://localhost:3000");
    println!("   API: http://localhost:3000/api/divisions");
    println!("   UI:  http://localhost:3000");
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .expect("Failed to start server");
}
