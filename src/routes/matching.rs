use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::models::{ErrorResponse, HealthResponse, MatchListQuery, MatchListResponse, MatchResult};
use crate::services::{MatchingService, PostgresCatalog, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matching: MatchingService,
    /// Probed by the health endpoint when the catalog lives in PostgreSQL
    pub postgres: Option<Arc<PostgresCatalog>>,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matching/all", web::get().to(all_matches))
        .route("/matching/stats", web::get().to(matching_stats))
        .route("/matching/leads/{lead_id}", web::get().to(lead_matches))
        .route("/matching/investors/{investor_id}", web::get().to(investor_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match &state.postgres {
        Some(pg) => pg.health_check().await.unwrap_or(false),
        None => true,
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/matching/leads/{lead_id}?minScore=&limit=
async fn lead_matches(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<MatchListQuery>,
) -> HttpResponse {
    if let Some(rejected) = reject_invalid(&query) {
        return rejected;
    }
    let lead_id = path.into_inner();
    tracing::info!("Finding matches for lead {}", lead_id);

    let result = state.matching.find_matches_for_lead(lead_id).await;
    match_list_response(result, &query, "Failed to find matches for lead")
}

/// GET /api/v1/matching/all?minScore=&limit=
async fn all_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchListQuery>,
) -> HttpResponse {
    if let Some(rejected) = reject_invalid(&query) {
        return rejected;
    }
    let result = state.matching.find_matches_for_all_leads().await;
    match_list_response(result, &query, "Failed to fetch matches")
}

/// GET /api/v1/matching/investors/{investor_id}?minScore=&limit=
async fn investor_matches(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<MatchListQuery>,
) -> HttpResponse {
    if let Some(rejected) = reject_invalid(&query) {
        return rejected;
    }
    let investor_id = path.into_inner();
    tracing::info!("Finding matches for investor {}", investor_id);

    let result = state.matching.find_matches_for_investor(investor_id).await;
    match_list_response(result, &query, "Failed to find matches for investor")
}

/// GET /api/v1/matching/stats
async fn matching_stats(state: web::Data<AppState>) -> impl Responder {
    match state.matching.get_matching_stats().await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => store_failure("Failed to fetch matching stats", e),
    }
}

fn reject_invalid(query: &MatchListQuery) -> Option<HttpResponse> {
    let errors = query.validate().err()?;
    tracing::info!("Validation failed for match list query: {}", errors);

    Some(HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    }))
}

fn match_list_response(
    result: Result<Vec<MatchResult>, StoreError>,
    query: &MatchListQuery,
    failure: &str,
) -> HttpResponse {
    match result {
        Ok(matches) => {
            let total_results = matches.len();
            let matches = query.apply(matches, |m| m.match_score);
            HttpResponse::Ok().json(MatchListResponse {
                matches,
                total_results,
            })
        }
        Err(e) => store_failure(failure, e),
    }
}

fn store_failure(context: &str, e: StoreError) -> HttpResponse {
    tracing::error!("{}: {}", context, e);
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: context.to_string(),
        message: e.to_string(),
        status_code: 500,
    })
}
