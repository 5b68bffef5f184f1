//! Reporting API routes.
//!
//! GET /api/reporting/matrix?workPackageId&outputNumber&countryId
//! GET /api/reporting/delivery-analysis?indicatorCode
//! GET /api/reporting/output-performance?output&workPackage
//! GET /api/reporting/products/:product_id/delivery
//! GET /api/health
//!
//! Responses use the standard [`ApiResponse`] envelope with camelCase field
//! names. Missing required filters map to 400 before any query runs.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::database::row_source::MatrixFilters;
use crate::error::ReportError;
use crate::reporting::delivery::DeliveryClassification;
use crate::reporting::matrix::ProductMatrix;
use crate::reporting::service::{DeliveryAnalysis, OutputPerformance, ReportingService};

use super::ApiResponse;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixQuery {
    pub work_package_id: Option<i32>,
    pub output_number: Option<i32>,
    pub country_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisQuery {
    pub indicator_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceQuery {
    pub output: Option<i32>,
    pub work_package: Option<i32>,
}

async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse::ok("OK".to_string()))
}

async fn get_matrix(
    State(service): State<ReportingService>,
    Query(query): Query<MatrixQuery>,
) -> Result<Json<ApiResponse<ProductMatrix>>, ReportError> {
    let filters =
        MatrixFilters::from_params(query.work_package_id, query.output_number, query.country_id)?;
    let matrix = service.product_matrix(&filters).await?;
    Ok(Json(ApiResponse::ok(matrix)))
}

async fn get_delivery_analysis(
    State(service): State<ReportingService>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Json<ApiResponse<DeliveryAnalysis>>, ReportError> {
    let indicator_code = query
        .indicator_code
        .ok_or_else(|| ReportError::missing_filter("indicatorCode"))?;
    let analysis = service.delivery_analysis(&indicator_code).await?;
    Ok(Json(ApiResponse::ok(analysis)))
}

async fn get_output_performance(
    State(service): State<ReportingService>,
    Query(query): Query<PerformanceQuery>,
) -> Result<Json<ApiResponse<OutputPerformance>>, ReportError> {
    let output = query
        .output
        .ok_or_else(|| ReportError::missing_filter("output"))?;
    let performance = service
        .output_performance(output, query.work_package)
        .await?;
    Ok(Json(ApiResponse::ok(performance)))
}

async fn get_product_delivery(
    State(service): State<ReportingService>,
    Path(product_id): Path<i32>,
) -> Result<Json<ApiResponse<DeliveryClassification>>, ReportError> {
    let classification = service.product_delivery(product_id).await?;
    Ok(Json(ApiResponse::ok(classification)))
}

/// Create the reporting router.
pub fn create_reporting_router(service: ReportingService) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/reporting/matrix", get(get_matrix))
        .route("/api/reporting/delivery-analysis", get(get_delivery_analysis))
        .route("/api/reporting/output-performance", get(get_output_performance))
        .route(
            "/api/reporting/products/:product_id/delivery",
            get(get_product_delivery),
        )
        .with_state(service)
}
