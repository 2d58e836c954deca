// src/handlers/reports.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::{
        auth::ExpiryStatus,
        report::{GroupReportResponse, ItemSaleReportResponse, ReportQueryParams},
    },
};

// GET /item-sale-report
#[utoipa::path(
    get,
    path = "/item-sale-report",
    tag = "Reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Grupos da filial e relatório de itens vendidos", body = ItemSaleReportResponse),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 401, description = "Token ausente ou inválido"),
        (status = 403, description = "Token expirado", body = ExpiryStatus),
        (status = 500, description = "Erro do servidor")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_item_sale_report(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    query: Result<Query<ReportQueryParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    let report = app_state
        .report_service
        .get_item_sale_report(&tenant, &params)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /group-report
#[utoipa::path(
    get,
    path = "/group-report",
    tag = "Reports",
    params(ReportQueryParams),
    responses(
        (status = 200, description = "Totais de venda por grupo", body = GroupReportResponse),
        (status = 400, description = "From date and To date are required"),
        (status = 401, description = "Token ausente ou inválido"),
        (status = 403, description = "Token expirado", body = ExpiryStatus),
        (status = 500, description = "Erro do servidor")
    ),
    security(
        ("api_jwt" = [])
    )
)]
pub async fn get_group_report(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    query: Result<Query<ReportQueryParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = query?;
    let report = app_state
        .report_service
        .get_group_report(&tenant, &params)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
