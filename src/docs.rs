// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Reports ---
        handlers::reports::get_item_sale_report,
        handlers::reports::get_group_report,
    ),
    components(
        schemas(
            // --- Reports ---
            models::report::SaleReportRow,
            models::report::GroupSalesRow,
            models::report::ItemSaleReportResponse,
            models::report::GroupReportResponse,

            // --- Auth ---
            models::auth::ExpiryStatus,
        )
    ),
    tags(
        (name = "Reports", description = "Relatórios de vendas por filial")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
