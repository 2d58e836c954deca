// src/middleware/tenancy.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::BearerToken,
    models::tenancy::SchemaName,
};

// Contexto do tenant já resolvido: schema validado e estação do token.
// Um token expirado é rejeitado aqui, antes de o handler tocar no banco.
#[derive(Debug, Clone)]
pub struct TenantContext {
    pub schema: SchemaName,
    pub station_id: String,
}

impl FromRequestParts<AppState> for TenantContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        state.tenant_resolver.resolve(&token)
    }
}
