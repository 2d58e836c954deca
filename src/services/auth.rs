// src/services/auth.rs

use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    middleware::tenancy::TenantContext,
    models::{
        auth::{ExpiryStatus, TenantClaims},
        tenancy::SchemaName,
    },
};

// Resolve o contexto do tenant (schema + estação) a partir do token do login.
#[derive(Clone)]
pub struct TenantResolver {
    decoding_key: DecodingKey,
    allowed_schemas: Option<Arc<HashSet<String>>>,
}

impl TenantResolver {
    pub fn new(jwt_secret: &str, allowed_schemas: Option<HashSet<String>>) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            allowed_schemas: allowed_schemas.map(Arc::new),
        }
    }

    /// Verifica a assinatura e lê os claims. A expiração é tratada à parte
    /// por `check_expiry_status`, que devolve o payload do 403.
    pub fn decode_claims(&self, token: &str) -> Result<TenantClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        decode::<TenantClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token rejeitado: {}", e);
                AppError::InvalidToken
            })
    }

    pub fn check_expiry_status(&self, claims: &TenantClaims) -> ExpiryStatus {
        if claims.exp <= Utc::now().timestamp() {
            ExpiryStatus::expired()
        } else {
            ExpiryStatus::active()
        }
    }

    /// Extrai schema e estação dos claims, validando o schema antes de
    /// qualquer uso em SQL.
    pub fn tenant_from_claims(&self, claims: TenantClaims) -> Result<TenantContext, AppError> {
        let schema = SchemaName::parse(&claims.db_schema_name, self.allowed_schemas.as_deref())
            .ok_or_else(|| {
                tracing::warn!("Schema fora da allow-list: {:?}", claims.db_schema_name);
                AppError::InvalidToken
            })?;

        Ok(TenantContext {
            schema,
            station_id: claims.station_id,
        })
    }

    pub fn resolve(&self, token: &str) -> Result<TenantContext, AppError> {
        let claims = self.decode_claims(token)?;

        let status = self.check_expiry_status(&claims);
        if status.expired {
            tracing::info!("Token expirado para o schema {}", claims.db_schema_name);
            return Err(AppError::AuthExpired(status));
        }

        self.tenant_from_claims(claims)
    }
}
