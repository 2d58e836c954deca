// src/config.rs

use std::{collections::HashSet, env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{DynReportRepository, ReportRepositoryImpl},
    services::{ReportService, TenantResolver},
};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Configuração lida do ambiente (.env carregado no main).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub allowed_schemas: Option<HashSet<String>>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().with_context(|| format!("PORT inválida: {raw}"))?,
            Err(_) => DEFAULT_PORT,
        };

        let db_max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let allowed_schemas = env::var("ALLOWED_SCHEMAS")
            .ok()
            .and_then(|raw| parse_allowed_schemas(&raw));

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            db_max_connections,
            allowed_schemas,
        })
    }
}

// "acme, globex" -> {"acme", "globex"}; lista vazia = sem allow-list.
fn parse_allowed_schemas(raw: &str) -> Option<HashSet<String>> {
    let schemas: HashSet<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    (!schemas.is_empty()).then_some(schemas)
}

/// Cria a pool do banco de relatórios. Chamada uma vez na inicialização.
pub async fn connect_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
    let db_pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
        .context("Falha ao conectar ao banco de dados")?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(db_pool)
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub report_service: ReportService,
    pub tenant_resolver: TenantResolver,
}

impl AppState {
    pub fn new(config: &AppConfig, db_pool: PgPool) -> Self {
        // --- Monta o gráfico de dependências ---
        let report_repo: DynReportRepository = Arc::new(ReportRepositoryImpl::new(db_pool));

        Self {
            report_service: ReportService::new(report_repo),
            tenant_resolver: TenantResolver::new(&config.jwt_secret, config.allowed_schemas.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_schemas_are_trimmed_and_deduplicated() {
        let schemas = parse_allowed_schemas(" acme, globex ,acme,").unwrap();

        assert_eq!(schemas.len(), 2);
        assert!(schemas.contains("acme"));
        assert!(schemas.contains("globex"));
    }

    #[test]
    fn blank_allow_list_disables_the_check() {
        assert!(parse_allowed_schemas("").is_none());
        assert!(parse_allowed_schemas(" , ").is_none());
    }
}
