// src/models/auth.rs

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

pub const TOKEN_EXPIRED_MESSAGE: &str = "Token has expired, please log in again";

// Claims do JWT emitido no login: o tenant (schema) e a estação do usuário.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantClaims {
    pub db_schema_name: String,
    #[serde(deserialize_with = "station_id_from_text_or_number")]
    pub station_id: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

// Resultado da verificação de expiração; é o corpo da resposta 403.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExpiryStatus {
    pub expired: bool,
    pub message: String,
}

impl ExpiryStatus {
    pub fn active() -> Self {
        Self {
            expired: false,
            message: "Token is valid".to_string(),
        }
    }

    pub fn expired() -> Self {
        Self {
            expired: true,
            message: TOKEN_EXPIRED_MESSAGE.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StationIdRepr {
    Text(String),
    Number(i64),
}

// Tokens antigos gravam o stationId como número.
fn station_id_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StationIdRepr::deserialize(deserializer)? {
        StationIdRepr::Text(id) => id,
        StationIdRepr::Number(id) => id.to_string(),
    })
}
