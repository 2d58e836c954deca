// src/models/tenancy.rs

use std::{collections::HashSet, fmt, sync::LazyLock};

use regex::Regex;

// Identificador SQL simples: letra ou "_" seguido de até 62 caracteres.
static SCHEMA_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("padrão de schema inválido")
});

// ---
// Schema do tenant
// ---
// Só existe depois de validado, por isso pode ser interpolado no SQL.
// Todos os outros valores das consultas são parâmetros (bind).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaName(String);

impl SchemaName {
    /// Valida o nome contra o padrão de identificador e, se houver, a allow-list.
    pub fn parse(raw: &str, allowed: Option<&HashSet<String>>) -> Option<Self> {
        if !SCHEMA_NAME_PATTERN.is_match(raw) {
            return None;
        }
        if let Some(allowed) = allowed {
            if !allowed.contains(raw) {
                return None;
            }
        }
        Some(Self(raw.to_string()))
    }

    /// Nome de tabela qualificado, ex.: `"acme".sales_child`.
    pub fn qualify(&self, table: &str) -> String {
        format!("\"{}\".{}", self.0, table)
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
