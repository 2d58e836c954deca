// src/models/report.rs

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const ITEM_SALE_REPORT_MESSAGE: &str = "Group names and item sale report fetched successfully";
pub const GROUP_REPORT_MESSAGE: &str = "Group sales report fetched successfully";
pub const DATES_REQUIRED_MESSAGE: &str = "From date and To date are required";

// Parâmetros de query string comuns aos dois relatórios.
// Valores vazios (`?branchId=`) contam como ausentes.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQueryParams {
    /// Filial a consultar; padrão é a estação do token
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 50, message = "branchId must be at most 50 characters"))]
    pub branch_id: Option<String>,

    /// Data inicial (YYYY-MM-DD)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from_date: Option<String>,

    /// Data final, inclusiva (YYYY-MM-DD)
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to_date: Option<String>,

    /// Filtro exato por grupo (só no relatório de itens)
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 100, message = "groupName must be at most 100 characters"))]
    pub group_name: Option<String>,
}

impl ReportQueryParams {
    /// Filial selecionada: `branchId` ou, na falta dele, a estação do token.
    pub fn selected_branch<'a>(&'a self, station_id: &'a str) -> &'a str {
        self.branch_id.as_deref().unwrap_or(station_id)
    }

    /// As duas datas, apenas quando ambas foram informadas.
    pub fn date_range(&self) -> Option<(&str, &str)> {
        match (&self.from_date, &self.to_date) {
            (Some(from), Some(to)) => Some((from.as_str(), to.as_str())),
            _ => None,
        }
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

// Linha do relatório de itens, agregada por (descrição, grupo).
// As chaves seguem as colunas do relatório legado: ShortDescription, GroupName...
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct SaleReportRow {
    pub short_description: Option<String>,
    pub group_name: Option<String>,
    pub qty: Option<Decimal>,
    pub total_amount: Option<Decimal>,
}

impl SaleReportRow {
    pub fn rounded(self) -> Self {
        Self {
            total_amount: round_amount(self.total_amount),
            ..self
        }
    }
}

// Linha do relatório por grupo.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct GroupSalesRow {
    pub group_name: Option<String>,
    pub total_qty: Option<Decimal>,
    pub total_amount: Option<Decimal>,
}

impl GroupSalesRow {
    pub fn rounded(self) -> Self {
        Self {
            total_amount: round_amount(self.total_amount),
            ..self
        }
    }
}

// Mesmo arredondamento do ROUND(x, 2) do SQL (metade para longe do zero).
fn round_amount(amount: Option<Decimal>) -> Option<Decimal> {
    amount.map(|a| a.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemSaleReportResponse {
    pub group_names: Vec<String>,
    pub data: Vec<SaleReportRow>,
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupReportResponse {
    pub data: Vec<GroupSalesRow>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn amounts_round_half_away_from_zero() {
        let row = GroupSalesRow {
            group_name: Some("Drinks".into()),
            total_qty: Some(dec("3")),
            total_amount: Some(dec("10.125")),
        }
        .rounded();

        assert_eq!(row.total_amount, Some(dec("10.13")));
        assert_eq!(row.total_qty, Some(dec("3")));
    }

    #[test]
    fn rows_serialize_with_legacy_column_keys() {
        let row = SaleReportRow {
            short_description: Some("Espresso".into()),
            group_name: Some("Coffee".into()),
            qty: Some(dec("2")),
            total_amount: Some(dec("7.50")),
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["ShortDescription"], "Espresso");
        assert_eq!(json["GroupName"], "Coffee");
        assert_eq!(json["Qty"], 2.0);
        assert_eq!(json["TotalAmount"], 7.5);
        assert!(json.get("shortDescription").is_none());

        let group = GroupSalesRow {
            group_name: Some("Coffee".into()),
            total_qty: Some(dec("6")),
            total_amount: Some(dec("23.50")),
        };
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json, serde_json::json!({ "GroupName": "Coffee", "TotalQty": 6.0, "TotalAmount": 23.5 }));
    }

    #[test]
    fn empty_query_values_count_as_missing() {
        let params: ReportQueryParams =
            serde_json::from_value(serde_json::json!({ "branchId": "", "fromDate": "2024-01-01" }))
                .unwrap();

        assert_eq!(params.branch_id, None);
        assert_eq!(params.selected_branch("9"), "9");
        assert_eq!(params.date_range(), None);
    }
}
