// src/db/report_repo.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    common::{business_day::DateWindow, error::AppError},
    models::{
        report::{GroupSalesRow, SaleReportRow},
        tenancy::SchemaName,
    },
};

pub type DynReportRepository = Arc<dyn ReportRepository + Send + Sync>;

// Filtro do relatório de itens. `group_name` é opcional.
#[derive(Debug, Clone, Copy)]
pub struct ItemSaleFilter<'a> {
    pub branch_id: &'a str,
    pub window: DateWindow,
    pub group_name: Option<&'a str>,
}

// Acesso de leitura às tabelas de venda do schema do tenant.
#[async_trait]
pub trait ReportRepository {
    /// Grupos distintos de uma filial, sem filtro de data.
    async fn find_group_names(
        &self,
        schema: &SchemaName,
        branch_id: &str,
    ) -> Result<Vec<String>, AppError>;

    async fn find_item_sales(
        &self,
        schema: &SchemaName,
        filter: ItemSaleFilter<'_>,
    ) -> Result<Vec<SaleReportRow>, AppError>;

    async fn find_group_sales(
        &self,
        schema: &SchemaName,
        branch_id: &str,
        window: DateWindow,
    ) -> Result<Vec<GroupSalesRow>, AppError>;
}

#[derive(Clone)]
pub struct ReportRepositoryImpl {
    pool: PgPool,
}

impl ReportRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReportRepository for ReportRepositoryImpl {
    async fn find_group_names(
        &self,
        schema: &SchemaName,
        branch_id: &str,
    ) -> Result<Vec<String>, AppError> {
        let mut qb = group_names_query(schema, branch_id);
        let names = qb
            .build_query_scalar::<String>()
            .fetch_all(&self.pool)
            .await?;
        Ok(names)
    }

    async fn find_item_sales(
        &self,
        schema: &SchemaName,
        filter: ItemSaleFilter<'_>,
    ) -> Result<Vec<SaleReportRow>, AppError> {
        let mut qb = item_sales_query(schema, filter);
        let rows = qb
            .build_query_as::<SaleReportRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(SaleReportRow::rounded).collect())
    }

    async fn find_group_sales(
        &self,
        schema: &SchemaName,
        branch_id: &str,
        window: DateWindow,
    ) -> Result<Vec<GroupSalesRow>, AppError> {
        let mut qb = group_sales_query(schema, branch_id, window);
        let rows = qb
            .build_query_as::<GroupSalesRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(GroupSalesRow::rounded).collect())
    }
}

// ---
// Montagem das consultas
// ---
// O schema é o único texto interpolado; todo o resto vai por push_bind.

enum SalesPredicate<'a> {
    NonZeroLineTotal,
    BilledFrom(NaiveDateTime),
    BilledBefore(NaiveDateTime),
    Station(&'a str),
    Group(&'a str),
}

// Predicado base: linha com valor, dentro da janela e da filial.
fn base_predicates(branch_id: &str, window: DateWindow) -> Vec<SalesPredicate<'_>> {
    vec![
        SalesPredicate::NonZeroLineTotal,
        SalesPredicate::BilledFrom(window.from),
        SalesPredicate::BilledBefore(window.to),
        SalesPredicate::Station(branch_id),
    ]
}

fn push_where<'a>(qb: &mut QueryBuilder<'a, Postgres>, predicates: Vec<SalesPredicate<'a>>) {
    for (i, predicate) in predicates.into_iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match predicate {
            SalesPredicate::NonZeroLineTotal => {
                qb.push("sc.line_total <> 0");
            }
            SalesPredicate::BilledFrom(from) => {
                qb.push("sm.bill_time >= ").push_bind(from);
            }
            SalesPredicate::BilledBefore(to) => {
                qb.push("sm.bill_time < ").push_bind(to);
            }
            SalesPredicate::Station(branch_id) => {
                qb.push("sc.station_id = ").push_bind(branch_id);
            }
            SalesPredicate::Group(group_name) => {
                qb.push("sc.group_name = ").push_bind(group_name);
            }
        }
    }
}

fn push_sales_join(qb: &mut QueryBuilder<'_, Postgres>, schema: &SchemaName) {
    qb.push(" FROM ")
        .push(schema.qualify("sales_child"))
        .push(" sc JOIN ")
        .push(schema.qualify("sales_master"))
        .push(" sm ON sc.sales_id = sm.sales_id");
}

pub(crate) fn group_names_query<'a>(
    schema: &SchemaName,
    branch_id: &'a str,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new("SELECT group_name FROM ");
    qb.push(schema.qualify("sales_child"))
        .push(" WHERE station_id = ")
        .push_bind(branch_id)
        .push(" AND group_name IS NOT NULL GROUP BY group_name ORDER BY group_name");
    qb
}

pub(crate) fn item_sales_query<'a>(
    schema: &SchemaName,
    filter: ItemSaleFilter<'a>,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT sc.short_description, sc.group_name, \
         SUM(sc.qty)::numeric AS qty, \
         ROUND(SUM(sc.line_total)::numeric, 2) AS total_amount",
    );
    push_sales_join(&mut qb, schema);

    let mut predicates = base_predicates(filter.branch_id, filter.window);
    if let Some(group_name) = filter.group_name {
        predicates.push(SalesPredicate::Group(group_name));
    }
    push_where(&mut qb, predicates);

    qb.push(" GROUP BY sc.short_description, sc.group_name");
    qb
}

pub(crate) fn group_sales_query<'a>(
    schema: &SchemaName,
    branch_id: &'a str,
    window: DateWindow,
) -> QueryBuilder<'a, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT sc.group_name, \
         SUM(sc.qty)::numeric AS total_qty, \
         ROUND(SUM(sc.line_total)::numeric, 2) AS total_amount",
    );
    push_sales_join(&mut qb, schema);
    push_where(&mut qb, base_predicates(branch_id, window));
    qb.push(" GROUP BY sc.group_name");
    qb
}
