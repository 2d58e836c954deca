// src/services/report_service.rs

use validator::Validate;

use crate::{
    common::{business_day::DateWindow, error::AppError},
    db::report_repo::{DynReportRepository, ItemSaleFilter},
    middleware::tenancy::TenantContext,
    models::report::{
        GroupReportResponse, ItemSaleReportResponse, ReportQueryParams, DATES_REQUIRED_MESSAGE,
        GROUP_REPORT_MESSAGE, ITEM_SALE_REPORT_MESSAGE,
    },
};

#[derive(Clone)]
pub struct ReportService {
    repo: DynReportRepository,
}

impl ReportService {
    pub fn new(repo: DynReportRepository) -> Self {
        Self { repo }
    }

    /// Lista os grupos da filial e, se vierem as duas datas, o relatório de
    /// itens vendidos na janela (opcionalmente filtrado por grupo).
    pub async fn get_item_sale_report(
        &self,
        tenant: &TenantContext,
        params: &ReportQueryParams,
    ) -> Result<ItemSaleReportResponse, AppError> {
        params.validate()?;

        let branch_id = params.selected_branch(&tenant.station_id);
        tracing::info!(
            "Relatório de itens ({}): fromDate = {:?}, toDate = {:?}, branchId = {}",
            tenant.schema,
            params.from_date,
            params.to_date,
            branch_id
        );

        // Datas inválidas viram 400 antes de qualquer consulta.
        let window = params
            .date_range()
            .map(|(from, to)| DateWindow::from_calendar_dates(from, to))
            .transpose()?;

        let group_names = self
            .repo
            .find_group_names(&tenant.schema, branch_id)
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar grupos da filial {}: {}", branch_id, e))?;

        if group_names.is_empty() {
            tracing::info!("Nenhum grupo encontrado para a filial {}", branch_id);
        } else {
            tracing::debug!("Grupos encontrados: {:?}", group_names);
        }

        let data = match window {
            Some(window) => {
                tracing::info!(
                    "Janela do relatório: [{}, {})",
                    window.from_label(),
                    window.to_label()
                );
                let filter = ItemSaleFilter {
                    branch_id,
                    window,
                    group_name: params.group_name.as_deref(),
                };
                self.repo
                    .find_item_sales(&tenant.schema, filter)
                    .await
                    .inspect_err(|e| tracing::error!("Erro ao buscar relatório de itens: {}", e))?
            }
            None => Vec::new(),
        };

        Ok(ItemSaleReportResponse {
            group_names,
            data,
            message: ITEM_SALE_REPORT_MESSAGE.to_string(),
        })
    }

    /// Totais por grupo na janela. As duas datas são obrigatórias.
    pub async fn get_group_report(
        &self,
        tenant: &TenantContext,
        params: &ReportQueryParams,
    ) -> Result<GroupReportResponse, AppError> {
        params.validate()?;

        let branch_id = params.selected_branch(&tenant.station_id);

        let (from_date, to_date) = params
            .date_range()
            .ok_or_else(|| AppError::bad_request(DATES_REQUIRED_MESSAGE))?;
        let window = DateWindow::from_calendar_dates(from_date, to_date)?;

        tracing::info!(
            "Relatório por grupo ({}): de {} até {} (exclusivo), branchId = {}",
            tenant.schema,
            window.from_label(),
            window.to_label(),
            branch_id
        );

        let data = self
            .repo
            .find_group_sales(&tenant.schema, branch_id, window)
            .await
            .inspect_err(|e| tracing::error!("Erro ao buscar relatório por grupo: {}", e))?;

        Ok(GroupReportResponse {
            data,
            message: GROUP_REPORT_MESSAGE.to_string(),
        })
    }
}
