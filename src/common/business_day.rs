// src/common/business_day.rs

use chrono::{NaiveDate, NaiveDateTime};

use crate::common::error::AppError;

// Um "dia de vendas" começa às 05:00 e termina às 05:00 do dia seguinte.
pub const BUSINESS_DAY_START_HOUR: u32 = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";
const LABEL_FORMAT: &str = "%Y-%m-%d %I:%M:%S %p";

/// Janela de consulta semiaberta `[from, to)` derivada das datas do relatório.
///
/// `from` é `fromDate` às 05:00 e `to` é o dia seguinte a `toDate` às 05:00,
/// então o último dia pedido entra inteiro no relatório.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl DateWindow {
    pub fn from_calendar_dates(from_date: &str, to_date: &str) -> Result<Self, AppError> {
        let from_day = parse_calendar_date(from_date)?;
        let to_day = parse_calendar_date(to_date)?;

        let day_after = to_day
            .succ_opt()
            .ok_or_else(|| AppError::bad_request("To date is out of range"))?;

        Ok(Self {
            from: at_business_day_start(from_day)?,
            to: at_business_day_start(day_after)?,
        })
    }

    /// Limite inferior no formato `YYYY-MM-DD 05:00:00 AM`.
    pub fn from_label(&self) -> String {
        self.from.format(LABEL_FORMAT).to_string()
    }

    /// Limite superior (exclusivo) no formato `YYYY-MM-DD 05:00:00 AM`.
    pub fn to_label(&self) -> String {
        self.to.format(LABEL_FORMAT).to_string()
    }
}

fn parse_calendar_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| AppError::bad_request("Invalid date format, expected YYYY-MM-DD"))
}

fn at_business_day_start(day: NaiveDate) -> Result<NaiveDateTime, AppError> {
    day.and_hms_opt(BUSINESS_DAY_START_HOUR, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("invalid business day start for {day}").into())
}
