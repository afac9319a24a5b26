//! Sales and profit report over a date range.

use chrono::NaiveDate;
use serde::Serialize;

use sexyboom_core::{DomainError, DomainResult, Entity, SalesNoteId};
use sexyboom_inventory::{calculate_profit, calculate_profit_margin};

use crate::note::{SalesNote, round_currency};
use crate::query::{client_name_contains, id_contains};

/// One paid note included in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedSale {
    pub id: SalesNoteId,
    pub sold_on: NaiveDate,
    pub client_name: String,
    pub total: f64,
    pub cost: f64,
}

/// Totals over the paid notes sold within `[start_date, end_date]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_sales: f64,
    pub total_cost: f64,
    pub total_profit: f64,
    /// Profit as a percentage of cost (0 when nothing was spent).
    pub profit_margin: f64,
    pub sales_count: usize,
    pub sales: Vec<ReportedSale>,
}

/// Optional narrowing of a report. Blank criteria match every note; set ones
/// must all match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Part of the client name, ignoring case.
    pub client: Option<String>,
    /// Part of the note id as text.
    pub id: Option<String>,
}

impl ReportFilter {
    pub fn matches(&self, note: &SalesNote) -> bool {
        let client = self.client.as_deref().map(str::trim).filter(|t| !t.is_empty());
        let id = self.id.as_deref().map(str::trim).filter(|t| !t.is_empty());
        client.is_none_or(|term| client_name_contains(note, term)) && id.is_none_or(|term| id_contains(note, term))
    }
}

/// Build a report from paid notes whose sale date falls in the range (both ends
/// inclusive) and that pass `filter`. Sales are listed by sale date, then by id.
pub fn build_report(
    notes: &[SalesNote],
    start_date: NaiveDate,
    end_date: NaiveDate,
    filter: &ReportFilter,
) -> DomainResult<SalesReport> {
    if start_date > end_date {
        return Err(DomainError::validation(format!(
            "start_date {start_date} is after end_date {end_date}"
        )));
    }

    let mut sales: Vec<ReportedSale> = notes
        .iter()
        .filter(|note| note.is_paid() && filter.matches(note))
        .filter_map(|note| {
            let sold_on = note.sold_on()?;
            (start_date..=end_date).contains(&sold_on).then(|| ReportedSale {
                id: note.id(),
                sold_on,
                client_name: note.client_name().to_string(),
                total: note.total(),
                cost: round_currency(note.cost()),
            })
        })
        .collect();
    sales.sort_by_key(|sale| (sale.sold_on, sale.id));

    let total_sales = round_currency(sales.iter().map(|s| s.total).sum());
    let total_cost = round_currency(sales.iter().map(|s| s.cost).sum());

    Ok(SalesReport {
        start_date,
        end_date,
        total_sales,
        total_cost,
        total_profit: round_currency(calculate_profit(total_cost, total_sales)),
        profit_margin: calculate_profit_margin(total_cost, total_sales),
        sales_count: sales.len(),
        sales,
    })
}
