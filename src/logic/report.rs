use crate::error::{HiveOpsError, Result};
use crate::models::Product;
use chrono::{Months, NaiveDate};

pub const REPORT_HEADING: &str = "BeeHive Production Report";
pub const EMPTY_REPORT: &str = "No products found for the selected period.";

/// Inclusive date range covered by a production report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub title: String,
}

impl ReportPeriod {
    /// A calendar month when `month` is given, otherwise the whole year.
    pub fn new(year: i32, month: Option<u32>) -> Result<Self> {
        match month {
            Some(month) => Self::month(year, month),
            None => Self::year(year),
        }
    }

    fn month(year: i32, month: u32) -> Result<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            HiveOpsError::InvalidData(format!("Invalid report month {}-{}", year, month))
        })?;
        let end = start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| HiveOpsError::InvalidData(format!("Report month out of range: {}", start)))?;

        Ok(Self {
            start,
            end,
            title: format!("{} - {} {}", REPORT_HEADING, start.format("%B"), year),
        })
    }

    fn year(year: i32) -> Result<Self> {
        let invalid = || HiveOpsError::InvalidData(format!("Invalid report year {}", year));
        Ok(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(invalid)?,
            title: format!("{} - Year {}", REPORT_HEADING, year),
        })
    }
}

/// Plain-text production report. Products are listed in the order given,
/// which the store returns ascending by harvest date.
pub fn render_report(period: &ReportPeriod, products: &[Product]) -> String {
    let mut out = vec![REPORT_HEADING.to_string(), period.title.clone(), String::new()];

    if products.is_empty() {
        out.push(EMPTY_REPORT.to_string());
    } else {
        out.extend(products.iter().enumerate().map(|(i, p)| report_line(i + 1, p)));
    }

    out.join("\n")
}

fn report_line(position: usize, product: &Product) -> String {
    let snapshot = &product.snapshot;
    let product_type = snapshot
        .product_type
        .map(|t| t.as_str())
        .unwrap_or("Unknown");
    let harvested = snapshot
        .harvest_date
        .map(|d| d.format("%a %b %d %Y").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "{}. {} ({}) - {} {} | Harvested: {}",
        position,
        snapshot.product_name,
        product_type,
        snapshot.quantity(),
        snapshot.unit(),
        harvested
    )
}
