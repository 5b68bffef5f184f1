//! Shared parametrized filter set for report queries.
//!
//! Every reporting query builds its WHERE clause from the same fixed named
//! filters, so the matrix, analysis, and summary paths keep identical filter
//! semantics. The column mapping relies on an alias contract honored by all
//! queries in [`super::row_source`]: products `p`, indicators `i`, tasks `t`.

use sqlx::{Postgres, QueryBuilder};

/// A named filter with a fixed column binding.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportFilter {
    WorkPackage(i32),
    OutputNumber(i32),
    Country(i32),
    IndicatorCode(String),
    Product(i32),
}

impl ReportFilter {
    fn column(&self) -> &'static str {
        match self {
            ReportFilter::WorkPackage(_) => "p.work_package_id",
            ReportFilter::OutputNumber(_) => "i.output_number",
            ReportFilter::Country(_) => "p.country_id",
            ReportFilter::IndicatorCode(_) => "i.code",
            ReportFilter::Product(_) => "t.product_id",
        }
    }
}

/// Append a `WHERE` clause for `filters`, binding every value.
pub fn apply_filters(builder: &mut QueryBuilder<'_, Postgres>, filters: &[ReportFilter]) {
    for (pos, filter) in filters.iter().enumerate() {
        builder.push(if pos == 0 { " WHERE " } else { " AND " });
        builder.push(filter.column());
        builder.push(" = ");
        match filter {
            ReportFilter::WorkPackage(id)
            | ReportFilter::OutputNumber(id)
            | ReportFilter::Country(id)
            | ReportFilter::Product(id) => {
                builder.push_bind(*id);
            }
            ReportFilter::IndicatorCode(code) => {
                builder.push_bind(code.clone());
            }
        }
    }
}
