//! Row source: the single data-access seam of the reporting engine.
//!
//! The aggregation components never touch the pool directly; they consume
//! flat rows from a [`RowSource`] handle passed in per request. Tests
//! substitute an in-memory fake.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::ReportError;
use crate::models::{IndicatorRow, MatrixRow, ProductTaskRow, TaskRow};

use super::filters::{apply_filters, ReportFilter};

/// Validated filter set for a matrix request.
///
/// Construction is the validation gate: a missing required filter is rejected
/// here, before any query is issued.
#[derive(Debug, Clone)]
pub struct MatrixFilters {
    pub work_package_id: i32,
    pub output_number: i32,
    pub country_id: Option<i32>,
}

impl MatrixFilters {
    pub fn from_params(
        work_package_id: Option<i32>,
        output_number: Option<i32>,
        country_id: Option<i32>,
    ) -> Result<Self, ReportError> {
        let work_package_id =
            work_package_id.ok_or_else(|| ReportError::missing_filter("workPackageId"))?;
        let output_number =
            output_number.ok_or_else(|| ReportError::missing_filter("outputNumber"))?;
        Ok(Self {
            work_package_id,
            output_number,
            country_id,
        })
    }

    fn to_filters(&self) -> Vec<ReportFilter> {
        let mut filters = vec![
            ReportFilter::WorkPackage(self.work_package_id),
            ReportFilter::OutputNumber(self.output_number),
        ];
        if let Some(country_id) = self.country_id {
            filters.push(ReportFilter::Country(country_id));
        }
        filters
    }
}

/// Supplies the flat rows the aggregation engine computes over.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_matrix_rows(&self, filters: &MatrixFilters)
        -> Result<Vec<MatrixRow>, ReportError>;

    async fn fetch_product_tasks(&self, product_id: i32) -> Result<Vec<TaskRow>, ReportError>;

    async fn fetch_indicator_tasks(
        &self,
        indicator_code: &str,
    ) -> Result<Vec<ProductTaskRow>, ReportError>;

    async fn fetch_output_indicators(
        &self,
        output_number: i32,
        work_package_id: Option<i32>,
    ) -> Result<Vec<IndicatorRow>, ReportError>;
}

/// PostgreSQL row source over a pooled connection.
#[derive(Debug, Clone)]
pub struct PgRowSource {
    pool: PgPool,
}

impl PgRowSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RowSource for PgRowSource {
    async fn fetch_matrix_rows(
        &self,
        filters: &MatrixFilters,
    ) -> Result<Vec<MatrixRow>, ReportError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT p.product_id, p.name AS product_name, \
             c.country_id, c.name AS country_name, \
             i.indicator_id, i.code AS indicator_code, i.name AS indicator_name, \
             i.output_number, p.delivery_date, o.name AS owner_name \
             FROM products p \
             LEFT JOIN countries c ON c.country_id = p.country_id \
             LEFT JOIN product_indicators pi ON pi.product_id = p.product_id \
             LEFT JOIN indicators i ON i.indicator_id = pi.indicator_id \
             LEFT JOIN organisations o ON o.organisation_id = p.owner_org_id",
        );
        apply_filters(&mut builder, &filters.to_filters());
        builder.push(" ORDER BY c.name, i.code, p.name");

        debug!("matrix query: {}", builder.sql());
        let rows = builder
            .build_query_as::<MatrixRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_product_tasks(&self, product_id: i32) -> Result<Vec<TaskRow>, ReportError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT t.task_id, t.planned_end, t.actual_end, t.actual_start, \
             s.name AS status_name \
             FROM tasks t \
             LEFT JOIN statuses s ON s.status_id = t.status_id",
        );
        apply_filters(&mut builder, &[ReportFilter::Product(product_id)]);
        builder.push(" ORDER BY t.planned_end, t.task_id");

        let rows = builder
            .build_query_as::<TaskRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_indicator_tasks(
        &self,
        indicator_code: &str,
    ) -> Result<Vec<ProductTaskRow>, ReportError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT p.product_id, p.name AS product_name, \
             t.task_id, t.planned_end, t.actual_end, t.actual_start, \
             s.name AS status_name \
             FROM tasks t \
             JOIN products p ON p.product_id = t.product_id \
             JOIN product_indicators pi ON pi.product_id = p.product_id \
             JOIN indicators i ON i.indicator_id = pi.indicator_id \
             LEFT JOIN statuses s ON s.status_id = t.status_id",
        );
        apply_filters(
            &mut builder,
            &[ReportFilter::IndicatorCode(indicator_code.to_string())],
        );
        builder.push(" ORDER BY p.name, t.planned_end, t.task_id");

        let rows = builder
            .build_query_as::<ProductTaskRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_output_indicators(
        &self,
        output_number: i32,
        work_package_id: Option<i32>,
    ) -> Result<Vec<IndicatorRow>, ReportError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT DISTINCT i.indicator_id, i.code, i.name, i.output_number FROM indicators i",
        );
        let mut filters = vec![ReportFilter::OutputNumber(output_number)];
        if let Some(work_package_id) = work_package_id {
            // The work-package filter reaches indicators through products.
            builder.push(
                " JOIN product_indicators pi ON pi.indicator_id = i.indicator_id \
                 JOIN products p ON p.product_id = pi.product_id",
            );
            filters.push(ReportFilter::WorkPackage(work_package_id));
        }
        apply_filters(&mut builder, &filters);
        builder.push(" ORDER BY i.code");

        let rows = builder
            .build_query_as::<IndicatorRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_work_package_is_a_validation_error() {
        let err = MatrixFilters::from_params(None, Some(2), None).unwrap_err();
        assert!(err.to_string().contains("workPackageId"));
    }

    #[test]
    fn missing_output_number_is_a_validation_error() {
        let err = MatrixFilters::from_params(Some(1), None, Some(3)).unwrap_err();
        assert!(err.to_string().contains("outputNumber"));
    }

    #[test]
    fn country_filter_is_optional() {
        let filters = MatrixFilters::from_params(Some(1), Some(2), None).unwrap();
        assert_eq!(filters.to_filters().len(), 2);

        let filters = MatrixFilters::from_params(Some(1), Some(2), Some(3)).unwrap();
        assert_eq!(filters.to_filters().len(), 3);
    }
}
