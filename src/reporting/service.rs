//! Per-request reporting orchestration.
//!
//! The service owns nothing but a row-source handle. Every request recomputes
//! from current data: rows are fetched, the pure components run over the
//! snapshot, and nothing is cached across requests.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::row_source::{MatrixFilters, RowSource};
use crate::error::ReportError;
use crate::models::{ProductTaskRow, TaskRow};

use super::classify::classify_task;
use super::delivery::{classify_delivery, DeliveryClassification};
use super::matrix::{assemble, ProductMatrix};
use super::summary::{summarize, DeliverySummary};

/// Delivery analysis of one product within an indicator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_id: i32,
    pub product_name: String,
    #[serde(flatten)]
    pub classification: DeliveryClassification,
}

/// Indicator-scoped delivery analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryAnalysis {
    pub indicator: String,
    pub total_tasks: usize,
    pub products: Vec<ProductAnalysis>,
}

/// Per-indicator metrics within an output performance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPerformance {
    pub indicator_id: i32,
    pub code: String,
    pub name: String,
    pub summary: DeliverySummary,
}

/// Output-level performance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputPerformance {
    pub output_number: i32,
    pub indicators: Vec<IndicatorPerformance>,
    pub summary: DeliverySummary,
}

/// Orchestrates row-source queries and the pure aggregation components.
#[derive(Clone)]
pub struct ReportingService {
    source: Arc<dyn RowSource>,
}

impl ReportingService {
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self { source }
    }

    /// The evaluation date: one fixed reference timezone, computed once per
    /// request so every classification within it agrees on "today".
    fn evaluation_date() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// The indicator×country product matrix. Filter validation happens in
    /// [`MatrixFilters`], before any query is issued.
    pub async fn product_matrix(
        &self,
        filters: &MatrixFilters,
    ) -> Result<ProductMatrix, ReportError> {
        let rows = self.source.fetch_matrix_rows(filters).await?;
        debug!(rows = rows.len(), "assembling product matrix");
        Ok(assemble(&rows))
    }

    /// Per-product delivery analysis for one indicator.
    pub async fn delivery_analysis(
        &self,
        indicator_code: &str,
    ) -> Result<DeliveryAnalysis, ReportError> {
        self.delivery_analysis_at(indicator_code, Self::evaluation_date())
            .await
    }

    pub async fn delivery_analysis_at(
        &self,
        indicator_code: &str,
        today: NaiveDate,
    ) -> Result<DeliveryAnalysis, ReportError> {
        let rows = self.source.fetch_indicator_tasks(indicator_code).await?;
        let total_tasks = rows.len();

        let products = group_by_product(rows)
            .into_iter()
            .map(|(product_id, product_name, tasks)| {
                let states: Vec<_> = tasks.iter().map(|t| classify_task(t, today)).collect();
                ProductAnalysis {
                    product_id,
                    product_name,
                    classification: classify_delivery(&states),
                }
            })
            .collect();

        Ok(DeliveryAnalysis {
            indicator: indicator_code.to_string(),
            total_tasks,
            products,
        })
    }

    /// Delivery classification for a single product.
    pub async fn product_delivery(
        &self,
        product_id: i32,
    ) -> Result<DeliveryClassification, ReportError> {
        self.product_delivery_at(product_id, Self::evaluation_date())
            .await
    }

    pub async fn product_delivery_at(
        &self,
        product_id: i32,
        today: NaiveDate,
    ) -> Result<DeliveryClassification, ReportError> {
        let tasks = self.source.fetch_product_tasks(product_id).await?;
        let states: Vec<_> = tasks.iter().map(|t| classify_task(t, today)).collect();
        Ok(classify_delivery(&states))
    }

    /// Per-indicator metrics for one output, plus the overall summary block.
    pub async fn output_performance(
        &self,
        output_number: i32,
        work_package_id: Option<i32>,
    ) -> Result<OutputPerformance, ReportError> {
        self.output_performance_at(output_number, work_package_id, Self::evaluation_date())
            .await
    }

    pub async fn output_performance_at(
        &self,
        output_number: i32,
        work_package_id: Option<i32>,
        today: NaiveDate,
    ) -> Result<OutputPerformance, ReportError> {
        let indicator_rows = self
            .source
            .fetch_output_indicators(output_number, work_package_id)
            .await?;

        // Per-indicator task fetches are independent, so they run
        // concurrently; any failure fails the whole request and no partial
        // report is returned.
        let task_sets = try_join_all(
            indicator_rows
                .iter()
                .map(|ind| self.source.fetch_indicator_tasks(&ind.code)),
        )
        .await?;

        let mut all_classifications = Vec::new();
        let mut indicators = Vec::new();

        for (ind, rows) in indicator_rows.iter().zip(task_sets) {
            let classifications: Vec<DeliveryClassification> = group_by_product(rows)
                .into_iter()
                .map(|(_, _, tasks)| {
                    let states: Vec<_> = tasks.iter().map(|t| classify_task(t, today)).collect();
                    classify_delivery(&states)
                })
                .collect();

            indicators.push(IndicatorPerformance {
                indicator_id: ind.indicator_id,
                code: ind.code.clone(),
                name: ind.name.clone(),
                summary: summarize(&classifications),
            });
            all_classifications.extend(classifications);
        }

        Ok(OutputPerformance {
            output_number,
            indicators,
            summary: summarize(&all_classifications),
        })
    }
}

/// Group indicator-scoped task rows by product, first-seen order preserved.
fn group_by_product(rows: Vec<ProductTaskRow>) -> Vec<(i32, String, Vec<TaskRow>)> {
    let mut pos: HashMap<i32, usize> = HashMap::new();
    let mut groups: Vec<(i32, String, Vec<TaskRow>)> = Vec::new();

    for row in rows {
        let idx = match pos.get(&row.product_id) {
            Some(&idx) => idx,
            None => {
                groups.push((row.product_id, row.product_name.clone(), Vec::new()));
                pos.insert(row.product_id, groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[idx].2.push(row.into_task());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_task(product_id: i32, task_id: i32) -> ProductTaskRow {
        ProductTaskRow {
            product_id,
            product_name: format!("Product {product_id}"),
            task_id,
            planned_end: None,
            actual_end: None,
            actual_start: None,
            status_name: None,
        }
    }

    #[test]
    fn grouping_preserves_first_seen_product_order() {
        let rows = vec![
            product_task(7, 1),
            product_task(3, 2),
            product_task(7, 3),
            product_task(3, 4),
        ];
        let groups = group_by_product(rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 7);
        assert_eq!(groups[0].2.len(), 2);
        assert_eq!(groups[1].0, 3);
        assert_eq!(groups[1].2.len(), 2);
    }
}
