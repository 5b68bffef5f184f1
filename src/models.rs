//! Row types fetched from the relational store.
//!
//! These are flat, denormalized query results. Indicator and country columns
//! come from LEFT JOINs and are therefore nullable; the aggregation code
//! treats a missing coordinate as "contributes nothing to that axis".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the matrix join: product × indicator × country.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatrixRow {
    pub product_id: i32,
    pub product_name: String,
    pub country_id: Option<i32>,
    pub country_name: Option<String>,
    pub indicator_id: Option<i32>,
    pub indicator_code: Option<String>,
    pub indicator_name: Option<String>,
    pub output_number: Option<i32>,
    pub delivery_date: Option<NaiveDate>,
    pub owner_name: Option<String>,
}

/// One task of a product, with its status name joined in.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TaskRow {
    pub task_id: i32,
    pub planned_end: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub actual_start: Option<NaiveDate>,
    pub status_name: Option<String>,
}

/// A task row scoped to an indicator fetch, carrying its owning product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductTaskRow {
    pub product_id: i32,
    pub product_name: String,
    pub task_id: i32,
    pub planned_end: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub actual_start: Option<NaiveDate>,
    pub status_name: Option<String>,
}

impl ProductTaskRow {
    pub fn into_task(self) -> TaskRow {
        TaskRow {
            task_id: self.task_id,
            planned_end: self.planned_end,
            actual_end: self.actual_end,
            actual_start: self.actual_start,
            status_name: self.status_name,
        }
    }
}

/// One indicator of an output.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IndicatorRow {
    pub indicator_id: i32,
    pub code: String,
    pub name: String,
    pub output_number: Option<i32>,
}
