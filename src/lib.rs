//! biotrack — reporting and aggregation engine for biodiversity-program
//! monitoring.
//!
//! The dashboard tracks products, tasks, indicators, and responsible parties
//! across work packages and countries. This crate is the reporting core: it
//! turns flat relational rows into an indicator×country product matrix and
//! per-product delivery-status classifications, served over a small REST API.
//!
//! Entity CRUD, authentication, and UI rendering live elsewhere; the only
//! collaborator this crate talks to is the row source (PostgreSQL via sqlx,
//! or an in-memory fake in tests).

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod reporting;

pub use error::ReportError;
