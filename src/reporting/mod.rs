//! The reporting and aggregation core.
//!
//! Pure computation over already-fetched rows: nothing in here performs I/O
//! except [`service::ReportingService`], which orchestrates row-source
//! queries and feeds the pure components. No state survives a request.

pub mod classify;
pub mod delivery;
pub mod index;
pub mod matrix;
pub mod service;
pub mod summary;

pub use classify::{classify_task, TaskState};
pub use delivery::{classify_delivery, DeliveryClassification, DeliveryStatus};
pub use index::{build_indices, CountryRef, IndicatorRef};
pub use matrix::{assemble, ProductMatrix, ProductRef};
pub use service::ReportingService;
pub use summary::{summarize, DeliverySummary};
