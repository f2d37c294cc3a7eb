//! Access layer.
//!
//! Each module pairs plain SQL functions that operate on a borrowed connection with a service
//! type that owns an `Arc<CoreConfig>` and runs every public operation as one unit of work.

pub mod consultations;
pub(crate) mod helpers;
pub mod lab_results;
pub mod patients;
pub mod reports;
pub mod vitals;
