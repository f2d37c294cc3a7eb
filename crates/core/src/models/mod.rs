//! Entity shapes.
//!
//! Each entity has a *create* projection (what a client sends, never carrying an id) and a
//! *public* projection (what the server returns: the create fields plus the assigned id and,
//! for child records, the owning patient id). The public projection flattens the create
//! struct, so the two can never drift apart.

pub mod consultation;
pub mod lab_results;
pub mod patient;
pub mod report;
pub mod vitals;

pub use consultation::{NeurologistConsultationCreate, NeurologistConsultationPublic};
pub use lab_results::{LabResultsCreate, LabResultsPublic};
pub use patient::{PatientCreate, PatientPublic, PatientUpdate, PatientsPublic};
pub use report::AllReportData;
pub use vitals::{VitalsCreate, VitalsPublic};
