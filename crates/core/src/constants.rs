//! Constants used throughout the core crate.

/// Database file used when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "neurocase.db";

/// How long a connection waits on a locked database before failing, in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Largest page `list_patients` will return; larger requests are clamped.
pub const MAX_PAGE_LIMIT: u32 = 1_000;

pub const PATIENTS_TABLE: &str = "patients";
pub const VITALS_TABLE: &str = "vitals";
pub const LAB_RESULTS_TABLE: &str = "lab_results";
pub const CONSULTATION_TABLE: &str = "neurologist_consultation";

/// Highest attainable NIH Stroke Scale total.
pub const NIHSS_MAX: i32 = 42;

/// Upper bound accepted for a patient's age in years.
pub const AGE_MAX: i32 = 150;
