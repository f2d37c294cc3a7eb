//! Record identifiers.
//!
//! Every persisted entity (patients, vitals readings, lab results, consultations) is keyed by a
//! server-generated UUIDv4. Clients never choose identifiers; they only echo back ones the
//! server handed out.
//!
//! ## Canonical form
//! Identifiers are stored and displayed in the hyphenated lowercase form, for example
//! `550e8400-e29b-41d4-a716-446655440000`. Input parsing is lenient about representation
//! (hyphenated, simple, braced, uppercase) so that any UUID a client copied out of a
//! response can be pasted back, but the stored value is always canonical.

mod service;

pub use service::RecordId;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("invalid record id: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
