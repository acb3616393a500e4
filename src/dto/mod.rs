use time::{OffsetDateTime, format_description::well_known::Rfc3339};

pub mod catalog;
pub mod common;
pub mod health;
pub mod phase;
pub mod session;
pub mod sse;
pub mod validation;

pub(crate) fn format_timestamp(timestamp: OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
