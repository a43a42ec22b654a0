//! Domain error types.

use thiserror::Error;

/// Validation failures raised while normalizing an event payload.
///
/// Display strings start with a stable machine-readable code
/// (`missing_field:nrrecibo`, `bad_period_format`, ...) so HTTP clients can
/// match on the prefix of the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent, null, or empty.
    #[error("missing_field:{field}")]
    MissingField {
        /// Leaf name of the offending field.
        field: String,
    },

    /// A field is present but does not satisfy its format rule.
    #[error("invalid_field:{field}: {reason}")]
    InvalidField {
        /// Leaf name of the offending field.
        field: String,
        /// What the field should have looked like.
        reason: String,
    },

    /// A period field does not match `YYYY-MM`, or `YYYY-MM-DD` where a
    /// full date is expected.
    #[error("bad_period_format: {field} is {value:?}, expected {expected}")]
    BadPeriodFormat {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Period year outside the accepted window.
    #[error(
        "year_out_of_range: {field} has year {year}, accepted range is {min}..={max}",
        min = crate::period::YEAR_MIN,
        max = crate::period::YEAR_MAX
    )]
    YearOutOfRange { field: String, year: i32 },

    /// Period month outside `1..=12`.
    #[error("month_out_of_range: {field} has month {month}")]
    MonthOutOfRange { field: String, month: u32 },

    /// A CPF did not resolve to exactly 11 digits.
    #[error("invalid_cpf_length: {field} has {digits} digits, expected 11")]
    InvalidCpfLength { field: String, digits: usize },

    /// The event-type tag is not one of the supported codes.
    #[error("unsupported_event_type: {0}")]
    UnsupportedEventType(String),

    /// A batch mixes events from different submission groups.
    #[error("mixed_event_groups: batch mixes groups {first} and {second}")]
    MixedEventGroups { first: u8, second: u8 },
}

/// Top-level error taxonomy for the gateway.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Client-fixable input problem.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The gateway is not configured for the requested operation.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Persisted-settings storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The signing/transmission collaborator failed.
    #[error("transmission error: {0}")]
    Transmission(String),
}
