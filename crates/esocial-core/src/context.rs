//! Employer and transmitter context attached to outgoing documents.

use serde::{Deserialize, Serialize};

use crate::tax_id::{CPF_LEN, TaxIdKind, TaxIdentifier, digits_only};

/// Latest event schema version the gateway emits.
pub const LATEST_EVENT_SCHEMA_VERSION: &str = "S.1.3.0";

/// Target environment flag: `1` production, `2` staging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Environment {
    Production,
    Staging,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Staging
    }
}

impl TryFrom<u8> for Environment {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Production),
            2 => Ok(Self::Staging),
            other => Err(format!("environment must be 1 or 2, got {other}")),
        }
    }
}

impl From<Environment> for u8 {
    fn from(environment: Environment) -> Self {
        match environment {
            Environment::Production => 1,
            Environment::Staging => 2,
        }
    }
}

/// Employer identity and emission settings for envelope building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployerContext {
    pub tax_id: TaxIdentifier,
    pub legal_name: String,
    pub environment: Environment,
    pub event_schema_version: String,
    pub process_version: String,
}

/// Transmitter identity bound to the signing certificate.
///
/// Carries the full, undigested identifier; truncating it breaks the
/// government-side match against the certificate subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmitterContext {
    pub kind: TaxIdKind,
    pub tax_id: String,
}

impl TransmitterContext {
    /// Builds the context from a raw identifier, inferring the kind from the
    /// digit count: 11 digits is a CPF, anything else is treated as a CNPJ.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let digits = digits_only(raw);
        let kind = if digits.len() == CPF_LEN {
            TaxIdKind::Cpf
        } else {
            TaxIdKind::Cnpj
        };
        Self {
            kind,
            tax_id: digits,
        }
    }
}

/// Coerces a stored schema version onto the supported canonical format.
///
/// Values already matching `S.<n>.<n>.<n>` pass through; the legacy bare
/// numeric form and anything unrecognized fall back to the latest supported
/// version.
#[must_use]
pub fn canonical_event_schema_version(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_canonical_version(trimmed) {
        trimmed.to_string()
    } else {
        LATEST_EVENT_SCHEMA_VERSION.to_string()
    }
}

fn is_canonical_version(value: &str) -> bool {
    let mut parts = value.split('.');
    if parts.next() != Some("S") {
        return false;
    }
    let numeric =
        |part: Option<&str>| part.is_some_and(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()));
    numeric(parts.next()) && numeric(parts.next()) && numeric(parts.next()) && parts.next().is_none()
}
