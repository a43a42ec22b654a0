//! Canonical forms for Brazilian tax identifiers.
//!
//! Employer identification uses the 8-digit CNPJ root, except for
//! public-entity tax classifications which keep the full 14-digit form.
//! Establishment and lotação identifiers embedded in remuneration events
//! always take the full 14-digit form. CPF values must resolve to exactly
//! 11 digits.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a CNPJ root, the prefix shared by all establishments of a
/// company.
pub const CNPJ_ROOT_LEN: usize = 8;

/// Length of a full CNPJ.
pub const CNPJ_FULL_LEN: usize = 14;

/// Length of a CPF.
pub const CPF_LEN: usize = 11;

/// Kind of tax identifier: `1` for CNPJ (company), `2` for CPF (individual)
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TaxIdKind {
    Cnpj,
    Cpf,
}

impl TryFrom<u8> for TaxIdKind {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Cnpj),
            2 => Ok(Self::Cpf),
            other => Err(format!("tax identifier kind must be 1 or 2, got {other}")),
        }
    }
}

impl From<TaxIdKind> for u8 {
    fn from(kind: TaxIdKind) -> Self {
        match kind {
            TaxIdKind::Cnpj => 1,
            TaxIdKind::Cpf => 2,
        }
    }
}

/// A canonicalized tax identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxIdentifier {
    pub kind: TaxIdKind,
    pub digits: String,
}

/// Strips everything but ASCII digits.
#[must_use]
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Public-entity tax classification codes keep the full CNPJ form; the
/// schema treats those legal entities as indivisible, unlike companies whose
/// establishments share a root.
fn is_public_entity(classification: Option<&str>) -> bool {
    classification
        .and_then(|code| code.trim().parse::<u8>().ok())
        .is_some_and(|code| (21..=33).contains(&code))
}

fn truncate_or_pad_left(digits: &str, len: usize) -> String {
    if digits.len() >= len {
        digits[..len].to_string()
    } else {
        format!("{digits:0>len$}")
    }
}

/// Canonicalizes an employer identifier.
///
/// CNPJ values reduce to the 8-digit root unless `classification` is a
/// public-entity code (21 through 33), in which case the full 14-digit form
/// is kept. CPF values must resolve to exactly 11 digits.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCpfLength`] when a CPF does not strip
/// down to 11 digits.
pub fn normalize_employer_tax_id(
    raw: &str,
    kind: TaxIdKind,
    classification: Option<&str>,
) -> Result<TaxIdentifier, ValidationError> {
    match kind {
        TaxIdKind::Cnpj => {
            let target = if is_public_entity(classification) {
                CNPJ_FULL_LEN
            } else {
                CNPJ_ROOT_LEN
            };
            let digits = truncate_or_pad_left(&digits_only(raw), target);
            Ok(TaxIdentifier { kind, digits })
        }
        TaxIdKind::Cpf => {
            let digits = normalize_cpf(raw, "nrInsc")?;
            Ok(TaxIdentifier { kind, digits })
        }
    }
}

/// Strips a CPF to digits and checks the 11-digit rule.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCpfLength`] naming `field` when the
/// digit count is not 11.
pub fn normalize_cpf(raw: &str, field: &str) -> Result<String, ValidationError> {
    let digits = digits_only(raw);
    if digits.len() == CPF_LEN {
        Ok(digits)
    } else {
        Err(ValidationError::InvalidCpfLength {
            field: field.to_string(),
            digits: digits.len(),
        })
    }
}

/// Canonicalizes an establishment or lotação identifier to the full
/// 14-digit form the schema validates there. An 8-digit root is
/// right-zero-padded; anything else is truncated or left-zero-padded.
#[must_use]
pub fn normalize_establishment_tax_id(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() == CNPJ_ROOT_LEN {
        format!("{digits:0<width$}", width = CNPJ_FULL_LEN)
    } else {
        truncate_or_pad_left(&digits, CNPJ_FULL_LEN)
    }
}
