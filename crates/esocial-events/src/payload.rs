//! Small helpers shared by the per-type normalizers. Event payloads stay as
//! `serde_json::Value` trees end to end, so these wrap the recurring access
//! patterns: read-a-string-or-number, coerce an indicator into its enum,
//! fold a field alias onto its canonical name.

use serde_json::{Map, Value};

use esocial_core::error::ValidationError;
use esocial_core::tax_id::TaxIdKind;

/// Mutable view of a field that must hold an object.
pub(crate) fn as_object_mut<'a>(
    value: &'a mut Value,
    field: &str,
) -> Result<&'a mut Map<String, Value>, ValidationError> {
    value
        .as_object_mut()
        .ok_or_else(|| ValidationError::InvalidField {
            field: field.to_string(),
            reason: "expected a JSON object".to_string(),
        })
}

/// Reads a field as text. Strings are trimmed and empty ones count as absent;
/// numbers are accepted and stringified since clients send identifiers both
/// ways. Everything else counts as absent.
pub(crate) fn string_value(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Like [`string_value`] but absence is a validation error on `key`.
pub(crate) fn required_string(
    fields: &Map<String, Value>,
    key: &str,
) -> Result<String, ValidationError> {
    string_value(fields, key).ok_or_else(|| ValidationError::MissingField {
        field: key.to_string(),
    })
}

/// Reads an indicator value sent either as a number or as numeric text.
pub(crate) fn indicator_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a tax-ID kind indicator (1 = CNPJ, 2 = CPF).
pub(crate) fn tax_id_kind_value(value: &Value) -> Option<TaxIdKind> {
    match indicator_value(value)? {
        1 => Some(TaxIdKind::Cnpj),
        2 => Some(TaxIdKind::Cpf),
        _ => None,
    }
}

/// Coerces `key` into one of `allowed`, writing the result back so the
/// outgoing payload always carries a valid numeric indicator. Absent,
/// malformed, and out-of-enum values all fall back to `default`.
pub(crate) fn coerce_indicator(
    fields: &mut Map<String, Value>,
    key: &str,
    allowed: &[i64],
    default: i64,
) -> i64 {
    let coerced = fields
        .get(key)
        .and_then(indicator_value)
        .filter(|candidate| allowed.contains(candidate))
        .unwrap_or(default);
    fields.insert(key.to_string(), Value::from(coerced));
    coerced
}

/// Moves `alias` onto `canonical` when the canonical spelling is absent.
/// The alias is removed either way.
pub(crate) fn fold_alias(fields: &mut Map<String, Value>, canonical: &str, alias: &str) {
    if let Some(value) = fields.remove(alias) {
        fields.entry(canonical.to_string()).or_insert(value);
    }
}

/// Mutable view of the object under `key`, created when absent. A present
/// non-object value is replaced, normalization owns these sections.
pub(crate) fn object_entry<'a>(
    fields: &'a mut Map<String, Value>,
    key: &str,
) -> &'a mut Map<String, Value> {
    let slot = fields
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(object) => object,
        // Just replaced with an object above.
        _ => unreachable!(),
    }
}
