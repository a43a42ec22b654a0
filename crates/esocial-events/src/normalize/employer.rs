//! S-1000 employer-registration normalization.
//!
//! The registration payload is the only one that is not pruned: its
//! `infocadastro` and `ideperiodo` sections are rebuilt field by field
//! instead, and the indicators always go out with explicit values.

use serde_json::{Map, Value};

use esocial_core::clock::Clock;
use esocial_core::error::ValidationError;
use esocial_core::period::{normalize_period, normalize_validity_start};

use crate::payload::{coerce_indicator, fold_alias, object_entry, required_string, string_value};

/// Reads the tax classification ahead of employer-identifier normalization,
/// which needs it to decide between root and full CNPJ forms.
pub(super) fn tax_classification(fields: &Map<String, Value>) -> Option<String> {
    let info = fields.get("infocadastro")?.as_object()?;
    string_value(info, "classtrib")
}

/// Older clients sent `inivalid` under `infocadastro`; the schema wants it
/// under `ideperiodo`. The legacy slot is always cleared, and its value wins
/// only when the canonical slot has none.
fn migrate_legacy_validity_start(fields: &mut Map<String, Value>) {
    let legacy = fields
        .get_mut("infocadastro")
        .and_then(Value::as_object_mut)
        .and_then(|info| info.remove("inivalid"));
    if let Some(value) = legacy {
        let periodo = object_entry(fields, "ideperiodo");
        if string_value(periodo, "inivalid").is_none() {
            periodo.insert("inivalid".to_string(), value);
        }
    }
}

pub(super) fn normalize(
    fields: &mut Map<String, Value>,
    clock: &dyn Clock,
) -> Result<(), ValidationError> {
    migrate_legacy_validity_start(fields);

    let info = object_entry(fields, "infocadastro");
    let classtrib = required_string(info, "classtrib")?;
    if classtrib.len() != 2 || !classtrib.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidField {
            field: "classtrib".to_string(),
            reason: format!("expected 2 numeric digits, got {classtrib:?}"),
        });
    }
    info.insert("classtrib".to_string(), Value::String(classtrib));

    fold_alias(info, "inddesfolha", "indDesFolha");
    fold_alias(info, "indoptregeletron", "indOptRegEletron");
    coerce_indicator(info, "inddesfolha", &[0, 1, 2], 0);
    coerce_indicator(info, "indoptregeletron", &[0, 1], 0);

    let periodo = object_entry(fields, "ideperiodo");
    let inivalid = required_string(periodo, "inivalid")?;
    let start = normalize_validity_start(&inivalid, "inivalid", 1, clock)?;
    periodo.insert("inivalid".to_string(), Value::String(start.to_string()));

    // fimvalid is optional; a malformed value is dropped, not rejected.
    if let Some(raw) = string_value(periodo, "fimvalid") {
        match normalize_period(&raw, "fimvalid") {
            Ok(end) => {
                periodo.insert("fimvalid".to_string(), Value::String(end.to_string()));
            }
            Err(_) => {
                periodo.remove("fimvalid");
            }
        }
    } else {
        periodo.remove("fimvalid");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    use super::*;

    struct TestClock(DateTime<Utc>);

    impl Clock for TestClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> TestClock {
        TestClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn run(payload: Value) -> Result<Map<String, Value>, ValidationError> {
        let mut fields = payload.as_object().unwrap().clone();
        normalize(&mut fields, &clock())?;
        Ok(fields)
    }

    #[test]
    fn test_missing_classification_is_rejected() {
        let err = run(json!({"ideperiodo": {"inivalid": "2025-06"}})).unwrap_err();
        assert_eq!(err.to_string(), "missing_field:classtrib");
    }

    #[test]
    fn test_classification_must_be_two_digits() {
        let err = run(json!({
            "infocadastro": {"classtrib": "8"},
            "ideperiodo": {"inivalid": "2025-06"}
        }))
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid_field:classtrib"));
    }

    #[test]
    fn test_numeric_classification_becomes_a_string() {
        let fields = run(json!({
            "infocadastro": {"classtrib": 85},
            "ideperiodo": {"inivalid": "2025-06"}
        }))
        .unwrap();
        assert_eq!(fields["infocadastro"]["classtrib"], json!("85"));
    }

    #[test]
    fn test_legacy_validity_start_is_migrated() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01", "inivalid": "2025-03"}
        }))
        .unwrap();
        assert_eq!(fields["ideperiodo"]["inivalid"], json!("2025-03"));
        assert!(fields["infocadastro"].get("inivalid").is_none());
    }

    #[test]
    fn test_canonical_validity_start_wins_over_legacy() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01", "inivalid": "2020-01"},
            "ideperiodo": {"inivalid": "2025-03"}
        }))
        .unwrap();
        assert_eq!(fields["ideperiodo"]["inivalid"], json!("2025-03"));
        assert!(fields["infocadastro"].get("inivalid").is_none());
    }

    #[test]
    fn test_missing_validity_start_is_rejected() {
        let err = run(json!({"infocadastro": {"classtrib": "01"}})).unwrap_err();
        assert_eq!(err.to_string(), "missing_field:inivalid");
    }

    #[test]
    fn test_malformed_validity_end_is_dropped() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01"},
            "ideperiodo": {"inivalid": "2025-06", "fimvalid": "2025-6"}
        }))
        .unwrap();
        assert!(fields["ideperiodo"].get("fimvalid").is_none());
    }

    #[test]
    fn test_valid_validity_end_is_kept() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01"},
            "ideperiodo": {"inivalid": "2025-06", "fimvalid": " 2025-12 "}
        }))
        .unwrap();
        assert_eq!(fields["ideperiodo"]["fimvalid"], json!("2025-12"));
    }

    #[test]
    fn test_camel_case_indicator_aliases_are_folded() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01", "indDesFolha": "1", "indOptRegEletron": 1},
            "ideperiodo": {"inivalid": "2025-06"}
        }))
        .unwrap();
        let info = fields["infocadastro"].as_object().unwrap();
        assert_eq!(info["inddesfolha"], json!(1));
        assert_eq!(info["indoptregeletron"], json!(1));
        assert!(info.get("indDesFolha").is_none());
        assert!(info.get("indOptRegEletron").is_none());
    }

    #[test]
    fn test_out_of_enum_indicators_take_defaults() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01", "inddesfolha": 7, "indoptregeletron": 9},
            "ideperiodo": {"inivalid": "2025-06"}
        }))
        .unwrap();
        let info = fields["infocadastro"].as_object().unwrap();
        assert_eq!(info["inddesfolha"], json!(0));
        assert_eq!(info["indoptregeletron"], json!(0));
    }

    #[test]
    fn test_absent_indicators_are_written_with_defaults() {
        let fields = run(json!({
            "infocadastro": {"classtrib": "01"},
            "ideperiodo": {"inivalid": "2025-06"}
        }))
        .unwrap();
        let info = fields["infocadastro"].as_object().unwrap();
        assert_eq!(info["inddesfolha"], json!(0));
        assert_eq!(info["indoptregeletron"], json!(0));
    }
}
