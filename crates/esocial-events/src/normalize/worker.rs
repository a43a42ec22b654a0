//! Non-periodic worker events. Admission (S-2200) and TSV start (S-2300)
//! only need the generic empty-field sweep; termination (S-2299)
//! additionally carries two optional notice dates.

use serde_json::{Map, Value};

use esocial_core::period::normalize_date;

use crate::payload::string_value;

pub(super) fn normalize_termination(fields: &mut Map<String, Value>) {
    for field in ["dtavprv", "dtprojfimapi"] {
        normalize_optional_date(fields, field);
    }
}

/// Optional date: re-serialized when parseable, dropped when not.
fn normalize_optional_date(fields: &mut Map<String, Value>, field: &str) {
    let Some(raw) = string_value(fields, field) else {
        return;
    };
    match normalize_date(&raw, field) {
        Ok(date) => {
            fields.insert(field.to_string(), Value::String(date.to_string()));
        }
        Err(_) => {
            fields.remove(field);
        }
    }
}
