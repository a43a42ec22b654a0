//! Table-event normalization (S-1005, S-1010, S-1020).
//!
//! Table maintenance carries a `modo` of `INC`, `ALT`, or `EXC`. The
//! replacement-validity block only makes sense for `ALT`, and an exclusion
//! must not resend the data section it is deleting. Everything else is
//! handled by the generic empty-field sweep.

use serde_json::{Map, Value};

use crate::payload::string_value;

fn mode(fields: &Map<String, Value>) -> Option<String> {
    string_value(fields, "modo")
}

fn strip_new_validity_unless_alt(fields: &mut Map<String, Value>) {
    if mode(fields).as_deref() != Some("ALT") {
        fields.remove("novavalidade");
    }
}

pub(super) fn normalize_establishment_table(fields: &mut Map<String, Value>) {
    strip_new_validity_unless_alt(fields);
    if mode(fields).as_deref() == Some("EXC") {
        fields.remove("dadosestab");
    }
}

pub(super) fn normalize_rubric_table(fields: &mut Map<String, Value>) {
    strip_new_validity_unless_alt(fields);
}

pub(super) fn normalize_lotacao_table(fields: &mut Map<String, Value>) {
    strip_new_validity_unless_alt(fields);
    if mode(fields).as_deref() == Some("EXC") {
        fields.remove("dadoslotacao");
    }
}
