//! Per-event-type normalization procedures.
//!
//! One terminal procedure per type tag, dispatched here. Every procedure
//! first canonicalizes the payload's own employer block, then applies its
//! type-specific rules, then (S-1000 excepted) hands the tree to the
//! empty-field pruner. Procedures receive only their own payload; there is
//! no shared mutable state between events.

mod employer;
mod payroll;
mod tables;
mod worker;

use serde_json::{Map, Value};

use esocial_core::clock::Clock;
use esocial_core::error::ValidationError;
use esocial_core::tax_id::normalize_employer_tax_id;

use crate::event::{Event, EventType};
use crate::payload::{as_object_mut, string_value, tax_id_kind_value};
use crate::prune::prune;

/// Runs the procedure for the event's type and returns the canonical
/// payload. The first failure aborts the event; nothing partial escapes.
///
/// # Errors
///
/// Any [`ValidationError`] raised by the type's procedure, plus
/// [`ValidationError::InvalidField`] on `dados` when the payload is not a
/// JSON object.
pub fn normalize(event: Event, clock: &dyn Clock) -> Result<Value, ValidationError> {
    let Event {
        event_type,
        mut payload,
    } = event;
    let fields = as_object_mut(&mut payload, "dados")?;

    // S-1000 carries the tax classification that decides between root and
    // full CNPJ forms; every other type always produces the root form.
    let classification = if event_type == EventType::S1000 {
        employer::tax_classification(fields)
    } else {
        None
    };
    normalize_employer_block(fields, classification.as_deref())?;

    match event_type {
        EventType::S1000 => employer::normalize(fields, clock)?,
        EventType::S1005 => tables::normalize_establishment_table(fields),
        EventType::S1010 => tables::normalize_rubric_table(fields),
        EventType::S1020 => tables::normalize_lotacao_table(fields),
        EventType::S1200 => payroll::normalize(fields)?,
        EventType::S2299 => worker::normalize_termination(fields),
        // Admission and TSV payloads only need the generic sweep below.
        EventType::S2200 | EventType::S2300 => {}
    }

    if event_type != EventType::S1000 {
        prune(&mut payload);
    }
    Ok(payload)
}

/// Canonicalizes the `ideEmpregador` block every event type carries. CNPJ
/// identifiers are rewritten per the employer rule; CPF identifiers must
/// resolve to 11 digits. Payloads without the block, or without a
/// recognizable kind or number, pass through untouched.
fn normalize_employer_block(
    fields: &mut Map<String, Value>,
    classification: Option<&str>,
) -> Result<(), ValidationError> {
    let Some(Value::Object(block)) = fields.get_mut("ideEmpregador") else {
        return Ok(());
    };
    let Some(kind) = block.get("tpInsc").and_then(tax_id_kind_value) else {
        return Ok(());
    };
    let Some(raw) = string_value(block, "nrInsc") else {
        return Ok(());
    };
    let id = normalize_employer_tax_id(&raw, kind, classification)?;
    block.insert("nrInsc".to_string(), Value::String(id.digits));
    Ok(())
}
