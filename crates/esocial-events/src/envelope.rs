//! Canonical document assembly: normalized payload plus employer,
//! transmitter, and configuration context, ready for signing.

use serde::Serialize;
use serde_json::Value;

use esocial_core::clock::Clock;
use esocial_core::context::{
    EmployerContext, Environment, TransmitterContext, canonical_event_schema_version,
};
use esocial_core::error::ValidationError;
use esocial_core::tax_id::TaxIdKind;

use crate::event::{Event, EventGroup, EventType};
use crate::normalize;

/// Legal name used when the stored configuration has none.
const FALLBACK_LEGAL_NAME: &str = "Empresa";

/// Employer identification as transmitted: the root-form identifier.
#[derive(Debug, Clone, Serialize)]
pub struct EmployerEntry {
    #[serde(rename = "tpInsc")]
    pub kind: TaxIdKind,
    #[serde(rename = "nrInsc")]
    pub number: String,
    #[serde(rename = "nmRazao")]
    pub legal_name: String,
}

/// Transmitter identification: the full certificate-bound identifier, never
/// the possibly-truncated employer field.
#[derive(Debug, Clone, Serialize)]
pub struct TransmitterEntry {
    #[serde(rename = "tpInsc")]
    pub kind: TaxIdKind,
    #[serde(rename = "nrInsc")]
    pub number: String,
}

/// One event as handed to the signing/transmission collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct EventDocument {
    #[serde(rename = "tipo")]
    pub event_type: EventType,
    #[serde(rename = "grupo")]
    pub group: EventGroup,
    #[serde(rename = "tpAmb")]
    pub environment: Environment,
    #[serde(rename = "versaoEvento")]
    pub event_schema_version: String,
    #[serde(rename = "verProc")]
    pub process_version: String,
    #[serde(rename = "empregador")]
    pub employer: EmployerEntry,
    #[serde(rename = "transmissor")]
    pub transmitter: TransmitterEntry,
    #[serde(rename = "dados")]
    pub payload: Value,
}

/// Wraps an already-normalized payload with its submission context.
#[must_use]
pub fn build_envelope(
    event_type: EventType,
    payload: Value,
    employer: &EmployerContext,
    transmitter: &TransmitterContext,
) -> EventDocument {
    let legal_name = if employer.legal_name.trim().is_empty() {
        FALLBACK_LEGAL_NAME.to_string()
    } else {
        employer.legal_name.clone()
    };
    EventDocument {
        event_type,
        group: event_type.group(),
        environment: employer.environment,
        event_schema_version: canonical_event_schema_version(&employer.event_schema_version),
        process_version: employer.process_version.clone(),
        employer: EmployerEntry {
            kind: employer.tax_id.kind,
            number: employer.tax_id.digits.clone(),
            legal_name,
        },
        transmitter: TransmitterEntry {
            kind: transmitter.kind,
            number: transmitter.tax_id.clone(),
        },
        payload,
    }
}

/// A normalized, enveloped batch sharing one submission group.
#[derive(Debug, Clone, Serialize)]
pub struct PreparedBatch {
    pub group: EventGroup,
    pub documents: Vec<EventDocument>,
}

/// Normalizes and envelopes a batch in input order.
///
/// All-or-nothing: the first event that fails normalization aborts the whole
/// batch, and every event must resolve to the same submission group.
///
/// # Errors
///
/// [`ValidationError::MissingField`] on `eventos` when the batch is empty,
/// [`ValidationError::MixedEventGroups`] when groups diverge, plus whatever
/// normalization raises for the first failing event.
pub fn prepare_batch(
    events: Vec<Event>,
    employer: &EmployerContext,
    transmitter: &TransmitterContext,
    clock: &dyn Clock,
) -> Result<PreparedBatch, ValidationError> {
    let mut group: Option<EventGroup> = None;
    let mut documents = Vec::with_capacity(events.len());
    for event in events {
        let event_type = event.event_type;
        let event_group = event_type.group();
        match group {
            None => group = Some(event_group),
            Some(expected) if expected != event_group => {
                return Err(ValidationError::MixedEventGroups {
                    first: expected.number(),
                    second: event_group.number(),
                });
            }
            Some(_) => {}
        }
        let payload = normalize::normalize(event, clock)?;
        documents.push(build_envelope(event_type, payload, employer, transmitter));
    }
    let Some(group) = group else {
        return Err(ValidationError::MissingField {
            field: "eventos".to_string(),
        });
    };
    Ok(PreparedBatch { group, documents })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;

    use esocial_core::tax_id::TaxIdentifier;

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

    fn employer() -> EmployerContext {
        EmployerContext {
            tax_id: TaxIdentifier {
                kind: TaxIdKind::Cnpj,
                digits: "12345678".to_string(),
            },
            legal_name: "Empresa Exemplo Ltda".to_string(),
            environment: Environment::Staging,
            event_schema_version: "S.1.3.0".to_string(),
            process_version: "SISTEMA-RH-1.0".to_string(),
        }
    }

    fn transmitter() -> TransmitterContext {
        TransmitterContext::from_raw("12345678000195")
    }

    fn admission(worker_name: &str) -> Event {
        Event {
            event_type: EventType::S2200,
            payload: json!({"nmtrab": worker_name}),
        }
    }

    #[test]
    fn test_envelope_keeps_root_employer_and_full_transmitter() {
        let document = build_envelope(
            EventType::S2200,
            json!({}),
            &employer(),
            &transmitter(),
        );
        assert_eq!(document.employer.number, "12345678");
        assert_eq!(document.transmitter.number, "12345678000195");
    }

    #[test]
    fn test_envelope_serializes_with_wire_names() {
        let document = build_envelope(
            EventType::S1200,
            json!({"perapur": "2025-12"}),
            &employer(),
            &transmitter(),
        );
        let wire = serde_json::to_value(&document).unwrap();
        assert_eq!(wire["tipo"], json!("S-1200"));
        assert_eq!(wire["grupo"], json!(3));
        assert_eq!(wire["tpAmb"], json!(2));
        assert_eq!(wire["versaoEvento"], json!("S.1.3.0"));
        assert_eq!(wire["empregador"]["tpInsc"], json!(1));
        assert_eq!(wire["empregador"]["nmRazao"], json!("Empresa Exemplo Ltda"));
        assert_eq!(wire["transmissor"]["nrInsc"], json!("12345678000195"));
        assert_eq!(wire["dados"]["perapur"], json!("2025-12"));
    }

    #[test]
    fn test_legacy_schema_version_is_coerced() {
        let mut context = employer();
        context.event_schema_version = "2.5.0".to_string();
        let document = build_envelope(EventType::S2200, json!({}), &context, &transmitter());
        assert_eq!(document.event_schema_version, "S.1.3.0");
    }

    #[test]
    fn test_blank_legal_name_falls_back() {
        let mut context = employer();
        context.legal_name = "  ".to_string();
        let document = build_envelope(EventType::S2200, json!({}), &context, &transmitter());
        assert_eq!(document.employer.legal_name, "Empresa");
    }

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = prepare_batch(vec![], &employer(), &transmitter(), &clock()).unwrap_err();
        assert_eq!(err.to_string(), "missing_field:eventos");
    }

    #[test]
    fn test_mixed_groups_are_rejected_before_normalizing_the_offender() {
        let events = vec![
            admission("Ana"),
            Event {
                event_type: EventType::S1200,
                // Would fail normalization, but the group check comes first.
                payload: json!({}),
            },
        ];
        let err = prepare_batch(events, &employer(), &transmitter(), &clock()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MixedEventGroups {
                first: 2,
                second: 3,
            }
        );
    }

    #[test]
    fn test_same_group_batch_produces_one_document_per_event() {
        let events = vec![admission("Ana"), admission("Bruno")];
        let batch = prepare_batch(events, &employer(), &transmitter(), &clock()).unwrap();
        assert_eq!(batch.group, EventGroup::NonPeriodic);
        assert_eq!(batch.documents.len(), 2);
        assert_eq!(batch.documents[1].payload["nmtrab"], json!("Bruno"));
    }

    #[test]
    fn test_first_failing_event_aborts_the_batch() {
        let events = vec![
            admission("Ana"),
            Event {
                event_type: EventType::S2299,
                payload: json!("not an object"),
            },
        ];
        let err = prepare_batch(events, &employer(), &transmitter(), &clock()).unwrap_err();
        assert!(err.to_string().starts_with("invalid_field:dados"));
    }
}
