//! S-1200 remuneration normalization, the deepest structure in the system:
//! demonstrative → establishment → remuneration period → pay item.

use serde_json::{Map, Value};

use esocial_core::error::ValidationError;
use esocial_core::period::normalize_period;
use esocial_core::tax_id::{TaxIdKind, normalize_cpf, normalize_establishment_tax_id};

use crate::payload::{coerce_indicator, required_string, tax_id_kind_value};

/// `indretif` value marking a rectification, which must cite the receipt of
/// the statement it replaces.
const RECTIFICATION: i64 = 2;

pub(super) fn normalize(fields: &mut Map<String, Value>) -> Result<(), ValidationError> {
    let perapur = required_string(fields, "perapur")?;
    let period = normalize_period(&perapur, "perapur")?;
    fields.insert("perapur".to_string(), Value::String(period.to_string()));

    if coerce_indicator(fields, "indretif", &[1, 2], 1) == RECTIFICATION {
        required_string(fields, "nrrecibo")?;
    } else {
        fields.remove("nrrecibo");
    }

    coerce_indicator(fields, "indapuracao", &[1, 2], 1);

    let cpftrab = required_string(fields, "cpftrab")?;
    let cpf = normalize_cpf(&cpftrab, "cpftrab")?;
    fields.insert("cpftrab".to_string(), Value::String(cpf));

    if let Some(Value::Array(demonstratives)) = fields.get_mut("dmdev") {
        for demonstrative in demonstratives.iter_mut() {
            normalize_demonstrative(demonstrative)?;
        }
    }
    Ok(())
}

fn normalize_demonstrative(demonstrative: &mut Value) -> Result<(), ValidationError> {
    let Some(Value::Array(establishments)) = demonstrative
        .get_mut("infoperapur")
        .and_then(|section| section.get_mut("ideestablot"))
    else {
        return Ok(());
    };
    for establishment in establishments.iter_mut() {
        if let Some(entry) = establishment.as_object_mut() {
            normalize_establishment(entry)?;
        }
    }
    Ok(())
}

fn normalize_establishment(entry: &mut Map<String, Value>) -> Result<(), ValidationError> {
    required_string(entry, "tpinsc")?;
    let number = required_string(entry, "nrinsc")?;
    // Establishment identifiers take the full 14-digit form, unlike the
    // employer's root form.
    if entry.get("tpinsc").and_then(tax_id_kind_value) == Some(TaxIdKind::Cnpj) {
        entry.insert(
            "nrinsc".to_string(),
            Value::String(normalize_establishment_tax_id(&number)),
        );
    }
    normalize_remunerations(entry)
}

fn normalize_remunerations(entry: &mut Map<String, Value>) -> Result<(), ValidationError> {
    let Some(Value::Array(remunerations)) = entry.get_mut("remunperapur") else {
        return Ok(());
    };
    for remuneration in remunerations.iter_mut() {
        let Some(Value::Array(items)) = remuneration.get_mut("itensremun") else {
            continue;
        };
        for item in items.iter_mut() {
            if let Some(item) = item.as_object_mut() {
                for key in ["codrubr", "idetabrubr", "vrrubr"] {
                    required_string(item, key)?;
                }
            }
        }
    }
    Ok(())
}
