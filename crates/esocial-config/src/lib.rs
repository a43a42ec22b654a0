//! Persisted gateway configuration: emission settings, employer identity,
//! and certificate material, mirroring the JSON settings file section for
//! section.

pub mod store;

use serde::{Deserialize, Serialize};

use esocial_core::context::{
    EmployerContext, Environment, LATEST_EVENT_SCHEMA_VERSION, TransmitterContext,
};
use esocial_core::error::{DomainError, ValidationError};
use esocial_core::tax_id::{TaxIdKind, normalize_employer_tax_id};

fn default_process_version() -> String {
    "SISTEMA-RH-1.0".to_string()
}

fn default_event_schema_version() -> String {
    LATEST_EVENT_SCHEMA_VERSION.to_string()
}

fn default_service_version() -> String {
    "1.5.0".to_string()
}

/// Employer section of the stored configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerSection {
    #[serde(rename = "tpInsc", default = "EmployerSection::default_kind")]
    pub kind: TaxIdKind,
    #[serde(rename = "nrInsc", default)]
    pub number: String,
    #[serde(rename = "nmRazao", default)]
    pub legal_name: String,
}

impl EmployerSection {
    fn default_kind() -> TaxIdKind {
        TaxIdKind::Cnpj
    }
}

impl Default for EmployerSection {
    fn default() -> Self {
        Self {
            kind: Self::default_kind(),
            number: String::new(),
            legal_name: String::new(),
        }
    }
}

/// Certificate material: base64 PKCS#12 bytes plus their password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateSection {
    #[serde(default)]
    pub pfx: String,
    #[serde(default)]
    pub password: String,
}

/// The stored service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(rename = "tpAmb", default)]
    pub environment: Environment,
    #[serde(rename = "verProc", default = "default_process_version")]
    pub process_version: String,
    #[serde(rename = "eventoVersion", default = "default_event_schema_version")]
    pub event_schema_version: String,
    #[serde(rename = "serviceVersion", default = "default_service_version")]
    pub service_version: String,
    #[serde(rename = "empregador", default)]
    pub employer: EmployerSection,
    #[serde(rename = "certificate", default)]
    pub certificate: CertificateSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            process_version: default_process_version(),
            event_schema_version: default_event_schema_version(),
            service_version: default_service_version(),
            employer: EmployerSection::default(),
            certificate: CertificateSection::default(),
        }
    }
}

impl ServiceConfig {
    /// Applies a partial update. Present sections replace their stored
    /// counterparts wholesale; absent sections keep their stored values.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingField`] when the update does not restate the
    /// employer identifier; every save must carry it.
    pub fn merged_with(&self, update: ConfigUpdate) -> Result<Self, ValidationError> {
        let identifier_missing = update
            .employer
            .as_ref()
            .is_none_or(|section| section.number.trim().is_empty());
        if identifier_missing {
            return Err(ValidationError::MissingField {
                field: "empregador.nrInsc".to_string(),
            });
        }

        let mut merged = self.clone();
        if let Some(environment) = update.environment {
            merged.environment = environment;
        }
        if let Some(process_version) = update.process_version {
            merged.process_version = process_version;
        }
        if let Some(event_schema_version) = update.event_schema_version {
            merged.event_schema_version = event_schema_version;
        }
        if let Some(service_version) = update.service_version {
            merged.service_version = service_version;
        }
        if let Some(employer) = update.employer {
            merged.employer = employer;
        }
        if let Some(certificate) = update.certificate {
            merged.certificate = certificate;
        }
        Ok(merged)
    }

    /// Copy for presentation with the certificate password masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.certificate.password = "***".to_string();
        copy
    }

    /// Certificate material for submission.
    ///
    /// # Errors
    ///
    /// [`DomainError::Configuration`] when the material or its password is
    /// missing.
    pub fn require_certificate(&self) -> Result<&CertificateSection, DomainError> {
        if self.certificate.pfx.trim().is_empty() || self.certificate.password.is_empty() {
            return Err(DomainError::Configuration(
                "digital certificate not configured".to_string(),
            ));
        }
        Ok(&self.certificate)
    }

    /// Employer context for envelope building, with the stored identifier
    /// reduced to its canonical employer form.
    ///
    /// # Errors
    ///
    /// [`DomainError::Configuration`] when no employer identifier is stored;
    /// [`DomainError::Validation`] when a stored CPF has the wrong length.
    pub fn employer_context(&self) -> Result<EmployerContext, DomainError> {
        let raw = self.employer.number.trim();
        if raw.is_empty() {
            return Err(DomainError::Configuration(
                "employer identifier not configured".to_string(),
            ));
        }
        let tax_id = normalize_employer_tax_id(raw, self.employer.kind, None)?;
        Ok(EmployerContext {
            tax_id,
            legal_name: self.employer.legal_name.clone(),
            environment: self.environment,
            event_schema_version: self.event_schema_version.clone(),
            process_version: self.process_version.clone(),
        })
    }

    /// Transmitter context, captured from the stored identifier before any
    /// truncation.
    #[must_use]
    pub fn transmitter_context(&self) -> TransmitterContext {
        TransmitterContext::from_raw(&self.employer.number)
    }
}

/// Partial configuration as accepted by the save endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigUpdate {
    #[serde(rename = "tpAmb")]
    pub environment: Option<Environment>,
    #[serde(rename = "verProc")]
    pub process_version: Option<String>,
    #[serde(rename = "eventoVersion")]
    pub event_schema_version: Option<String>,
    #[serde(rename = "serviceVersion")]
    pub service_version: Option<String>,
    #[serde(rename = "empregador")]
    pub employer: Option<EmployerSection>,
    #[serde(rename = "certificate")]
    pub certificate: Option<CertificateSection>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn update(value: serde_json::Value) -> ConfigUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_json_deserializes_to_defaults() {
        let config: ServiceConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.process_version, "SISTEMA-RH-1.0");
        assert_eq!(config.event_schema_version, "S.1.3.0");
        assert_eq!(config.service_version, "1.5.0");
    }

    #[test]
    fn test_config_serializes_with_wire_names() {
        let wire = serde_json::to_value(ServiceConfig::default()).unwrap();
        assert_eq!(wire["tpAmb"], json!(2));
        assert_eq!(wire["verProc"], json!("SISTEMA-RH-1.0"));
        assert_eq!(wire["empregador"]["tpInsc"], json!(1));
        assert_eq!(wire["certificate"]["pfx"], json!(""));
    }

    #[test]
    fn test_update_without_employer_identifier_is_rejected() {
        let err = ServiceConfig::default()
            .merged_with(update(json!({"tpAmb": 1})))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing_field:empregador.nrInsc");
    }

    #[test]
    fn test_present_sections_replace_absent_sections_stay() {
        let mut stored = ServiceConfig::default();
        stored.certificate.pfx = "MIIBAA==".to_string();
        stored.certificate.password = "secret".to_string();

        let merged = stored
            .merged_with(update(json!({
                "tpAmb": 1,
                "empregador": {"nrInsc": "12345678000195", "nmRazao": "Empresa Exemplo Ltda"}
            })))
            .unwrap();

        assert_eq!(merged.environment, Environment::Production);
        assert_eq!(merged.employer.number, "12345678000195");
        assert_eq!(merged.employer.kind, TaxIdKind::Cnpj);
        assert_eq!(merged.certificate.pfx, "MIIBAA==");
        assert_eq!(merged.certificate.password, "secret");
    }

    #[test]
    fn test_redacted_masks_the_password() {
        let mut stored = ServiceConfig::default();
        stored.certificate.password = "secret".to_string();
        assert_eq!(stored.redacted().certificate.password, "***");
        assert_eq!(stored.certificate.password, "secret");
    }

    #[test]
    fn test_missing_certificate_is_a_configuration_error() {
        let err = ServiceConfig::default().require_certificate().unwrap_err();
        assert!(err.to_string().contains("certificate not configured"));
    }

    #[test]
    fn test_employer_context_roots_the_identifier() {
        let mut stored = ServiceConfig::default();
        stored.employer.number = "12.345.678/0001-95".to_string();
        stored.employer.legal_name = "Empresa Exemplo Ltda".to_string();

        let context = stored.employer_context().unwrap();
        assert_eq!(context.tax_id.digits, "12345678");

        let transmitter = stored.transmitter_context();
        assert_eq!(transmitter.tax_id, "12345678000195");
    }

    #[test]
    fn test_unconfigured_employer_is_a_configuration_error() {
        let err = ServiceConfig::default().employer_context().unwrap_err();
        assert!(err.to_string().contains("employer identifier"));
    }
}
