use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{error::AppError, ValidationErrors};
use shared_utils::phone::{check_phone, require_phone};
use shared_utils::PhoneInput;

pub const PATIENTS_COLLECTION: &str = "patients";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePatientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<PhoneInput>,
    pub address: Option<String>,
}

/// A validated patient with its phone reduced to ten digits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPatient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl CreatePatientRequest {
    /// Email format is deliberately left to the client.
    pub fn validate(self) -> Result<NewPatient, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require("name", self.name.as_deref());
        errors.require("email", self.email.as_deref());
        let phone = require_phone(&mut errors, "phone", self.phone.as_ref());

        match phone {
            Some(phone) if errors.is_empty() => Ok(NewPatient {
                name: trimmed(self.name),
                email: trimmed(self.email),
                phone,
                address: trimmed(self.address),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<PhoneInput>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UpdatePatientRequest {
    pub fn validate(self) -> Result<PatientChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.is_some() {
            errors.require("name", self.name.as_deref());
        }
        if self.email.is_some() {
            errors.require("email", self.email.as_deref());
        }
        let phone = self
            .phone
            .as_ref()
            .and_then(|phone| check_phone(&mut errors, "phone", phone));

        errors.into_result()?;

        Ok(PatientChanges {
            name: self.name.map(|s| s.trim().to_string()),
            email: self.email.map(|s| s.trim().to_string()),
            phone,
            address: self.address.map(|s| s.trim().to_string()),
        })
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum PatientError {
    #[error("Patient not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PatientError {
    pub fn into_app_error(self, context: &str) -> AppError {
        match self {
            PatientError::NotFound => AppError::NotFound("Patient not found".to_string()),
            PatientError::Validation(errors) => AppError::ValidationError(errors),
            PatientError::Store(error) => error.into_app_error(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create(body: serde_json::Value) -> CreatePatientRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn formatted_phone_is_normalized() {
        let patient = create(json!({
            "name": "Jane Doe",
            "email": "jane@x.com",
            "phone": "(555) 123-4567",
            "address": ""
        }))
        .validate()
        .unwrap();

        assert_eq!(patient.phone, "5551234567");
    }

    #[test]
    fn numeric_phone_is_accepted() {
        let patient = create(json!({ "name": "Jane", "email": "j@x.com", "phone": 5551234567u64 }))
            .validate()
            .unwrap();

        assert_eq!(patient.phone, "5551234567");
        assert_eq!(patient.address, "");
    }

    #[test]
    fn email_format_is_not_checked() {
        assert!(create(json!({ "name": "Jane", "email": "not-an-email", "phone": "5551234567" }))
            .validate()
            .is_ok());
    }

    #[test]
    fn short_phone_and_missing_name_are_both_reported() {
        let errors = create(json!({ "email": "j@x.com", "phone": "555-1234" }))
            .validate()
            .unwrap_err();

        assert!(errors.has_field("name"));
        assert!(errors.has_field("phone"));
    }

    #[test]
    fn update_normalizes_provided_phone_only() {
        let request: UpdatePatientRequest =
            serde_json::from_value(json!({ "phone": "555.000.1111" })).unwrap();

        assert_eq!(
            serde_json::to_value(request.validate().unwrap()).unwrap(),
            json!({ "phone": "5550001111" })
        );
    }

    #[test]
    fn update_rejects_eleven_digits() {
        let request: UpdatePatientRequest =
            serde_json::from_value(json!({ "phone": "1-555-000-1111" })).unwrap();

        assert!(request.validate().unwrap_err().has_field("phone"));
    }
}
