use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{error::AppError, ValidationErrors};
use shared_utils::phone::{check_phone, require_phone, PHONE_LENGTH_MESSAGE};
use shared_utils::PhoneInput;

pub const DENTISTS_COLLECTION: &str = "dentists";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dentist {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub specialization: String,
    /// Years of experience; fractional values are allowed.
    pub experience: f64,
    /// Ten digits stored as a number; a leading zero does not survive.
    pub phone: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Years of experience as a JSON number or as the string a form field yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExperienceInput {
    Years(f64),
    Text(String),
}

impl ExperienceInput {
    fn is_blank(&self) -> bool {
        matches!(self, ExperienceInput::Text(text) if text.trim().is_empty())
    }

    fn years(&self) -> Option<f64> {
        match self {
            ExperienceInput::Years(years) => Some(*years),
            ExperienceInput::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDentistRequest {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<ExperienceInput>,
    pub phone: Option<PhoneInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDentist {
    pub name: String,
    pub specialization: String,
    pub experience: f64,
    pub phone: u64,
}

impl CreateDentistRequest {
    pub fn validate(self) -> Result<NewDentist, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require("name", self.name.as_deref());
        errors.require("specialization", self.specialization.as_deref());

        let experience = match &self.experience {
            Some(input) if !input.is_blank() => check_experience(&mut errors, input),
            _ => {
                errors.push("experience", "experience is required");
                None
            }
        };

        let phone = require_phone(&mut errors, "phone", self.phone.as_ref())
            .and_then(|digits| numeric_phone(&mut errors, &digits));

        match (experience, phone) {
            (Some(experience), Some(phone)) if errors.is_empty() => Ok(NewDentist {
                name: trimmed(self.name),
                specialization: trimmed(self.specialization),
                experience,
                phone,
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDentistRequest {
    pub name: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<ExperienceInput>,
    pub phone: Option<PhoneInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DentistChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<u64>,
}

impl UpdateDentistRequest {
    pub fn validate(self) -> Result<DentistChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.is_some() {
            errors.require("name", self.name.as_deref());
        }
        if self.specialization.is_some() {
            errors.require("specialization", self.specialization.as_deref());
        }

        let experience = self
            .experience
            .as_ref()
            .and_then(|input| check_experience(&mut errors, input));

        let phone = self
            .phone
            .as_ref()
            .and_then(|phone| check_phone(&mut errors, "phone", phone))
            .and_then(|digits| numeric_phone(&mut errors, &digits));

        errors.into_result()?;

        Ok(DentistChanges {
            name: self.name.map(|s| s.trim().to_string()),
            specialization: self.specialization.map(|s| s.trim().to_string()),
            experience,
            phone,
        })
    }
}

/// Experience must be a finite, non-negative number of years.
fn check_experience(errors: &mut ValidationErrors, input: &ExperienceInput) -> Option<f64> {
    match input.years() {
        Some(years) if !years.is_finite() => {
            errors.push("experience", "experience must be a number of years");
            None
        }
        Some(years) if years < 0.0 => {
            errors.push("experience", "experience cannot be negative");
            None
        }
        Some(years) => Some(years),
        None => {
            errors.push("experience", "experience must be a number of years");
            None
        }
    }
}

fn numeric_phone(errors: &mut ValidationErrors, digits: &str) -> Option<u64> {
    let phone = digits.parse().ok();
    if phone.is_none() {
        errors.push("phone", PHONE_LENGTH_MESSAGE);
    }
    phone
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum DentistError {
    #[error("Dentist not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DentistError {
    pub fn into_app_error(self, context: &str) -> AppError {
        match self {
            DentistError::NotFound => AppError::NotFound("Dentist not found".to_string()),
            DentistError::Validation(errors) => AppError::ValidationError(errors),
            DentistError::Store(error) => error.into_app_error(context),
        }
    }
}
