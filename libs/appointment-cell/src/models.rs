use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_database::StoreError;
use shared_models::{error::AppError, ValidationErrors};
use shared_utils::DateTimeInput;

pub const APPOINTMENTS_COLLECTION: &str = "appointments";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!(
                "status must be one of scheduled, completed, cancelled (got `{}`)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub patient_name: String,
    pub dentist_name: String,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_name: Option<String>,
    pub dentist_name: Option<String>,
    pub date_time: Option<DateTimeInput>,
    pub reason: Option<String>,
}

/// A validated appointment ready to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_name: String,
    pub dentist_name: String,
    pub date_time: DateTime<Utc>,
    pub reason: String,
    pub status: AppointmentStatus,
}

impl CreateAppointmentRequest {
    pub fn validate(self) -> Result<NewAppointment, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        errors.require("patientName", self.patient_name.as_deref());
        errors.require("dentistName", self.dentist_name.as_deref());

        let date_time = match &self.date_time {
            None => {
                errors.push("dateTime", "dateTime is required");
                None
            }
            Some(input) if input.is_blank() => {
                errors.push("dateTime", "dateTime is required");
                None
            }
            Some(input) => parse_date_time(&mut errors, input),
        };

        match date_time {
            Some(date_time) if errors.is_empty() => Ok(NewAppointment {
                patient_name: trimmed(self.patient_name),
                dentist_name: trimmed(self.dentist_name),
                date_time,
                reason: trimmed(self.reason),
                status: AppointmentStatus::default(),
            }),
            _ => Err(errors),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub patient_name: Option<String>,
    pub dentist_name: Option<String>,
    pub date_time: Option<DateTimeInput>,
    pub reason: Option<String>,
    pub status: Option<String>,
}

/// The subset of fields a PUT overwrites. Absent fields stay untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dentist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

impl UpdateAppointmentRequest {
    pub fn validate(self) -> Result<AppointmentChanges, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.patient_name.is_some() {
            errors.require("patientName", self.patient_name.as_deref());
        }
        if self.dentist_name.is_some() {
            errors.require("dentistName", self.dentist_name.as_deref());
        }

        let date_time = self
            .date_time
            .as_ref()
            .and_then(|input| parse_date_time(&mut errors, input));

        let status = match self.status.as_deref().map(AppointmentStatus::from_str) {
            Some(Ok(status)) => Some(status),
            Some(Err(message)) => {
                errors.push("status", message);
                None
            }
            None => None,
        };

        errors.into_result()?;

        Ok(AppointmentChanges {
            patient_name: self.patient_name.map(|s| s.trim().to_string()),
            dentist_name: self.dentist_name.map(|s| s.trim().to_string()),
            date_time,
            reason: self.reason.map(|s| s.trim().to_string()),
            status,
        })
    }
}

fn parse_date_time(errors: &mut ValidationErrors, input: &DateTimeInput) -> Option<DateTime<Utc>> {
    let parsed = input.parse();
    if parsed.is_none() {
        errors.push("dateTime", "dateTime is not a valid date");
    }
    parsed
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppointmentError {
    /// `context` names the failed operation in 500 responses.
    pub fn into_app_error(self, context: &str) -> AppError {
        match self {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::Validation(errors) => AppError::ValidationError(errors),
            AppointmentError::Store(error) => error.into_app_error(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn create(body: serde_json::Value) -> CreateAppointmentRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn create_defaults_reason_and_status() {
        let appointment = create(json!({
            "patientName": "  Jane Doe ",
            "dentistName": "Dr. Lee",
            "dateTime": "2025-06-01T10:30"
        }))
        .validate()
        .unwrap();

        assert_eq!(appointment.patient_name, "Jane Doe");
        assert_eq!(appointment.reason, "");
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.date_time.to_rfc3339(), "2025-06-01T10:30:00+00:00");
    }

    #[test]
    fn create_reports_every_missing_field() {
        let errors = create(json!({ "patientName": "", "reason": "checkup" }))
            .validate()
            .unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.has_field("patientName"));
        assert!(errors.has_field("dentistName"));
        assert!(errors.has_field("dateTime"));
    }

    #[test]
    fn create_rejects_unparseable_date() {
        let errors = create(json!({
            "patientName": "Jane",
            "dentistName": "Dr. Lee",
            "dateTime": "soon"
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors.fields()[0].message, "dateTime is not a valid date");
    }

    #[test]
    fn update_only_carries_provided_fields() {
        let request: UpdateAppointmentRequest =
            serde_json::from_value(json!({ "status": "completed" })).unwrap();
        let changes = request.validate().unwrap();

        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({ "status": "completed" })
        );
    }

    #[test]
    fn update_rejects_unknown_status_and_blank_names() {
        let request: UpdateAppointmentRequest =
            serde_json::from_value(json!({ "status": "lost", "patientName": " " })).unwrap();
        let errors = request.validate().unwrap_err();

        assert!(errors.has_field("status"));
        assert!(errors.has_field("patientName"));
    }

    #[test]
    fn stored_id_is_exposed_as_underscore_id() {
        let appointment: Appointment = serde_json::from_value(json!({
            "id": "abc",
            "patientName": "Jane",
            "dentistName": "Dr. Lee",
            "dateTime": "2025-06-01T10:30:00Z",
            "createdAt": "2025-05-01T00:00:00Z",
            "updatedAt": "2025-05-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        let wire = serde_json::to_value(&appointment).unwrap();
        assert_eq!(wire["_id"], "abc");
        assert!(wire.get("id").is_none());
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_matches!(
            AppointmentError::NotFound.into_app_error("Failed to fetch appointment"),
            AppError::NotFound(msg) if msg == "Appointment not found"
        );
    }
}
