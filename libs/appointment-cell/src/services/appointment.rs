use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{from_document, to_document, AppState, DocumentStore, SortBy};

use crate::models::{
    Appointment, AppointmentError, CreateAppointmentRequest, UpdateAppointmentRequest,
    APPOINTMENTS_COLLECTION,
};

pub struct AppointmentService {
    store: Arc<dyn DocumentStore>,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// All appointments, earliest first.
    pub async fn list_appointments(&self) -> Result<Vec<Appointment>, AppointmentError> {
        debug!("Listing appointments");

        let documents = self
            .store
            .find_all(APPOINTMENTS_COLLECTION, SortBy::ascending("dateTime"))
            .await?;

        documents
            .into_iter()
            .map(|document| from_document(document).map_err(AppointmentError::from))
            .collect()
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = request.validate()?;
        debug!(
            "Creating appointment for {} with {} at {}",
            appointment.patient_name, appointment.dentist_name, appointment.date_time
        );

        let stored = self
            .store
            .insert(APPOINTMENTS_COLLECTION, to_document(&appointment)?)
            .await?;

        let appointment: Appointment = from_document(stored)?;
        info!("Appointment created with ID: {}", appointment.id);

        Ok(appointment)
    }

    pub async fn get_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment: {}", appointment_id);

        let document = self
            .store
            .find_by_id(APPOINTMENTS_COLLECTION, appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        Ok(from_document(document)?)
    }

    pub async fn update_appointment(
        &self,
        appointment_id: &str,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!("Updating appointment: {}", appointment_id);

        let changes = request.validate()?;

        let document = self
            .store
            .update_by_id(APPOINTMENTS_COLLECTION, appointment_id, to_document(&changes)?)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        Ok(from_document(document)?)
    }

    pub async fn delete_appointment(&self, appointment_id: &str) -> Result<Appointment, AppointmentError> {
        debug!("Deleting appointment: {}", appointment_id);

        let document = self
            .store
            .delete_by_id(APPOINTMENTS_COLLECTION, appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        let appointment: Appointment = from_document(document)?;
        info!("Appointment {} deleted", appointment.id);

        Ok(appointment)
    }
}
