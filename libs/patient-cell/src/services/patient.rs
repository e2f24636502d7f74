use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{from_document, to_document, AppState, DocumentStore, SortBy};

use crate::models::{CreatePatientRequest, Patient, PatientError, UpdatePatientRequest, PATIENTS_COLLECTION};

pub struct PatientService {
    store: Arc<dyn DocumentStore>,
}

impl PatientService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn list_patients(&self) -> Result<Vec<Patient>, PatientError> {
        debug!("Listing patients");

        let documents = self
            .store
            .find_all(PATIENTS_COLLECTION, SortBy::ascending("name"))
            .await?;

        documents
            .into_iter()
            .map(|document| from_document(document).map_err(PatientError::from))
            .collect()
    }

    pub async fn create_patient(&self, request: CreatePatientRequest) -> Result<Patient, PatientError> {
        let patient = request.validate()?;
        debug!("Creating new patient profile for: {}", patient.email);

        let stored = self
            .store
            .insert(PATIENTS_COLLECTION, to_document(&patient)?)
            .await?;

        let patient: Patient = from_document(stored)?;
        info!("Patient profile created successfully with ID: {}", patient.id);

        Ok(patient)
    }

    pub async fn get_patient(&self, patient_id: &str) -> Result<Patient, PatientError> {
        debug!("Fetching patient profile: {}", patient_id);

        let document = self
            .store
            .find_by_id(PATIENTS_COLLECTION, patient_id)
            .await?
            .ok_or(PatientError::NotFound)?;

        Ok(from_document(document)?)
    }

    pub async fn update_patient(
        &self,
        patient_id: &str,
        request: UpdatePatientRequest,
    ) -> Result<Patient, PatientError> {
        debug!("Updating patient profile: {}", patient_id);

        let changes = request.validate()?;

        let document = self
            .store
            .update_by_id(PATIENTS_COLLECTION, patient_id, to_document(&changes)?)
            .await?
            .ok_or(PatientError::NotFound)?;

        Ok(from_document(document)?)
    }

    pub async fn delete_patient(&self, patient_id: &str) -> Result<(), PatientError> {
        debug!("Deleting patient profile: {}", patient_id);

        self.store
            .delete_by_id(PATIENTS_COLLECTION, patient_id)
            .await?
            .ok_or(PatientError::NotFound)?;

        info!("Patient profile {} deleted", patient_id);
        Ok(())
    }
}
