use std::sync::Arc;

use tracing::{debug, info};

use shared_database::{from_document, to_document, AppState, DocumentStore, SortBy};

use crate::models::{CreateDentistRequest, Dentist, DentistError, UpdateDentistRequest, DENTISTS_COLLECTION};

pub struct DentistService {
    store: Arc<dyn DocumentStore>,
}

impl DentistService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// All dentists ordered by name.
    pub async fn list_dentists(&self) -> Result<Vec<Dentist>, DentistError> {
        debug!("Listing dentists");

        let documents = self
            .store
            .find_all(DENTISTS_COLLECTION, SortBy::ascending("name"))
            .await?;

        documents
            .into_iter()
            .map(|document| from_document(document).map_err(DentistError::from))
            .collect()
    }

    /// Create a new dentist profile
    pub async fn create_dentist(&self, request: CreateDentistRequest) -> Result<Dentist, DentistError> {
        let dentist = request.validate()?;
        debug!("Creating new dentist profile for: {}", dentist.name);

        let stored = self
            .store
            .insert(DENTISTS_COLLECTION, to_document(&dentist)?)
            .await?;

        let dentist: Dentist = from_document(stored)?;
        info!("Dentist profile created successfully with ID: {}", dentist.id);

        Ok(dentist)
    }

    /// Get dentist by ID
    pub async fn get_dentist(&self, dentist_id: &str) -> Result<Dentist, DentistError> {
        debug!("Fetching dentist profile: {}", dentist_id);

        let document = self
            .store
            .find_by_id(DENTISTS_COLLECTION, dentist_id)
            .await?
            .ok_or(DentistError::NotFound)?;

        Ok(from_document(document)?)
    }

    /// Update dentist profile
    pub async fn update_dentist(
        &self,
        dentist_id: &str,
        request: UpdateDentistRequest,
    ) -> Result<Dentist, DentistError> {
        debug!("Updating dentist profile: {}", dentist_id);

        // Build update object with only provided fields
        let changes = request.validate()?;

        let document = self
            .store
            .update_by_id(DENTISTS_COLLECTION, dentist_id, to_document(&changes)?)
            .await?
            .ok_or(DentistError::NotFound)?;

        Ok(from_document(document)?)
    }

    pub async fn delete_dentist(&self, dentist_id: &str) -> Result<(), DentistError> {
        debug!("Deleting dentist profile: {}", dentist_id);

        self.store
            .delete_by_id(DENTISTS_COLLECTION, dentist_id)
            .await?
            .ok_or(DentistError::NotFound)?;

        info!("Dentist profile {} deleted", dentist_id);
        Ok(())
    }
}
