use crate::error::AppError;
use crate::model::contact::Contact;
use crate::model::responses::{Campaign, MailingContainer, UploadResult, WeightUpdateResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

/// Interface for the mailing service
///
/// Every operation requires an authenticated session and fails with
/// `AppError::Unauthorized` before any network activity otherwise.
#[async_trait]
pub trait MailingService: Send + Sync {
    /// Lists the active campaigns of the company
    async fn listar_campanhas(&self) -> Result<Vec<Campaign>, AppError>;

    /// Lists campaigns filtered by name
    ///
    /// # Arguments
    /// * `filter` - Case-insensitive substring the name must contain, `None` keeps all
    /// * `only_active` - Drops campaigns explicitly flagged inactive
    async fn listar_campanhas_filtradas(
        &self,
        filter: Option<&str>,
        only_active: bool,
    ) -> Result<Vec<Campaign>, AppError>;

    /// Creates a mailing container for a campaign
    ///
    /// # Returns
    /// * The container, including the `mailing_id` assigned by the server
    async fn criar_mailing_container(
        &self,
        name: &str,
        campaign_id: u64,
    ) -> Result<MailingContainer, AppError>;

    /// Creates a mailing container carrying free-form metadata
    async fn criar_mailing_container_com_meta(
        &self,
        name: &str,
        campaign_id: u64,
        meta: Value,
    ) -> Result<MailingContainer, AppError>;

    /// Uploads contacts into a container as JSON
    async fn enviar_mailing_json(
        &self,
        mailing_id: u64,
        contacts: &[Contact],
    ) -> Result<UploadResult, AppError>;

    /// Uploads raw rows into a container
    async fn enviar_mailing_array(
        &self,
        mailing_id: u64,
        rows: &[Value],
    ) -> Result<UploadResult, AppError>;

    /// Uploads a CSV file into a container
    ///
    /// # Arguments
    /// * `mailing_id` - Target container
    /// * `path` - CSV file to send
    /// * `column_map` - Extra form fields mapping CSV columns to contact fields
    async fn enviar_mailing_csv(
        &self,
        mailing_id: u64,
        path: &Path,
        column_map: &[(String, String)],
    ) -> Result<UploadResult, AppError>;

    /// Sets the dialing weight of a container
    async fn ajustar_peso_mailing(
        &self,
        mailing_id: u64,
        weight: u32,
    ) -> Result<WeightUpdateResult, AppError>;
}
