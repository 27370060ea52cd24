/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::application::auth::AuthClient;
use crate::application::services::MailingService;
use crate::error::AppError;
use crate::model::contact::Contact;
use crate::model::endpoint::Operation;
use crate::model::http::{FilePart, RequestBody};
use crate::model::requests::{
    AdjustWeightRequest, CreateMailingRequest, UploadContactsRequest, UploadRowsRequest,
};
use crate::model::responses::{
    Campaign, MailingContainer, UploadResult, WeightUpdateResult, campaigns_from, decode_object,
    extract_mailing_id,
};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Callback invoked after a mailing container is created
pub type MailingCreatedHook = Box<dyn Fn(&MailingContainer) + Send + Sync>;

/// Mailing operations on top of an authenticated [`AuthClient`]
///
/// Holds no session of its own: every call borrows the token of the shared
/// auth client, so a rejected token clears that client's session.
pub struct MailingClient {
    auth: Arc<AuthClient>,
    on_mailing_created: Option<MailingCreatedHook>,
    created: RwLock<Vec<u64>>,
}

impl MailingClient {
    /// Creates a mailing client bound to `auth`
    pub fn new(auth: Arc<AuthClient>) -> Self {
        Self {
            auth,
            on_mailing_created: None,
            created: RwLock::new(Vec::new()),
        }
    }

    /// Registers a callback run after each successful container creation
    #[must_use]
    pub fn with_on_mailing_created<F>(mut self, hook: F) -> Self
    where
        F: Fn(&MailingContainer) + Send + Sync + 'static,
    {
        self.on_mailing_created = Some(Box::new(hook));
        self
    }

    /// Auth client this mailing client borrows its session from
    #[must_use]
    pub fn auth(&self) -> &Arc<AuthClient> {
        &self.auth
    }

    /// Ids of the containers created through this client, oldest first
    pub async fn created_mailings(&self) -> Vec<u64> {
        self.created.read().await.clone()
    }

    async fn send(&self, operation: Operation, body: Option<&RequestBody>) -> Result<Value, AppError> {
        let timeout = self.auth.config().rest_api.mailing_timeout();
        let idempotent = body.is_some();
        self.auth
            .send_authenticated(operation, body, timeout, idempotent)
            .await
    }

    async fn upload(&self, operation: Operation, body: &RequestBody) -> Result<UploadResult, AppError> {
        let response = self
            .send(operation, Some(body))
            .await
            .map_err(|e| conflict_as(e, AppError::UploadFailed))?;
        let result: UploadResult = decode_object(response)?;
        if result.has_failures() {
            warn!("{} entries rejected by the server", result.failed.len());
        }
        Ok(result)
    }
}

/// Maps a 409 answer to the operation specific failure, leaving the rest untouched
fn conflict_as(err: AppError, wrap: fn(String) -> AppError) -> AppError {
    match err {
        AppError::ClientError { status, message } if status == StatusCode::CONFLICT => wrap(message),
        other => other,
    }
}

#[async_trait]
impl MailingService for MailingClient {
    async fn listar_campanhas(&self) -> Result<Vec<Campaign>, AppError> {
        self.listar_campanhas_filtradas(None, true).await
    }

    async fn listar_campanhas_filtradas(
        &self,
        filter: Option<&str>,
        only_active: bool,
    ) -> Result<Vec<Campaign>, AppError> {
        debug!("Listing campaigns");
        let body = self.send(Operation::ListCampaigns, None).await?;
        let campaigns: Vec<Campaign> = campaigns_from(body)?
            .into_iter()
            .filter(|c| !only_active || c.is_active())
            .filter(|c| filter.is_none_or(|f| c.name_contains(f)))
            .collect();
        debug!("Campaigns obtained: {}", campaigns.len());
        Ok(campaigns)
    }

    async fn criar_mailing_container(
        &self,
        name: &str,
        campaign_id: u64,
    ) -> Result<MailingContainer, AppError> {
        let request = CreateMailingRequest::new(name, campaign_id);
        create_container(self, request).await
    }

    async fn criar_mailing_container_com_meta(
        &self,
        name: &str,
        campaign_id: u64,
        meta: Value,
    ) -> Result<MailingContainer, AppError> {
        let request = CreateMailingRequest::new(name, campaign_id).with_meta(meta);
        create_container(self, request).await
    }

    async fn enviar_mailing_json(
        &self,
        mailing_id: u64,
        contacts: &[Contact],
    ) -> Result<UploadResult, AppError> {
        if contacts.is_empty() {
            return Err(AppError::InvalidInput("no contacts to upload".to_string()));
        }
        contacts.iter().try_for_each(Contact::validate)?;

        info!("Uploading {} contacts to mailing {}", contacts.len(), mailing_id);
        let body = RequestBody::json(&UploadContactsRequest {
            mailing_id,
            data: contacts,
        })?;
        self.upload(Operation::UploadJson, &body).await
    }

    async fn enviar_mailing_array(
        &self,
        mailing_id: u64,
        rows: &[Value],
    ) -> Result<UploadResult, AppError> {
        if rows.is_empty() {
            return Err(AppError::InvalidInput("no rows to upload".to_string()));
        }

        info!("Uploading {} rows to mailing {}", rows.len(), mailing_id);
        let body = RequestBody::json(&UploadRowsRequest {
            mailing_id,
            data: rows,
        })?;
        self.upload(Operation::UploadArray, &body).await
    }

    async fn enviar_mailing_csv(
        &self,
        mailing_id: u64,
        path: &Path,
        column_map: &[(String, String)],
    ) -> Result<UploadResult, AppError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::UploadFailed(format!("cannot read {}: {e}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mailing.csv".to_string());

        let mut fields = vec![("mailing_id".to_string(), mailing_id.to_string())];
        fields.extend(column_map.iter().cloned());

        info!("Uploading {} ({} bytes) to mailing {}", file_name, bytes.len(), mailing_id);
        let body = RequestBody::Multipart {
            fields,
            file: Some(FilePart {
                field: "file".to_string(),
                file_name,
                mime: "text/csv".to_string(),
                bytes,
            }),
        };
        self.upload(Operation::UploadCsv, &body).await
    }

    async fn ajustar_peso_mailing(
        &self,
        mailing_id: u64,
        weight: u32,
    ) -> Result<WeightUpdateResult, AppError> {
        let body = RequestBody::json(&AdjustWeightRequest { mailing_id, weight })?;
        let response = self.send(Operation::AdjustWeight, Some(&body)).await?;
        let result: WeightUpdateResult = decode_object(response)?;
        if result.success == Some(false) {
            return Err(AppError::WeightUpdateFailed(
                result
                    .message
                    .unwrap_or_else(|| format!("weight of mailing {mailing_id} not updated")),
            ));
        }
        info!("✓ Weight of mailing {} set to {}", mailing_id, weight);
        Ok(result)
    }
}

async fn create_container(
    client: &MailingClient,
    request: CreateMailingRequest,
) -> Result<MailingContainer, AppError> {
    let body = RequestBody::json(&request)?;
    let response = client
        .send(Operation::CreateMailing, Some(&body))
        .await
        .map_err(|e| conflict_as(e, AppError::CreateMailingFailed))?;

    let mailing_id = extract_mailing_id(&response)
        .ok_or_else(|| AppError::malformed("create mailing response carries no mailing id"))?;
    let container = MailingContainer {
        mailing_id,
        campaign_id: request.campaign_id,
        name: request.name,
    };

    client.created.write().await.push(mailing_id);
    info!(
        "✓ Mailing container {} created for campaign {}",
        mailing_id, container.campaign_id
    );
    if let Some(hook) = &client.on_mailing_created {
        hook(&container);
    }
    Ok(container)
}

impl std::fmt::Debug for MailingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailingClient")
            .field("auth", &self.auth)
            .field("on_mailing_created", &self.on_mailing_created.is_some())
            .finish()
    }
}
