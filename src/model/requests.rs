/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::model::contact::Contact;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of the mailing container creation call
#[derive(Debug, Clone, PartialEq, DisplaySimple, Serialize, Deserialize)]
pub struct CreateMailingRequest {
    /// Container name
    pub name: String,
    /// Campaign the container feeds
    pub campaign_id: u64,
    /// Free-form metadata stored with the container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl CreateMailingRequest {
    /// Creates a request without metadata
    pub fn new(name: impl Into<String>, campaign_id: u64) -> Self {
        Self {
            name: name.into(),
            campaign_id,
            meta: None,
        }
    }

    /// Attaches metadata
    #[must_use]
    pub fn with_meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }
}

/// Body of the JSON contact upload call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadContactsRequest<'a> {
    /// Target container
    pub mailing_id: u64,
    /// Contacts to insert
    pub data: &'a [Contact],
}

/// Body of the raw row upload call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadRowsRequest<'a> {
    /// Target container
    pub mailing_id: u64,
    /// Rows as the server expects them, either objects or positional arrays
    pub data: &'a [Value],
}

/// Body of the weight adjustment call
#[derive(Debug, Clone, Copy, PartialEq, Eq, DisplaySimple, Serialize, Deserialize)]
pub struct AdjustWeightRequest {
    /// Target container
    pub mailing_id: u64,
    /// New dialing weight
    pub weight: u32,
}
