/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::constants::{MAX_PHONES_PER_CONTACT, MIN_PHONE_DIGITS};
use crate::error::AppError;
use once_cell::sync::Lazy;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").expect("valid regex"));

/// Strips everything but digits from `raw`.
///
/// Returns `None` when fewer than [`MIN_PHONE_DIGITS`] digits remain, since
/// such a number cannot be dialed.
///
/// # Examples
/// ```
/// use threec_client::model::contact::normalize_phone;
/// assert_eq!(normalize_phone("+55 (11) 99999-9999").as_deref(), Some("5511999999999"));
/// assert_eq!(normalize_phone("12-34"), None);
/// ```
#[must_use]
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = NON_DIGITS.replace_all(raw, "");
    (digits.len() >= MIN_PHONE_DIGITS).then(|| digits.into_owned())
}

/// A contact to be uploaded into a mailing container
///
/// Serializes to the shape the upload endpoint expects: absent fields are
/// omitted and `extra` entries are merged at the top level.
#[derive(DebugPretty, DisplaySimple, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tax document (CPF/CNPJ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Phone numbers, digits only
    #[serde(default)]
    pub phones: Vec<String>,
    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Identifier of the contact in the caller's system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Additional campaign specific columns
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// Creates a contact with a name and nothing else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Adds a phone number, normalized to digits. Undialable numbers are skipped.
    #[must_use]
    pub fn with_phone(mut self, phone: &str) -> Self {
        if let Some(phone) = normalize_phone(phone) {
            self.phones.push(phone);
        }
        self
    }

    /// Adds several phone numbers
    #[must_use]
    pub fn with_phones<I, S>(self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        phones
            .into_iter()
            .fold(self, |contact, phone| contact.with_phone(phone.as_ref()))
    }

    /// Sets the tax document
    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Sets the email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the external identifier
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Adds an extra column
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Checks the contact against the upload endpoint limits
    ///
    /// # Errors
    /// `AppError::InvalidInput` when the contact carries more than
    /// [`MAX_PHONES_PER_CONTACT`] phone numbers.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.phones.len() > MAX_PHONES_PER_CONTACT {
            return Err(AppError::InvalidInput(format!(
                "contact {} has {} phones, at most {} are allowed",
                self.external_id.as_deref().unwrap_or("<no id>"),
                self.phones.len(),
                MAX_PHONES_PER_CONTACT
            )));
        }
        Ok(())
    }
}
