use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::pricing::Tier;

const MIN_NAME_LEN: usize = 2;
const MIN_PHONE_DIGITS: usize = 10;
const MIN_ADDRESS_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub u64);

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lead-{:06}", self.0)
    }
}

/// Raw lead form payload as posted by the front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Tier the customer chose on the results screen, if any.
    #[serde(default)]
    pub tier: Option<String>,
}

/// Form fields that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Address,
    Tier,
}

impl LeadField {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadField::Name => "name",
            LeadField::Email => "email",
            LeadField::Phone => "phone",
            LeadField::Address => "address",
            LeadField::Tier => "tier",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct LeadValidationError {
    pub field: LeadField,
    pub message: &'static str,
}

impl LeadValidationError {
    fn new(field: LeadField, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Validated lead awaiting an id from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
    pub tier: Option<Tier>,
    pub received_at: DateTime<Utc>,
}

impl LeadDraft {
    pub fn into_lead(self, id: LeadId) -> Lead {
        Lead {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            notes: self.notes,
            tier: self.tier,
            received_at: self.received_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
    pub tier: Option<Tier>,
    pub received_at: DateTime<Utc>,
}

impl LeadSubmission {
    /// Trims every field and checks the same rules the lead form enforces.
    pub fn validate(self, received_at: DateTime<Utc>) -> Result<LeadDraft, LeadValidationError> {
        let name = self.name.trim().to_string();
        if name.chars().count() < MIN_NAME_LEN {
            return Err(LeadValidationError::new(LeadField::Name, "Name is required"));
        }

        let email = self.email.trim().to_string();
        if !looks_like_email(&email) {
            return Err(LeadValidationError::new(LeadField::Email, "Invalid email address"));
        }

        let phone = self.phone.trim().to_string();
        if phone.chars().filter(char::is_ascii_digit).count() < MIN_PHONE_DIGITS {
            return Err(LeadValidationError::new(
                LeadField::Phone,
                "Valid phone number is required",
            ));
        }

        let address = self.address.trim().to_string();
        if address.chars().count() < MIN_ADDRESS_LEN {
            return Err(LeadValidationError::new(
                LeadField::Address,
                "Service address is required",
            ));
        }

        let tier = match self.tier.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Tier::parse(raw)
                    .ok_or_else(|| LeadValidationError::new(LeadField::Tier, "Unknown package tier"))?,
            ),
        };

        let notes = self
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        Ok(LeadDraft {
            name,
            email,
            phone,
            address,
            notes,
            tier,
            received_at,
        })
    }
}

fn looks_like_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, rest)| !host.is_empty() && !rest.is_empty() && !rest.ends_with('.'))
}
