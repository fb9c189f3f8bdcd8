use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflows::pricing::MAX_REBATE;

/// Store-assigned identifier; assigned in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromoCodeId(pub u64);

impl fmt::Display for PromoCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored promo code as the admin table shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    pub id: PromoCodeId,
    pub code: String,
    pub amount: u32,
    pub description: String,
    pub is_active: bool,
}

impl PromoCode {
    pub fn normalized_code(&self) -> String {
        normalize_code(&self.code)
    }

    pub fn matches(&self, code: &str) -> bool {
        self.normalized_code() == normalize_code(code)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Validated values for a record the store has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeDraft {
    pub code: String,
    pub amount: u32,
    pub description: String,
    pub is_active: bool,
}

impl PromoCodeDraft {
    pub fn into_record(self, id: PromoCodeId) -> PromoCode {
        PromoCode {
            id,
            code: self.code,
            amount: self.amount,
            description: self.description,
            is_active: self.is_active,
        }
    }
}

/// Admin create payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPromoCode {
    pub code: String,
    pub amount: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewPromoCode {
    pub fn new(code: impl Into<String>, amount: i64) -> Self {
        Self {
            code: code.into(),
            amount,
            description: None,
            is_active: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = Some(false);
        self
    }
}

/// Admin partial update payload; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCodeUpdate {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub amount: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Uppercases and strips all whitespace so "Full System" matches "FULLSYSTEM".
pub fn normalize_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Checks an admin-entered rebate against the ceiling.
pub fn validate_amount(amount: i64) -> Result<u32, AmountError> {
    if amount < 0 {
        return Err(AmountError::Negative(amount));
    }
    match u32::try_from(amount) {
        Ok(value) if value <= MAX_REBATE => Ok(value),
        _ => Err(AmountError::ExceedsCap(amount)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("rebate amount {0} cannot be negative")]
    Negative(i64),
    #[error("rebate capped at ${max}, got {0}", max = MAX_REBATE)]
    ExceedsCap(i64),
}

/// Codes the site launched with.
pub fn default_promo_codes() -> Vec<NewPromoCode> {
    vec![
        NewPromoCode::new("Switch2Electric", 500)
            .with_description("Rebate for switching to electric heat pump"),
        NewPromoCode::new("IAQBundle", 750).with_description("Indoor Air Quality package discount"),
        NewPromoCode::new("FastTrack", 500).with_description("Expedited installation discount"),
        NewPromoCode::new("FullSystem", 1000).with_description("Complete system replacement rebate"),
    ]
}
