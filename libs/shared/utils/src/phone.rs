use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use shared_models::ValidationErrors;

pub const PHONE_DIGITS: usize = 10;
pub const PHONE_LENGTH_MESSAGE: &str = "Phone number must be exactly 10 digits";

static NON_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\D").expect("static pattern"));

/// Strips every non-digit and returns the digits only if exactly ten remain.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = NON_DIGIT.replace_all(raw, "");
    (digits.len() == PHONE_DIGITS).then(|| digits.into_owned())
}

/// Clients send phones either as formatted text or as a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PhoneInput {
    Number(u64),
    Text(String),
}

impl PhoneInput {
    pub fn is_blank(&self) -> bool {
        matches!(self, PhoneInput::Text(text) if text.trim().is_empty())
    }

    pub fn normalized(&self) -> Option<String> {
        match self {
            PhoneInput::Number(number) => normalize_phone(&number.to_string()),
            PhoneInput::Text(text) => normalize_phone(text),
        }
    }
}

/// Validates a phone on create: it must be present and normalize to ten digits.
pub fn require_phone(errors: &mut ValidationErrors, field: &str, phone: Option<&PhoneInput>) -> Option<String> {
    match phone {
        None => {
            errors.push(field, format!("{} is required", field));
            None
        }
        Some(phone) if phone.is_blank() => {
            errors.push(field, format!("{} is required", field));
            None
        }
        Some(phone) => check_phone(errors, field, phone),
    }
}

/// Validates a phone that was supplied on update. Blank counts as malformed.
pub fn check_phone(errors: &mut ValidationErrors, field: &str, phone: &PhoneInput) -> Option<String> {
    let normalized = phone.normalized();
    if normalized.is_none() {
        errors.push(field, PHONE_LENGTH_MESSAGE);
    }
    normalized
}
