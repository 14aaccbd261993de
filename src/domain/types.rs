//! Strongly-typed value objects used by domain entities.
//!
//! Records coming from the collaborator API are untyped JSON, so these
//! wrappers are applied at the edges where the dashboard *produces* data
//! (forms, outbound payloads, path parameters). Once a value is wrapped it can
//! be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    LeadId,
    "Identifier assigned to a lead by the collaborator API."
);

non_empty_string_newtype!(
    AgentId,
    "Identifier assigned to a sales agent by the collaborator API."
);

non_empty_string_newtype!(LeadName, "Lead name wrapper enforcing non-empty values.");

non_empty_string_newtype!(
    AgentName,
    "Sales agent name wrapper enforcing non-empty values."
);

non_empty_string_newtype!(AgentRole, "Free-form sales agent role label.");

non_empty_string_newtype!(
    CommentText,
    "Comment body as typed, trimmed and non-empty. Escaping is left to the templates."
);

/// Lower-cased and validated email address of a sales agent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct AgentEmail(String);

impl AgentEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AgentEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AgentEmail {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentEmail> for String {
    fn from(value: AgentEmail) -> Self {
        value.0
    }
}

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// Lifecycle status of a lead.
///
/// The set is open-ended: values the dashboard does not know about are kept
/// verbatim in [`LeadStatus::Other`] so that exact-match filtering still works.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum LeadStatus {
    New,
    Qualified,
    Contracted,
    Closed,
    Other(String),
}

impl LeadStatus {
    /// Statuses offered by the lead forms, in display order.
    pub const CHOICES: [LeadStatus; 3] =
        [LeadStatus::New, LeadStatus::Qualified, LeadStatus::Contracted];

    pub fn as_str(&self) -> &str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Contracted => "Contracted",
            LeadStatus::Closed => "Closed",
            LeadStatus::Other(s) => s,
        }
    }
}

impl Display for LeadStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for LeadStatus {
    fn from(s: &str) -> Self {
        match s {
            "New" => LeadStatus::New,
            "Qualified" => LeadStatus::Qualified,
            "Contracted" => LeadStatus::Contracted,
            "Closed" => LeadStatus::Closed,
            _ => LeadStatus::Other(s.to_string()),
        }
    }
}

impl From<String> for LeadStatus {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<LeadStatus> for String {
    fn from(value: LeadStatus) -> Self {
        match value {
            LeadStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Priority label attached to a lead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    /// Priorities offered by the lead forms, in display order.
    pub const CHOICES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Other(s) => s,
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Priority {
    fn from(s: &str) -> Self {
        match s {
            "High" => Priority::High,
            "Medium" => Priority::Medium,
            "Low" => Priority::Low,
            _ => Priority::Other(s.to_string()),
        }
    }
}

impl From<String> for Priority {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// Channel a lead came through.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum LeadSource {
    Referral,
    Website,
    ColdCall,
    Other(String),
}

impl LeadSource {
    pub const CHOICES: [LeadSource; 3] =
        [LeadSource::Referral, LeadSource::Website, LeadSource::ColdCall];

    pub fn as_str(&self) -> &str {
        match self {
            LeadSource::Referral => "Referral",
            LeadSource::Website => "Website",
            LeadSource::ColdCall => "Cold Call",
            LeadSource::Other(s) => s,
        }
    }
}

impl Display for LeadSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for LeadSource {
    fn from(s: &str) -> Self {
        match s {
            "Referral" => LeadSource::Referral,
            "Website" => LeadSource::Website,
            "Cold Call" => LeadSource::ColdCall,
            _ => LeadSource::Other(s.to_string()),
        }
    }
}

impl From<String> for LeadSource {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<LeadSource> for String {
    fn from(value: LeadSource) -> Self {
        match value {
            LeadSource::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}
