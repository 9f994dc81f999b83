use std::{fmt, sync::LazyLock};

use chrono::{DateTime, Utc};
use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Loose `local@domain.tld` shape. Anything stricter is left to the relay.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    /// All fields in the order they are displayed and validated.
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The raw, unvalidated contents of the form as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        *match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
        } = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|&field| self.get(field).is_empty())
    }

    /// Checks the fields in display order and stops at the first failing
    /// rule.
    pub fn validate(&self) -> Result<ContactSubmission, FormError> {
        let name = ContactName::try_new(self.name.clone())
            .map_err(|_| FormError::field(FormField::Name, FormMessage::EmptyName))?;

        if self.email.trim().is_empty() {
            return Err(FormError::field(FormField::Email, FormMessage::EmptyEmail));
        }
        let email = ContactEmail::try_new(self.email.clone())
            .map_err(|_| FormError::field(FormField::Email, FormMessage::InvalidEmail))?;

        let phone = ContactPhone::try_new(self.phone.clone())
            .map_err(|_| FormError::field(FormField::Phone, FormMessage::EmptyPhone))?;

        let message = ContactMessageBody::try_new(self.message.clone())
            .map_err(|_| FormError::field(FormField::Message, FormMessage::EmptyMessage))?;

        Ok(ContactSubmission {
            name,
            email,
            phone,
            message,
        })
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: ContactPhone,
    pub message: ContactMessageBody,
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(regex = CONTACT_EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactPhone(String);

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageBody(String);

/// The single error currently shown next to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormError {
    /// The field to highlight, `None` for errors concerning the whole form.
    pub field: Option<FormField>,
    pub message: FormMessage,
}

impl FormError {
    pub fn field(field: FormField, message: FormMessage) -> Self {
        Self {
            field: Some(field),
            message,
        }
    }

    pub fn form(message: FormMessage) -> Self {
        Self {
            field: None,
            message,
        }
    }

    pub fn is_for(&self, field: FormField) -> bool {
        self.field == Some(field)
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

/// Fixed catalog of user facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMessage {
    EmptyName,
    EmptyEmail,
    InvalidEmail,
    EmptyPhone,
    EmptyMessage,
    CooldownActive { seconds: u64 },
    SubmissionFailed,
    MissingCredential,
}

impl fmt::Display for FormMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => f.write_str("Please enter your name."),
            Self::EmptyEmail => f.write_str("Please enter your email address."),
            Self::InvalidEmail => f.write_str("Please enter a valid email address."),
            Self::EmptyPhone => f.write_str("Please enter your phone number."),
            Self::EmptyMessage => f.write_str("Please enter a message."),
            Self::CooldownActive { seconds } => {
                write!(f, "Please try again in {seconds} seconds.")
            }
            Self::SubmissionFailed => f.write_str("Submission failed. Please try again later."),
            Self::MissingCredential => f.write_str(
                "The contact form is not configured correctly. Please try again later.",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CooldownState {
    pub last_submission: Option<DateTime<Utc>>,
    pub remaining_seconds: u64,
}
