use std::future::Future;

use contactform_models::contact::{
    CooldownState, FormError, FormField, FormFields, FormMessage, SubmissionStatus,
};
use thiserror::Error;

/// State machine behind the contact form.
///
/// Every user interaction maps to one method call. Mutating methods take
/// `&mut self`, so a single event loop owns the form and at most one
/// submission can be in flight.
pub trait ContactFormService: Send + 'static {
    /// Returns the current contents of the form.
    fn fields(&self) -> &FormFields;

    /// Returns the error currently shown next to the form.
    fn error(&self) -> Option<&FormError>;

    fn status(&self) -> SubmissionStatus;

    /// Returns the last successful submission and the countdown shown to the
    /// user.
    fn cooldown_state(&self) -> CooldownState;

    /// Sets the value of a field. An error flagging this field is cleared,
    /// errors concerning other fields are kept.
    fn update_field(&mut self, field: FormField, value: String);

    /// Validates the fields in display order and records the first error
    /// found.
    fn validate(&mut self) -> bool;

    /// Returns whether the cooldown since the last successful submission has
    /// elapsed.
    fn can_submit(&self) -> bool;

    /// Validates the form and sends it to the form relay.
    ///
    /// Any failure is also recorded as the current [`FormError`], except
    /// [`ContactFormSubmitError::InProgress`].
    fn submit_form(&mut self) -> impl Future<Output = Result<(), ContactFormSubmitError>> + Send;

    /// Clears the form and shows it again. Does nothing and returns `false`
    /// while the cooldown is active.
    fn reset_form(&mut self) -> bool;

    /// Waits for the next second of the cooldown countdown and returns the
    /// remaining seconds. Never resolves while no countdown is running.
    fn cooldown_tick(&mut self) -> impl Future<Output = u64> + Send;
}

#[derive(Debug, Error)]
pub enum ContactFormSubmitError {
    #[error("The cooldown is still active for {seconds} seconds.")]
    Cooldown { seconds: u64 },
    #[error("A submission is already in progress.")]
    InProgress,
    #[error("{0}")]
    Validation(FormError),
    #[error("No access key for the form relay has been configured.")]
    MissingCredential,
    #[error("The form relay rejected the submission: {0}")]
    Rejected(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl ContactFormSubmitError {
    /// The error to show to the user for this failure.
    pub fn form_error(&self) -> Option<FormError> {
        match self {
            Self::Cooldown { seconds } => Some(FormError::form(FormMessage::CooldownActive {
                seconds: *seconds,
            })),
            Self::InProgress => None,
            Self::Validation(err) => Some(*err),
            Self::MissingCredential => Some(FormError::form(FormMessage::MissingCredential)),
            Self::Rejected(_) | Self::Transport(_) => {
                Some(FormError::form(FormMessage::SubmissionFailed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_errors() {
        for (err, expected) in [
            (
                ContactFormSubmitError::Cooldown { seconds: 12 },
                Some(FormError::form(FormMessage::CooldownActive { seconds: 12 })),
            ),
            (ContactFormSubmitError::InProgress, None),
            (
                ContactFormSubmitError::Validation(FormError::field(
                    FormField::Phone,
                    FormMessage::EmptyPhone,
                )),
                Some(FormError::field(FormField::Phone, FormMessage::EmptyPhone)),
            ),
            (
                ContactFormSubmitError::MissingCredential,
                Some(FormError::form(FormMessage::MissingCredential)),
            ),
            (
                ContactFormSubmitError::Rejected("Invalid access key".into()),
                Some(FormError::form(FormMessage::SubmissionFailed)),
            ),
            (
                ContactFormSubmitError::Transport(anyhow::anyhow!("timeout")),
                Some(FormError::form(FormMessage::SubmissionFailed)),
            ),
        ] {
            assert_eq!(err.form_error(), expected, "{err:?}");
        }
    }
}
