use std::{sync::Arc, time::Duration};

use anyhow::Context;
use chrono::{DateTime, Utc};
use contactform_core_contact_contracts::{ContactFormService, ContactFormSubmitError};
use contactform_extern_contracts::relay::{FormRelayApiService, FormRelaySubmission};
use contactform_models::contact::{
    ContactSubmission, CooldownState, FormError, FormField, FormFields, SubmissionStatus,
};
use contactform_shared_contracts::time::TimeService;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

#[cfg(test)]
mod tests;

pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug)]
#[cfg_attr(test, derive(Default))]
pub struct ContactFormServiceImpl<Relay, Time> {
    relay: Relay,
    time: Time,
    config: ContactFormConfig,
    fields: FormFields,
    error: Option<FormError>,
    status: SubmissionStatus,
    last_submission: Option<DateTime<Utc>>,
    remaining_seconds: u64,
    /// Drives the countdown after a successful submission. Dropped as soon as
    /// the countdown reaches zero.
    ticker: Option<Interval>,
}

#[derive(Clone)]
pub struct ContactFormConfig {
    /// Credential of the form relay. Every submission fails while missing.
    pub access_key: Option<Arc<str>>,
    pub cooldown: Duration,
    pub subject: String,
    pub from_name: String,
    pub recipient: Option<String>,
}

impl Default for ContactFormConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            cooldown: DEFAULT_COOLDOWN,
            subject: "New contact form submission".into(),
            from_name: "Contact Form".into(),
            recipient: None,
        }
    }
}

impl std::fmt::Debug for ContactFormConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactFormConfig")
            .field("access_key", &self.access_key.as_ref().map(|_| "[redacted]"))
            .field("cooldown", &self.cooldown)
            .field("subject", &self.subject)
            .field("from_name", &self.from_name)
            .field("recipient", &self.recipient)
            .finish()
    }
}

impl<Relay, Time> ContactFormServiceImpl<Relay, Time> {
    pub fn new(relay: Relay, time: Time, config: ContactFormConfig) -> Self {
        Self {
            relay,
            time,
            config,
            fields: FormFields::default(),
            error: None,
            status: SubmissionStatus::Idle,
            last_submission: None,
            remaining_seconds: 0,
            ticker: None,
        }
    }
}

impl<Relay, Time> ContactFormService for ContactFormServiceImpl<Relay, Time>
where
    Relay: FormRelayApiService,
    Time: TimeService,
{
    fn fields(&self) -> &FormFields {
        &self.fields
    }

    fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    fn status(&self) -> SubmissionStatus {
        self.status
    }

    fn cooldown_state(&self) -> CooldownState {
        CooldownState {
            last_submission: self.last_submission,
            remaining_seconds: self.remaining_seconds,
        }
    }

    #[tracing::instrument(level = "trace", skip(self, value))]
    fn update_field(&mut self, field: FormField, value: String) {
        self.fields.set(field, value);
        if self.error.is_some_and(|err| err.is_for(field)) {
            self.error = None;
        }
    }

    #[tracing::instrument(level = "trace", skip(self), ret)]
    fn validate(&mut self) -> bool {
        match self.fields.validate() {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(err) => {
                self.error = Some(err);
                false
            }
        }
    }

    fn can_submit(&self) -> bool {
        self.cooldown_remaining().is_zero()
    }

    #[tracing::instrument(skip(self))]
    async fn submit_form(&mut self) -> Result<(), ContactFormSubmitError> {
        let result = self.try_submit().await;

        match &result {
            Ok(()) => info!("Contact form submitted"),
            Err(err @ ContactFormSubmitError::Transport(_)) => {
                warn!("Failed to submit contact form: {err:#}")
            }
            Err(err) => debug!("Contact form not submitted: {err}"),
        }

        if let Some(err) = result.as_ref().err().and_then(|err| err.form_error()) {
            self.error = Some(err);
        }

        result
    }

    #[tracing::instrument(skip(self), ret)]
    fn reset_form(&mut self) -> bool {
        let remaining = self.cooldown_remaining();
        if !remaining.is_zero() {
            self.remaining_seconds = ceil_secs(remaining);
            return false;
        }

        self.fields.clear();
        self.error = None;
        self.status = SubmissionStatus::Idle;
        self.remaining_seconds = 0;
        self.ticker = None;
        true
    }

    async fn cooldown_tick(&mut self) -> u64 {
        let Some(ticker) = self.ticker.as_mut() else {
            return std::future::pending().await;
        };
        ticker.tick().await;

        self.remaining_seconds = ceil_secs(self.cooldown_remaining());
        if self.remaining_seconds == 0 {
            debug!("Cooldown elapsed");
            self.ticker = None;
        }

        self.remaining_seconds
    }
}

impl<Relay, Time> ContactFormServiceImpl<Relay, Time>
where
    Relay: FormRelayApiService,
    Time: TimeService,
{
    async fn try_submit(&mut self) -> Result<(), ContactFormSubmitError> {
        if self.status == SubmissionStatus::Submitting {
            return Err(ContactFormSubmitError::InProgress);
        }

        let remaining = self.cooldown_remaining();
        if !remaining.is_zero() {
            return Err(ContactFormSubmitError::Cooldown {
                seconds: ceil_secs(remaining),
            });
        }

        let submission = self
            .fields
            .validate()
            .map_err(ContactFormSubmitError::Validation)?;

        let access_key = self
            .config
            .access_key
            .clone()
            .ok_or(ContactFormSubmitError::MissingCredential)?;

        self.status = SubmissionStatus::Submitting;
        let request = relay_submission(&self.config, &submission, &access_key);
        if let Err(err) = send(&self.relay, &request).await {
            self.status = SubmissionStatus::Idle;
            return Err(err);
        }

        self.last_submission = Some(self.time.now());
        self.error = None;
        self.fields.clear();
        self.status = SubmissionStatus::Succeeded;
        self.start_ticker();

        Ok(())
    }

    fn cooldown_remaining(&self) -> Duration {
        let Some(last_submission) = self.last_submission else {
            return Duration::ZERO;
        };

        // a clock that went backwards counts as no time elapsed
        let elapsed = (self.time.now() - last_submission)
            .to_std()
            .unwrap_or_default();
        self.config.cooldown.saturating_sub(elapsed)
    }

    fn start_ticker(&mut self) {
        self.remaining_seconds = ceil_secs(self.config.cooldown);
        self.ticker = (self.remaining_seconds > 0).then(|| {
            let mut ticker = tokio::time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
    }
}

async fn send<Relay: FormRelayApiService>(
    relay: &Relay,
    request: &FormRelaySubmission,
) -> Result<(), ContactFormSubmitError> {
    let response = relay
        .submit(request)
        .await
        .context("Failed to send contact form to relay")?;

    if !response.success {
        return Err(ContactFormSubmitError::Rejected(response.message));
    }

    Ok(())
}

fn relay_submission(
    config: &ContactFormConfig,
    submission: &ContactSubmission,
    access_key: &str,
) -> FormRelaySubmission {
    FormRelaySubmission {
        access_key: access_key.into(),
        name: (*submission.name).clone(),
        email: (*submission.email).clone(),
        phone: (*submission.phone).clone(),
        message: (*submission.message).clone(),
        body: format!(
            "Message from {} <{}> (phone: {}):\n\n{}",
            *submission.name, *submission.email, *submission.phone, *submission.message
        ),
        subject: config.subject.clone(),
        from_name: config.from_name.clone(),
        recipient: config.recipient.clone(),
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
