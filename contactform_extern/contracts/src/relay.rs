use std::future::Future;

/// Third party service that turns a form submission into an email.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormRelayApiService: Send + Sync + 'static {
    fn submit(
        &self,
        submission: &FormRelaySubmission,
    ) -> impl Future<Output = anyhow::Result<FormRelaySubmitResponse>> + Send;
}

#[derive(Clone, PartialEq, Eq)]
pub struct FormRelaySubmission {
    pub access_key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    /// The fields rendered into the fixed message template.
    pub body: String,
    pub subject: String,
    pub from_name: String,
    pub recipient: Option<String>,
}

impl std::fmt::Debug for FormRelaySubmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormRelaySubmission")
            .field("access_key", &"[redacted]")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("message", &self.message)
            .field("body", &self.body)
            .field("subject", &self.subject)
            .field("from_name", &self.from_name)
            .field("recipient", &self.recipient)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRelaySubmitResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(feature = "mock")]
impl MockFormRelayApiService {
    pub fn with_submit(
        mut self,
        submission: FormRelaySubmission,
        result: FormRelaySubmitResponse,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_submit_error(mut self, submission: FormRelaySubmission) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection refused"
                ))))
            });
        self
    }
}
