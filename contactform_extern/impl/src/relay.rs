use std::sync::Arc;

use anyhow::Context;
use contactform_extern_contracts::relay::{
    FormRelayApiService, FormRelaySubmission, FormRelaySubmitResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

const SUBMIT_ENDPOINT: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone)]
pub struct FormRelayApiServiceImpl {
    config: FormRelayApiServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct FormRelayApiServiceConfig {
    submit_endpoint: Arc<Url>,
}

impl FormRelayApiServiceConfig {
    pub fn new(submit_endpoint_override: Option<Url>) -> Self {
        Self {
            submit_endpoint: submit_endpoint_override
                .unwrap_or_else(|| SUBMIT_ENDPOINT.parse().unwrap())
                .into(),
        }
    }

    pub fn submit_endpoint(&self) -> &Url {
        &self.submit_endpoint
    }
}

impl FormRelayApiServiceImpl {
    pub fn new(config: FormRelayApiServiceConfig, client: HttpClient) -> Self {
        Self { config, client }
    }
}

impl FormRelayApiService for FormRelayApiServiceImpl {
    #[tracing::instrument(skip_all, fields(endpoint = %self.config.submit_endpoint))]
    async fn submit(
        &self,
        submission: &FormRelaySubmission,
    ) -> anyhow::Result<FormRelaySubmitResponse> {
        let response = self
            .client
            .post((*self.config.submit_endpoint).clone())
            .json(&SubmitRequest::from(submission))
            .send()
            .await
            .context("Failed to reach form relay")?;

        let status = response.status();
        let body = response
            .json::<SubmitResponse>()
            .await
            .with_context(|| format!("Form relay responded with {status} and an invalid body"))?;

        debug!(
            %status,
            success = body.success,
            relay_message = %body.message,
            "Form relay responded"
        );

        Ok(FormRelaySubmitResponse {
            success: body.success && status.is_success(),
            message: body.message,
        })
    }
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    access_key: &'a str,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    message: &'a str,
    body: &'a str,
    subject: &'a str,
    from_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ccemail: Option<&'a str>,
}

impl<'a> From<&'a FormRelaySubmission> for SubmitRequest<'a> {
    fn from(value: &'a FormRelaySubmission) -> Self {
        Self {
            access_key: &value.access_key,
            name: &value.name,
            email: &value.email,
            phone: &value.phone,
            message: &value.message,
            body: &value.body,
            subject: &value.subject,
            from_name: &value.from_name,
            ccemail: value.recipient.as_deref(),
        }
    }
}

#[derive(Deserialize)]
struct SubmitResponse {
    success: bool,
    #[serde(default)]
    message: String,
}
