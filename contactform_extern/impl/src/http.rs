use std::{ops::Deref, sync::LazyLock, time::Duration};

use anyhow::Context;
use contactform_utils::contactform_version;

pub static USER_AGENT: LazyLock<String> =
    LazyLock::new(|| format!("contactform/{}", contactform_version()));

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl HttpClient {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        reqwest::Client::builder()
            .user_agent(&*USER_AGENT)
            .timeout(timeout)
            .build()
            .map(Self)
            .context("Failed to build http client")
    }
}

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
