use std::sync::Arc;

use contactform_config::Config;
use contactform_core_contact_impl::{ContactFormConfig, ContactFormServiceImpl};
use contactform_extern_impl::{
    http::HttpClient,
    relay::{FormRelayApiServiceConfig, FormRelayApiServiceImpl},
};
use contactform_shared_impl::time::TimeServiceImpl;
use tracing::warn;

pub type ContactForm = ContactFormServiceImpl<FormRelayApiServiceImpl, TimeServiceImpl>;

/// Builds the contact form from the loaded config. An access key passed on the
/// command line or via environment takes precedence over the config file.
pub fn contact_form(
    config: &Config,
    access_key_override: Option<String>,
) -> anyhow::Result<ContactForm> {
    let relay = FormRelayApiServiceImpl::new(
        FormRelayApiServiceConfig::new(config.relay.endpoint_override.clone()),
        HttpClient::new(*config.relay.timeout)?,
    );

    let contact_form_config = contact_form_config(config, access_key_override);
    if contact_form_config.access_key.is_none() {
        warn!("No access key for the form relay configured, every submission will fail");
    }

    Ok(ContactFormServiceImpl::new(
        relay,
        TimeServiceImpl,
        contact_form_config,
    ))
}

fn contact_form_config(config: &Config, access_key_override: Option<String>) -> ContactFormConfig {
    let access_key = access_key_override
        .filter(|key| !key.trim().is_empty())
        .map(Arc::from)
        .or_else(|| config.relay.access_key().map(Arc::from));

    ContactFormConfig {
        access_key,
        cooldown: *config.contact.cooldown,
        subject: config.contact.subject.clone(),
        from_name: config.contact.from_name.clone(),
        recipient: config.contact.recipient.clone(),
    }
}
