use anyhow::bail;
use clap::Args;
use contactform_core_contact_contracts::ContactFormService;
use contactform_models::contact::{FormField, FormFields};

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Your name
    #[arg(long, default_value_t)]
    pub name: String,
    /// Your email address
    #[arg(long, default_value_t)]
    pub email: String,
    /// Your phone number
    #[arg(long, default_value_t)]
    pub phone: String,
    /// The message to send
    #[arg(long, default_value_t)]
    pub message: String,
}

impl From<SubmitArgs> for FormFields {
    fn from(value: SubmitArgs) -> Self {
        Self {
            name: value.name,
            email: value.email,
            phone: value.phone,
            message: value.message,
        }
    }
}

/// Fills in the form and submits it once. Fails with the message the form
/// would show next to the offending field.
pub async fn submit(form: &mut impl ContactFormService, fields: FormFields) -> anyhow::Result<()> {
    for field in FormField::ALL {
        form.update_field(field, fields.get(field).into());
    }

    if let Err(err) = form.submit_form().await {
        match form.error() {
            Some(error) => match error.field {
                Some(field) => bail!("{field}: {error}"),
                None => bail!("{error}"),
            },
            None => bail!(err),
        }
    }

    println!("Thank you! Your message has been sent.");

    Ok(())
}
