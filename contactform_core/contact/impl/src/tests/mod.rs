use contactform_demo::ACCESS_KEY;
use contactform_extern_contracts::relay::{
    FormRelaySubmission, FormRelaySubmitResponse, MockFormRelayApiService,
};
use contactform_models::contact::FormFields;
use contactform_shared_contracts::time::MockTimeService;

use crate::{ContactFormConfig, ContactFormServiceImpl};

mod cooldown;

type Sut = ContactFormServiceImpl<MockFormRelayApiService, MockTimeService>;

fn config() -> ContactFormConfig {
    ContactFormConfig {
        access_key: Some(ACCESS_KEY.into()),
        ..Default::default()
    }
}

fn relay_submission(fields: &FormFields) -> FormRelaySubmission {
    let config = config();
    let (name, email, phone, message) = (
        fields.name.trim(),
        fields.email.trim(),
        fields.phone.trim(),
        fields.message.trim(),
    );
    FormRelaySubmission {
        access_key: ACCESS_KEY.into(),
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        message: message.into(),
        body: format!("Message from {name} <{email}> (phone: {phone}):\n\n{message}"),
        subject: config.subject,
        from_name: config.from_name,
        recipient: config.recipient,
    }
}

fn relay_success() -> FormRelaySubmitResponse {
    FormRelaySubmitResponse {
        success: true,
        message: "Email sent successfully!".into(),
    }
}
