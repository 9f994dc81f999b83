use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use contactform_models::contact::FormFields;

pub const ACCESS_KEY: &str = "test-access-key";

/// 2023-11-14T22:13:20Z
pub static SUBMITTED_AT: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| DateTime::from_timestamp(1_700_000_000, 0).unwrap());

pub static TANAKA: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    name: "田中".into(),
    email: "tanaka@example.com".into(),
    phone: "090-1111-2222".into(),
    message: "hello".into(),
});

pub static MAX: LazyLock<FormFields> = LazyLock::new(|| FormFields {
    name: "  Max Mustermann ".into(),
    email: "max.mustermann@example.de".into(),
    phone: "+49 30 1234567".into(),
    message: "Hello World!\nHow are you?".into(),
});
