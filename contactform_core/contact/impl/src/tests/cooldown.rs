use std::time::Duration;

use contactform_core_contact_contracts::ContactFormService;
use contactform_demo::{SUBMITTED_AT, TANAKA};
use contactform_extern_contracts::relay::MockFormRelayApiService;
use contactform_models::contact::SubmissionStatus;
use contactform_shared_contracts::time::MockTimeService;
use pretty_assertions::assert_eq;

use crate::{
    ceil_secs,
    tests::{config, relay_submission, relay_success, Sut},
    ContactFormConfig,
};

#[test]
fn can_submit_without_previous_submission() {
    // Arrange
    let sut = Sut::default();

    // Act
    let result = sut.can_submit();

    // Assert
    assert!(result);
}

#[test]
fn can_submit_after_submission() {
    for (elapsed_ms, expected, remaining) in [
        (0, false, 60),
        (1, false, 60),
        (30_000, false, 30),
        (59_000, false, 1),
        (59_999, false, 1),
        (60_000, true, 0),
        (60_001, true, 0),
        (3_600_000, true, 0),
    ] {
        // Arrange
        let now = *SUBMITTED_AT + Duration::from_millis(elapsed_ms);
        let time = MockTimeService::new().with_now_sequence([now, now]);

        let sut = Sut {
            time,
            last_submission: Some(*SUBMITTED_AT),
            ..Sut::default()
        };

        // Act
        let result = sut.can_submit();

        // Assert
        assert_eq!(result, expected, "{elapsed_ms}ms");
        assert_eq!(ceil_secs(sut.cooldown_remaining()), remaining, "{elapsed_ms}ms");
    }
}

#[test]
fn clock_went_backwards() {
    // Arrange
    let time = MockTimeService::new().with_now(*SUBMITTED_AT - Duration::from_secs(5));

    let sut = Sut {
        time,
        last_submission: Some(*SUBMITTED_AT),
        ..Sut::default()
    };

    // Act
    let result = sut.can_submit();

    // Assert
    assert!(!result);
}

#[test]
fn ceil() {
    assert_eq!(ceil_secs(Duration::ZERO), 0);
    assert_eq!(ceil_secs(Duration::from_millis(1)), 1);
    assert_eq!(ceil_secs(Duration::from_millis(1000)), 1);
    assert_eq!(ceil_secs(Duration::from_millis(1001)), 2);
    assert_eq!(ceil_secs(Duration::from_millis(58_500)), 59);
}

#[tokio::test(start_paused = true)]
async fn countdown() {
    // Arrange
    let config = ContactFormConfig {
        cooldown: Duration::from_secs(3),
        ..config()
    };

    let relay =
        MockFormRelayApiService::new().with_submit(relay_submission(&TANAKA), relay_success());

    let time = MockTimeService::new().with_now_sequence(
        [0, 1000, 2000, 3000].map(|ms| *SUBMITTED_AT + Duration::from_millis(ms)),
    );

    let mut sut = Sut {
        relay,
        time,
        config,
        fields: TANAKA.clone(),
        ..Sut::default()
    };
    sut.submit_form().await.unwrap();
    assert_eq!(sut.cooldown_state().remaining_seconds, 3);

    // Act
    let start = tokio::time::Instant::now();
    let ticks = [
        sut.cooldown_tick().await,
        sut.cooldown_tick().await,
        sut.cooldown_tick().await,
    ];

    // Assert
    assert_eq!(ticks, [2, 1, 0]);
    assert_eq!(start.elapsed(), Duration::from_secs(3));
    assert_eq!(sut.cooldown_state().remaining_seconds, 0);
    assert_eq!(sut.status(), SubmissionStatus::Succeeded);
    assert!(sut.ticker.is_none());

    let next = tokio::time::timeout(Duration::from_secs(10), sut.cooldown_tick()).await;
    assert!(next.is_err());
}

#[tokio::test(start_paused = true)]
async fn countdown_rounds_up() {
    // Arrange
    let time = MockTimeService::new().with_now(*SUBMITTED_AT + Duration::from_millis(1500));

    let mut sut = Sut {
        time,
        config: config(),
        status: SubmissionStatus::Succeeded,
        last_submission: Some(*SUBMITTED_AT),
        ..Sut::default()
    };
    sut.start_ticker();

    // Act
    let result = sut.cooldown_tick().await;

    // Assert
    assert_eq!(result, 59);
    assert!(sut.ticker.is_some());
}

#[tokio::test(start_paused = true)]
async fn no_countdown_without_submission() {
    // Arrange
    let mut sut = Sut::default();

    // Act
    let result = tokio::time::timeout(Duration::from_secs(120), sut.cooldown_tick()).await;

    // Assert
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn no_countdown_with_zero_cooldown() {
    // Arrange
    let config = ContactFormConfig {
        cooldown: Duration::ZERO,
        ..config()
    };

    let relay =
        MockFormRelayApiService::new().with_submit(relay_submission(&TANAKA), relay_success());

    let time = MockTimeService::new().with_now_sequence([*SUBMITTED_AT, *SUBMITTED_AT]);

    let mut sut = Sut {
        relay,
        time,
        config,
        fields: TANAKA.clone(),
        ..Sut::default()
    };

    // Act
    sut.submit_form().await.unwrap();

    // Assert
    assert!(sut.ticker.is_none());
    assert_eq!(sut.cooldown_state().remaining_seconds, 0);
    assert!(sut.can_submit());
}
