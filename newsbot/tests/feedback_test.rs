//! Integration tests for [`newsbot::FeedbackCorrelator`]: button payload → feedback row → acknowledgement.

mod common;

use common::{button_press, count_rows, offline_gateway, sqlite_gateway, sqlite_url, Harness};
use newsbot::dialog::texts;
use newsbot::FeedbackPayload;
use storage::{Rating, FEEDBACK_TABLE};
use tempfile::TempDir;
use uuid::Uuid;

const USER: i64 = 42;
const CHAT: i64 = 4242;

/// **Test: a malformed payload is answered with an alert and touches nothing.**
#[tokio::test]
async fn test_malformed_payload_alerts() {
    let dir = TempDir::new().unwrap();
    let h = Harness::new(sqlite_gateway(&dir));

    for data in ["", "feedback", "feedback:abc:maybe", "vote:1:correct"] {
        let answer = h.correlator.handle(&button_press(USER, CHAT, "100", data)).await;
        assert_eq!(answer.text, texts::FEEDBACK_FAILED);
        assert!(answer.show_alert);
    }
    assert!(h.bot.calls().is_empty());
    // the store was never opened
    assert!(!dir.path().join("newsbot.db").exists());
}

/// **Test: a request id that is not a UUID is rejected without a write.**
#[tokio::test]
async fn test_invalid_request_id_alerts() {
    let h = Harness::new(offline_gateway());
    let answer = h
        .correlator
        .handle(&button_press(USER, CHAT, "100", "feedback:not-a-uuid:correct"))
        .await;
    assert!(answer.show_alert);
    assert!(h.bot.cleared().is_empty());
}

/// **Test: with the store offline the press is answered with an alert and the buttons stay.**
#[tokio::test]
async fn test_store_offline_alerts() {
    let h = Harness::new(offline_gateway());
    let data = FeedbackPayload::encode(Uuid::new_v4(), Rating::Incorrect);
    let answer = h
        .correlator
        .handle(&button_press(USER, CHAT, "100", &data))
        .await;
    assert_eq!(answer.text, texts::FEEDBACK_FAILED);
    assert!(answer.show_alert);
    assert!(h.bot.calls().is_empty());
}

/// **Test: feedback is accepted for any well-formed id, repeatedly.**
///
/// Request ids are not checked against the request log, so a second press (or an id the log never
/// saw) still writes a row.
#[tokio::test]
async fn test_feedback_is_permissive() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let h = Harness::new(sqlite_gateway(&dir));
    let data = FeedbackPayload::encode(Uuid::new_v4(), Rating::Incorrect);

    for _ in 0..2 {
        let answer = h
            .correlator
            .handle(&button_press(USER, CHAT, "100", &data))
            .await;
        assert_eq!(answer.text, texts::FEEDBACK_THANKS);
        assert!(!answer.show_alert);
    }
    assert_eq!(count_rows(&url, FEEDBACK_TABLE).await, 2);
    assert_eq!(h.bot.cleared(), vec!["100".to_string(), "100".to_string()]);
    assert_eq!(
        h.bot.sent()[0].text,
        texts::feedback_recorded(Rating::Incorrect)
    );
}

/// **Test: a press without an originating message still records feedback, with nothing to edit.**
#[tokio::test]
async fn test_press_without_message() {
    let dir = TempDir::new().unwrap();
    let url = sqlite_url(&dir);
    let h = Harness::new(sqlite_gateway(&dir));

    let mut event = button_press(
        USER,
        CHAT,
        "100",
        &FeedbackPayload::encode(Uuid::new_v4(), Rating::Correct),
    );
    event.chat = None;
    event.message_id = None;

    let answer = h.correlator.handle(&event).await;
    assert_eq!(answer.text, texts::FEEDBACK_THANKS);
    assert!(h.bot.calls().is_empty());
    assert_eq!(count_rows(&url, FEEDBACK_TABLE).await, 1);
}
