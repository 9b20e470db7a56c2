//! Integration tests for [`newsbot::TelegramBotAdapter`] against a mock Telegram Bot API.
//!
//! Paths must match teloxide requests: `/bot<token>/<method>`. Mock guards are held until the request
//! completes, else the server returns an empty body and teloxide fails to parse it.

use mockito::Matcher;
use newsbot::telegram::build_teloxide_bot;
use newsbot::TelegramBotAdapter;
use newsbot_core::{Bot, Chat, Reply, ReplyMarkup};
use uuid::Uuid;

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

const MESSAGE_RESULT: &str = r#"{
    "ok": true,
    "result": {
        "message_id": 321,
        "date": 1706529600,
        "chat": {"id": 4242, "type": "private", "first_name": "Test"},
        "from": {"id": 123456789, "is_bot": true, "first_name": "NewsBot", "username": "newsbot"},
        "text": "ok"
    }
}"#;

fn method_path(method: &str) -> Matcher {
    Matcher::Regex(format!("(?i)^/bot{}/{}$", TEST_BOT_TOKEN, method))
}

fn chat() -> Chat {
    Chat {
        id: 4242,
        chat_type: "private".to_string(),
    }
}

fn adapter(server: &mockito::ServerGuard) -> TelegramBotAdapter {
    TelegramBotAdapter::new(build_teloxide_bot(TEST_BOT_TOKEN, Some(server.url().as_str())))
}

/// **Test: send_reply posts the text with feedback buttons and returns the Telegram message id.**
#[tokio::test]
async fn test_send_reply_with_feedback_buttons() {
    let mut server = mockito::Server::new_async().await;
    let request_id = Uuid::new_v4();
    let mock = server
        .mock("POST", method_path("sendMessage"))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("Результат".to_string()),
            Matcher::Regex(format!("feedback:{}:correct", request_id)),
            Matcher::Regex(format!("feedback:{}:incorrect", request_id)),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MESSAGE_RESULT)
        .expect(1)
        .create_async()
        .await;

    let reply = Reply::with_markup("Результат: REAL ✅", ReplyMarkup::Feedback { request_id });
    let id = adapter(&server).send_reply(&chat(), &reply).await.unwrap();

    assert_eq!(id, "321");
    mock.assert_async().await;
}

/// **Test: edit_reply edits the text of the given message.**
#[tokio::test]
async fn test_edit_reply() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", method_path("editMessageText"))
        .match_body(Matcher::PartialJson(serde_json::json!({
            "chat_id": 4242,
            "message_id": 321
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MESSAGE_RESULT)
        .expect(1)
        .create_async()
        .await;

    adapter(&server)
        .edit_reply(&chat(), "321", &Reply::text("FAKE 🤥"))
        .await
        .unwrap();
    mock.assert_async().await;
}

/// **Test: clear_affordance edits only the reply markup.**
#[tokio::test]
async fn test_clear_affordance() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", method_path("editMessageReplyMarkup"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(MESSAGE_RESULT)
        .expect(1)
        .create_async()
        .await;

    adapter(&server).clear_affordance(&chat(), "321").await.unwrap();
    mock.assert_async().await;
}

/// **Test: an API error surfaces as a transport error; a non-numeric id is rejected locally.**
#[tokio::test]
async fn test_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", method_path("editMessageText"))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 400, "description": "Bad Request: message can't be edited"}"#)
        .create_async()
        .await;

    let bot = adapter(&server);
    assert!(bot.edit_reply(&chat(), "321", &Reply::text("x")).await.is_err());
    assert!(bot.clear_affordance(&chat(), "abc").await.is_err());
}
