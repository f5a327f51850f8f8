//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use teloxide::types::{Me, Message, Update};
use teloxide::Bot;
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bwh_traffic_bot::bwh::{BwhError, ServiceInfo, TrafficSource};

pub const TEST_TOKEN: &str = "test_token_12345:ABCDEF";

/// Build a private-chat message from `user_id` with `text`
pub fn create_message(user_id: i64, chat_id: i64, text: &str) -> Message {
    serde_json::from_value(message_json(user_id, chat_id, text)).expect("valid message json")
}

fn message_json(user_id: i64, chat_id: i64, text: &str) -> serde_json::Value {
    serde_json::json!({
        "message_id": 1,
        "date": 1234567890,
        "chat": {
            "id": chat_id,
            "type": "private",
            "first_name": "Test"
        },
        "from": {
            "id": user_id,
            "is_bot": false,
            "first_name": "Test",
            "username": "testuser"
        },
        "text": text
    })
}

/// Wrap a private-chat message into an incoming update
pub fn create_update(user_id: i64, text: &str) -> Update {
    // Parse from text: teloxide's `UpdateKind` deserializer needs borrowed
    // keys, which `serde_json::from_value` cannot provide.
    let json = serde_json::json!({
        "update_id": 1,
        "message": message_json(user_id, user_id, text)
    });
    serde_json::from_str(&json.to_string()).expect("valid update json")
}

/// `getMe` payload of the test bot, `@bwh_bot`
pub fn bot_me_json() -> serde_json::Value {
    serde_json::json!({
        "id": 100500,
        "is_bot": true,
        "first_name": "BWH Traffic",
        "username": "bwh_bot",
        "can_join_groups": true,
        "can_read_all_group_messages": false,
        "supports_inline_queries": false,
        "can_connect_to_business": false,
        "has_main_web_app": false
    })
}

pub fn bot_me() -> Me {
    serde_json::from_value(bot_me_json()).expect("valid getMe json")
}

/// Mock Telegram Bot API that accepts every sendMessage call
pub struct TelegramMock {
    pub server: MockServer,
}

impl TelegramMock {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Accept sendMessage and echo a minimal message back
    pub async fn accept_send_message(&self) {
        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/sendmessage$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sent_message_json()))
            .mount(&self.server)
            .await;
    }

    /// Create a Bot instance that uses this mock server
    pub fn create_bot(&self) -> Bot {
        Bot::new(TEST_TOKEN).set_api_url(self.server.uri().parse().expect("mock server url"))
    }

    /// Request bodies of every sendMessage call, in order
    pub async fn sent_messages(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path().to_lowercase().ends_with("/sendmessage"))
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }

    /// Texts of every sendMessage call, in order
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent_messages()
            .await
            .iter()
            .filter_map(|b| b["text"].as_str().map(str::to_string))
            .collect()
    }
}

pub fn sent_message_json() -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "result": {
            "message_id": 2,
            "date": 1234567890,
            "chat": {"id": 42, "type": "private", "first_name": "Test"},
            "text": "ok"
        }
    })
}

/// In-memory traffic source keyed by VEID; unknown VEIDs fail like KiwiVM does
#[derive(Default)]
pub struct StaticSource {
    pub infos: HashMap<String, ServiceInfo>,
}

impl StaticSource {
    pub fn with(mut self, veid: &str, info: ServiceInfo) -> Self {
        self.infos.insert(veid.to_string(), info);
        self
    }
}

#[async_trait]
impl TrafficSource for StaticSource {
    async fn service_info(&self, veid: &str) -> Result<ServiceInfo, BwhError> {
        self.infos.get(veid).cloned().ok_or_else(|| BwhError::Api {
            code: Some(700_005),
            message: Some(format!("Invalid VEID {}", veid)),
        })
    }
}

pub fn service_info(hostname: &str, used: u64, total: u64) -> ServiceInfo {
    ServiceInfo {
        hostname: Some(hostname.to_string()),
        plan: Some("bwh1g_ca".to_string()),
        plan_monthly_data: Some(total),
        data_counter: Some(used),
        data_next_reset: Some(1_735_689_600),
        ..Default::default()
    }
}
