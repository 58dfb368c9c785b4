use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Number;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RecordPointRequest {
    pub id: Option<String>,
    #[serde(rename = "idUser")]
    pub user_id: Option<String>,
    pub points: Option<Number>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RecordTransactionRequest {
    #[serde(rename = "idUser")]
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub points: Option<Number>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HistoryQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RecordAck {
    pub message: String,
}

impl RecordAck {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub timezone: Tz,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            timezone: chrono_tz::America::Sao_Paulo,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
}
