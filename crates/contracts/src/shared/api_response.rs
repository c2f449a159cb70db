use serde::{Deserialize, Serialize};

/// Минимальный конверт ответа API.
///
/// Единственное, что гарантирует backend для поэлементных операций:
/// индикатор статуса и, при ошибке, человекочитаемое сообщение,
/// которое показывается пользователю как есть.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// "ok" либо "error"
    pub status: String,
    /// Сообщение об ошибке (или пояснение при успехе)
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "ok"
    }

    /// Сообщение ошибки либо общий текст, если backend его не прислал
    pub fn error_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "Сервер вернул ошибку без описания".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_flag() {
        assert!(ApiResponse::ok().is_success());
        assert!(!ApiResponse::error("boom").is_success());
    }

    #[test]
    fn test_message_field_is_optional() {
        // Ответ без message не должен ломать десериализацию
        let resp: ApiResponse = serde_json::from_str(r#"{"status":"ok"}"#).unwrap();
        assert!(resp.is_success());
        assert!(resp.message.is_none());
    }

    #[test]
    fn test_error_message_fallback() {
        let resp: ApiResponse = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(!resp.is_success());
        assert!(!resp.error_message().is_empty());
    }
}
