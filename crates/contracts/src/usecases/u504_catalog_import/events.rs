use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Статус длительной серверной задачи
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            JobStatus::Queued => "В очереди",
            JobStatus::Running => "Выполняется",
            JobStatus::Completed => "Завершена",
            JobStatus::Failed => "Ошибка",
        }
    }
}

/// Событие о ходе серверной задачи, приходящее из канала уведомлений
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatusEvent {
    pub task_id: String,
    pub status: JobStatus,
    /// Обработано позиций на текущий момент
    #[serde(default)]
    pub processed: i32,
    pub message: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_statuses() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn test_event_deserializes_without_processed() {
        let json = r#"{"task_id":"t-1","status":"running","message":null,"occurred_at":"2025-06-01T10:00:00Z"}"#;
        let ev: JobStatusEvent = serde_json::from_str(json).unwrap();
        assert_eq!(ev.processed, 0);
        assert_eq!(ev.status, JobStatus::Running);
    }
}
