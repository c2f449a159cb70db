use serde::{Deserialize, Serialize};

/// Ответ на запуск импорта каталога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCatalogImportResponse {
    /// Идентификатор запущенной задачи
    pub task_id: String,
}
