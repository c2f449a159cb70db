use serde::{Deserialize, Serialize};

/// Запрос запуска импорта каталога
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCatalogImportRequest {
    /// Ссылка на каталог/фид поставщика
    pub source_url: String,
    /// Обновлять ли уже существующие товары
    pub update_existing: bool,
}
