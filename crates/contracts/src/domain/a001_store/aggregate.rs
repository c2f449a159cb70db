use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::store_type::StoreType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор магазина
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreId(pub Uuid);

impl StoreId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for StoreId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StoreId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Магазин — точка продаж на одной из торговых площадок
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Store {
    #[serde(flatten)]
    pub base: BaseAggregate<StoreId>,

    // Специфичные поля агрегата
    #[serde(rename = "storeType")]
    pub store_type: StoreType,

    /// Адрес витрины магазина
    pub url: String,

    /// Наценка по умолчанию при выгрузке товаров, %
    #[serde(rename = "markupPercent")]
    pub markup_percent: f64,

    /// Магазин активен (выгрузка и размещение разрешены)
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

impl Store {
    /// Создать новый магазин для вставки в БД
    pub fn new_for_insert(
        code: String,
        description: String,
        store_type: StoreType,
        url: String,
        markup_percent: f64,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(StoreId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            store_type,
            url,
            markup_percent,
            is_active: true,
        }
    }

    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Обновить данные из DTO
    pub fn update(&mut self, dto: &StoreDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.store_type = dto.store_type;
        self.url = dto.url.clone();
        self.markup_percent = dto.markup_percent;
        self.is_active = dto.is_active;
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название магазина не может быть пустым".into());
        }
        if self.url.trim().is_empty() {
            return Err("URL не может быть пустым".into());
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("URL должен начинаться с http:// или https://".into());
        }
        if self.markup_percent < 0.0 {
            return Err("Наценка не может быть отрицательной".into());
        }
        Ok(())
    }

    /// Хук перед записью
    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Store {
    type Id = StoreId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "store"
    }

    fn element_name() -> &'static str {
        "Магазин"
    }

    fn list_name() -> &'static str {
        "Магазины"
    }
}

// ============================================================================
// DTO
// ============================================================================

/// DTO формы магазина
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreDto {
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    #[serde(rename = "storeType")]
    pub store_type: StoreType,
    pub url: String,
    #[serde(rename = "markupPercent")]
    pub markup_percent: f64,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut store = Store::new_for_insert(
            "STR-001".into(),
            "Основной Ozon".into(),
            StoreType::Ozon,
            "ftp://example".into(),
            15.0,
            None,
        );
        assert!(store.validate().is_err());
        store.url = "https://example.com/shop".into();
        assert!(store.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_markup() {
        let store = Store::new_for_insert(
            "STR-002".into(),
            "WB".into(),
            StoreType::Wildberries,
            "https://example.com".into(),
            -1.0,
            None,
        );
        assert!(store.validate().is_err());
    }
}
