use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор товара поставщика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SupplierProductId(pub Uuid);

impl SupplierProductId {
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

impl AggregateId for SupplierProductId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplierProductId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар поставщика — позиция каталога, выгружаемая в магазины
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierProduct {
    #[serde(flatten)]
    pub base: BaseAggregate<SupplierProductId>,

    // Специфичные поля агрегата
    pub article: String,

    #[serde(rename = "supplierSku")]
    pub supplier_sku: String,

    /// Закупочная цена у поставщика
    #[serde(rename = "purchasePrice")]
    pub purchase_price: f64,

    /// Остаток на складе поставщика
    #[serde(rename = "stockQty")]
    pub stock_qty: i64,

    pub barcode: Option<String>,

    /// Ссылка на карточку товара у поставщика
    #[serde(rename = "sourceUrl")]
    pub source_url: String,

    /// ID магазина, в который товар уже выгружен (если выгружен)
    #[serde(rename = "storeRef")]
    pub store_ref: Option<String>,

    /// Дата последней синхронизации цены/остатка
    #[serde(rename = "syncedAt")]
    pub synced_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SupplierProduct {
    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Товар уже выгружен хотя бы в один магазин
    pub fn is_listed(&self) -> bool {
        self.store_ref.is_some()
    }

    /// Цена продажи при заданной наценке, %
    pub fn sale_price(&self, markup_percent: f64) -> f64 {
        self.purchase_price * (1.0 + markup_percent / 100.0)
    }

    /// Валидация данных
    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Описание не может быть пустым".into());
        }
        if self.article.trim().is_empty() {
            return Err("Артикул не может быть пустым".into());
        }
        if self.purchase_price < 0.0 {
            return Err("Закупочная цена не может быть отрицательной".into());
        }
        Ok(())
    }
}

impl AggregateRoot for SupplierProduct {
    type Id = SupplierProductId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "supplier_product"
    }

    fn element_name() -> &'static str {
        "Товар поставщика"
    }

    fn list_name() -> &'static str {
        "Товары поставщика"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SupplierProduct {
        SupplierProduct {
            base: BaseAggregate::new(
                SupplierProductId::new_v4(),
                "PRD-001".into(),
                "Чехол для телефона".into(),
            ),
            article: "A-100".into(),
            supplier_sku: "SKU-100".into(),
            purchase_price: 200.0,
            stock_qty: 50,
            barcode: None,
            source_url: "https://supplier.example/item/100".into(),
            store_ref: None,
            synced_at: None,
        }
    }

    #[test]
    fn test_sale_price_applies_markup() {
        let p = sample();
        assert_eq!(p.sale_price(50.0), 300.0);
        assert_eq!(p.sale_price(0.0), 200.0);
    }

    #[test]
    fn test_validate() {
        let mut p = sample();
        assert!(p.validate().is_ok());
        p.article = "  ".into();
        assert!(p.validate().is_err());
    }
}
