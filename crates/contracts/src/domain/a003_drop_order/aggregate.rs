use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::order_status::OrderStatus;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================

/// Уникальный идентификатор заказа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropOrderId(pub Uuid);

impl DropOrderId {
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

impl AggregateId for DropOrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(DropOrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Заказ покупателя из магазина, подлежащий размещению у поставщика
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<DropOrderId>,

    // Специфичные поля агрегата
    /// Магазин, из которого пришёл заказ
    #[serde(rename = "storeRef")]
    pub store_ref: String,

    /// Номер заказа на стороне площадки
    #[serde(rename = "externalNumber")]
    pub external_number: String,

    /// Количество позиций в заказе
    #[serde(rename = "itemCount")]
    pub item_count: i32,

    /// Сумма заказа в рублях
    pub total: f64,

    pub status: OrderStatus,

    /// Номер заказа у поставщика после размещения
    #[serde(rename = "supplierOrderNumber")]
    pub supplier_order_number: Option<String>,
}

impl DropOrder {
    /// Получить ID как строку
    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Заказ можно отправлять на размещение
    pub fn is_placeable(&self) -> bool {
        self.status.is_placeable()
    }
}

impl AggregateRoot for DropOrder {
    type Id = DropOrderId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "drop_order"
    }

    fn element_name() -> &'static str {
        "Заказ"
    }

    fn list_name() -> &'static str {
        "Заказы"
    }
}
