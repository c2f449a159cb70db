use crate::enums::order_status::OrderStatus;
use serde::{Deserialize, Serialize};

/// Результат размещения одного заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub order_id: String,
    pub status: OrderStatus,
    /// Номер заказа у поставщика (при успехе)
    pub supplier_order_number: Option<String>,
    /// Текст ошибки (при неуспехе), показывается пользователю как есть
    pub message: Option<String>,
}
