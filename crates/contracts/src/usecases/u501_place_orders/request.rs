use serde::{Deserialize, Serialize};

/// Запрос размещения одного заказа
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// ID заказа (a003_drop_order)
    pub order_id: String,
}
