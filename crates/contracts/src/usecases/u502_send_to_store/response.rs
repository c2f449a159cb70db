use serde::{Deserialize, Serialize};

/// Результат выгрузки одного товара
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendToStoreResponse {
    pub product_id: String,
    /// SKU, присвоенный площадкой
    pub listing_sku: Option<String>,
    pub message: Option<String>,
}
