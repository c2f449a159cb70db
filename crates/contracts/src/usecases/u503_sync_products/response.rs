use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Результат синхронизации одного товара
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncProductResponse {
    pub product_id: String,
    /// Актуальная закупочная цена
    pub purchase_price: f64,
    /// Актуальный остаток
    pub stock_qty: i64,
    pub synced_at: DateTime<Utc>,
    pub message: Option<String>,
}
