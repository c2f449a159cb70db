use serde::{Deserialize, Serialize};

/// Запрос выгрузки одного товара в магазин.
///
/// Общие параметры пакета (магазин, наценка) повторяются в каждом
/// поэлементном запросе: backend не хранит состояние пакета.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendToStoreRequest {
    /// ID товара (a002_supplier_product)
    pub product_id: String,
    /// ID целевого магазина (a001_store)
    pub store_id: String,
    /// Наценка, %
    pub markup_percent: f64,
}
