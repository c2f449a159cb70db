use serde::{Deserialize, Serialize};

/// Запрос синхронизации одного товара
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncProductRequest {
    /// ID товара (a002_supplier_product)
    pub product_id: String,
}
