use serde::{Deserialize, Serialize};

/// Статус размещения заказа у поставщика
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Новый, ещё не размещался
    New,
    /// Отправлен на размещение
    Placing,
    /// Размещён у поставщика
    Placed,
    /// Размещение завершилось ошибкой
    PlacementFailed,
}

impl OrderStatus {
    /// Человекочитаемое название статуса
    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::New => "Новый",
            OrderStatus::Placing => "Размещается",
            OrderStatus::Placed => "Размещён",
            OrderStatus::PlacementFailed => "Ошибка размещения",
        }
    }

    /// Заказ ещё можно отправлять на размещение
    pub fn is_placeable(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::PlacementFailed)
    }
}
