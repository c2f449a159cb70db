//! u501: Размещение заказов у поставщика
//!
//! Клиент отправляет заказы строго по одному: поставщик не допускает
//! параллельного размещения строк одного родительского заказа.

pub mod request;
pub mod response;

pub use request::PlaceOrderRequest;
pub use response::PlaceOrderResponse;
