//! u502: Выгрузка товаров поставщика в магазин

pub mod request;
pub mod response;

pub use request::SendToStoreRequest;
pub use response::SendToStoreResponse;
