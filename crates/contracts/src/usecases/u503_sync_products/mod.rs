//! u503: Синхронизация цен и остатков с поставщиком

pub mod request;
pub mod response;

pub use request::SyncProductRequest;
pub use response::SyncProductResponse;
