//! u504: Импорт каталога поставщика (длительная серверная задача)
//!
//! Клиент запускает задачу, получает `task_id` и дальше наблюдает за ней
//! через канал событий: каждое событие несёт идентификатор задачи и строку
//! статуса. События с чужим `task_id` игнорируются.

pub mod events;
pub mod request;
pub mod response;

pub use events::{JobStatus, JobStatusEvent};
pub use request::StartCatalogImportRequest;
pub use response::StartCatalogImportResponse;
