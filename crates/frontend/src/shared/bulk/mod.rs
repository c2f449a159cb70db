//! Пакетный запуск поэлементных операций ("разместить все заказы",
//! "выгрузить все товары", "удалить выбранные").
//!
//! Все массовые действия приложения имеют одну форму: собрать отмеченные
//! идентификаторы, отправить их на поэлементный endpoint по одному или с
//! небольшим ограниченным параллелизмом, отразить результат каждого
//! элемента в строке таблицы и показать итоговую сводку. Этот модуль —
//! единственная реализация этой формы:
//!
//! - [`selection`] — сбор отмеченных идентификаторов из DOM;
//! - [`batch`] — `TaskBatch`, `BatchProgress` и терминальные статусы;
//! - [`runner`] — очередь с ограниченным числом одновременных запросов;
//! - [`progress`] — индикатор прогресса и бейджи по элементам;
//! - [`controller`] — связка с сигналами Leptos и итоговым уведомлением.

pub mod batch;
pub mod controller;
pub mod progress;
pub mod runner;
pub mod selection;

pub use batch::{
    BatchProgress, BatchReport, BatchRunState, BatchStatus, ItemOutcome, TaskBatch, WorkItem,
};
pub use controller::BulkController;
pub use progress::{item_state_badge, BulkProgressBar, ItemState};
pub use runner::{run_batch, CancelToken};
pub use selection::collect_checked_ids;
