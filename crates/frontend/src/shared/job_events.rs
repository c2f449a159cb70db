//! Наблюдение за длительными серверными задачами.
//!
//! Канал уведомлений отдаёт события `{task_id, status, ...}`. Клиент
//! хранит идентификатор своей ожидаемой задачи и игнорирует события с
//! чужим `task_id`. Идентификатор переживает перезагрузку страницы
//! через localStorage.

use crate::shared::api_utils::{fetch_json, with_timeout, REQUEST_TIMEOUT_MS};
use contracts::usecases::u504_catalog_import::events::JobStatusEvent;
use leptos::task::spawn_local;

const POLL_INTERVAL_MS: u32 = 2_000;
const PENDING_TASK_KEY: &str = "u504_task_id";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn save_pending_task(task_id: &str) {
    if let Some(s) = storage() {
        let _ = s.set_item(PENDING_TASK_KEY, task_id);
    }
}

pub fn load_pending_task() -> Option<String> {
    storage().and_then(|s| s.get_item(PENDING_TASK_KEY).ok().flatten())
}

pub fn clear_pending_task() {
    if let Some(s) = storage() {
        let _ = s.remove_item(PENDING_TASK_KEY);
    }
}

/// Поллинг событий задачи до терминального статуса.
///
/// `on_event` получает каждое событие своей задачи; `on_error` — текст
/// ошибки поллинга. Событие с чужим `task_id` не доходит ни до одного
/// из колбэков.
pub fn watch_job<F, G>(task_id: String, on_event: F, on_error: G)
where
    F: Fn(JobStatusEvent) + 'static,
    G: Fn(String) + 'static,
{
    spawn_local(async move {
        loop {
            match fetch_latest_event(&task_id).await {
                Ok(Some(event)) => {
                    if event.task_id != task_id {
                        // Событие другой задачи
                    } else {
                        let terminal = event.status.is_terminal();
                        on_event(event);
                        if terminal {
                            clear_pending_task();
                            break;
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    // Задача не найдена: чистим устаревший идентификатор
                    if e.contains("404") {
                        clear_pending_task();
                    } else {
                        on_error(e);
                    }
                    break;
                }
            }
            gloo_timers::future::TimeoutFuture::new(POLL_INTERVAL_MS).await;
        }
    });
}

async fn fetch_latest_event(task_id: &str) -> Result<Option<JobStatusEvent>, String> {
    let path = format!("/api/jobs/{}/events/latest", task_id);
    with_timeout(fetch_json::<Option<JobStatusEvent>>(&path), REQUEST_TIMEOUT_MS).await
}
