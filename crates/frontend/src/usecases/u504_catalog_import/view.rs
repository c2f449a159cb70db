use super::api;
use crate::shared::job_events::{load_pending_task, save_pending_task, watch_job};
use crate::shared::notifications::use_notifications;
use contracts::usecases::u504_catalog_import::events::{JobStatus, JobStatusEvent};
use contracts::usecases::u504_catalog_import::StartCatalogImportRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Импорт каталога поставщика.
///
/// Импорт выполняется на сервере как длительная задача. Виджет только
/// запускает её и следит за событиями; при перезагрузке страницы
/// идентификатор задачи восстанавливается из localStorage и наблюдение
/// продолжается.
#[component]
#[allow(non_snake_case)]
pub fn CatalogImportWidget() -> impl IntoView {
    let (source_url, set_source_url) = signal(String::new());
    let (update_existing, set_update_existing) = signal(true);
    let (task_id, set_task_id) = signal(None::<String>);
    let (last_event, set_last_event) = signal(None::<JobStatusEvent>);
    let (error_msg, set_error_msg) = signal(String::new());

    let notifications = use_notifications();

    let watch = move |id: String| {
        set_task_id.set(Some(id.clone()));
        watch_job(
            id,
            move |event: JobStatusEvent| {
                let status = event.status;
                set_last_event.set(Some(event.clone()));
                if status.is_terminal() {
                    set_task_id.set(None);
                    let text = format!(
                        "Импорт каталога: {}{}",
                        status.display_name(),
                        event
                            .message
                            .as_deref()
                            .map(|m| format!(" ({})", m))
                            .unwrap_or_default()
                    );
                    match status {
                        JobStatus::Completed => notifications.success(text),
                        _ => notifications.error(text),
                    }
                }
            },
            move |e| {
                set_error_msg.set(format!("Ошибка получения статуса: {}", e));
                set_task_id.set(None);
            },
        );
    };

    // Восстановить наблюдение за незавершённой задачей при монтировании
    Effect::new(move |_| {
        if task_id.get_untracked().is_none() {
            if let Some(saved) = load_pending_task() {
                watch(saved);
            }
        }
    });

    let on_start = move |_| {
        let url = source_url.get_untracked();
        if url.trim().is_empty() {
            set_error_msg.set("Укажите адрес каталога поставщика".to_string());
            return;
        }
        set_error_msg.set(String::new());
        set_last_event.set(None);

        let request = StartCatalogImportRequest {
            source_url: url.trim().to_string(),
            update_existing: update_existing.get_untracked(),
        };
        spawn_local(async move {
            match api::start_import(request).await {
                Ok(response) => {
                    save_pending_task(&response.task_id);
                    watch(response.task_id);
                }
                Err(e) => set_error_msg.set(format!("Не удалось запустить импорт: {}", e)),
            }
        });
    };

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Импорт каталога"}</h1>
                </div>
            </div>

            <div style="max-width: 560px;">
                <div class="form-group">
                    <label>{"Адрес каталога поставщика"}</label>
                    <input
                        type="text"
                        class="form-control"
                        placeholder="https://supplier.example/catalog.xml"
                        prop:value=move || source_url.get()
                        on:input=move |ev| set_source_url.set(event_target_value(&ev))
                        disabled={move || task_id.get().is_some()}
                    />
                </div>
                <div class="form-group">
                    <label>
                        <input
                            type="checkbox"
                            prop:checked=move || update_existing.get()
                            on:change=move |ev| set_update_existing.set(event_target_checked(&ev))
                            disabled={move || task_id.get().is_some()}
                        />
                        {" Обновлять существующие товары"}
                    </label>
                </div>

                <button
                    class="button button--primary"
                    on:click=on_start
                    disabled={move || task_id.get().is_some()}
                >
                    {move || if task_id.get().is_some() { "Импорт выполняется…" } else { "Запустить импорт" }}
                </button>

                {move || (!error_msg.get().is_empty()).then(|| view! {
                    <div class="warning-box" style="margin-top: 12px; background: var(--color-error-50); border-color: var(--color-error-100);">
                        <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                        <span class="warning-box__text" style="color: var(--color-error);">{error_msg.get()}</span>
                    </div>
                })}

                {move || last_event.get().map(|event| view! {
                    <div style="margin-top: 16px; padding: 12px; border: 1px solid #e0e0e0; border-radius: 6px;">
                        <div style="font-weight: 500;">
                            {format!("Статус: {}", event.status.display_name())}
                        </div>
                        <div style="color: #666; font-size: 13px; margin-top: 4px;">
                            {format!("Обработано позиций: {}", event.processed)}
                        </div>
                        {event.message.clone().map(|m| view! {
                            <div style="color: #666; font-size: 13px; margin-top: 4px;">{m}</div>
                        })}
                    </div>
                })}
            </div>
        </div>
    }
}
