use crate::shared::api_utils::{
    fetch_json, http_delete, post_json, put_json, with_timeout, REQUEST_TIMEOUT_MS,
};
use crate::shared::bulk::{
    collect_checked_ids, item_state_badge, BulkController, BulkProgressBar, WorkItem,
};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use contracts::domain::a001_store::aggregate::{Store, StoreDto};
use contracts::enums::store_type::StoreType;
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct StoreRow {
    pub id: String,
    pub code: String,
    pub description: String,
    pub store_type: StoreType,
    pub url: String,
    pub markup_percent: f64,
    pub is_active: bool,
    pub created_at: String,
}

impl From<Store> for StoreRow {
    fn from(s: Store) -> Self {
        use contracts::domain::common::AggregateId;

        Self {
            id: s.base.id.as_string(),
            code: s.base.code,
            description: s.base.description,
            store_type: s.store_type,
            url: s.url,
            markup_percent: s.markup_percent,
            is_active: s.is_active,
            created_at: format_timestamp(s.base.metadata.created_at),
        }
    }
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[component]
#[allow(non_snake_case)]
pub fn StoreList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<StoreRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_modal, set_show_modal) = signal(false);
    let (editing_id, set_editing_id) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<HashSet<String>>(HashSet::new());

    // Форма в модальном окне
    let (form_description, set_form_description) = signal(String::new());
    let (form_type, set_form_type) = signal(StoreType::Ozon);
    let (form_url, set_form_url) = signal(String::new());
    let (form_markup, set_form_markup) = signal("15".to_string());
    let (form_active, set_form_active) = signal(true);
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let notifications = use_notifications();
    let bulk = BulkController::new(notifications);

    let fetch = move || {
        leptos::task::spawn_local(async move {
            match fetch_stores().await {
                Ok(v) => {
                    let rows: Vec<StoreRow> = v.into_iter().map(Into::into).collect();
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let open_modal = move |id: Option<String>| {
        match &id {
            Some(id) => {
                if let Some(row) = items.get_untracked().iter().find(|r| &r.id == id) {
                    set_form_description.set(row.description.clone());
                    set_form_type.set(row.store_type);
                    set_form_url.set(row.url.clone());
                    set_form_markup.set(format!("{}", row.markup_percent));
                    set_form_active.set(row.is_active);
                }
            }
            None => {
                set_form_description.set(String::new());
                set_form_type.set(StoreType::Ozon);
                set_form_url.set(String::new());
                set_form_markup.set("15".to_string());
                set_form_active.set(true);
            }
        }
        set_form_error.set(None);
        set_editing_id.set(id);
        set_show_modal.set(true);
    };

    let save = move || {
        let markup: f64 = match form_markup.get_untracked().trim().parse() {
            Ok(v) => v,
            Err(_) => {
                set_form_error.set(Some("Наценка должна быть числом".to_string()));
                return;
            }
        };
        let dto = StoreDto {
            code: None,
            description: form_description.get_untracked(),
            comment: None,
            store_type: form_type.get_untracked(),
            url: form_url.get_untracked(),
            markup_percent: markup,
            is_active: form_active.get_untracked(),
        };
        let editing = editing_id.get_untracked();
        leptos::task::spawn_local(async move {
            let result = match &editing {
                Some(id) => update_store(id, &dto).await,
                None => create_store(&dto).await,
            };
            match result {
                Ok(_) => {
                    set_show_modal.set(false);
                    fetch();
                }
                Err(e) => set_form_error.set(Some(e)),
            }
        });
    };

    let toggle_select = move |id: String, checked: bool| {
        set_selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    };

    // Удаление строго по одному: backend блокирует справочник на запись
    let delete_selected = move || {
        let ids = collect_checked_ids("#a001-store-table");
        // Пустой выбор уходит в контроллер за предупреждением, без диалога
        if !ids.is_empty() {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message(&format!(
                        "Удалить выбранные магазины? Количество: {}",
                        ids.len()
                    ))
                    .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
        }
        bulk.start("Удаление магазинов", ids, 1, move |item: WorkItem| async move {
            delete_store(item.as_str()).await.map(|_| None)
        });
    };

    // Обновить список после завершения пакета
    Effect::new(move |_| {
        if bulk.run_state.get().is_terminal() {
            set_selected.set(HashSet::new());
            fetch();
        }
    });

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Магазины"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| open_modal(None)>
                        {icon("plus")}
                        {"Новый магазин"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                    <button
                        class="button button--secondary"
                        on:click=move |_| delete_selected()
                        disabled={move || selected.get().is_empty() || bulk.is_running()}
                    >
                        {icon("delete")}
                        {move || format!("Удалить ({})", selected.get().len())}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box" style="background: var(--color-error-50); border-color: var(--color-error-100);">
                    <span class="warning-box__icon" style="color: var(--color-error);">"⚠"</span>
                    <span class="warning-box__text" style="color: var(--color-error);">{e}</span>
                </div>
            })}

            <Show when=move || bulk.is_running()>
                <BulkProgressBar progress=Signal::derive(move || bulk.progress.get())/>
            </Show>

            <div class="table" id="a001-store-table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell table__header-cell--checkbox">
                                <input
                                    type="checkbox"
                                    class="table__checkbox"
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        if checked {
                                            set_selected.update(|s| {
                                                for item in items.get().iter() {
                                                    s.insert(item.id.clone());
                                                }
                                            });
                                        } else {
                                            set_selected.set(HashSet::new());
                                        }
                                    }
                                />
                            </th>
                            <th class="table__header-cell">{"Код"}</th>
                            <th class="table__header-cell">{"Наименование"}</th>
                            <th class="table__header-cell">{"Площадка"}</th>
                            <th class="table__header-cell">{"Витрина"}</th>
                            <th class="table__header-cell">{"Наценка, %"}</th>
                            <th class="table__header-cell">{"Активен"}</th>
                            <th class="table__header-cell">{"Создан"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_click = id.clone();
                            let id_for_checkbox = id.clone();
                            let id_for_toggle = id.clone();
                            let id_for_attr = id.clone();
                            let id_for_badge = id.clone();
                            let is_selected = selected.get().contains(&id);
                            view! {
                                <tr
                                    class="table__row"
                                    class:table__row--selected=is_selected
                                    data-id={id_for_attr}
                                    on:click=move |_| open_modal(Some(id_for_click.clone()))
                                >
                                    <td class="table__cell table__cell--checkbox" on:click=|ev| ev.stop_propagation()>
                                        <input
                                            type="checkbox"
                                            class="table__checkbox"
                                            prop:checked={move || selected.get().contains(&id_for_checkbox)}
                                            on:change=move |ev| toggle_select(id_for_toggle.clone(), event_target_checked(&ev))
                                        />
                                    </td>
                                    <td class="table__cell">{row.code}</td>
                                    <td class="table__cell">{row.description}</td>
                                    <td class="table__cell">{row.store_type.display_name()}</td>
                                    <td class="table__cell">{row.url}</td>
                                    <td class="table__cell">{format!("{:.1}", row.markup_percent)}</td>
                                    <td class="table__cell">{if row.is_active { "Да" } else { "Нет" }}</td>
                                    <td class="table__cell">{row.created_at}</td>
                                    <td class="table__cell">
                                        {move || item_state_badge(bulk.item_state(&id_for_badge))}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <Show when=move || show_modal.get()>
                <div class="modal-overlay" style="position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 100;">
                    <div class="modal" style="background: white; border-radius: 8px; padding: 20px; width: min(520px, 95vw);">
                        <h2 style="margin-top: 0;">
                            {move || if editing_id.get().is_some() { "Магазин" } else { "Новый магазин" }}
                        </h2>

                        {move || form_error.get().map(|e| view! {
                            <div style="color: var(--color-error); margin-bottom: 8px;">{e}</div>
                        })}

                        <div class="form-group">
                            <label>{"Наименование"}</label>
                            <input
                                type="text"
                                class="form-control"
                                prop:value=move || form_description.get()
                                on:input=move |ev| set_form_description.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>{"Площадка"}</label>
                            <select
                                class="form-control"
                                on:change=move |ev| {
                                    if let Some(t) = StoreType::from_code(&event_target_value(&ev)) {
                                        set_form_type.set(t);
                                    }
                                }
                            >
                                {StoreType::all().iter().map(|t| {
                                    let t = *t;
                                    view! {
                                        <option value={t.code()} selected={move || form_type.get() == t}>
                                            {t.display_name()}
                                        </option>
                                    }
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="form-group">
                            <label>{"Адрес витрины"}</label>
                            <input
                                type="text"
                                class="form-control"
                                placeholder="https://..."
                                prop:value=move || form_url.get()
                                on:input=move |ev| set_form_url.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>{"Наценка по умолчанию, %"}</label>
                            <input
                                type="number"
                                class="form-control"
                                prop:value=move || form_markup.get()
                                on:input=move |ev| set_form_markup.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || form_active.get()
                                    on:change=move |ev| set_form_active.set(event_target_checked(&ev))
                                />
                                {" Активен"}
                            </label>
                        </div>

                        <div style="display: flex; gap: 8px; justify-content: flex-end; margin-top: 16px;">
                            <button class="button button--secondary" on:click=move |_| set_show_modal.set(false)>
                                {"Отмена"}
                            </button>
                            <button class="button button--primary" on:click=move |_| save()>
                                {"Сохранить"}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

async fn fetch_stores() -> Result<Vec<Store>, String> {
    fetch_json("/api/store").await
}

async fn create_store(dto: &StoreDto) -> Result<Store, String> {
    post_json("/api/store", dto).await
}

async fn update_store(id: &str, dto: &StoreDto) -> Result<Store, String> {
    put_json(&format!("/api/store/{}", id), dto).await
}

async fn delete_store(id: &str) -> Result<(), String> {
    with_timeout(
        http_delete(&format!("/api/store/{}", id)),
        REQUEST_TIMEOUT_MS,
    )
    .await
}
