use crate::shared::api_utils::{fetch_json, http_delete, post_json, with_timeout, REQUEST_TIMEOUT_MS};
use crate::shared::bulk::{collect_checked_ids, item_state_badge, BulkController, BulkProgressBar, WorkItem};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    filter_list, get_sort_indicator, highlight_matches, sort_list, SearchInput, Searchable, Sortable,
};
use crate::shared::notifications::use_notifications;
use contracts::domain::a001_store::aggregate::Store;
use contracts::domain::a002_supplier_product::aggregate::SupplierProduct;
use contracts::usecases::u502_send_to_store::{SendToStoreRequest, SendToStoreResponse};
use contracts::usecases::u503_sync_products::{SyncProductRequest, SyncProductResponse};
use leptos::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Параллелизм выгрузки и синхронизации. Больше двух одновременных
/// запросов площадки начинают отвечать 429.
const SEND_CONCURRENCY: usize = 2;
const SYNC_CONCURRENCY: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct SupplierProductRow {
    pub id: String,
    pub code: String,
    pub description: String,
    pub article: String,
    pub supplier_sku: String,
    pub purchase_price: f64,
    pub stock_qty: i64,
    pub listed: bool,
    pub synced_at: String,
}

impl From<SupplierProduct> for SupplierProductRow {
    fn from(p: SupplierProduct) -> Self {
        use contracts::domain::common::AggregateId;

        let listed = p.is_listed();
        Self {
            id: p.base.id.as_string(),
            code: p.base.code,
            description: p.base.description,
            article: p.article,
            supplier_sku: p.supplier_sku,
            purchase_price: p.purchase_price,
            stock_qty: p.stock_qty,
            listed,
            synced_at: p
                .synced_at
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

impl Searchable for SupplierProductRow {
    fn matches_filter(&self, filter: &str) -> bool {
        let f = filter.to_lowercase();
        self.description.to_lowercase().contains(&f)
            || self.article.to_lowercase().contains(&f)
            || self.supplier_sku.to_lowercase().contains(&f)
    }
}

impl Sortable for SupplierProductRow {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "article" => self.article.cmp(&other.article),
            "description" => self.description.cmp(&other.description),
            "purchase_price" => self
                .purchase_price
                .partial_cmp(&other.purchase_price)
                .unwrap_or(Ordering::Equal),
            "stock_qty" => self.stock_qty.cmp(&other.stock_qty),
            _ => Ordering::Equal,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn SupplierProductList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<SupplierProductRow>>(Vec::new());
    let (stores, set_stores) = signal::<Vec<Store>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<HashSet<String>>(HashSet::new());
    let (search, set_search) = signal(String::new());
    let (sort_field, set_sort_field) = signal("article".to_string());
    let (sort_asc, set_sort_asc) = signal(true);

    // Окно выбора магазина для выгрузки
    let (show_send_modal, set_show_send_modal) = signal(false);
    let (send_store_id, set_send_store_id) = signal(String::new());
    let (send_markup, set_send_markup) = signal(String::new());
    let (send_error, set_send_error) = signal::<Option<String>>(None);

    let notifications = use_notifications();
    let bulk = BulkController::new(notifications);

    let fetch = move || {
        let query = search.get_untracked();
        leptos::task::spawn_local(async move {
            match fetch_products(&query).await {
                Ok(v) => {
                    let rows: Vec<SupplierProductRow> = v.into_iter().map(Into::into).collect();
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let fetch_store_options = move || {
        leptos::task::spawn_local(async move {
            if let Ok(v) = fetch_stores().await {
                set_stores.set(v.into_iter().filter(|s| s.is_active).collect());
            }
        });
    };

    let visible_rows = Memo::new(move |_| {
        let mut rows = filter_list(items.get(), &search.get());
        sort_list(&mut rows, &sort_field.get(), sort_asc.get());
        rows
    });

    let toggle_sort = move |field: &'static str| {
        if sort_field.get_untracked() == field {
            set_sort_asc.update(|a| *a = !*a);
        } else {
            set_sort_field.set(field.to_string());
            set_sort_asc.set(true);
        }
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

    let open_send_modal = move || {
        if bulk.is_running() {
            return;
        }
        set_send_error.set(None);
        set_send_markup.set(String::new());
        if let Some(first) = stores.get_untracked().first() {
            set_send_store_id.set(first.to_string_id());
        }
        set_show_send_modal.set(true);
    };

    // Выгрузка: магазин и наценка общие на пакет, повторяются в каждом
    // поэлементном запросе
    let start_send = move || {
        let store_id = send_store_id.get_untracked();
        if store_id.is_empty() {
            set_send_error.set(Some("Выберите магазин".to_string()));
            return;
        }
        let markup: f64 = {
            let raw = send_markup.get_untracked();
            if raw.trim().is_empty() {
                // Пустое поле — наценка магазина по умолчанию
                stores
                    .get_untracked()
                    .iter()
                    .find(|s| s.to_string_id() == store_id)
                    .map(|s| s.markup_percent)
                    .unwrap_or(0.0)
            } else {
                match raw.trim().parse() {
                    Ok(v) => v,
                    Err(_) => {
                        set_send_error.set(Some("Наценка должна быть числом".to_string()));
                        return;
                    }
                }
            }
        };
        set_show_send_modal.set(false);

        let ids = collect_checked_ids("#a002-product-table");
        bulk.start(
            "Выгрузка в магазин",
            ids,
            SEND_CONCURRENCY,
            move |item: WorkItem| {
                let store_id = store_id.clone();
                async move { send_to_store(item.as_str(), &store_id, markup).await }
            },
        );
    };

    let start_sync = move || {
        let ids = collect_checked_ids("#a002-product-table");
        bulk.start(
            "Синхронизация",
            ids,
            SYNC_CONCURRENCY,
            move |item: WorkItem| async move { sync_product(item.as_str()).await },
        );
    };

    // Удаление строго по одному
    let delete_selected = move || {
        let ids = collect_checked_ids("#a002-product-table");
        // Пустой выбор уходит в контроллер за предупреждением, без диалога
        if !ids.is_empty() {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message(&format!(
                        "Удалить выбранные товары? Количество: {}",
                        ids.len()
                    ))
                    .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
        }
        bulk.start("Удаление товаров", ids, 1, move |item: WorkItem| async move {
            delete_product(item.as_str()).await.map(|_| None)
        });
    };

    Effect::new(move |_| {
        if bulk.run_state.get().is_terminal() {
            set_selected.set(HashSet::new());
            fetch();
        }
    });

    fetch();
    fetch_store_options();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Товары поставщика"}</h1>
                </div>
                <div class="header__actions">
                    <SearchInput
                        value=Signal::derive(move || search.get())
                        on_change=Callback::new(move |v: String| {
                            set_search.set(v);
                        })
                        placeholder="Поиск (от 3 символов)".to_string()
                    />
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                </div>
            </div>

            <div class="header__actions" style="margin-bottom: 10px;">
                <button
                    class="button button--primary"
                    on:click=move |_| open_send_modal()
                    disabled={move || selected.get().is_empty() || bulk.is_running()}
                >
                    {icon("send")}
                    {move || format!("Отправить в магазин ({})", selected.get().len())}
                </button>
                <button
                    class="button button--secondary"
                    on:click=move |_| start_sync()
                    disabled={move || selected.get().is_empty() || bulk.is_running()}
                >
                    {icon("sync")}
                    {move || format!("Синхронизировать ({})", selected.get().len())}
                </button>
                <button
                    class="button button--secondary"
                    on:click=move |_| delete_selected()
                    disabled={move || selected.get().is_empty() || bulk.is_running()}
                >
                    {icon("delete")}
                    {move || format!("Удалить ({})", selected.get().len())}
                </button>
                <Show when=move || bulk.is_running()>
                    <button class="button button--secondary" on:click=move |_| bulk.cancel()>
                        {icon("stop")}
                        {"Остановить"}
                    </button>
                </Show>
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

            <div class="table" id="a002-product-table">
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
                                                for item in visible_rows.get().iter() {
                                                    s.insert(item.id.clone());
                                                }
                                            });
                                        } else {
                                            set_selected.set(HashSet::new());
                                        }
                                    }
                                />
                            </th>
                            <th class="table__header-cell" style="cursor: pointer;" on:click=move |_| toggle_sort("article")>
                                {move || format!("Артикул{}", get_sort_indicator(&sort_field.get(), "article", sort_asc.get()))}
                            </th>
                            <th class="table__header-cell" style="cursor: pointer;" on:click=move |_| toggle_sort("description")>
                                {move || format!("Описание{}", get_sort_indicator(&sort_field.get(), "description", sort_asc.get()))}
                            </th>
                            <th class="table__header-cell">{"SKU поставщика"}</th>
                            <th class="table__header-cell" style="cursor: pointer;" on:click=move |_| toggle_sort("purchase_price")>
                                {move || format!("Закупка, ₽{}", get_sort_indicator(&sort_field.get(), "purchase_price", sort_asc.get()))}
                            </th>
                            <th class="table__header-cell" style="cursor: pointer;" on:click=move |_| toggle_sort("stock_qty")>
                                {move || format!("Остаток{}", get_sort_indicator(&sort_field.get(), "stock_qty", sort_asc.get()))}
                            </th>
                            <th class="table__header-cell">{"Выгружен"}</th>
                            <th class="table__header-cell">{"Синхронизация"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || visible_rows.get().into_iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_checkbox = id.clone();
                            let id_for_toggle = id.clone();
                            let id_for_badge = id.clone();
                            let id_for_attr = id.clone();
                            let is_selected = selected.get().contains(&id);
                            view! {
                                <tr
                                    class="table__row"
                                    class:table__row--selected=is_selected
                                    data-id={id_for_attr}
                                >
                                    <td class="table__cell table__cell--checkbox">
                                        <input
                                            type="checkbox"
                                            class="table__checkbox"
                                            prop:checked={move || selected.get().contains(&id_for_checkbox)}
                                            on:change=move |ev| toggle_select(id_for_toggle.clone(), event_target_checked(&ev))
                                        />
                                    </td>
                                    <td class="table__cell">{highlight_matches(&row.article, &search.get())}</td>
                                    <td class="table__cell">{highlight_matches(&row.description, &search.get())}</td>
                                    <td class="table__cell">{row.supplier_sku}</td>
                                    <td class="table__cell">{format!("{:.2}", row.purchase_price)}</td>
                                    <td class="table__cell">{row.stock_qty}</td>
                                    <td class="table__cell">{if row.listed { "Да" } else { "-" }}</td>
                                    <td class="table__cell">{row.synced_at}</td>
                                    <td class="table__cell">
                                        {move || item_state_badge(bulk.item_state(&id_for_badge))}
                                    </td>
                                </tr>
                            }
                        }).collect_view()}
                    </tbody>
                </table>
            </div>

            <Show when=move || show_send_modal.get()>
                <div class="modal-overlay" style="position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center; z-index: 100;">
                    <div class="modal" style="background: white; border-radius: 8px; padding: 20px; width: min(420px, 95vw);">
                        <h2 style="margin-top: 0;">{"Выгрузка в магазин"}</h2>

                        {move || send_error.get().map(|e| view! {
                            <div style="color: var(--color-error); margin-bottom: 8px;">{e}</div>
                        })}

                        <div class="form-group">
                            <label>{"Магазин"}</label>
                            <select
                                class="form-control"
                                on:change=move |ev| set_send_store_id.set(event_target_value(&ev))
                            >
                                {move || stores.get().into_iter().map(|s| {
                                    let id = s.to_string_id();
                                    let id_for_selected = id.clone();
                                    let label = format!(
                                        "{} ({})",
                                        s.base.description,
                                        s.store_type.display_name()
                                    );
                                    view! {
                                        <option value={id} selected={move || send_store_id.get() == id_for_selected}>
                                            {label}
                                        </option>
                                    }
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="form-group">
                            <label>{"Наценка, % (пусто — наценка магазина)"}</label>
                            <input
                                type="number"
                                class="form-control"
                                prop:value=move || send_markup.get()
                                on:input=move |ev| set_send_markup.set(event_target_value(&ev))
                            />
                        </div>

                        <div style="display: flex; gap: 8px; justify-content: flex-end; margin-top: 16px;">
                            <button class="button button--secondary" on:click=move |_| set_show_send_modal.set(false)>
                                {"Отмена"}
                            </button>
                            <button class="button button--primary" on:click=move |_| start_send()>
                                {"Выгрузить"}
                            </button>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

async fn fetch_products(search: &str) -> Result<Vec<SupplierProduct>, String> {
    let path = if search.trim().len() >= 3 {
        format!("/api/supplier_product?search={}", urlencoding::encode(search.trim()))
    } else {
        "/api/supplier_product".to_string()
    };
    fetch_json(&path).await
}

async fn fetch_stores() -> Result<Vec<Store>, String> {
    fetch_json("/api/store").await
}

async fn send_to_store(
    product_id: &str,
    store_id: &str,
    markup_percent: f64,
) -> Result<Option<String>, String> {
    let request = SendToStoreRequest {
        product_id: product_id.to_string(),
        store_id: store_id.to_string(),
        markup_percent,
    };
    let response: SendToStoreResponse = with_timeout(
        post_json("/api/usecases/u502_send_to_store", &request),
        REQUEST_TIMEOUT_MS,
    )
    .await?;
    match response.listing_sku {
        Some(sku) => Ok(Some(format!("SKU {}", sku))),
        None => Err(response
            .message
            .unwrap_or_else(|| "Площадка не присвоила SKU".to_string())),
    }
}

async fn sync_product(product_id: &str) -> Result<Option<String>, String> {
    let request = SyncProductRequest {
        product_id: product_id.to_string(),
    };
    let response: SyncProductResponse = with_timeout(
        post_json("/api/usecases/u503_sync_products", &request),
        REQUEST_TIMEOUT_MS,
    )
    .await?;
    Ok(Some(format!(
        "цена {:.2}, остаток {}",
        response.purchase_price, response.stock_qty
    )))
}

async fn delete_product(id: &str) -> Result<(), String> {
    with_timeout(
        http_delete(&format!("/api/supplier_product/{}", id)),
        REQUEST_TIMEOUT_MS,
    )
    .await
}
