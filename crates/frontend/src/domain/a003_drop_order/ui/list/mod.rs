use crate::shared::api_utils::{fetch_json, post_json, with_timeout, REQUEST_TIMEOUT_MS};
use crate::shared::bulk::{collect_checked_ids, item_state_badge, BulkController, BulkProgressBar, WorkItem};
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use contracts::domain::a003_drop_order::aggregate::DropOrder;
use contracts::enums::order_status::OrderStatus;
use contracts::usecases::u501_place_orders::{PlaceOrderRequest, PlaceOrderResponse};
use leptos::prelude::*;
use std::collections::HashSet;

#[derive(Clone, Debug)]
pub struct DropOrderRow {
    pub id: String,
    pub code: String,
    pub store_ref: String,
    pub external_number: String,
    pub item_count: i32,
    pub total: f64,
    pub status: OrderStatus,
    pub supplier_order_number: String,
    pub created_at: String,
}

impl From<DropOrder> for DropOrderRow {
    fn from(o: DropOrder) -> Self {
        use contracts::domain::common::AggregateId;

        Self {
            id: o.base.id.as_string(),
            code: o.base.code,
            store_ref: o.store_ref,
            external_number: o.external_number,
            item_count: o.item_count,
            total: o.total,
            status: o.status,
            supplier_order_number: o.supplier_order_number.unwrap_or_else(|| "-".to_string()),
            created_at: o.base.metadata.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

fn status_cell(status: OrderStatus) -> AnyView {
    let color = match status {
        OrderStatus::New => "#6c757d",
        OrderStatus::Placing => "#007bff",
        OrderStatus::Placed => "#28a745",
        OrderStatus::PlacementFailed => "#dc3545",
    };
    view! {
        <span style={format!("color: {}; font-weight: 500;", color)}>
            {status.display_name()}
        </span>
    }
    .into_any()
}

#[component]
#[allow(non_snake_case)]
pub fn DropOrderList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<DropOrderRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (selected, set_selected) = signal::<HashSet<String>>(HashSet::new());

    let notifications = use_notifications();
    let bulk = BulkController::new(notifications);

    let fetch = move || {
        leptos::task::spawn_local(async move {
            match fetch_orders().await {
                Ok(v) => {
                    let rows: Vec<DropOrderRow> = v.into_iter().map(Into::into).collect();
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
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

    // Размещение строго по одному: поставщик не допускает параллельного
    // оформления заказов одной учётной записи
    let place_selected = move || {
        let ids = collect_checked_ids("#a003-order-table");
        bulk.start("Размещение заказов", ids, 1, move |item: WorkItem| async move {
            place_order(item.as_str()).await
        });
    };

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
                    <h1 class="header__title">{"Заказы"}</h1>
                </div>
                <div class="header__actions">
                    <button
                        class="button button--primary"
                        on:click=move |_| place_selected()
                        disabled={move || selected.get().is_empty() || bulk.is_running()}
                    >
                        {icon("send")}
                        {move || format!("Разместить заказы ({})", selected.get().len())}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Обновить"}
                    </button>
                    <Show when=move || bulk.is_running()>
                        <button class="button button--secondary" on:click=move |_| bulk.cancel()>
                            {icon("stop")}
                            {"Остановить"}
                        </button>
                    </Show>
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

            <div class="table" id="a003-order-table">
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
                                                // Отмечаются только заказы, подлежащие размещению
                                                for item in items.get().iter()
                                                    .filter(|r| r.status.is_placeable())
                                                {
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
                            <th class="table__header-cell">{"Номер на площадке"}</th>
                            <th class="table__header-cell">{"Магазин"}</th>
                            <th class="table__header-cell">{"Позиций"}</th>
                            <th class="table__header-cell">{"Сумма, ₽"}</th>
                            <th class="table__header-cell">{"Статус"}</th>
                            <th class="table__header-cell">{"Номер у поставщика"}</th>
                            <th class="table__header-cell">{"Создан"}</th>
                            <th class="table__header-cell">{"Размещение"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || items.get().into_iter().map(|row| {
                            let id = row.id.clone();
                            let id_for_checkbox = id.clone();
                            let id_for_toggle = id.clone();
                            let id_for_badge = id.clone();
                            let id_for_attr = id.clone();
                            let placeable = row.status.is_placeable();
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
                                            disabled={!placeable}
                                            prop:checked={move || selected.get().contains(&id_for_checkbox)}
                                            on:change=move |ev| toggle_select(id_for_toggle.clone(), event_target_checked(&ev))
                                        />
                                    </td>
                                    <td class="table__cell">{row.code}</td>
                                    <td class="table__cell">{row.external_number}</td>
                                    <td class="table__cell">{row.store_ref}</td>
                                    <td class="table__cell">{row.item_count}</td>
                                    <td class="table__cell">{format!("{:.2}", row.total)}</td>
                                    <td class="table__cell">{status_cell(row.status)}</td>
                                    <td class="table__cell">{row.supplier_order_number}</td>
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
        </div>
    }
}

async fn fetch_orders() -> Result<Vec<DropOrder>, String> {
    fetch_json("/api/drop_order").await
}

async fn place_order(order_id: &str) -> Result<Option<String>, String> {
    let request = PlaceOrderRequest {
        order_id: order_id.to_string(),
    };
    let response: PlaceOrderResponse = with_timeout(
        post_json("/api/usecases/u501_place_orders", &request),
        REQUEST_TIMEOUT_MS,
    )
    .await?;
    match response.status {
        OrderStatus::Placed => Ok(response
            .supplier_order_number
            .map(|n| format!("заказ {}", n))),
        _ => Err(response
            .message
            .unwrap_or_else(|| "Поставщик отклонил заказ".to_string())),
    }
}
