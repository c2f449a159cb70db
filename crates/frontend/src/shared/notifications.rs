//! Всплывающие уведомления (toast).
//!
//! Итоговые сводки пакетов и предупреждение "ничего не выбрано" идут
//! через этот сервис; поэлементные ошибки остаются в строках таблицы и
//! никогда не показываются блокирующими диалогами.

use leptos::prelude::*;
use leptos::task::spawn_local;

const AUTO_DISMISS_MS: u32 = 6_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub text: String,
}

/// Сервис уведомлений, доступный через context
#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    next_id: RwSignal<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NotificationLevel::Success, text.into());
    }

    pub fn warning(&self, text: impl Into<String>) {
        self.push(NotificationLevel::Warning, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NotificationLevel::Error, text.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|v| v.retain(|n| n.id != id));
    }

    pub fn items(&self) -> RwSignal<Vec<Notification>> {
        self.items
    }

    fn push(&self, level: NotificationLevel, text: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.items.update(|v| v.push(Notification { id, level, text }));

        // Автозакрытие
        let items = self.items;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
            items.update(|v| v.retain(|n| n.id != id));
        });
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Зарегистрировать сервис в context приложения
pub fn provide_notifications() -> NotificationService {
    let service = NotificationService::new();
    provide_context(service);
    service
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService context not found")
}

/// Стек уведомлений в правом верхнем углу
#[component]
#[allow(non_snake_case)]
pub fn NotificationHost() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div style="position: fixed; top: 16px; right: 16px; z-index: 2000; display: flex; flex-direction: column; gap: 8px; max-width: 420px;">
            {move || service.items().get().into_iter().map(|n| {
                let (bg, border) = match n.level {
                    NotificationLevel::Success => ("#e8f5e9", "#c8e6c9"),
                    NotificationLevel::Warning => ("#fff8e1", "#ffecb3"),
                    NotificationLevel::Error => ("#ffebee", "#ffcdd2"),
                };
                let id = n.id;
                view! {
                    <div
                        style={format!("padding: 10px 14px; background: {}; border: 1px solid {}; border-radius: 4px; cursor: pointer; font-size: 14px;", bg, border)}
                        on:click=move |_| service.dismiss(id)
                    >
                        {n.text.clone()}
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
