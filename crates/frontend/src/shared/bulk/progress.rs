//! Визуализация хода пакета: общий индикатор и статусы по строкам.

use super::batch::BatchProgress;
use leptos::prelude::*;

/// Состояние одного элемента в текущем пакете.
///
/// Ключом всегда служит идентификатор элемента, а не порядок прихода
/// ответов: при concurrency > 1 ответы приходят не по порядку.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    /// В очереди или в полёте
    Pending,
    Succeeded,
    /// Ошибка с текстом от сервера
    Failed(String),
}

impl ItemState {
    pub fn display_name(&self) -> &'static str {
        match self {
            ItemState::Pending => "В работе",
            ItemState::Succeeded => "Готово",
            ItemState::Failed(_) => "Ошибка",
        }
    }
}

/// Бейдж статуса элемента для ячейки таблицы
pub fn item_state_badge(state: Option<ItemState>) -> AnyView {
    match state {
        None => view! { <span></span> }.into_any(),
        Some(ItemState::Pending) => view! {
            <span style="color: #007bff; font-size: 12px;">{"В работе…"}</span>
        }
        .into_any(),
        Some(ItemState::Succeeded) => view! {
            <span style="color: #28a745; font-size: 12px; font-weight: bold;">{"Готово"}</span>
        }
        .into_any(),
        Some(ItemState::Failed(message)) => view! {
            <span style="color: #dc3545; font-size: 12px;" title={message.clone()}>
                {format!("Ошибка: {}", message)}
            </span>
        }
        .into_any(),
    }
}

/// Двухсегментный индикатор: зелёная доля — успешные, красная — ошибки
#[component]
#[allow(non_snake_case)]
pub fn BulkProgressBar(#[prop(into)] progress: Signal<BatchProgress>) -> impl IntoView {
    view! {
        <div style="margin: 10px 0;">
            <div style="background: #e0e0e0; height: 18px; border-radius: 4px; overflow: hidden; display: flex;">
                <div style={move || format!(
                    "width: {:.1}%; height: 100%; background: #28a745; transition: width 0.3s;",
                    progress.get().percent_succeeded()
                )}></div>
                <div style={move || format!(
                    "width: {:.1}%; height: 100%; background: #dc3545; transition: width 0.3s;",
                    progress.get().percent_failed()
                )}></div>
            </div>
            <div style="font-size: 12px; color: #666; margin-top: 4px;">
                {move || {
                    let p = progress.get();
                    format!("{} из {} (успешно: {}, с ошибкой: {})",
                        p.resolved(), p.total, p.succeeded, p.failed)
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(ItemState::Pending.display_name(), "В работе");
        assert_eq!(ItemState::Succeeded.display_name(), "Готово");
        assert_eq!(
            ItemState::Failed("нет остатка".into()).display_name(),
            "Ошибка"
        );
    }
}
