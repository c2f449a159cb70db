/// Универсальные утилиты для работы со списками (поиск, сортировка, UI компоненты)
use leptos::prelude::*;
use std::cmp::Ordering;

/// Минимальная длина поискового запроса
const MIN_FILTER_LEN: usize = 3;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Сортирует список по указанному полю
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Фильтрует список по поисковому запросу (короткие запросы игнорируются)
pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    if filter.trim().len() < MIN_FILTER_LEN {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(filter))
        .collect()
}

/// Индикатор направления сортировки для заголовка колонки
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field != field {
        ""
    } else if ascending {
        " ▲"
    } else {
        " ▼"
    }
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    if filter.trim().len() < MIN_FILTER_LEN {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let filter_lower = filter.to_lowercase();
    let text_lower = text.to_lowercase();

    let segments = match match_segments(text, &text_lower, &filter_lower) {
        Some(s) if !s.is_empty() => s,
        // Нет совпадений либо смещения ненадёжны — текст без подсветки
        _ => return view! { <span>{text.to_string()}</span> }.into_any(),
    };

    let parts: Vec<AnyView> = segments
        .into_iter()
        .map(|(start, end, highlighted)| {
            let chunk = text[start..end].to_string();
            if highlighted {
                view! {
                    <span style="background-color: #ff9800; color: white; padding: 1px 2px; border-radius: 2px; font-weight: 500;">
                        {chunk}
                    </span>
                }
                .into_any()
            } else {
                view! { <span>{chunk}</span> }.into_any()
            }
        })
        .collect();

    view! { <>{parts}</> }.into_any()
}

/// Байтовые сегменты `text` как (начало, конец, подсвечен).
///
/// Поиск идёт по `text_lower`, а вырезка — по `text`, поэтому смещения
/// валидны только пока приведение к нижнему регистру не меняет длину в
/// байтах ('İ' разворачивается в два символа). В этом случае — `None`,
/// вызывающий показывает текст без подсветки.
fn match_segments(
    text: &str,
    text_lower: &str,
    filter_lower: &str,
) -> Option<Vec<(usize, usize, bool)>> {
    if !text_lower.contains(filter_lower) {
        return Some(Vec::new());
    }
    if text.len() != text_lower.len() {
        return None;
    }

    let mut segments = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(filter_lower) {
        let start = last_pos + pos;
        let end = start + filter_lower.len();
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return None;
        }
        if start > last_pos {
            segments.push((last_pos, start, false));
        }
        segments.push((start, end, true));
        last_pos = end;
    }
    if last_pos < text.len() {
        segments.push((last_pos, text.len(), false));
    }
    Some(segments)
}

/// Поле поиска с кнопкой очистки
#[component]
#[allow(non_snake_case)]
pub fn SearchInput(
    /// Текущее значение фильтра (для отображения)
    #[prop(into)]
    value: Signal<String>,
    /// Вызывается на каждом изменении текста
    on_change: Callback<String>,
    #[prop(optional)] placeholder: String,
) -> impl IntoView {
    view! {
        <span style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                class="form-control"
                placeholder={placeholder}
                prop:value=move || value.get()
                on:input=move |ev| on_change.run(event_target_value(&ev))
            />
            {move || {
                if value.get().is_empty() {
                    view! { <span></span> }.into_any()
                } else {
                    view! {
                        <button
                            type="button"
                            style="position: absolute; right: 4px; border: none; background: none; cursor: pointer; color: #999;"
                            title="Очистить"
                            on:click=move |_| on_change.run(String::new())
                        >
                            {"×"}
                        </button>
                    }
                    .into_any()
                }
            }}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        code: String,
        qty: i64,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            self.code.to_lowercase().contains(&filter.to_lowercase())
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "code" => self.code.cmp(&other.code),
                "qty" => self.qty.cmp(&other.qty),
                _ => Ordering::Equal,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { code: "PRD-2".into(), qty: 5 },
            Row { code: "PRD-1".into(), qty: 9 },
            Row { code: "ORD-7".into(), qty: 1 },
        ]
    }

    #[test]
    fn test_filter_ignores_short_query() {
        assert_eq!(filter_list(rows(), "pr").len(), 3);
        assert_eq!(filter_list(rows(), "prd").len(), 2);
    }

    #[test]
    fn test_sort_by_field_both_directions() {
        let mut items = rows();
        sort_list(&mut items, "qty", true);
        assert_eq!(items[0].qty, 1);
        sort_list(&mut items, "qty", false);
        assert_eq!(items[0].qty, 9);
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("code", "code", true), " ▲");
        assert_eq!(get_sort_indicator("code", "code", false), " ▼");
        assert_eq!(get_sort_indicator("code", "qty", true), "");
    }

    fn segments_for(text: &str, filter: &str) -> Option<Vec<(usize, usize, bool)>> {
        match_segments(text, &text.to_lowercase(), &filter.to_lowercase())
    }

    #[test]
    fn test_match_segments_splits_around_matches() {
        let segments = segments_for("PRD-1 prd-2", "prd").unwrap();
        assert_eq!(
            segments,
            vec![(0, 3, true), (3, 6, false), (6, 9, true), (9, 11, false)]
        );
    }

    #[test]
    fn test_match_segments_cyrillic_offsets() {
        // Кириллица: 2 байта на символ, регистр длину не меняет
        let text = "Чехол для телефона";
        let segments = segments_for(text, "чехол").unwrap();
        assert_eq!(segments[0], (0, 10, true));
        assert!(!segments[1].2);
    }

    #[test]
    fn test_match_segments_no_match_is_empty() {
        assert_eq!(segments_for("PRD-1", "xyz"), Some(Vec::new()));
    }

    #[test]
    fn test_match_segments_rejects_length_changing_lowercase() {
        // 'İ' в нижнем регистре занимает больше байт: смещения ненадёжны
        let text = "İstanbul";
        let lower = text.to_lowercase();
        assert_ne!(text.len(), lower.len());
        assert_eq!(match_segments(text, &lower, "sta"), None);
    }
}
