//! Сбор отмеченных идентификаторов из DOM.

use wasm_bindgen::JsCast;

/// Просканировать контейнер и вернуть идентификаторы отмеченных строк.
///
/// Идентификатор берётся из атрибута `data-id` самого чекбокса либо
/// ближайшего предка, несущего этот атрибут. Порядок — порядок DOM,
/// дубликаты схлопываются (выигрывает первое вхождение). Сканирование
/// ничего не изменяет, пустой выбор — пустой список; различать
/// "ничего не выбрано" обязан вызывающий.
pub fn collect_checked_ids(root_selector: &str) -> Vec<String> {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let root = match document.query_selector(root_selector) {
        Ok(Some(el)) => el,
        _ => return Vec::new(),
    };
    let nodes = match root.query_selector_all("input[type='checkbox']:checked") {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };

    let mut ids = Vec::new();
    for i in 0..nodes.length() {
        let element = match nodes.item(i).and_then(|n| n.dyn_into::<web_sys::Element>().ok()) {
            Some(el) => el,
            None => continue,
        };
        if let Some(id) = extract_item_id(&element) {
            ids.push(id);
        }
    }
    dedup_first_seen(ids)
}

/// `data-id` чекбокса либо ближайшего предка с этим атрибутом
fn extract_item_id(element: &web_sys::Element) -> Option<String> {
    if let Some(id) = element.get_attribute("data-id") {
        return Some(id);
    }
    element
        .closest("[data-id]")
        .ok()
        .flatten()
        .and_then(|ancestor| ancestor.get_attribute("data-id"))
}

/// Убрать дубликаты, сохранив порядок первых вхождений
pub fn dedup_first_seen(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let ids = vec![
            "p-2".to_string(),
            "p-1".to_string(),
            "p-2".to_string(),
            "p-3".to_string(),
            "p-1".to_string(),
        ];
        assert_eq!(dedup_first_seen(ids), vec!["p-2", "p-1", "p-3"]);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let ids = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let once = dedup_first_seen(ids);
        let twice = dedup_first_seen(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_dedup_empty() {
        assert!(dedup_first_seen(Vec::new()).is_empty());
    }
}
