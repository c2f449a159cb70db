use serde::{Deserialize, Serialize};

/// Типы торговых площадок, в которых открываются магазины
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreType {
    Ozon,
    Wildberries,
    YandexMarket,
    Avito,
}

impl StoreType {
    /// Получить код площадки
    pub fn code(&self) -> &'static str {
        match self {
            StoreType::Ozon => "st-ozon",
            StoreType::Wildberries => "st-wb",
            StoreType::YandexMarket => "st-ym",
            StoreType::Avito => "st-avito",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            StoreType::Ozon => "Ozon",
            StoreType::Wildberries => "Wildberries",
            StoreType::YandexMarket => "Яндекс Маркет",
            StoreType::Avito => "Авито",
        }
    }

    /// Получить все типы площадок
    pub fn all() -> Vec<StoreType> {
        vec![
            StoreType::Ozon,
            StoreType::Wildberries,
            StoreType::YandexMarket,
            StoreType::Avito,
        ]
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "st-ozon" => Some(StoreType::Ozon),
            "st-wb" => Some(StoreType::Wildberries),
            "st-ym" => Some(StoreType::YandexMarket),
            "st-avito" => Some(StoreType::Avito),
            _ => None,
        }
    }
}

impl std::fmt::Display for StoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for st in StoreType::all() {
            assert_eq!(StoreType::from_code(st.code()), Some(st));
        }
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(StoreType::from_code("st-ebay"), None);
    }
}
