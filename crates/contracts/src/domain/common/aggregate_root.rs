use super::EntityMetadata;

/// Трейт для корня агрегата
///
/// Определяет обязательные методы и метаданные для всех агрегатов системы
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id;

    /// Получить ID записи
    fn id(&self) -> Self::Id;

    /// Получить бизнес-код записи (например, "ORD-2025-0012")
    fn code(&self) -> &str;

    /// Получить описание/название записи
    fn description(&self) -> &str;

    /// Получить метаданные жизненного цикла
    fn metadata(&self) -> &EntityMetadata;

    /// Индекс агрегата в системе (например, "a001")
    fn aggregate_index() -> &'static str;

    /// Имя коллекции для API (например, "store")
    fn collection_name() -> &'static str;

    /// Имя элемента для UI (единственное число, например, "Магазин")
    fn element_name() -> &'static str;

    /// Имя списка для UI (множественное число, например, "Магазины")
    fn list_name() -> &'static str;

    /// Полное имя агрегата для системы (например, "a001_store")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
