//! Типы данных пакетного запуска.

/// Один элемент пакетной работы: непрозрачный идентификатор серверного
/// ресурса (заказ, товар, магазин). Равенство — по значению.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem(String);

impl WorkItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Упорядоченный пакет элементов одного массового действия.
///
/// Инвариант: идентификаторы уникальны, порядок — порядок первого
/// вхождения (дубликаты отбрасываются при построении).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBatch {
    items: Vec<WorkItem>,
}

impl TaskBatch {
    /// Построить пакет из последовательности идентификаторов.
    /// Дубликаты схлопываются, выигрывает первое вхождение.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = std::collections::HashSet::new();
        let mut items = Vec::new();
        for id in ids {
            let id = id.into();
            if seen.insert(id.clone()) {
                items.push(WorkItem::new(id));
            }
        }
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<WorkItem> {
        self.items
    }
}

/// Счётчики хода пакета. Владеет ими только runner; репортёр и обработчик
/// завершения получают копии только для чтения.
///
/// Инвариант: `succeeded + failed <= total`; пакет завершён ровно тогда,
/// когда `succeeded + failed == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchProgress {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            succeeded: 0,
            failed: 0,
        }
    }

    /// Учесть результат одного элемента
    pub fn record(&mut self, success: bool) {
        debug_assert!(self.resolved() < self.total);
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn resolved(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.resolved() == self.total
    }

    /// Доля успешных, % от total (для зелёного сегмента индикатора)
    pub fn percent_succeeded(&self) -> f64 {
        self.percent_of(self.succeeded)
    }

    /// Доля ошибок, % от total (для красного сегмента индикатора)
    pub fn percent_failed(&self) -> f64 {
        self.percent_of(self.failed)
    }

    fn percent_of(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

/// Терминальная классификация пакета
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Все элементы успешны
    Completed,
    /// Часть элементов завершилась ошибкой
    CompletedWithErrors,
    /// Все элементы завершились ошибкой
    Failed,
    /// Пакет отменён: новые элементы не отправлялись
    Cancelled,
}

impl BatchStatus {
    pub fn classify(progress: BatchProgress, cancelled: bool) -> Self {
        if cancelled {
            BatchStatus::Cancelled
        } else if progress.failed == 0 {
            BatchStatus::Completed
        } else if progress.succeeded == 0 {
            BatchStatus::Failed
        } else {
            BatchStatus::CompletedWithErrors
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BatchStatus::Completed => "Завершено",
            BatchStatus::CompletedWithErrors => "Завершено с ошибками",
            BatchStatus::Failed => "Ошибка",
            BatchStatus::Cancelled => "Отменено",
        }
    }
}

/// Результат одного элемента: идентификатор, успех и ответ-или-ошибка
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub item: WorkItem,
    pub success: bool,
    /// Пояснение от сервера (при успехе) либо текст ошибки
    pub message: Option<String>,
}

/// Итог пакета, возвращаемый runner'ом ровно один раз
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub progress: BatchProgress,
    pub status: BatchStatus,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Текст итоговой сводки: "2 успешно, 1 с ошибкой"
    pub fn summary_text(&self) -> String {
        match self.status {
            BatchStatus::Cancelled => format!(
                "Отменено: выполнено {} из {}",
                self.progress.resolved(),
                self.progress.total
            ),
            _ => format!(
                "{} успешно, {} с ошибкой",
                self.progress.succeeded, self.progress.failed
            ),
        }
    }
}

/// Состояние одного цикла массового действия в UI.
///
/// `Idle -> Collecting -> Running -> Complete`. Пустой выбор возвращает
/// в `Idle` (с предупреждением), минуя `Running`. Новый цикл начинается
/// только новым действием пользователя.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchRunState {
    Idle,
    Collecting,
    Running,
    Complete(BatchStatus),
}

impl BatchRunState {
    pub fn is_running(&self) -> bool {
        matches!(self, BatchRunState::Collecting | BatchRunState::Running)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchRunState::Complete(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_dedup_first_seen() {
        let batch = TaskBatch::new(["B", "A", "B", "C", "A"]);
        let ids: Vec<&str> = batch.items().iter().map(|i| i.as_str()).collect();
        assert_eq!(ids, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = TaskBatch::new(Vec::<String>::new());
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }

    #[test]
    fn test_progress_invariant_and_completion() {
        let mut p = BatchProgress::new(3);
        assert!(!p.is_complete());
        p.record(true);
        p.record(false);
        assert!(p.resolved() <= p.total);
        assert!(!p.is_complete());
        p.record(true);
        assert!(p.is_complete());
        assert_eq!(p.succeeded, 2);
        assert_eq!(p.failed, 1);
    }

    #[test]
    fn test_progress_percentages() {
        let mut p = BatchProgress::new(4);
        p.record(true);
        p.record(false);
        assert_eq!(p.percent_succeeded(), 25.0);
        assert_eq!(p.percent_failed(), 25.0);
        assert_eq!(BatchProgress::new(0).percent_succeeded(), 0.0);
    }

    #[test]
    fn test_status_classification() {
        let mut all_ok = BatchProgress::new(2);
        all_ok.record(true);
        all_ok.record(true);
        assert_eq!(
            BatchStatus::classify(all_ok, false),
            BatchStatus::Completed
        );

        let mut mixed = BatchProgress::new(2);
        mixed.record(true);
        mixed.record(false);
        assert_eq!(
            BatchStatus::classify(mixed, false),
            BatchStatus::CompletedWithErrors
        );

        let mut all_bad = BatchProgress::new(1);
        all_bad.record(false);
        assert_eq!(BatchStatus::classify(all_bad, false), BatchStatus::Failed);

        // Отмена перекрывает любую статистику
        assert_eq!(
            BatchStatus::classify(mixed, true),
            BatchStatus::Cancelled
        );
    }

    #[test]
    fn test_summary_text() {
        let mut p = BatchProgress::new(3);
        p.record(true);
        p.record(true);
        p.record(false);
        let report = BatchReport {
            progress: p,
            status: BatchStatus::classify(p, false),
            outcomes: Vec::new(),
        };
        assert_eq!(report.summary_text(), "2 успешно, 1 с ошибкой");
    }

    #[test]
    fn test_run_state_machine_flags() {
        assert!(!BatchRunState::Idle.is_running());
        assert!(BatchRunState::Collecting.is_running());
        assert!(BatchRunState::Running.is_running());
        assert!(BatchRunState::Complete(BatchStatus::Cancelled).is_terminal());
    }
}
