//! Связка runner'а с сигналами Leptos и итоговым уведомлением.

use super::batch::{BatchProgress, BatchReport, BatchRunState, BatchStatus, TaskBatch, WorkItem};
use super::progress::ItemState;
use super::runner::{run_batch, CancelToken};
use crate::shared::notifications::NotificationService;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::future::Future;

/// Контроллер одного массового действия на странице.
///
/// Держит сигналы, из которых страница рисует индикатор, бейджи строк и
/// состояние кнопок. Пока пакет выполняется, повторный запуск
/// игнорируется; кнопки запуска должны быть задизейблены через
/// [`BulkController::is_running`]. Итоговое уведомление показывается до
/// перехода в `Complete`, поэтому закрытие модального окна по
/// завершении никогда не опережает сводку.
#[derive(Clone, Copy)]
pub struct BulkController {
    pub run_state: RwSignal<BatchRunState>,
    pub progress: RwSignal<BatchProgress>,
    pub item_states: RwSignal<HashMap<String, ItemState>>,
    pub report: RwSignal<Option<BatchReport>>,
    cancel: RwSignal<Option<CancelToken>>,
    notifications: NotificationService,
}

impl BulkController {
    pub fn new(notifications: NotificationService) -> Self {
        Self {
            run_state: RwSignal::new(BatchRunState::Idle),
            progress: RwSignal::new(BatchProgress::default()),
            item_states: RwSignal::new(HashMap::new()),
            report: RwSignal::new(None),
            cancel: RwSignal::new(None),
            notifications,
        }
    }

    /// Запустить пакет по собранным идентификаторам.
    ///
    /// Пустой список — это не пакет: пользователь получает
    /// предупреждение, состояние возвращается в `Idle`, ни одного
    /// запроса не уходит.
    pub fn start<F, Fut>(
        &self,
        label: &'static str,
        ids: Vec<String>,
        concurrency: usize,
        submit_one: F,
    ) where
        F: Fn(WorkItem) -> Fut + 'static,
        Fut: Future<Output = Result<Option<String>, String>> + 'static,
    {
        let batch = match plan_start(self.run_state.get_untracked(), ids) {
            StartPlan::AlreadyRunning => return,
            StartPlan::NothingSelected => {
                self.notifications
                    .warning(format!("{}: ничего не выбрано", label));
                self.run_state.set(BatchRunState::Idle);
                return;
            }
            StartPlan::Run(batch) => batch,
        };
        self.run_state.set(BatchRunState::Collecting);

        let token = CancelToken::new();
        self.cancel.set(Some(token.clone()));
        self.progress.set(BatchProgress::new(batch.len()));
        self.item_states.set(
            batch
                .items()
                .iter()
                .map(|i| (i.as_str().to_string(), ItemState::Pending))
                .collect(),
        );
        self.report.set(None);
        self.run_state.set(BatchRunState::Running);

        let this = *self;
        spawn_local(async move {
            let progress_signal = this.progress;
            let item_states = this.item_states;
            let report = run_batch(batch, concurrency, token, submit_one, move |p, outcome| {
                progress_signal.set(p);
                let state = if outcome.success {
                    ItemState::Succeeded
                } else {
                    ItemState::Failed(
                        outcome
                            .message
                            .clone()
                            .unwrap_or_else(|| "Ошибка".to_string()),
                    )
                };
                item_states.update(|m| {
                    m.insert(outcome.item.as_str().to_string(), state);
                });
            })
            .await;

            // Ровно одна итоговая сводка на пакет
            let summary = format!("{}: {}", label, report.summary_text());
            match report.status {
                BatchStatus::Completed => this.notifications.success(summary),
                BatchStatus::CompletedWithErrors | BatchStatus::Cancelled => {
                    this.notifications.warning(summary)
                }
                BatchStatus::Failed => this.notifications.error(summary),
            }

            let status = report.status;
            this.report.set(Some(report));
            this.run_state.set(BatchRunState::Complete(status));
        });
    }

    /// Прекратить постановку новых элементов; запросы в полёте дорабатывают
    pub fn cancel(&self) {
        if let Some(token) = self.cancel.get_untracked() {
            token.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.run_state.get().is_running()
    }

    /// Статус элемента для бейджа в строке таблицы
    pub fn item_state(&self, id: &str) -> Option<ItemState> {
        self.item_states.get().get(id).cloned()
    }
}

/// Решение о запуске: runner вызывается только для `Run`
#[derive(Debug, PartialEq, Eq)]
enum StartPlan {
    /// Пакет уже выполняется, повторный запуск игнорируется
    AlreadyRunning,
    /// Пустой выбор: предупреждение и возврат в `Idle`, ни одного запроса
    NothingSelected,
    Run(TaskBatch),
}

fn plan_start(state: BatchRunState, ids: Vec<String>) -> StartPlan {
    if state.is_running() {
        return StartPlan::AlreadyRunning;
    }
    let batch = TaskBatch::new(ids);
    if batch.is_empty() {
        StartPlan::NothingSelected
    } else {
        StartPlan::Run(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::bulk::batch::BatchStatus;

    #[test]
    fn test_empty_selection_warns_and_submits_nothing() {
        assert_eq!(
            plan_start(BatchRunState::Idle, Vec::new()),
            StartPlan::NothingSelected
        );
        // Повторный запуск из терминального состояния тоже отклоняет пустой выбор
        assert_eq!(
            plan_start(
                BatchRunState::Complete(BatchStatus::Completed),
                Vec::new()
            ),
            StartPlan::NothingSelected
        );
    }

    #[test]
    fn test_start_ignored_while_batch_is_running() {
        assert_eq!(
            plan_start(BatchRunState::Running, vec!["a".to_string()]),
            StartPlan::AlreadyRunning
        );
        assert_eq!(
            plan_start(BatchRunState::Collecting, vec!["a".to_string()]),
            StartPlan::AlreadyRunning
        );
    }

    #[test]
    fn test_run_plan_carries_deduped_batch() {
        let plan = plan_start(
            BatchRunState::Idle,
            vec!["p-1".to_string(), "p-2".to_string(), "p-1".to_string()],
        );
        assert_eq!(plan, StartPlan::Run(TaskBatch::new(["p-1", "p-2"])));
    }
}
