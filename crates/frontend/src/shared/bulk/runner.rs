//! Очередь поэлементных запросов с ограниченным числом одновременных
//! отправок.

use super::batch::{BatchProgress, BatchReport, BatchStatus, ItemOutcome, TaskBatch, WorkItem};
use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Кооперативный токен отмены.
///
/// Отмена останавливает постановку новых элементов; уже отправленные
/// запросы дорабатывают, их результаты учитываются.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Выполнить пакет: каждый элемент отправляется ровно один раз, без
/// повторов; ошибка элемента не прерывает пакет.
///
/// `concurrency` ограничивает число одновременно выполняющихся
/// `submit_one` (минимум 1). При `concurrency == 1` элемент N+1 не
/// отправляется, пока не получен результат элемента N: часть серверных
/// endpoint'ов небезопасна при параллельных вызовах для одного
/// родительского ресурса. Порядок отправки всегда совпадает с порядком
/// пакета; порядок завершения при `concurrency > 1` не гарантируется.
///
/// `on_item` вызывается на каждом результате с копией счётчиков и
/// результатом элемента. Функция возвращается ровно один раз — это и
/// есть событие завершения.
pub async fn run_batch<F, Fut, C>(
    batch: TaskBatch,
    concurrency: usize,
    cancel: CancelToken,
    submit_one: F,
    mut on_item: C,
) -> BatchReport
where
    F: Fn(WorkItem) -> Fut,
    Fut: Future<Output = Result<Option<String>, String>>,
    C: FnMut(BatchProgress, &ItemOutcome),
{
    let concurrency = concurrency.max(1);
    let total = batch.len();
    let mut progress = BatchProgress::new(total);
    let mut outcomes: Vec<ItemOutcome> = Vec::with_capacity(total);
    let mut pending = batch.into_items().into_iter();

    let submit = |item: WorkItem| {
        let fut = submit_one(item.clone());
        async move { (item, fut.await) }
    };

    // Начальное окно отправок
    let mut in_flight = FuturesUnordered::new();
    while in_flight.len() < concurrency && !cancel.is_cancelled() {
        match pending.next() {
            Some(item) => in_flight.push(submit(item)),
            None => break,
        }
    }

    while let Some((item, result)) = in_flight.next().await {
        let outcome = match result {
            Ok(message) => ItemOutcome {
                item,
                success: true,
                message,
            },
            Err(error) => ItemOutcome {
                item,
                success: false,
                message: Some(error),
            },
        };
        progress.record(outcome.success);
        on_item(progress, &outcome);
        outcomes.push(outcome);

        if !cancel.is_cancelled() {
            if let Some(next) = pending.next() {
                in_flight.push(submit(next));
            }
        }
    }

    let status = BatchStatus::classify(progress, cancel.is_cancelled());
    BatchReport {
        progress,
        status,
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    type SubmitResult = Result<Option<String>, String>;

    /// Управляемый "сервер": фиксирует порядок отправок, а разрешение
    /// каждого запроса управляется из теста через oneshot-каналы.
    #[derive(Clone, Default)]
    struct FakeServer {
        submissions: Rc<RefCell<Vec<String>>>,
        senders: Rc<RefCell<HashMap<String, oneshot::Sender<SubmitResult>>>>,
    }

    impl FakeServer {
        fn submitter(&self) -> impl Fn(WorkItem) -> futures::channel::oneshot::Receiver<SubmitResult> {
            let submissions = Rc::clone(&self.submissions);
            let senders = Rc::clone(&self.senders);
            move |item: WorkItem| {
                let (tx, rx) = oneshot::channel();
                submissions.borrow_mut().push(item.as_str().to_string());
                senders.borrow_mut().insert(item.into_string(), tx);
                rx
            }
        }

        fn submitted(&self) -> Vec<String> {
            self.submissions.borrow().clone()
        }

        fn resolve(&self, id: &str, result: SubmitResult) {
            let sender = self
                .senders
                .borrow_mut()
                .remove(id)
                .unwrap_or_else(|| panic!("запрос {id} не отправлялся"));
            sender.send(result).unwrap();
        }
    }

    struct Run {
        pool: LocalPool,
        server: FakeServer,
        report: Rc<RefCell<Option<BatchReport>>>,
        completions: Rc<RefCell<usize>>,
        events: Rc<RefCell<Vec<(String, bool, usize)>>>,
    }

    fn start_run(ids: &[&str], concurrency: usize, cancel: CancelToken) -> Run {
        let pool = LocalPool::new();
        let server = FakeServer::default();
        let report: Rc<RefCell<Option<BatchReport>>> = Rc::new(RefCell::new(None));
        let completions = Rc::new(RefCell::new(0usize));
        let events: Rc<RefCell<Vec<(String, bool, usize)>>> = Rc::new(RefCell::new(Vec::new()));

        let submit = {
            let raw = server.submitter();
            move |item: WorkItem| {
                let rx = raw(item);
                async move { rx.await.unwrap_or_else(|_| Err("канал закрыт".into())) }
            }
        };

        let batch = TaskBatch::new(ids.iter().map(|s| s.to_string()));
        let report_slot = Rc::clone(&report);
        let completions_slot = Rc::clone(&completions);
        let events_log = Rc::clone(&events);
        pool.spawner()
            .spawn_local(async move {
                let result = run_batch(batch, concurrency, cancel, submit, {
                    let events_log = Rc::clone(&events_log);
                    move |progress: BatchProgress, outcome: &ItemOutcome| {
                        assert!(progress.resolved() <= progress.total);
                        events_log.borrow_mut().push((
                            outcome.item.as_str().to_string(),
                            outcome.success,
                            progress.resolved(),
                        ));
                    }
                })
                .await;
                *report_slot.borrow_mut() = Some(result);
                *completions_slot.borrow_mut() += 1;
            })
            .unwrap();

        Run {
            pool,
            server,
            report,
            completions,
            events,
        }
    }

    #[test]
    fn test_sequential_order_and_mixed_results() {
        let mut run = start_run(&["A", "B", "C"], 1, CancelToken::new());

        // N+1 не отправляется, пока не разрешён N
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["A"]);

        run.server.resolve("A", Ok(None));
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["A", "B"]);
        assert!(run.report.borrow().is_none());

        run.server.resolve("B", Err("нет на складе".into()));
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["A", "B", "C"]);

        run.server.resolve("C", Ok(None));
        run.pool.run_until_stalled();

        let report = run.report.borrow().clone().expect("пакет не завершился");
        assert_eq!(report.progress.total, 3);
        assert_eq!(report.progress.succeeded, 2);
        assert_eq!(report.progress.failed, 1);
        assert_eq!(report.status, BatchStatus::CompletedWithErrors);
        assert_eq!(report.summary_text(), "2 успешно, 1 с ошибкой");

        let failed: Vec<&str> = report
            .outcomes
            .iter()
            .filter(|o| !o.success)
            .map(|o| o.item.as_str())
            .collect();
        assert_eq!(failed, vec!["B"]);
        assert_eq!(
            report
                .outcomes
                .iter()
                .find(|o| o.item.as_str() == "B")
                .and_then(|o| o.message.clone()),
            Some("нет на складе".to_string())
        );
        assert_eq!(*run.completions.borrow(), 1);
    }

    #[test]
    fn test_bounded_concurrency_out_of_order_resolution() {
        let mut run = start_run(&["i1", "i2", "i3", "i4"], 2, CancelToken::new());

        run.pool.run_until_stalled();
        // Окно из двух отправок, порядок отправки — порядок пакета
        assert_eq!(run.server.submitted(), vec!["i1", "i2"]);

        // Разрешаем в порядке [2, 1, 4, 3]
        run.server.resolve("i2", Ok(None));
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["i1", "i2", "i3"]);

        run.server.resolve("i1", Ok(None));
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["i1", "i2", "i3", "i4"]);

        run.server.resolve("i4", Ok(None));
        run.pool.run_until_stalled();
        assert!(run.report.borrow().is_none());

        run.server.resolve("i3", Ok(None));
        run.pool.run_until_stalled();

        let report = run.report.borrow().clone().unwrap();
        assert_eq!(report.progress, BatchProgress {
            total: 4,
            succeeded: 4,
            failed: 0,
        });
        assert_eq!(report.status, BatchStatus::Completed);
        assert_eq!(*run.completions.borrow(), 1);

        // Репортёр получил события в порядке разрешения, не отправки
        let order: Vec<String> = run.events.borrow().iter().map(|e| e.0.clone()).collect();
        assert_eq!(order, vec!["i2", "i1", "i4", "i3"]);
    }

    #[test]
    fn test_cancel_stops_scheduling_but_keeps_in_flight_result() {
        let cancel = CancelToken::new();
        let mut run = start_run(&["n1", "n2", "n3", "n4", "n5"], 1, cancel.clone());

        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["n1"]);

        cancel.cancel();
        run.server.resolve("n1", Ok(Some("размещён".into())));
        run.pool.run_until_stalled();

        // Элементы 2..5 так и не отправлены, результат n1 учтён
        assert_eq!(run.server.submitted(), vec!["n1"]);
        let report = run.report.borrow().clone().unwrap();
        assert_eq!(report.status, BatchStatus::Cancelled);
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].success);
        assert_eq!(report.progress.succeeded, 1);
        assert_eq!(report.progress.failed, 0);
        assert_eq!(report.progress.total, 5);
    }

    #[test]
    fn test_empty_batch_completes_immediately() {
        let mut run = start_run(&[], 2, CancelToken::new());
        run.pool.run_until_stalled();

        let report = run.report.borrow().clone().unwrap();
        assert_eq!(report.progress.total, 0);
        assert_eq!(report.status, BatchStatus::Completed);
        assert!(run.server.submitted().is_empty());
    }

    #[test]
    fn test_zero_concurrency_treated_as_one() {
        let mut run = start_run(&["x", "y"], 0, CancelToken::new());
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["x"]);
        run.server.resolve("x", Ok(None));
        run.pool.run_until_stalled();
        assert_eq!(run.server.submitted(), vec!["x", "y"]);
        run.server.resolve("y", Ok(None));
        run.pool.run_until_stalled();
        assert_eq!(run.report.borrow().clone().unwrap().progress.succeeded, 2);
    }
}
