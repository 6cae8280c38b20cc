use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Lifecycle of one periodic task.
///
/// Running covers both executing the work unit and sleeping between
/// iterations. Cancelling means cancellation was requested while a work
/// unit may still be in flight; no further iteration starts after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TaskState {
    Idle = 0,
    Running = 1,
    Cancelling = 2,
    Stopped = 3,
}

impl TaskState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => TaskState::Idle,
            1 => TaskState::Running,
            2 => TaskState::Cancelling,
            _ => TaskState::Stopped,
        }
    }
}

/// One iteration's worth of work for a periodic task.
#[async_trait]
pub trait WorkUnit: Send {
    async fn run_once(&mut self) -> anyhow::Result<()>;
}

/// Shared, observable side of a running task: state, iteration counters
/// and the cancellation sender. Cheap to clone via Arc.
pub struct TaskControl {
    name: String,
    state: AtomicU8,
    completed: AtomicU64,
    skipped: AtomicU64,
    cancel_tx: watch::Sender<bool>,
}

impl TaskControl {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Iterations whose work unit returned Ok.
    pub fn completed_iterations(&self) -> u64 {
        self.completed.load(Ordering::SeqCst)
    }

    /// Iterations whose work unit failed and was skipped.
    pub fn skipped_iterations(&self) -> u64 {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Request cancellation. The current work unit finishes; no new one
    /// starts. Idempotent, and never affects sibling tasks.
    pub fn cancel(&self) {
        let _ = self.state.compare_exchange(
            TaskState::Running as u8,
            TaskState::Cancelling as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        let _ = self.cancel_tx.send(true);
    }
}

/// Repeat a unit of work every `interval`, forever, until cancelled.
///
/// A failing iteration is logged and skipped; the loop continues on its
/// normal schedule. Only cancellation stops the task.
pub struct PeriodicTask {
    name: String,
    interval: Duration,
    work: Box<dyn WorkUnit>,
}

impl PeriodicTask {
    pub fn new(name: impl Into<String>, interval: Duration, work: Box<dyn WorkUnit>) -> Self {
        Self {
            name: name.into(),
            interval,
            work,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start executing on the runtime. The first iteration runs
    /// immediately; subsequent ones follow after `interval`.
    pub fn spawn(self) -> TaskHandle {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let control = Arc::new(TaskControl {
            name: self.name.clone(),
            state: AtomicU8::new(TaskState::Idle as u8),
            completed: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
            cancel_tx,
        });

        let ctl = control.clone();
        let interval = self.interval;
        let mut work = self.work;
        let name = self.name;

        let join = tokio::spawn(async move {
            ctl.state
                .store(TaskState::Running as u8, Ordering::SeqCst);
            info!("{}: periodic task started (interval {:?})", name, interval);

            loop {
                match work.run_once().await {
                    Ok(()) => {
                        ctl.completed.fetch_add(1, Ordering::SeqCst);
                    }
                    Err(e) => {
                        ctl.skipped.fetch_add(1, Ordering::SeqCst);
                        warn!("{}: iteration skipped: {:#}", name, e);
                    }
                }

                // Cancellation observed after the work unit: finish it,
                // do not start another.
                if *cancel_rx.borrow() {
                    break;
                }

                tokio::select! {
                    _ = cancel_rx.changed() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }

            ctl.state
                .store(TaskState::Stopped as u8, Ordering::SeqCst);
            info!("{}: periodic task stopped", name);
        });

        TaskHandle { control, join }
    }
}

/// Owning handle for one spawned [`PeriodicTask`].
pub struct TaskHandle {
    control: Arc<TaskControl>,
    join: JoinHandle<()>,
}

impl TaskHandle {
    pub fn control(&self) -> Arc<TaskControl> {
        self.control.clone()
    }

    pub fn name(&self) -> &str {
        self.control.name()
    }

    pub fn state(&self) -> TaskState {
        self.control.state()
    }

    pub fn completed_iterations(&self) -> u64 {
        self.control.completed_iterations()
    }

    pub fn skipped_iterations(&self) -> u64 {
        self.control.skipped_iterations()
    }

    pub fn cancel(&self) {
        self.control.cancel();
    }

    /// Wait for the task to reach Stopped. Blocks forever unless
    /// cancellation was requested.
    pub async fn join(self) {
        let _ = self.join.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    struct CountingWork {
        count: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl WorkUnit for CountingWork {
        async fn run_once(&mut self) -> anyhow::Result<()> {
            self.count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("synthetic failure");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_task_runs_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let task = PeriodicTask::new(
            "test",
            Duration::from_millis(10),
            Box::new(CountingWork {
                count: count.clone(),
                fail: false,
            }),
        );
        let handle = task.spawn();

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert_eq!(handle.state(), TaskState::Running);
        assert!(handle.completed_iterations() >= 3);

        handle.cancel();
        handle.join().await;
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = PeriodicTask::new(
            "failing",
            Duration::from_millis(10),
            Box::new(CountingWork {
                count: count.clone(),
                fail: true,
            }),
        )
        .spawn();

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert_eq!(handle.state(), TaskState::Running);
        assert_eq!(handle.completed_iterations(), 0);
        assert!(handle.skipped_iterations() >= 3);

        handle.cancel();
        handle.join().await;
    }

    #[tokio::test]
    async fn test_cancel_reaches_stopped() {
        let count = Arc::new(AtomicUsize::new(0));
        let handle = PeriodicTask::new(
            "stop",
            Duration::from_millis(5),
            Box::new(CountingWork {
                count: count.clone(),
                fail: false,
            }),
        )
        .spawn();
        let control = handle.control();

        tokio::time::sleep(Duration::from_millis(20)).await;
        control.cancel();
        handle.join().await;
        assert_eq!(control.state(), TaskState::Stopped);

        let settled = control.completed_iterations();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(
            control.completed_iterations(),
            settled,
            "no iteration may run after Stopped"
        );
    }
}
