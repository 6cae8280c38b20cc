use super::periodic::{PeriodicTask, TaskControl, TaskHandle, TaskState};
use std::sync::Arc;
use tracing::info;

/// Starts a fixed set of periodic tasks and owns their handles.
///
/// Under normal operation no task ever stops itself, so `wait` blocks for
/// the process lifetime. The invariant held here: the set of running
/// handles equals the set of configured jobs until a coordinated shutdown.
pub struct TaskSupervisor {
    handles: Vec<TaskHandle>,
}

impl TaskSupervisor {
    /// Spawn every task concurrently. Task construction failures must be
    /// surfaced before this point; by the time a `PeriodicTask` exists it
    /// can always be started.
    pub fn start(tasks: Vec<PeriodicTask>) -> Self {
        info!("Supervisor starting {} periodic tasks", tasks.len());
        let handles = tasks.into_iter().map(PeriodicTask::spawn).collect();
        Self { handles }
    }

    pub fn handle(&self, name: &str) -> Option<&TaskHandle> {
        self.handles.iter().find(|h| h.name() == name)
    }

    pub fn task_names(&self) -> Vec<&str> {
        self.handles.iter().map(|h| h.name()).collect()
    }

    /// True while any task has not reached Stopped.
    pub fn any_running(&self) -> bool {
        self.handles.iter().any(|h| h.state() != TaskState::Stopped)
    }

    /// Detached handle for requesting a coordinated shutdown, e.g. from a
    /// signal listener.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            controls: self.handles.iter().map(|h| h.control()).collect(),
        }
    }

    /// Block until every task has observed cancellation and stopped.
    /// Never returns under normal operation.
    pub async fn wait(self) {
        for handle in self.handles {
            handle.join().await;
        }
        info!("Supervisor: all periodic tasks stopped");
    }

    /// Convenience: start the set and wait on it.
    pub async fn run(tasks: Vec<PeriodicTask>) {
        Self::start(tasks).wait().await;
    }
}

/// Cancels every supervised task. Cloneable and usable from any context.
#[derive(Clone)]
pub struct ShutdownHandle {
    controls: Vec<Arc<TaskControl>>,
}

impl ShutdownHandle {
    pub fn cancel_all(&self) {
        info!("Coordinated shutdown requested for {} tasks", self.controls.len());
        for control in &self.controls {
            control.cancel();
        }
    }
}
