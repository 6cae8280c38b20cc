mod periodic;
mod supervisor;

pub use periodic::{PeriodicTask, TaskControl, TaskHandle, TaskState, WorkUnit};
pub use supervisor::{ShutdownHandle, TaskSupervisor};
