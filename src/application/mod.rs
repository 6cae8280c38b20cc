pub mod loops;
pub mod ml;
pub mod scheduler;
pub mod system;
