pub mod errors;
pub mod features;
pub mod ports;
pub mod signal;
