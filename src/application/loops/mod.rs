pub mod alerts;
pub mod chat;
pub mod news;
pub mod trading;

pub use alerts::AlertLoop;
pub use chat::{ChatCommand, ChatLoop};
pub use news::NewsLoop;
pub use trading::TradingLoop;
