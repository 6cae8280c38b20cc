pub mod chain;
pub mod chat;
pub mod i18n;
pub mod market;
pub mod news;
pub mod notify;
