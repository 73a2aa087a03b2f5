pub mod casino;
pub mod handlers;
pub mod processor;
pub mod wagers;
