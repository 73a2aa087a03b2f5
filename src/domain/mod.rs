pub mod account;
pub mod history;
pub mod ledger;
pub mod password;
pub mod session;
pub mod store;
pub mod transaction;
