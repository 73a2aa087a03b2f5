pub mod app;
pub mod common;
pub mod domain;
pub mod games;
pub mod io;
pub mod worker;
