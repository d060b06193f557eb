pub mod fetch;
pub mod get;
pub mod setup;
pub mod ui;
