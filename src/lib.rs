pub mod config;
pub mod form;
pub mod history;
pub mod query;
pub mod remote;
pub mod vocabulary;
