//! REST/JSON adapter for the project backend.
//!
//! The backend speaks Portuguese field names (`tarefas`, `nome`,
//! `dataInicio`, ...). [`models`] maps those payloads onto board types and
//! [`HttpProjectBackend`] issues the requests.

mod client;
mod config;
pub mod models;

pub use client::HttpProjectBackend;
pub use config::HttpBackendConfig;
