pub mod chat;
pub mod config;
pub mod error;
pub mod functions;
pub mod imaging;
pub mod logging;
pub mod rag;
pub mod structured;
pub mod tools;
pub mod vision;

#[cfg(test)]
pub(crate) mod testing;

pub use error::DemoError;
