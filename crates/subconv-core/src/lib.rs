pub mod config;
pub mod error;
pub mod logging;

pub mod batch;
pub mod compose;
pub mod encode;
pub mod history;
pub mod saved_config;
pub mod store;
pub mod template;
pub mod transfer;
pub mod validate;

pub use error::{Result, SubconvError};
