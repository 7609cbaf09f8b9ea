pub mod config;
pub mod event_log;
pub mod session;
pub mod viewer;

pub use config::*;
pub use event_log::*;
pub use session::*;
pub use viewer::*;
