mod config;
mod error;
mod protocol;
mod server;
mod session;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use protocol::{Request, Response, WizardView};
pub use server::serve;
pub use session::Session;
