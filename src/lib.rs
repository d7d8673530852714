pub mod browser;
pub mod checkpoint;
pub mod errors;
pub mod flows;
pub mod locator;
pub mod types;

pub use browser::BrowserSession;
pub use checkpoint::CheckpointRecorder;
pub use errors::{Result, VerifyError};
pub use locator::Locator;
pub use types::*;
