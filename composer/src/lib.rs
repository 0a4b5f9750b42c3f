pub mod compose;
pub mod env;
pub mod error;
pub mod manifest;
pub mod options;
pub mod pipeline;
pub mod resolver;
pub mod types;

pub use compose::{compose, Composed};
pub use env::EnvDocument;
pub use error::{Error, ErrorKind, Result};
pub use manifest::Manifest;
pub use options::{GenerationOptions, LoggingDriver};
pub use pipeline::{cleanup, generate, GenerationResult};
pub use resolver::resolve;
pub use types::{ClientRequest, ClientSelection, ClientSpec, Downgrade, RequestedClient};
