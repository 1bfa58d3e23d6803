pub mod concept;
pub mod error;
pub mod llm_backends;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod prompting;
pub mod workflows;
#[allow(unused_imports)]
pub(crate) use anyhow::{anyhow, bail, Result};
pub use prelude::*;
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn, Level};
