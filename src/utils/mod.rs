pub mod error;

pub use error::{DockletError, Result};
