pub mod manager;

pub use manager::{WorklogManager, WorklogManagerError};
