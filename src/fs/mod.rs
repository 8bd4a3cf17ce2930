//! FileSystem abstraction so evidence checks can run against real or in-memory trees

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{EntryKind, FileSystem};
pub use real::RealFileSystem;
