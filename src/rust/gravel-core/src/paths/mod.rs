pub mod dir_path;
pub mod error;
pub mod file_path;
pub mod resolve;

pub use dir_path::DirPath;
pub use error::{Blame, ResolveError, ResolveErrorKind};
pub use file_path::FilePath;
pub use resolve::DriveStyle;
