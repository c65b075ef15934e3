/// Filesystem adapters for file I/O operations
mod file_reader;
mod file_writer;
mod workspace;

pub(crate) use file_reader::read_checked_file;
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use workspace::LocalWorkspace;
