pub mod archived_file;
pub mod number_or_string;

pub use archived_file::ArchivedFileName;
pub use number_or_string::NumberOrString;
