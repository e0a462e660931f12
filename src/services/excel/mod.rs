pub mod reader;
pub mod utils;
pub mod writer;

pub use reader::read_xlsx;
pub use writer::XlsxWriter;
