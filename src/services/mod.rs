pub mod csv_io;
pub mod excel;
pub mod format;
pub mod lexicon;
pub mod pipeline;
pub mod scorer;
pub mod summary;
pub mod template;
