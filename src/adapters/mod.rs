pub mod decoder;
pub mod fs;
pub mod generated;
pub mod writer;
