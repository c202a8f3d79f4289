pub mod row;
pub mod sink;

pub use row::{encode_row, header_line, COLUMNS};
pub use sink::CsvSink;
