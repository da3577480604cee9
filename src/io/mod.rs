//! Stream I/O for container persistence
//!
//! Binary formats go through the [`DataInput`] / [`DataOutput`] traits, which
//! read and write little-endian fixed-width fields. Text formats go through
//! the newline-delimited record helpers in [`text_records`].

pub mod data_input;
pub mod data_output;
pub mod text_records;

// Re-export core types
pub use data_input::{DataInput, ReaderDataInput, SliceDataInput};
pub use data_output::{DataOutput, VecDataOutput, WriterDataOutput};
pub use text_records::{read_text_records, write_text_records};

// Convenience functions
pub use data_input::{from_reader, from_slice};
pub use data_output::{to_vec, to_writer};
