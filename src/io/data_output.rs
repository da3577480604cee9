//! Data output abstractions and implementations
//!
//! Writing side of the binary persistence formats: fixed-width little-endian
//! integers and length-prefixed UTF-8 strings, written to an in-memory vector
//! or any [`std::io::Write`] destination.

use std::io::{self, Write};

use crate::error::{ContainerError, Result};

/// Trait for writing structured data to various destinations
pub trait DataOutput {
    /// Write a single byte
    fn write_u8(&mut self, value: u8) -> Result<()>;

    /// Write a 32-bit unsigned integer in little-endian format
    fn write_u32(&mut self, value: u32) -> Result<()>;

    /// Write bytes from the provided buffer
    fn write_bytes(&mut self, data: &[u8]) -> Result<()>;

    /// Flush any buffered data to the underlying destination
    fn flush(&mut self) -> Result<()>;

    /// Write a 32-bit signed integer in little-endian format
    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_u32(value as u32)
    }

    /// Write a string prefixed by its byte length as a little-endian `i32`
    fn write_i32_prefixed_string(&mut self, s: &str) -> Result<()> {
        let len = i32::try_from(s.len()).map_err(|_| {
            ContainerError::invalid_data(format!(
                "String of {} bytes does not fit an i32 length prefix",
                s.len()
            ))
        })?;
        self.write_i32(len)?;
        self.write_bytes(s.as_bytes())
    }

    /// Get the total number of bytes written (if supported)
    fn bytes_written(&self) -> Option<u64> {
        None
    }
}

/// DataOutput implementation for Vec<u8>
pub struct VecDataOutput {
    data: Vec<u8>,
}

impl VecDataOutput {
    /// Create a new VecDataOutput
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a new VecDataOutput with the specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if no bytes have been written
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get a reference to the underlying data
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Convert into the underlying Vec<u8>
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl Default for VecDataOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl DataOutput for VecDataOutput {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.data.push(value);
        Ok(())
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.data.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.data.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn bytes_written(&self) -> Option<u64> {
        Some(self.data.len() as u64)
    }
}

/// DataOutput implementation for std::io::Write types
pub struct WriterDataOutput<W> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> WriterDataOutput<W> {
    /// Create a new WriterDataOutput from a Write type
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            bytes_written: 0,
        }
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Convert back to the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn put(&mut self, data: &[u8], what: &str) -> Result<()> {
        self.writer.write_all(data).map_err(|e| {
            ContainerError::Io(io::Error::new(
                e.kind(),
                format!("Failed to write {} at offset {}: {}", what, self.bytes_written, e),
            ))
        })?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }
}

impl<W: Write> DataOutput for WriterDataOutput<W> {
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.put(&[value], "u8")
    }

    fn write_u32(&mut self, value: u32) -> Result<()> {
        self.put(&value.to_le_bytes(), "u32")
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.put(data, "bytes")
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(ContainerError::from)
    }

    fn bytes_written(&self) -> Option<u64> {
        Some(self.bytes_written)
    }
}

/// Convenience function to create a DataOutput backed by a Vec<u8>
pub fn to_vec() -> VecDataOutput {
    VecDataOutput::new()
}

/// Convenience function to create a DataOutput from a Write type
pub fn to_writer<W: Write>(writer: W) -> WriterDataOutput<W> {
    WriterDataOutput::new(writer)
}
