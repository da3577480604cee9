//! Data input abstractions and implementations
//!
//! This module provides the reading side of the binary persistence formats:
//! fixed-width little-endian integers and length-prefixed UTF-8 strings, read
//! from byte slices or any [`std::io::Read`] source.

use std::io::{self, Read};

use crate::error::{ContainerError, Result};

/// Trait for reading structured data from various sources
pub trait DataInput {
    /// Read a single byte
    fn read_u8(&mut self) -> Result<u8>;

    /// Read a 32-bit unsigned integer in little-endian format
    fn read_u32(&mut self) -> Result<u32>;

    /// Read exact number of bytes into the provided buffer
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;

    /// Read a 32-bit signed integer in little-endian format
    fn read_i32(&mut self) -> Result<i32> {
        Ok(self.read_u32()? as i32)
    }

    /// Read a vector of bytes with the specified length
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_bytes(&mut buf)?;
        Ok(buf)
    }

    /// Read a string with the specified length (UTF-8 encoded)
    fn read_string(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_vec(len)?;
        String::from_utf8(bytes).map_err(|e| {
            ContainerError::invalid_data(format!("Invalid UTF-8 string: {}", e))
        })
    }

    /// Read a string prefixed by its byte length as a little-endian `i32`
    fn read_i32_prefixed_string(&mut self) -> Result<String> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(ContainerError::invalid_data(format!(
                "Negative string length prefix: {}",
                len
            )));
        }
        self.read_string(len as usize)
    }

    /// Get the current position (if supported)
    fn position(&self) -> Option<u64> {
        None
    }

    /// Check if there are more bytes to read (if supported)
    fn has_remaining(&self) -> Option<bool> {
        None
    }
}

/// DataInput implementation for byte slices
pub struct SliceDataInput<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceDataInput<'a> {
    /// Create a new SliceDataInput from a byte slice
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Get the current position
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get the remaining bytes
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Get a slice of the remaining data
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(ContainerError::unexpected_eof(format!(
                "Unexpected end of data: need {} bytes at offset {}, {} left",
                n,
                self.position,
                self.remaining()
            )));
        }
        let bytes = &self.data[self.position..self.position + n];
        self.position += n;
        Ok(bytes)
    }
}

impl<'a> DataInput for SliceDataInput<'a> {
    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        let bytes = self.take(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> Option<u64> {
        Some(self.position as u64)
    }

    fn has_remaining(&self) -> Option<bool> {
        Some(self.position < self.data.len())
    }
}

/// DataInput implementation for std::io::Read types
pub struct ReaderDataInput<R> {
    reader: R,
    position: u64,
}

impl<R: Read> ReaderDataInput<R> {
    /// Create a new ReaderDataInput from a Read type
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
        }
    }

    /// Get the current position
    pub fn pos(&self) -> u64 {
        self.position
    }

    /// Convert back to the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        self.reader.read_exact(buf).map_err(|e| {
            ContainerError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read {} at offset {}: {}", what, self.position, e),
            ))
        })?;
        self.position += buf.len() as u64;
        Ok(())
    }
}

impl<R: Read> DataInput for ReaderDataInput<R> {
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf, "u8")?;
        Ok(buf[0])
    }

    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf, "u32")?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.fill(buf, "bytes")
    }

    fn position(&self) -> Option<u64> {
        Some(self.position)
    }
}

/// Convenience function to create a DataInput from a byte slice
pub fn from_slice(data: &[u8]) -> SliceDataInput<'_> {
    SliceDataInput::new(data)
}

/// Convenience function to create a DataInput from a Read type
pub fn from_reader<R: Read>(reader: R) -> ReaderDataInput<R> {
    ReaderDataInput::new(reader)
}
