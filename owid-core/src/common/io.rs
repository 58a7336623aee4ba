//! Deterministic little-endian byte codec for OWID wire data.
//!
//! Both the wire form of an OWID and the exact message fed to the signature
//! primitive are assembled with [`ByteWriter`]; [`ByteReader`] is the
//! decoding dual. Any divergence between the two sides silently breaks
//! interop, so the framing rules here are normative.

use thiserror::Error;

/// Raw ECDSA P-256 signature length: `r` and `s`, 32 bytes each.
pub const SIGNATURE_LENGTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("cannot write an empty string")]
    EmptyString,

    #[error("{len} entries exceed the count field range")]
    TooLong { len: usize },

    #[error("signature must be {SIGNATURE_LENGTH} bytes, got {len}")]
    BadSignatureLength { len: usize },

    #[error("buffer truncated at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

/// Append-only writer over a growable byte buffer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_byte(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a string as one byte per UTF-16 code unit, truncated to the
    /// low 8 bits, followed by a single `0x00` terminator.
    ///
    /// This is the wire-compatible convention, not UTF-8. A code unit whose
    /// low byte is zero collides with the terminator; OWID domains are ASCII
    /// host names, so this never occurs in practice.
    pub fn write_string(&mut self, value: &str) -> Result<(), CodecError> {
        if value.is_empty() {
            return Err(CodecError::EmptyString);
        }
        for unit in value.encode_utf16() {
            self.buf.push((unit & 0xFF) as u8);
        }
        self.buf.push(0);
        Ok(())
    }

    /// Writes a `u16` count followed by each string. An empty list writes
    /// just the zero count.
    pub fn write_strings<S: AsRef<str>>(&mut self, values: &[S]) -> Result<(), CodecError> {
        if values.len() > usize::from(u16::MAX) {
            return Err(CodecError::TooLong { len: values.len() });
        }
        self.write_u16(values.len() as u16);
        for value in values {
            self.write_string(value.as_ref())?;
        }
        Ok(())
    }

    /// Writes a `u32` length prefix followed by the bytes.
    pub fn write_byte_array(&mut self, bytes: &[u8]) -> Result<(), CodecError> {
        let len = u32::try_from(bytes.len()).map_err(|_| CodecError::TooLong { len: bytes.len() })?;
        self.write_u32(len);
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_byte_array_no_length(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes exactly [`SIGNATURE_LENGTH`] raw signature bytes.
    pub fn write_signature(&mut self, signature: &[u8]) -> Result<(), CodecError> {
        if signature.len() != SIGNATURE_LENGTH {
            return Err(CodecError::BadSignatureLength {
                len: signature.len(),
            });
        }
        self.buf.extend_from_slice(signature);
        Ok(())
    }

    /// Alias for [`write_u32`](Self::write_u32): timestamps are minutes
    /// since the epoch base.
    pub fn write_date(&mut self, minutes: u32) {
        self.write_u32(minutes);
    }
}

/// Cursor-based reader over a borrowed byte slice.
#[derive(Debug)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < needed {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed,
                available: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + needed];
        self.pos += needed;
        Ok(slice)
    }

    pub fn read_byte(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, CodecError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32, CodecError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Reads bytes up to the `0x00` terminator and advances past it.
    pub fn read_string(&mut self) -> Result<String, CodecError> {
        let rest = &self.buf[self.pos..];
        match rest.iter().position(|&b| b == 0) {
            Some(end) => {
                let value = rest[..end].iter().map(|&b| b as char).collect();
                self.pos += end + 1;
                Ok(value)
            }
            None => Err(CodecError::Truncated {
                offset: self.pos,
                needed: rest.len() + 1,
                available: rest.len(),
            }),
        }
    }

    /// Reads a `u16` count followed by that many strings.
    pub fn read_strings(&mut self) -> Result<Vec<String>, CodecError> {
        let count = self.read_u16()?;
        let mut values = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            values.push(self.read_string()?);
        }
        Ok(values)
    }

    /// Reads a `u32` length prefix followed by the bytes.
    pub fn read_byte_array(&mut self) -> Result<Vec<u8>, CodecError> {
        let len = self.read_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    pub fn read_date(&mut self) -> Result<u32, CodecError> {
        self.read_u32()
    }

    pub fn read_signature(&mut self) -> Result<[u8; SIGNATURE_LENGTH], CodecError> {
        let bytes = self.take(SIGNATURE_LENGTH)?;
        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(bytes);
        Ok(signature)
    }
}
