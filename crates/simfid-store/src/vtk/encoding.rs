//! DataArray payload decoding for VTK XML files.
//!
//! Binary payloads are base64 text. Uncompressed arrays carry a one-item
//! header (payload byte count); zlib-compressed arrays carry
//! `[nblocks, block_size, last_block_size, compressed_size...]`. VTK writers
//! encode the header and the data as separate base64 runs, some encode
//! them jointly; both are accepted for uncompressed data.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use std::io::Read;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("unsupported data type '{0}'")]
    UnsupportedType(String),

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("payload truncated: needed {needed} bytes, found {available}")]
    Truncated { needed: usize, available: usize },

    #[error("zlib block {block} could not be inflated: {reason}")]
    Inflate { block: usize, reason: String },

    #[error("invalid ascii value '{0}'")]
    InvalidNumber(String),

    #[error("payload of {bytes} bytes is not a whole number of {size}-byte values")]
    Misaligned { bytes: usize, size: usize },
}

type DecodeResult<T> = std::result::Result<T, DecodeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// Parse the `byte_order` attribute; VTK defaults to little endian
    pub fn from_vtk(name: Option<&str>) -> Self {
        match name {
            Some("BigEndian") => ByteOrder::BigEndian,
            _ => ByteOrder::LittleEndian,
        }
    }

    fn fix<const N: usize>(self, bytes: &[u8]) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&bytes[..N]);
        if self == ByteOrder::BigEndian {
            out.reverse();
        }
        out
    }
}

/// Scalar element types a DataArray may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl ScalarType {
    /// Parse a `type` attribute (also accepts the legacy lower-case names)
    pub fn from_vtk(name: &str) -> DecodeResult<Self> {
        let ty = match name {
            "Int8" | "char" => ScalarType::Int8,
            "UInt8" | "unsigned_char" => ScalarType::UInt8,
            "Int16" | "short" => ScalarType::Int16,
            "UInt16" | "unsigned_short" => ScalarType::UInt16,
            "Int32" | "int" => ScalarType::Int32,
            "UInt32" | "unsigned_int" => ScalarType::UInt32,
            "Int64" | "long" | "vtkIdType" => ScalarType::Int64,
            "UInt64" | "unsigned_long" => ScalarType::UInt64,
            "Float32" | "float" => ScalarType::Float32,
            "Float64" | "double" => ScalarType::Float64,
            other => return Err(DecodeError::UnsupportedType(other.to_string())),
        };
        Ok(ty)
    }

    pub fn size(self) -> usize {
        match self {
            ScalarType::Int8 | ScalarType::UInt8 => 1,
            ScalarType::Int16 | ScalarType::UInt16 => 2,
            ScalarType::Int32 | ScalarType::UInt32 | ScalarType::Float32 => 4,
            ScalarType::Int64 | ScalarType::UInt64 | ScalarType::Float64 => 8,
        }
    }

    /// Read one value; `bytes` must hold at least `self.size()` bytes
    fn read(self, bytes: &[u8], order: ByteOrder) -> f64 {
        match self {
            ScalarType::Int8 => bytes[0] as i8 as f64,
            ScalarType::UInt8 => bytes[0] as f64,
            ScalarType::Int16 => i16::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::UInt16 => u16::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::Int32 => i32::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::UInt32 => u32::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::Int64 => i64::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::UInt64 => u64::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::Float32 => f32::from_le_bytes(order.fix(bytes)) as f64,
            ScalarType::Float64 => f64::from_le_bytes(order.fix(bytes)),
        }
    }
}

/// Integer type of binary block headers (`header_type` attribute)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderType {
    UInt32,
    UInt64,
}

impl HeaderType {
    /// Parse the `header_type` attribute; files without one use 32-bit headers
    pub fn from_vtk(name: Option<&str>) -> DecodeResult<Self> {
        match name {
            None | Some("UInt32") => Ok(HeaderType::UInt32),
            Some("UInt64") => Ok(HeaderType::UInt64),
            Some(other) => Err(DecodeError::UnsupportedType(other.to_string())),
        }
    }

    fn size(self) -> usize {
        match self {
            HeaderType::UInt32 => 4,
            HeaderType::UInt64 => 8,
        }
    }

    fn read(self, bytes: &[u8], order: ByteOrder) -> usize {
        match self {
            HeaderType::UInt32 => u32::from_le_bytes(order.fix(bytes)) as usize,
            HeaderType::UInt64 => u64::from_le_bytes(order.fix(bytes)) as usize,
        }
    }
}

/// File-level settings shared by every binary DataArray
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryLayout {
    pub header: HeaderType,
    pub byte_order: ByteOrder,
    /// `compressor="vtkZLibDataCompressor"` on the root element
    pub compressed: bool,
}

impl Default for BinaryLayout {
    fn default() -> Self {
        Self {
            header: HeaderType::UInt32,
            byte_order: ByteOrder::LittleEndian,
            compressed: false,
        }
    }
}

/// Decode whitespace-separated ascii values
pub fn decode_ascii(text: &str) -> DecodeResult<Vec<f64>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| DecodeError::InvalidNumber(token.to_string()))
        })
        .collect()
}

/// Strip the whitespace writers put around and inside base64 runs
pub fn compact(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Decode one base64 DataArray payload starting at the beginning of `text`
///
/// `text` must be [`compact`]. It may run past the end of the array
/// (appended data); only the characters the header accounts for are consumed.
pub fn decode_base64(
    text: &str,
    scalar: ScalarType,
    layout: BinaryLayout,
) -> DecodeResult<Vec<f64>> {
    let bytes = if layout.compressed {
        compressed_bytes(text, layout)?
    } else {
        uncompressed_bytes(text, layout)?
    };
    to_values(&bytes, scalar, layout.byte_order)
}

fn chars_for(bytes: usize) -> Option<usize> {
    bytes.div_ceil(3).checked_mul(4)
}

/// A header claims more data than any payload could hold
fn oversized(available: usize) -> DecodeError {
    DecodeError::Truncated {
        needed: usize::MAX,
        available,
    }
}

fn b64(text: &str, start: usize, end: usize) -> DecodeResult<Vec<u8>> {
    let chunk = text.get(start..end).ok_or(DecodeError::Truncated {
        needed: end,
        available: text.len(),
    })?;
    STANDARD
        .decode(chunk)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
}

fn take(bytes: &[u8], start: usize, len: usize) -> DecodeResult<&[u8]> {
    let end = start
        .checked_add(len)
        .ok_or_else(|| oversized(bytes.len()))?;
    bytes.get(start..end).ok_or(DecodeError::Truncated {
        needed: end,
        available: bytes.len(),
    })
}

fn uncompressed_bytes(text: &str, layout: BinaryLayout) -> DecodeResult<Vec<u8>> {
    let too_big = || oversized(text.len());
    let hsize = layout.header.size();
    let header_chars = chars_for(hsize).ok_or_else(too_big)?;
    let head = b64(text, 0, header_chars)?;
    let nbytes = layout.header.read(take(&head, 0, hsize)?, layout.byte_order);
    let total = hsize.checked_add(nbytes).ok_or_else(too_big)?;

    if text.get(..header_chars).is_some_and(|h| h.ends_with('=')) {
        // Header and data encoded separately
        if head.len() >= total {
            return Ok(take(&head, hsize, nbytes)?.to_vec());
        }
        let data_end = chars_for(nbytes)
            .and_then(|n| n.checked_add(header_chars))
            .ok_or_else(too_big)?;
        let data = b64(text, header_chars, data_end)?;
        Ok(take(&data, 0, nbytes)?.to_vec())
    } else {
        let joint = b64(text, 0, chars_for(total).ok_or_else(too_big)?)?;
        Ok(take(&joint, hsize, nbytes)?.to_vec())
    }
}

fn compressed_bytes(text: &str, layout: BinaryLayout) -> DecodeResult<Vec<u8>> {
    let too_big = || oversized(text.len());
    let hsize = layout.header.size();
    let order = layout.byte_order;

    let prefix = b64(text, 0, chars_for(hsize).ok_or_else(too_big)?)?;
    let nblocks = layout.header.read(take(&prefix, 0, hsize)?, order);

    // nblocks, uncompressed block size, last block size, then one size per block
    let header_chars = nblocks
        .checked_add(3)
        .and_then(|n| n.checked_mul(hsize))
        .and_then(chars_for)
        .ok_or_else(too_big)?;
    let header = b64(text, 0, header_chars)?;
    let block_sizes: Vec<usize> = (3..3 + nblocks)
        .map(|i| take(&header, i * hsize, hsize).map(|b| layout.header.read(b, order)))
        .collect::<DecodeResult<_>>()?;

    let body_end = block_sizes
        .iter()
        .try_fold(0usize, |total, size| total.checked_add(*size))
        .and_then(chars_for)
        .and_then(|n| n.checked_add(header_chars))
        .ok_or_else(too_big)?;
    let body = b64(text, header_chars, body_end)?;

    let mut out = Vec::new();
    let mut offset = 0;
    for (block, size) in block_sizes.iter().enumerate() {
        let chunk = take(&body, offset, *size)?;
        ZlibDecoder::new(chunk)
            .read_to_end(&mut out)
            .map_err(|e| DecodeError::Inflate {
                block,
                reason: e.to_string(),
            })?;
        offset += size;
    }
    Ok(out)
}

fn to_values(bytes: &[u8], scalar: ScalarType, order: ByteOrder) -> DecodeResult<Vec<f64>> {
    let size = scalar.size();
    if bytes.len() % size != 0 {
        return Err(DecodeError::Misaligned {
            bytes: bytes.len(),
            size,
        });
    }
    Ok(bytes
        .chunks_exact(size)
        .map(|chunk| scalar.read(chunk, order))
        .collect())
}
