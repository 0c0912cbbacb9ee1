//! A small ergonomics layer around an owned byte sequence.
//!
//! Every tag codec ends up needing the same handful of primitives: append
//! bytes, slice a range, look for a sub-sequence, and decode/encode
//! fixed-width integers and strings. The per-format modules already do most
//! of this ad hoc with [`byteorder`] directly on `Vec<u8>`; `ByteBuffer`
//! exists so the new formats (IFD, ASF, DSF) and the [`FileStream`](crate::file_stream::FileStream)
//! splice primitive share one implementation instead of reinventing it.

use crate::error::{LoftyError, Result};
use crate::id3::v2::TextEncoding;

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

/// An ordered, appendable, slice-able byte sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteBuffer {
	inner: Vec<u8>,
}

impl ByteBuffer {
	/// Creates an empty buffer
	pub fn new() -> Self {
		Self { inner: Vec::new() }
	}

	/// Wraps an existing byte vector
	pub fn from_vec(data: Vec<u8>) -> Self {
		Self { inner: data }
	}

	/// Returns the number of bytes in the buffer
	pub fn len(&self) -> usize {
		self.inner.len()
	}

	/// Returns `true` if the buffer has no bytes
	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// Borrows the buffer as a byte slice
	pub fn as_slice(&self) -> &[u8] {
		&self.inner
	}

	/// Consumes the buffer, returning the owned bytes
	pub fn into_vec(self) -> Vec<u8> {
		self.inner
	}

	/// Appends `data` to the end of the buffer
	pub fn append(&mut self, data: &[u8]) {
		self.inner.extend_from_slice(data);
	}

	/// Reads the byte at `offset`
	///
	/// # Errors
	///
	/// Returns [`LoftyError::Truncated`](LoftyError) equivalent (`TextDecode`/out-of-range)
	/// if `offset` is out of bounds.
	pub fn get(&self, offset: usize) -> Result<u8> {
		self.inner
			.get(offset)
			.copied()
			.ok_or(LoftyError::TooMuchData)
	}

	/// Returns a `count`-byte slice starting at `offset`
	///
	/// # Errors
	///
	/// Fails if `[offset, offset + count)` is out of bounds.
	pub fn mid(&self, offset: usize, count: usize) -> Result<&[u8]> {
		self.inner
			.get(offset..offset + count)
			.ok_or(LoftyError::TooMuchData)
	}

	/// Returns `true` if the buffer starts with `prefix`
	pub fn starts_with(&self, prefix: &[u8]) -> bool {
		self.inner.starts_with(prefix)
	}

	/// Returns `true` if `prefix` occurs at `offset`
	pub fn contains_at(&self, prefix: &[u8], offset: usize) -> bool {
		self.mid(offset, prefix.len())
			.map(|slice| slice == prefix)
			.unwrap_or(false)
	}

	/// Finds the first occurrence of `pattern` at or after `from`, returning its offset
	pub fn find(&self, pattern: &[u8], from: usize) -> Option<usize> {
		if pattern.is_empty() || from >= self.inner.len() {
			return None;
		}

		self.inner[from..]
			.windows(pattern.len())
			.position(|window| window == pattern)
			.map(|pos| pos + from)
	}

	/// Reads an unsigned 16-bit integer at `offset` in the given endianness
	pub fn read_u16<B: ByteOrder>(&self, offset: usize) -> Result<u16> {
		Ok(B::read_u16(self.mid(offset, 2)?))
	}

	/// Reads an unsigned 24-bit integer (returned widened to `u32`) at `offset`
	pub fn read_u24<B: ByteOrder>(&self, offset: usize) -> Result<u32> {
		Ok(B::read_u24(self.mid(offset, 3)?))
	}

	/// Reads an unsigned 32-bit integer at `offset` in the given endianness
	pub fn read_u32<B: ByteOrder>(&self, offset: usize) -> Result<u32> {
		Ok(B::read_u32(self.mid(offset, 4)?))
	}

	/// Reads an unsigned 64-bit integer at `offset` in the given endianness
	pub fn read_u64<B: ByteOrder>(&self, offset: usize) -> Result<u64> {
		Ok(B::read_u64(self.mid(offset, 8)?))
	}

	/// Appends a big-endian synchsafe 32-bit integer (ID3v2 size encoding)
	///
	/// Four 7-bit groups, packed big-endian, high bit of each byte always `0`.
	pub fn append_synchsafe32(&mut self, value: u32) {
		self.append(&synchsafe32_encode(value));
	}

	/// Decodes a synchsafe 32-bit integer starting at `offset`
	pub fn read_synchsafe32(&self, offset: usize) -> Result<u32> {
		Ok(synchsafe32_decode(BigEndian::read_u32(
			self.mid(offset, 4)?,
		)))
	}

	/// Renders `text` using the given [`TextEncoding`]
	pub fn encode_text(text: &str, encoding: TextEncoding, terminated: bool) -> Vec<u8> {
		crate::id3::v2::util::text_utils::encode_text(text, encoding, terminated)
	}
}

/// Decodes a synchsafe 32-bit integer: four 7-bit groups packed big-endian.
pub fn synchsafe32_decode(synchsafe: u32) -> u32 {
	let mut out = 0u32;
	let mut mask = 0x7F_000_000u32;

	while mask != 0 {
		out >>= 1;
		out |= synchsafe & mask;
		mask >>= 8;
	}

	out
}

/// Encodes a plain `u32` as a synchsafe 32-bit integer, four bytes, each carrying 7 bits.
pub fn synchsafe32_encode(value: u32) -> [u8; 4] {
	let mut out = [0u8; 4];
	let mut value = value;

	for byte in out.iter_mut().rev() {
		*byte = (value & 0x7F) as u8;
		value >>= 7;
	}

	out
}

/// Reads a big-endian 24-bit unsigned integer from a `Read` stream.
///
/// `byteorder` only offers this on a slice-backed [`ReadBytesExt`]; this is the
/// streaming equivalent used by the FLAC metadata block chain.
pub fn read_u24_be<R: std::io::Read>(reader: &mut R) -> std::io::Result<u32> {
	reader.read_u24::<BigEndian>()
}

/// Reads a little-endian 24-bit unsigned integer from a `Read` stream.
pub fn read_u24_le<R: std::io::Read>(reader: &mut R) -> std::io::Result<u32> {
	reader.read_u24::<LittleEndian>()
}

#[cfg(test)]
mod tests {
	use super::*;
	use byteorder::BigEndian;

	#[test]
	fn synchsafe_roundtrip() {
		for value in [0u32, 1, 127, 128, 16384, 2_097_151, 268_435_455] {
			let encoded = synchsafe32_encode(value);
			assert_eq!(synchsafe32_decode(BigEndian::read_u32(&encoded)), value);
		}
	}

	#[test]
	fn append_and_mid() {
		let mut buf = ByteBuffer::new();
		buf.append(b"hello");
		buf.append(b" world");

		assert_eq!(buf.mid(6, 5).unwrap(), b"world");
		assert!(buf.starts_with(b"hello"));
		assert!(buf.contains_at(b"world", 6));
		assert_eq!(buf.find(b"wor", 0), Some(6));
	}

	#[test]
	fn typed_reads() {
		let mut buf = ByteBuffer::new();
		buf.append(&[0x00, 0x01, 0x02, 0x03]);

		assert_eq!(buf.read_u16::<BigEndian>(0).unwrap(), 0x0001);
		assert_eq!(buf.read_u32::<BigEndian>(0).unwrap(), 0x0001_0203);
	}

	#[test]
	fn out_of_range_fails() {
		let buf = ByteBuffer::from_vec(vec![1, 2, 3]);
		assert!(buf.mid(1, 10).is_err());
		assert!(buf.get(10).is_err());
	}
}
