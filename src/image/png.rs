//! PNG specific items
//!
//! ## File notes
//!
//! Metadata lives in three chunk types: `eXIf` (a raw TIFF/EXIF stream,
//! decoded through [`crate::ifd`]), and the text chunks `tEXt`/`iTXt`, kept
//! here as opaque key/value pairs. As with JPEG, there's no single tag
//! block to splice — chunks are removed and fresh ones inserted right
//! after `IHDR`.
use crate::error::{LoftyError, Result};
use crate::ifd::read::decode_ifd_chain;
use crate::ifd::write::encode_ifd_chain;
use crate::ifd::IfdChain;
use crate::image::properties::ImageProperties;
use crate::image::ImageFile;

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];
const CRC_LEN: u64 = 4;

/// The metadata carried by a PNG file: an embedded EXIF directory plus any
/// number of text key/value pairs (`tEXt`/`iTXt`)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PngTag {
	exif: Option<IfdChain>,
	text: Vec<(String, String)>,
}

impl PngTag {
	/// Returns the embedded EXIF directory, if any
	pub fn exif(&self) -> Option<&IfdChain> {
		self.exif.as_ref()
	}

	/// Sets the embedded EXIF directory
	pub fn set_exif(&mut self, chain: IfdChain) {
		self.exif = Some(chain);
	}

	/// Removes the embedded EXIF directory
	pub fn remove_exif(&mut self) {
		self.exif = None;
	}

	/// Returns the stored text key/value pairs
	pub fn text(&self) -> &[(String, String)] {
		&self.text
	}

	/// Returns the value for `key`, if present
	pub fn get_text(&self, key: &str) -> Option<&str> {
		self.text
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Inserts or replaces the value for `key`
	pub fn insert_text(&mut self, key: String, value: String) {
		match self.text.iter_mut().find(|(k, _)| *k == key) {
			Some(entry) => entry.1 = value,
			None => self.text.push((key, value)),
		}
	}

	/// Removes `key`, if present
	pub fn remove_text(&mut self, key: &str) {
		self.text.retain(|(k, _)| k != key);
	}

	/// Returns `true` if no metadata of any kind is present
	pub fn is_empty(&self) -> bool {
		self.exif.is_none() && self.text.is_empty()
	}
}

struct Chunk {
	ty: [u8; 4],
	start: u64,
	data_start: u64,
	data_len: u64,
}

impl Chunk {
	fn end(&self) -> u64 {
		self.data_start + self.data_len + CRC_LEN
	}
}

fn read_chunks<R>(data: &mut R) -> Result<Vec<Chunk>>
where
	R: Read + Seek,
{
	data.seek(SeekFrom::Start(0))?;

	let mut signature = [0; 8];
	data.read_exact(&mut signature)?;

	if signature != SIGNATURE {
		return Err(LoftyError::UnknownFormat);
	}

	let mut chunks = Vec::new();

	loop {
		let start = data.seek(SeekFrom::Current(0))?;

		let mut length_buf = [0; 4];
		match data.read(&mut length_buf)? {
			0 => break,
			4 => {},
			_ => return Err(LoftyError::Image("Truncated chunk length")),
		}

		let data_len = u64::from(u32::from_be_bytes(length_buf));

		let mut ty = [0; 4];
		data.read_exact(&mut ty)?;

		let data_start = data.seek(SeekFrom::Current(0))?;

		let is_iend = &ty == b"IEND";

		chunks.push(Chunk {
			ty,
			start,
			data_start,
			data_len,
		});

		data.seek(SeekFrom::Start(data_start + data_len + CRC_LEN))?;

		if is_iend {
			break;
		}
	}

	Ok(chunks)
}

fn read_latin1_text(payload: &[u8]) -> Option<(String, String)> {
	let nul = payload.iter().position(|&b| b == 0)?;
	let keyword = payload[..nul].iter().map(|&b| b as char).collect::<String>();
	let value = String::from_utf8_lossy(&payload[nul + 1..]).into_owned();

	Some((keyword, value))
}

// keyword \0 compression_flag(1) compression_method(1) language_tag \0 translated_keyword \0 text
fn read_itxt(payload: &[u8]) -> Option<(String, String)> {
	let mut fields = payload.splitn(4, |&b| b == 0);

	let keyword = String::from_utf8_lossy(fields.next()?).into_owned();
	let rest = fields.next()?;
	let _translated_keyword = fields.next()?;
	let text = fields.next()?;

	// rest[0] is the compression flag, rest[1] the compression method
	if rest.first() == Some(&1) {
		return None;
	}

	Some((keyword, String::from_utf8_lossy(text).into_owned()))
}

/// Reads the EXIF/text metadata from a PNG file
pub fn read_from<R>(data: &mut R) -> Result<PngTag>
where
	R: Read + Seek,
{
	let chunks = read_chunks(data)?;

	let mut tag = PngTag::default();

	for chunk in &chunks {
		let mut payload = vec![0; chunk.data_len as usize];

		match &chunk.ty {
			b"eXIf" => {
				data.seek(SeekFrom::Start(chunk.data_start))?;
				data.read_exact(&mut payload)?;
				tag.exif = Some(decode_ifd_chain(&mut Cursor::new(payload))?);
			},
			b"tEXt" => {
				data.seek(SeekFrom::Start(chunk.data_start))?;
				data.read_exact(&mut payload)?;
				if let Some((k, v)) = read_latin1_text(&payload) {
					tag.insert_text(k, v);
				}
			},
			b"iTXt" => {
				data.seek(SeekFrom::Start(chunk.data_start))?;
				data.read_exact(&mut payload)?;
				if let Some((k, v)) = read_itxt(&payload) {
					tag.insert_text(k, v);
				}
			},
			_ => {},
		}
	}

	Ok(tag)
}

/// Reads the pixel dimensions from a PNG file's `IHDR` chunk
pub fn read_properties<R>(data: &mut R) -> Result<ImageProperties>
where
	R: Read + Seek,
{
	let chunks = read_chunks(data)?;

	let ihdr = chunks
		.iter()
		.find(|c| &c.ty == b"IHDR")
		.ok_or(LoftyError::Image("Missing IHDR chunk"))?;

	data.seek(SeekFrom::Start(ihdr.data_start))?;
	let width = data.read_u32::<BigEndian>()?;
	let height = data.read_u32::<BigEndian>()?;

	Ok(ImageProperties::new(width, height))
}

/// Writes `tag` to a PNG file, replacing any existing `eXIf`/`tEXt`/`iTXt`
/// chunks
///
/// New chunks are inserted immediately after `IHDR`.
pub fn write_to(file: &mut File, tag: &PngTag) -> Result<()> {
	let chunks = read_chunks(file)?;

	file.seek(SeekFrom::Start(0))?;
	let mut bytes = Vec::new();
	file.read_to_end(&mut bytes)?;

	let ihdr_end = chunks
		.iter()
		.find(|c| &c.ty == b"IHDR")
		.ok_or(LoftyError::Image("Missing IHDR chunk"))?
		.end();

	for chunk in chunks.iter().rev() {
		if matches!(&chunk.ty, b"eXIf" | b"tEXt" | b"iTXt") {
			bytes.splice(chunk.start as usize..chunk.end() as usize, Vec::new());
		}
	}

	let mut insert = Vec::new();

	if let Some(exif) = &tag.exif {
		let encoded = encode_ifd_chain(exif)?;
		write_chunk(&mut insert, b"eXIf", &encoded)?;
	}

	for (key, value) in &tag.text {
		let mut payload = key.as_bytes().to_vec();
		payload.push(0);
		payload.extend_from_slice(value.as_bytes());
		write_chunk(&mut insert, b"tEXt", &payload)?;
	}

	bytes.splice(ihdr_end as usize..ihdr_end as usize, insert);

	file.seek(SeekFrom::Start(0))?;
	file.set_len(0)?;
	file.write_all(&bytes)?;

	Ok(())
}

/// A PNG file's metadata and pixel dimensions
pub struct PngFile {
	tag: Option<PngTag>,
	properties: ImageProperties,
}

impl ImageFile for PngFile {
	type Tag = PngTag;

	fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let tag = read_from(reader)?;
		let properties = read_properties(reader)?;

		Ok(Self {
			tag: if tag.is_empty() { None } else { Some(tag) },
			properties,
		})
	}

	fn properties(&self) -> &ImageProperties {
		&self.properties
	}

	fn tag(&self) -> Option<&PngTag> {
		self.tag.as_ref()
	}
}

fn write_chunk(out: &mut Vec<u8>, ty: &[u8; 4], payload: &[u8]) -> Result<()> {
	if payload.len() > u32::MAX as usize {
		return Err(LoftyError::Image("Chunk too large to encode"));
	}

	out.write_u32::<BigEndian>(payload.len() as u32)?;
	out.extend_from_slice(ty);
	out.extend_from_slice(payload);

	let crc = crc32(&out[out.len() - 4 - payload.len()..]);
	out.write_u32::<BigEndian>(crc)?;

	Ok(())
}

// Table-less bit-by-bit CRC-32 (ISO 3309 / zlib polynomial), fine for the
// small chunk sizes this writes
fn crc32(data: &[u8]) -> u32 {
	let mut crc: u32 = 0xFFFF_FFFF;

	for &byte in data {
		crc ^= u32::from(byte);
		for _ in 0..8 {
			if crc & 1 != 0 {
				crc = (crc >> 1) ^ 0xEDB8_8320;
			} else {
				crc >>= 1;
			}
		}
	}

	!crc
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn text_roundtrip() {
		let mut tag = PngTag::default();
		tag.insert_text("Comment".to_string(), "hello".to_string());

		assert_eq!(tag.get_text("Comment"), Some("hello"));

		let mut payload = b"Comment".to_vec();
		payload.push(0);
		payload.extend_from_slice(b"hello");

		let (k, v) = read_latin1_text(&payload).unwrap();
		assert_eq!(k, "Comment");
		assert_eq!(v, "hello");
	}

	#[test]
	fn crc_matches_known_value() {
		// CRC-32 of the ASCII bytes "123456789" is a well known test vector
		assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
	}
}
