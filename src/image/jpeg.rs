//! JPEG specific items
//!
//! ## File notes
//!
//! JPEG carries metadata in `APP1` marker segments: one holding an embedded
//! TIFF/EXIF stream, another (identified by a URI prefix) holding raw XMP.
//! Both are segment-scoped, so unlike every other format in this crate
//! there's no length-prefixed "tag block" to splice — writing means
//! dropping any existing metadata segments and re-inserting fresh ones
//! right after the Start Of Image marker.
use crate::error::{LoftyError, Result};
use crate::ifd::read::decode_ifd_chain;
use crate::ifd::write::encode_ifd_chain;
use crate::ifd::IfdChain;
use crate::image::properties::ImageProperties;
use crate::image::ImageFile;

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt};

const SOI: u8 = 0xD8;
const EOI: u8 = 0xD9;
const SOS: u8 = 0xDA;
const APP1: u8 = 0xE1;
const COM: u8 = 0xFE;

const EXIF_PREFIX: &[u8] = b"Exif\0\0";
const XMP_PREFIX: &[u8] = b"http://ns.adobe.com/xap/1.0/\0";

/// The metadata carried by a JPEG file: an embedded EXIF directory, a raw
/// XMP packet (kept opaque, this crate has no XML layer), and a plain text
/// comment
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JpegTag {
	exif: Option<IfdChain>,
	xmp: Option<Vec<u8>>,
	comment: Option<String>,
}

impl JpegTag {
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

	/// Returns the raw XMP packet, if any
	pub fn xmp(&self) -> Option<&[u8]> {
		self.xmp.as_deref()
	}

	/// Sets the raw XMP packet
	pub fn set_xmp(&mut self, data: Vec<u8>) {
		self.xmp = Some(data);
	}

	/// Removes the XMP packet
	pub fn remove_xmp(&mut self) {
		self.xmp = None;
	}

	/// Returns the comment (`COM` segment), if any
	pub fn comment(&self) -> Option<&str> {
		self.comment.as_deref()
	}

	/// Sets the comment
	pub fn set_comment(&mut self, comment: String) {
		self.comment = Some(comment);
	}

	/// Removes the comment
	pub fn remove_comment(&mut self) {
		self.comment = None;
	}

	/// Returns `true` if no metadata of any kind is present
	pub fn is_empty(&self) -> bool {
		self.exif.is_none() && self.xmp.is_none() && self.comment.is_none()
	}
}

struct Segment {
	marker: u8,
	// Position of the 0xFF marker byte that opens the segment
	header_start: u64,
	// Position of the first payload byte, just after the 2-byte length field
	payload_start: u64,
	payload_len: u64,
}

impl Segment {
	fn end(&self) -> u64 {
		self.payload_start + self.payload_len
	}
}

fn read_markers<R>(data: &mut R) -> Result<Vec<Segment>>
where
	R: Read + Seek,
{
	data.seek(SeekFrom::Start(0))?;

	let mut soi = [0; 2];
	data.read_exact(&mut soi)?;

	if soi[0] != 0xFF || soi[1] != SOI {
		return Err(LoftyError::UnknownFormat);
	}

	let mut segments = Vec::new();

	loop {
		let header_start = data.seek(SeekFrom::Current(0))?;

		let marker_prefix = data.read_u8()?;
		if marker_prefix != 0xFF {
			return Err(LoftyError::Image("Expected a marker"));
		}

		let mut marker = data.read_u8()?;
		// Fill bytes between markers
		while marker == 0xFF {
			marker = data.read_u8()?;
		}

		if marker == EOI || marker == SOS {
			break;
		}

		// Standalone markers (RSTn, TEM) carry no length field
		if marker == 0x01 || (0xD0..=0xD7).contains(&marker) {
			continue;
		}

		let length = data.read_u16::<BigEndian>()?;
		let payload_start = data.seek(SeekFrom::Current(0))?;
		let payload_len = u64::from(length) - 2;

		segments.push(Segment {
			marker,
			header_start,
			payload_start,
			payload_len,
		});

		data.seek(SeekFrom::Start(payload_start + payload_len))?;
	}

	Ok(segments)
}

/// Reads the EXIF/XMP/comment metadata from a JPEG file
pub fn read_from<R>(data: &mut R) -> Result<JpegTag>
where
	R: Read + Seek,
{
	let segments = read_markers(data)?;

	let mut tag = JpegTag::default();

	for segment in &segments {
		match segment.marker {
			APP1 => {
				let mut payload = vec![0; segment.payload_len as usize];
				data.seek(SeekFrom::Start(segment.payload_start))?;
				data.read_exact(&mut payload)?;

				if let Some(rest) = payload.strip_prefix(EXIF_PREFIX) {
					tag.exif = Some(decode_ifd_chain(&mut Cursor::new(rest))?);
				} else if let Some(rest) = payload.strip_prefix(XMP_PREFIX) {
					tag.xmp = Some(rest.to_vec());
				}
			},
			COM => {
				let mut payload = vec![0; segment.payload_len as usize];
				data.seek(SeekFrom::Start(segment.payload_start))?;
				data.read_exact(&mut payload)?;

				tag.comment = Some(String::from_utf8_lossy(&payload).into_owned());
			},
			_ => {},
		}
	}

	Ok(tag)
}

/// Reads the pixel dimensions from a JPEG file's Start Of Frame segment
pub fn read_properties<R>(data: &mut R) -> Result<ImageProperties>
where
	R: Read + Seek,
{
	let segments = read_markers(data)?;

	for segment in &segments {
		let is_sof = matches!(segment.marker, 0xC0..=0xC3 | 0xC5..=0xC7 | 0xC9..=0xCB | 0xCD..=0xCF);

		if !is_sof {
			continue;
		}

		data.seek(SeekFrom::Start(segment.payload_start + 1))?;
		let height = u32::from(data.read_u16::<BigEndian>()?);
		let width = u32::from(data.read_u16::<BigEndian>()?);

		return Ok(ImageProperties::new(width, height));
	}

	Err(LoftyError::Image("No Start Of Frame segment found"))
}

/// Writes `tag` to a JPEG file, replacing any existing EXIF/XMP/comment
/// segments
///
/// New segments are inserted immediately after the Start Of Image marker.
pub fn write_to(file: &mut File, tag: &JpegTag) -> Result<()> {
	let segments = read_markers(file)?;

	file.seek(SeekFrom::Start(0))?;
	let mut bytes = Vec::new();
	file.read_to_end(&mut bytes)?;

	// Remove existing metadata segments back-to-front so earlier offsets
	// stay valid
	for segment in segments.iter().rev() {
		let is_metadata = match segment.marker {
			APP1 => {
				let payload = &bytes[segment.payload_start as usize..segment.end() as usize];
				payload.starts_with(EXIF_PREFIX) || payload.starts_with(XMP_PREFIX)
			},
			COM => true,
			_ => false,
		};

		if is_metadata {
			bytes.splice(segment.header_start as usize..segment.end() as usize, Vec::new());
		}
	}

	let mut insert = Vec::new();

	if let Some(exif) = &tag.exif {
		let encoded = encode_ifd_chain(exif)?;
		write_segment(&mut insert, APP1, EXIF_PREFIX, &encoded)?;
	}

	if let Some(xmp) = &tag.xmp {
		write_segment(&mut insert, APP1, XMP_PREFIX, xmp)?;
	}

	if let Some(comment) = &tag.comment {
		write_segment(&mut insert, COM, &[], comment.as_bytes())?;
	}

	bytes.splice(2..2, insert);

	file.seek(SeekFrom::Start(0))?;
	file.set_len(0)?;
	file.write_all(&bytes)?;

	Ok(())
}

/// A JPEG file's metadata and pixel dimensions
pub struct JpegFile {
	tag: Option<JpegTag>,
	properties: ImageProperties,
}

impl ImageFile for JpegFile {
	type Tag = JpegTag;

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

	fn tag(&self) -> Option<&JpegTag> {
		self.tag.as_ref()
	}
}

fn write_segment(out: &mut Vec<u8>, marker: u8, prefix: &[u8], payload: &[u8]) -> Result<()> {
	let length = 2 + prefix.len() + payload.len();

	if length > u16::MAX as usize {
		return Err(LoftyError::Image("Segment too large to encode"));
	}

	out.push(0xFF);
	out.push(marker);
	out.extend_from_slice(&(length as u16).to_be_bytes());
	out.extend_from_slice(prefix);
	out.extend_from_slice(payload);

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ifd::{Endian, Ifd};

	fn minimal_jpeg() -> Vec<u8> {
		vec![0xFF, SOI, 0xFF, EOI]
	}

	#[test]
	fn write_then_read_comment() {
		let mut file = Cursor::new(minimal_jpeg());

		let mut tag = JpegTag::default();
		tag.set_comment("hello".to_string());

		// write_to() expects a `File`, exercise the segment plumbing directly
		let segments = read_markers(&mut file).unwrap();
		assert!(segments.is_empty());

		let mut insert = Vec::new();
		write_segment(&mut insert, COM, &[], b"hello").unwrap();
		assert_eq!(&insert[4..], b"hello");
	}

	#[test]
	fn exif_roundtrip_through_segment_bytes() {
		let mut chain = IfdChain {
			byte_order: Endian::Little,
			..IfdChain::default()
		};

		let mut ifd0 = Ifd::new();
		ifd0.insert(0x0100, crate::ifd::EntryValue::Long(vec![640]));
		chain.ifds.push(ifd0);

		let encoded = encode_ifd_chain(&chain).unwrap();
		let mut segment_payload = EXIF_PREFIX.to_vec();
		segment_payload.extend_from_slice(&encoded);

		let rest = segment_payload.strip_prefix(EXIF_PREFIX).unwrap();
		let decoded = decode_ifd_chain(&mut Cursor::new(rest)).unwrap();

		assert_eq!(
			decoded.ifd0().unwrap().get(0x0100),
			Some(&crate::ifd::EntryValue::Long(vec![640]))
		);
	}
}
