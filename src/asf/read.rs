use super::guid::{
	AUDIO_MEDIA, CONTENT_DESCRIPTION_OBJECT, EXTENDED_CONTENT_DESCRIPTION_OBJECT,
	FILE_PROPERTIES_OBJECT, STREAM_PROPERTIES_OBJECT,
};
use super::object::AsfObject;
use super::properties::AsfProperties;
use super::tag::AsfTag;
use super::AsfFile;
use crate::error::{LoftyError, Result};

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};

pub(crate) fn read_from<R>(data: &mut R, read_properties: bool) -> Result<AsfFile>
where
	R: Read + Seek,
{
	let header = AsfObject::read(data)?;

	if header.guid != super::guid::HEADER_OBJECT {
		return Err(LoftyError::UnknownFormat);
	}

	let object_count = data.read_u32::<LittleEndian>()?;
	// Reserved (2 bytes, must be 0x01 0x02)
	data.seek(SeekFrom::Current(2))?;

	let mut tag = AsfTag::default();
	let mut properties = AsfProperties::default();
	let mut file_duration = Duration::ZERO;
	let mut preroll = 0_u64;

	for _ in 0..object_count {
		let object = AsfObject::read(data)?;

		match object.guid {
			CONTENT_DESCRIPTION_OBJECT => {
				read_content_description(data, &mut tag)?;
			},
			EXTENDED_CONTENT_DESCRIPTION_OBJECT => {
				read_extended_content_description(data, &mut tag)?;
			},
			FILE_PROPERTIES_OBJECT if read_properties => {
				let (duration, pre) = read_file_properties(data)?;
				file_duration = duration;
				preroll = pre;
			},
			STREAM_PROPERTIES_OBJECT if read_properties => {
				if let Some(stream_properties) = read_stream_properties(data)? {
					properties = stream_properties;
				} else {
					object.skip_content(data)?;
				}
			},
			_ => {
				object.skip_content(data)?;
				continue;
			},
		}

		object.skip_content(data)?;
	}

	let duration = file_duration.saturating_sub(Duration::from_millis(preroll));

	Ok(AsfFile {
		tag: if tag == AsfTag::default() {
			None
		} else {
			Some(tag)
		},
		properties: AsfProperties::new(
			duration,
			properties.bitrate(),
			properties.sample_rate(),
			properties.channels(),
			properties.bit_depth(),
		),
	})
}

// Content Description Object: five consecutive UTF-16LE strings, each
// preceded by its own byte length
fn read_content_description<R>(data: &mut R, tag: &mut AsfTag) -> Result<()>
where
	R: Read + Seek,
{
	let title_len = data.read_u16::<LittleEndian>()?;
	let author_len = data.read_u16::<LittleEndian>()?;
	let copyright_len = data.read_u16::<LittleEndian>()?;
	let description_len = data.read_u16::<LittleEndian>()?;
	let rating_len = data.read_u16::<LittleEndian>()?;

	tag.title = read_utf16_nonempty(data, title_len)?;
	tag.author = read_utf16_nonempty(data, author_len)?;
	tag.copyright = read_utf16_nonempty(data, copyright_len)?;
	tag.description = read_utf16_nonempty(data, description_len)?;
	tag.rating = read_utf16_nonempty(data, rating_len)?;

	Ok(())
}

// Extended Content Description Object: a u16 item count, then that many
// (name, data type, value) records
fn read_extended_content_description<R>(data: &mut R, tag: &mut AsfTag) -> Result<()>
where
	R: Read + Seek,
{
	let count = data.read_u16::<LittleEndian>()?;

	for _ in 0..count {
		let name_len = data.read_u16::<LittleEndian>()?;
		let name = read_utf16_nonempty(data, name_len)?.unwrap_or_default();

		let data_type = data.read_u16::<LittleEndian>()?;
		let value_len = data.read_u16::<LittleEndian>()?;

		let value = match data_type {
			// Unicode string
			0 => read_utf16_nonempty(data, value_len)?.unwrap_or_default(),
			// BYTE array, represented as a hex string for round-tripping through a Tag
			1 => {
				let mut bytes = vec![0; value_len as usize];
				data.read_exact(&mut bytes)?;
				bytes.iter().map(|b| format!("{:02X}", b)).collect()
			},
			// BOOL
			2 => {
				let val = data.read_u16::<LittleEndian>()?;
				data.seek(SeekFrom::Current(i64::from(value_len) - 2))?;
				(val != 0).to_string()
			},
			// DWORD
			3 => {
				let val = data.read_u32::<LittleEndian>()?;
				data.seek(SeekFrom::Current(i64::from(value_len) - 4))?;
				val.to_string()
			},
			// QWORD
			4 => {
				let val = data.read_u64::<LittleEndian>()?;
				data.seek(SeekFrom::Current(i64::from(value_len) - 8))?;
				val.to_string()
			},
			// WORD
			5 => {
				let val = data.read_u16::<LittleEndian>()?;
				data.seek(SeekFrom::Current(i64::from(value_len) - 2))?;
				val.to_string()
			},
			_ => {
				data.seek(SeekFrom::Current(i64::from(value_len)))?;
				continue;
			},
		};

		if !name.is_empty() {
			tag.items.push((name, value));
		}
	}

	Ok(())
}

fn read_utf16_nonempty<R>(data: &mut R, byte_len: u16) -> Result<Option<String>>
where
	R: Read + Seek,
{
	if byte_len == 0 {
		return Ok(None);
	}

	let mut bytes = vec![0; byte_len as usize];
	data.read_exact(&mut bytes)?;

	// Strings are stored NUL-terminated; strip the trailing NUL code unit(s)
	let units: Vec<u16> = bytes
		.chunks_exact(2)
		.map(|c| u16::from_le_bytes([c[0], c[1]]))
		.take_while(|&u| u != 0)
		.collect();

	if units.is_empty() {
		return Ok(None);
	}

	String::from_utf16(&units)
		.map(Some)
		.map_err(|_| LoftyError::Asf("Found a non UTF-16 string"))
}

// Returns (play duration, preroll in ms)
fn read_file_properties<R>(data: &mut R) -> Result<(Duration, u64)>
where
	R: Read + Seek,
{
	// File ID (16)
	data.seek(SeekFrom::Current(16))?;
	// File size (8)
	data.seek(SeekFrom::Current(8))?;
	// Creation date (8)
	data.seek(SeekFrom::Current(8))?;
	// Data packets count (8)
	data.seek(SeekFrom::Current(8))?;

	// Play duration, in 100-nanosecond units
	let play_duration = data.read_u64::<LittleEndian>()?;
	// Send duration, unused
	data.seek(SeekFrom::Current(8))?;
	// Preroll, in milliseconds
	let preroll = data.read_u64::<LittleEndian>()?;

	let duration = Duration::from_nanos(play_duration.saturating_mul(100));

	Ok((duration, preroll))
}

fn read_stream_properties<R>(data: &mut R) -> Result<Option<AsfProperties>>
where
	R: Read + Seek,
{
	let mut stream_type = [0; 16];
	data.read_exact(&mut stream_type)?;

	if stream_type != AUDIO_MEDIA {
		return Ok(None);
	}

	// Error correction type (16)
	data.seek(SeekFrom::Current(16))?;
	// Time offset (8)
	data.seek(SeekFrom::Current(8))?;

	let type_specific_len = data.read_u32::<LittleEndian>()?;
	// Error correction data length
	data.seek(SeekFrom::Current(4))?;
	// Flags (2) + reserved (4)
	data.seek(SeekFrom::Current(6))?;

	// WAVEFORMATEX-shaped type-specific data
	// Format tag (2), unused here
	data.seek(SeekFrom::Current(2))?;
	let channels = data.read_u16::<LittleEndian>()? as u8;
	let sample_rate = data.read_u32::<LittleEndian>()?;
	let avg_bytes_per_sec = data.read_u32::<LittleEndian>()?;
	// Block align (2)
	data.seek(SeekFrom::Current(2))?;
	let bits_per_sample = data.read_u16::<LittleEndian>()? as u8;

	// Skip anything left in the type-specific data (cb_size + extra)
	data.seek(SeekFrom::Current(i64::from(type_specific_len) - 18))?;

	Ok(Some(AsfProperties::new(
		Duration::ZERO,
		Some(avg_bytes_per_sec * 8 / 1000),
		Some(sample_rate),
		Some(channels),
		Some(bits_per_sample),
	)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn utf16_nul(value: &str) -> Vec<u8> {
		let mut bytes: Vec<u8> = value.encode_utf16().flat_map(u16::to_le_bytes).collect();
		bytes.extend_from_slice(&0_u16.to_le_bytes());
		bytes
	}

	#[test]
	fn content_description_reads_fixed_fields_in_order() {
		let title = utf16_nul("title");
		let author = utf16_nul("author");

		let mut bytes = Vec::new();
		bytes.extend_from_slice(&(title.len() as u16).to_le_bytes());
		bytes.extend_from_slice(&(author.len() as u16).to_le_bytes());
		bytes.extend_from_slice(&0_u16.to_le_bytes()); // copyright
		bytes.extend_from_slice(&0_u16.to_le_bytes()); // description
		bytes.extend_from_slice(&0_u16.to_le_bytes()); // rating
		bytes.extend_from_slice(&title);
		bytes.extend_from_slice(&author);

		let mut tag = AsfTag::default();
		read_content_description(&mut Cursor::new(bytes), &mut tag).unwrap();

		assert_eq!(tag.title.as_deref(), Some("title"));
		assert_eq!(tag.author.as_deref(), Some("author"));
		assert_eq!(tag.copyright, None);
	}

	#[test]
	fn extended_content_description_reads_typed_values() {
		let name = utf16_nul("WM/Genre");
		let value = utf16_nul("Rock");

		let mut bytes = Vec::new();
		bytes.extend_from_slice(&1_u16.to_le_bytes()); // item count
		bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
		bytes.extend_from_slice(&name);
		bytes.extend_from_slice(&0_u16.to_le_bytes()); // data type: Unicode string
		bytes.extend_from_slice(&(value.len() as u16).to_le_bytes());
		bytes.extend_from_slice(&value);

		let mut tag = AsfTag::default();
		read_extended_content_description(&mut Cursor::new(bytes), &mut tag).unwrap();

		assert_eq!(tag.items, vec![("WM/Genre".to_string(), "Rock".to_string())]);
	}

	#[test]
	fn extended_content_description_reads_dword_as_decimal_string() {
		let name = utf16_nul("WM/Track");

		let mut bytes = Vec::new();
		bytes.extend_from_slice(&1_u16.to_le_bytes());
		bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
		bytes.extend_from_slice(&name);
		bytes.extend_from_slice(&3_u16.to_le_bytes()); // data type: DWORD
		bytes.extend_from_slice(&4_u16.to_le_bytes());
		bytes.extend_from_slice(&7_u32.to_le_bytes());

		let mut tag = AsfTag::default();
		read_extended_content_description(&mut Cursor::new(bytes), &mut tag).unwrap();

		assert_eq!(tag.items, vec![("WM/Track".to_string(), "7".to_string())]);
	}
}
