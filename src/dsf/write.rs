use crate::error::{LoftyError, Result};
#[cfg(feature = "id3v2")]
use crate::id3::v2::tag::Id3v2TagRef;
use crate::types::tag::{Tag, TagType};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt};

#[allow(unused_variables)]
pub(crate) fn write_to(data: &mut File, tag: &Tag) -> Result<()> {
	match tag.tag_type() {
		#[cfg(feature = "id3v2")]
		TagType::Id3v2 => Into::<Id3v2TagRef>::into(tag).write_to(data),
		_ => Err(LoftyError::UnsupportedTag),
	}
}

/// Writes (or removes, if `tag` is empty) the ID3v2 tag of a DSF file
///
/// DSF has no tag format of its own; an ID3v2 tag is appended at the end of
/// the file and the `DSD ` chunk's metadata pointer (offset 20) is updated
/// to point at it, or zeroed if the tag is removed.
pub(crate) fn write_id3v2_to_dsf(data: &mut File, tag: &[u8]) -> Result<()> {
	data.seek(SeekFrom::Start(20))?;
	let old_pointer = data.read_u64::<LittleEndian>()?;

	data.seek(SeekFrom::Start(0))?;
	let mut file_bytes = Vec::new();
	data.read_to_end(&mut file_bytes)?;

	if old_pointer != 0 {
		file_bytes.truncate(old_pointer as usize);
	}

	let new_pointer = if tag.is_empty() {
		0
	} else {
		let pointer = file_bytes.len() as u64;
		file_bytes.extend_from_slice(tag);
		pointer
	};

	file_bytes[20..28].copy_from_slice(&new_pointer.to_le_bytes());

	// The total file size field at offset 12 also needs to track reality
	let total_size = file_bytes.len() as u64;
	file_bytes[12..20].copy_from_slice(&total_size.to_le_bytes());

	data.seek(SeekFrom::Start(0))?;
	data.set_len(0)?;
	data.write_all(&file_bytes)?;

	Ok(())
}
