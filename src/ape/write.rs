use super::constants::APE_PREAMBLE;
use crate::error::Result;

use std::convert::TryInto;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

const APE_VERSION: u32 = 2000;
const FOOTER_LEN: u64 = 32;

// Header-present flag, set on both the header and footer copies
const FLAG_HAS_HEADER: u32 = 0x2000_0000;
// Set only on the header copy, to tell it apart from the footer
const FLAG_IS_HEADER: u32 = 0x8000_0000;

/// Writes (or removes, if `items` is empty) the `APEv2` tag at the end of a file
///
/// `items` holds the already-encoded item records; an `ID3v1` tag trailing the `APE`
/// tag, if present, is left untouched and the new tag is inserted ahead of it.
pub(crate) fn write_ape_tag(file: &mut File, items: &[u8], item_count: u32) -> Result<()> {
	file.seek(SeekFrom::Start(0))?;

	let mut bytes = Vec::new();
	file.read_to_end(&mut bytes)?;

	let id3v1_start = if bytes.len() >= 128 && &bytes[bytes.len() - 128..bytes.len() - 125] == b"TAG"
	{
		Some(bytes.len() - 128)
	} else {
		None
	};

	let tag_end = id3v1_start.unwrap_or(bytes.len());
	let existing_range = find_existing_tag(&bytes, tag_end);

	let replacement = if item_count == 0 {
		Vec::new()
	} else {
		build_tag(items, item_count)
	};

	match existing_range {
		Some(range) => {
			bytes.splice(range, replacement);
		},
		None => {
			bytes.splice(tag_end..tag_end, replacement);
		},
	}

	file.seek(SeekFrom::Start(0))?;
	file.set_len(0)?;
	file.write_all(&bytes)?;

	Ok(())
}

// Looks for an existing APE footer ending at `tag_end`, returning its full byte range
// (including the header, if one is present) if found
fn find_existing_tag(bytes: &[u8], tag_end: usize) -> Option<std::ops::Range<usize>> {
	if (tag_end as u64) < FOOTER_LEN {
		return None;
	}

	let footer_start = tag_end - FOOTER_LEN as usize;
	let footer = &bytes[footer_start..tag_end];

	if &footer[..8] != APE_PREAMBLE {
		return None;
	}

	let version = u32::from_le_bytes(footer[8..12].try_into().ok()?);
	let size = u32::from_le_bytes(footer[12..16].try_into().ok()?);

	// APEv2 tags store a 32-byte header in addition to the footer; the `size` field
	// covers only the items and the footer itself
	let total_len = if version == APE_VERSION {
		u64::from(size) + FOOTER_LEN
	} else {
		u64::from(size)
	};

	if total_len as usize > tag_end {
		return None;
	}

	Some(tag_end - total_len as usize..tag_end)
}

fn build_tag(items: &[u8], item_count: u32) -> Vec<u8> {
	let size = items.len() as u32 + FOOTER_LEN as u32;

	let mut out = Vec::with_capacity(FOOTER_LEN as usize * 2 + items.len());

	write_header_or_footer(&mut out, size, item_count, FLAG_HAS_HEADER | FLAG_IS_HEADER);
	out.extend_from_slice(items);
	write_header_or_footer(&mut out, size, item_count, FLAG_HAS_HEADER);

	out
}

fn write_header_or_footer(out: &mut Vec<u8>, size: u32, item_count: u32, flags: u32) {
	out.extend_from_slice(APE_PREAMBLE);
	out.write_u32::<LittleEndian>(APE_VERSION).unwrap();
	out.write_u32::<LittleEndian>(size).unwrap();
	out.write_u32::<LittleEndian>(item_count).unwrap();
	out.write_u32::<LittleEndian>(flags).unwrap();
	// Reserved
	out.extend_from_slice(&[0; 8]);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip_locates_freshly_written_tag() {
		let items = b"fake item bytes".to_vec();
		let tag = build_tag(&items, 1);

		let mut bytes = b"MAC audio data here".to_vec();
		bytes.extend_from_slice(&tag);

		let range = find_existing_tag(&bytes, bytes.len()).unwrap();
		assert_eq!(&bytes[range], &tag[..]);
	}

	#[test]
	fn no_footer_returns_none() {
		let bytes = b"just some audio data, no tag".to_vec();
		assert!(find_existing_tag(&bytes, bytes.len()).is_none());
	}
}
