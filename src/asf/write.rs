use super::guid::{CONTENT_DESCRIPTION_OBJECT, EXTENDED_CONTENT_DESCRIPTION_OBJECT, HEADER_OBJECT};
use super::object::AsfObject;
use super::tag::AsfTagRef;
use crate::error::{LoftyError, Result};

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

pub(crate) fn write_to(data: &mut File, tag: &mut AsfTagRef) -> Result<()> {
	data.seek(SeekFrom::Start(0))?;

	let mut file_bytes = Vec::new();
	data.read_to_end(&mut file_bytes)?;

	let mut cursor = Cursor::new(file_bytes);

	let header = AsfObject::read(&mut cursor)?;

	if header.guid != HEADER_OBJECT {
		return Err(LoftyError::Asf("File is missing the Header Object"));
	}

	let object_count_pos = cursor.seek(SeekFrom::Current(0))?;
	let mut object_count = cursor.read_u32::<LittleEndian>()?;
	// Reserved
	cursor.seek(SeekFrom::Current(2))?;

	let mut content_description_range = None;
	let mut extended_content_description_range = None;

	while cursor.seek(SeekFrom::Current(0))? < header.position + header.size {
		let object = AsfObject::read(&mut cursor)?;
		let range = object.position as usize..(object.position + object.size) as usize;

		if object.guid == CONTENT_DESCRIPTION_OBJECT {
			content_description_range = Some(range);
		} else if object.guid == EXTENDED_CONTENT_DESCRIPTION_OBJECT {
			extended_content_description_range = Some(range);
		}

		object.skip_content(&mut cursor)?;
	}

	let new_content_description = build_content_description(tag);
	let new_extended_content_description = build_extended_content_description(tag);

	let mut size_delta: i64 = 0;
	let mut object_count_delta: i32 = 0;
	let header_end = header.position + header.size;

	// Both ranges were resolved against the same pre-mutation buffer, so splicing them in
	// position order (not discovery order) matters: a splice only ever shifts bytes at or
	// after its own range, never before it. Processing the higher-offset object first means
	// every range still pending is entirely below the point where the buffer has already
	// shifted, so its stored offsets stay valid without needing to be re-resolved.
	let mut replacements = [
		(content_description_range, new_content_description),
		(
			extended_content_description_range,
			new_extended_content_description,
		),
	];
	replacements.sort_by_key(|(range, _)| {
		std::cmp::Reverse(range.as_ref().map_or(header_end as usize, |r| r.start))
	});

	for (range, replacement) in replacements {
		replace_object(
			&mut cursor,
			range,
			replacement,
			&mut size_delta,
			&mut object_count_delta,
			header_end,
		)?;
	}

	let new_header_size = (header.size as i64 + size_delta) as u64;
	let new_object_count = (object_count as i32 + object_count_delta) as u32;
	object_count = new_object_count;

	cursor.seek(SeekFrom::Start(header.position + 16))?;
	cursor.write_u64::<LittleEndian>(new_header_size)?;

	cursor.seek(SeekFrom::Start(object_count_pos))?;
	cursor.write_u32::<LittleEndian>(object_count)?;

	data.seek(SeekFrom::Start(0))?;
	data.set_len(0)?;
	data.write_all(&cursor.into_inner())?;

	Ok(())
}

#[allow(clippy::too_many_arguments)]
fn replace_object(
	cursor: &mut Cursor<Vec<u8>>,
	existing: Option<std::ops::Range<usize>>,
	replacement: Vec<u8>,
	size_delta: &mut i64,
	object_count_delta: &mut i32,
	header_end: u64,
) -> Result<()> {
	match (existing, replacement.is_empty()) {
		(Some(range), true) => {
			*size_delta -= (range.end - range.start) as i64;
			*object_count_delta -= 1;
			cursor.get_mut().splice(range, Vec::new());
		},
		(Some(range), false) => {
			*size_delta += replacement.len() as i64 - (range.end - range.start) as i64;
			cursor.get_mut().splice(range, replacement);
		},
		(None, true) => {},
		(None, false) => {
			*size_delta += replacement.len() as i64;
			*object_count_delta += 1;
			let insert_at = header_end as usize;
			cursor
				.get_mut()
				.splice(insert_at..insert_at, replacement);
		},
	}

	Ok(())
}

fn build_content_description(tag: &AsfTagRef) -> Vec<u8> {
	if tag.title.is_none()
		&& tag.author.is_none()
		&& tag.copyright.is_none()
		&& tag.description.is_none()
		&& tag.rating.is_none()
	{
		return Vec::new();
	}

	let title = utf16_nul(tag.title);
	let author = utf16_nul(tag.author);
	let copyright = utf16_nul(tag.copyright);
	let description = utf16_nul(tag.description);
	let rating = utf16_nul(tag.rating);

	let content_len = 10 + title.len() + author.len() + copyright.len() + description.len() + rating.len();
	let mut writer = Cursor::new(Vec::with_capacity(24 + content_len));

	writer.write_all(&CONTENT_DESCRIPTION_OBJECT).unwrap();
	writer
		.write_u64::<LittleEndian>(24 + content_len as u64)
		.unwrap();

	for part in [&title, &author, &copyright, &description, &rating] {
		writer.write_u16::<LittleEndian>(part.len() as u16).unwrap();
	}

	for part in [title, author, copyright, description, rating] {
		writer.write_all(&part).unwrap();
	}

	writer.into_inner()
}

fn build_extended_content_description(tag: &mut AsfTagRef) -> Vec<u8> {
	let mut entries = Vec::new();

	for (key, value) in &mut tag.items {
		let name = utf16_nul(Some(key));
		let value_bytes = utf16_nul(Some(value));

		let mut entry = Vec::with_capacity(8 + name.len() + value_bytes.len());
		entry
			.write_u16::<LittleEndian>(name.len() as u16)
			.unwrap();
		entry.write_all(&name).unwrap();
		// Data type: Unicode string
		entry.write_u16::<LittleEndian>(0).unwrap();
		entry
			.write_u16::<LittleEndian>(value_bytes.len() as u16)
			.unwrap();
		entry.write_all(&value_bytes).unwrap();

		entries.push(entry);
	}

	if entries.is_empty() {
		return Vec::new();
	}

	let content_len = 2 + entries.iter().map(Vec::len).sum::<usize>();
	let mut writer = Cursor::new(Vec::with_capacity(24 + content_len));

	writer
		.write_all(&EXTENDED_CONTENT_DESCRIPTION_OBJECT)
		.unwrap();
	writer
		.write_u64::<LittleEndian>(24 + content_len as u64)
		.unwrap();
	writer.write_u16::<LittleEndian>(entries.len() as u16).unwrap();

	for entry in entries {
		writer.write_all(&entry).unwrap();
	}

	writer.into_inner()
}

// UTF-16LE, NUL-terminated; returns an empty Vec for `None` or an empty string
fn utf16_nul(value: Option<&str>) -> Vec<u8> {
	let value = match value {
		Some(v) if !v.is_empty() => v,
		_ => return Vec::new(),
	};

	let mut bytes = Vec::with_capacity(value.len() * 2 + 2);

	for unit in value.encode_utf16() {
		bytes.extend_from_slice(&unit.to_le_bytes());
	}

	bytes.extend_from_slice(&0_u16.to_le_bytes());

	bytes
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::asf::tag::AsfTag;
	use crate::types::tag::Accessor;

	#[test]
	fn empty_tag_produces_no_objects() {
		let tag = AsfTag::default();
		let tag_ref: AsfTagRef = (&tag).into();

		assert!(build_content_description(&tag_ref).is_empty());

		let mut tag_ref: AsfTagRef = (&tag).into();
		assert!(build_extended_content_description(&mut tag_ref).is_empty());
	}

	#[test]
	fn content_description_carries_every_fixed_field_length_prefix() {
		let mut tag = AsfTag::default();
		tag.set_title("title".to_string());
		tag.set_artist("author".to_string());

		let tag_ref: AsfTagRef = (&tag).into();
		let object = build_content_description(&tag_ref);

		// GUID (16) + size (8) + 5 length-prefixed UTF-16LE strings
		assert_eq!(&object[..16], &CONTENT_DESCRIPTION_OBJECT);

		let title_len = u16::from_le_bytes([object[24], object[25]]) as usize;
		let author_len = u16::from_le_bytes([object[26], object[27]]) as usize;

		// "title" + NUL, UTF-16LE
		assert_eq!(title_len, 12);
		// "author" + NUL, UTF-16LE
		assert_eq!(author_len, 14);
	}

	#[test]
	fn extended_content_description_counts_items() {
		let mut tag = AsfTag::default();
		tag.insert_item("WM/Genre".to_string(), "Rock".to_string(), false);
		tag.insert_item("WM/AlbumTitle".to_string(), "Album".to_string(), false);

		let mut tag_ref: AsfTagRef = (&tag).into();
		let object = build_extended_content_description(&mut tag_ref);

		assert_eq!(&object[..16], &EXTENDED_CONTENT_DESCRIPTION_OBJECT);

		let item_count = u16::from_le_bytes([object[24], object[25]]);
		assert_eq!(item_count, 2);
	}

	#[test]
	fn replace_object_inserts_when_absent() {
		let mut cursor = Cursor::new(b"header".to_vec());
		let mut size_delta = 0_i64;
		let mut count_delta = 0_i32;

		replace_object(&mut cursor, None, vec![1, 2, 3], &mut size_delta, &mut count_delta, 6).unwrap();

		assert_eq!(cursor.into_inner(), vec![b'h', b'e', b'a', b'd', b'e', b'r', 1, 2, 3]);
		assert_eq!(size_delta, 3);
		assert_eq!(count_delta, 1);
	}

	#[test]
	fn replacing_two_ranges_in_position_order_keeps_later_range_valid() {
		// "AA" at [0, 2) grows to "AAAA", "BB" at [4, 6) grows to "BBBB". Resolving both
		// ranges against the original buffer, then splicing the lower-offset one first,
		// would make the stale [4, 6) land on the wrong bytes once the buffer has grown.
		let mut cursor = Cursor::new(b"AA--BB".to_vec());
		let mut size_delta = 0_i64;
		let mut count_delta = 0_i32;

		let mut replacements = [
			(Some(0..2), b"AAAA".to_vec()),
			(Some(4..6), b"BBBB".to_vec()),
		];
		replacements.sort_by_key(|(range, _)| {
			std::cmp::Reverse(range.as_ref().map_or(6, |r| r.start))
		});

		for (range, replacement) in replacements {
			replace_object(
				&mut cursor,
				range,
				replacement,
				&mut size_delta,
				&mut count_delta,
				6,
			)
			.unwrap();
		}

		assert_eq!(cursor.into_inner(), b"AAAA--BBBB".to_vec());
		assert_eq!(size_delta, 4);
	}

	#[test]
	fn replace_object_removes_when_replacement_empty() {
		let mut cursor = Cursor::new(vec![b'a', b'b', b'c', b'd', b'e']);
		let mut size_delta = 0_i64;
		let mut count_delta = 0_i32;

		replace_object(&mut cursor, Some(1..4), Vec::new(), &mut size_delta, &mut count_delta, 5).unwrap();

		assert_eq!(cursor.into_inner(), vec![b'a', b'e']);
		assert_eq!(size_delta, -3);
		assert_eq!(count_delta, -1);
	}
}
