use super::entry::EntryValue;
use super::{Endian, IfdChain, EXIF_IFD_POINTER, GPS_IFD_POINTER, INTEROP_IFD_POINTER};
use crate::error::Result;
use crate::ifd::IfdEntry;

const SUB_IFD_POINTER_ORDER: [u16; 3] = [EXIF_IFD_POINTER, GPS_IFD_POINTER, INTEROP_IFD_POINTER];

/// Encodes a byte-order prefix + IFD0 (+ any EXIF/GPS/Interoperability
/// sub-IFDs nested directly under it) back into a TIFF/EXIF byte stream.
///
/// Entries within each directory are emitted sorted by tag id, with
/// overflow values packed sequentially right after the directory that owns
/// them, followed by each sub-IFD in turn — mirroring the layout a
/// conforming reader (including this one) expects.
///
/// Only sub-IFDs nested directly under IFD0 are supported; deeper nesting
/// or multiple top-level directories (multi-page TIFF) are not something
/// this crate writes.
pub fn encode_ifd_chain(chain: &IfdChain) -> Result<Vec<u8>> {
	let endian = chain.byte_order;
	let mut ifd0_entries: Vec<IfdEntry> = chain
		.ifd0()
		.map(|ifd| {
			ifd.entries()
				.iter()
				.filter(|e| !SUB_IFD_POINTER_ORDER.contains(&e.tag))
				.cloned()
				.collect()
		})
		.unwrap_or_default();

	let present_sub_ifds: Vec<(u16, usize)> = SUB_IFD_POINTER_ORDER
		.iter()
		.filter_map(|&tag| chain.sub_ifds.get(&(0, tag)).map(|&idx| (tag, idx)))
		.collect();

	for &(tag, _) in &present_sub_ifds {
		ifd0_entries.push(IfdEntry {
			tag,
			value: EntryValue::Long(vec![0]),
		});
	}

	ifd0_entries.sort_by_key(|e| e.tag);

	let ifd0_header_len = 2 + 12 * ifd0_entries.len() as u64 + 4;
	let ifd0_start = 8_u64;
	let ifd0_overflow_start = ifd0_start + ifd0_header_len;
	let ifd0_overflow_size: u64 = ifd0_entries
		.iter()
		.map(|e| {
			let len = u64::from(e.value.byte_len());
			if len > 4 {
				len
			} else {
				0
			}
		})
		.sum();

	let mut sub_ifd_entries: Vec<Vec<IfdEntry>> = Vec::with_capacity(present_sub_ifds.len());
	let mut sub_ifd_starts: Vec<u64> = Vec::with_capacity(present_sub_ifds.len());

	let mut cursor = ifd0_overflow_start + ifd0_overflow_size;

	for &(_, idx) in &present_sub_ifds {
		let mut entries = chain.ifds[idx].entries().to_vec();
		entries.sort_by_key(|e| e.tag);

		let header_len = 2 + 12 * entries.len() as u64 + 4;
		let overflow_size: u64 = entries
			.iter()
			.map(|e| {
				let len = u64::from(e.value.byte_len());
				if len > 4 {
					len
				} else {
					0
				}
			})
			.sum();

		sub_ifd_starts.push(cursor);
		cursor += header_len + overflow_size;

		sub_ifd_entries.push(entries);
	}

	for entry in &mut ifd0_entries {
		if let Some(pos) = SUB_IFD_POINTER_ORDER.iter().position(|&t| t == entry.tag) {
			let tag = SUB_IFD_POINTER_ORDER[pos];
			if let Some(i) = present_sub_ifds.iter().position(|&(t, _)| t == tag) {
				entry.value = EntryValue::Long(vec![sub_ifd_starts[i] as u32]);
			}
		}
	}

	let mut out = Vec::new();
	out.extend_from_slice(endian.prefix());

	let mut magic = [0; 2];
	endian.write_u16(&mut magic, 42);
	out.extend_from_slice(&magic);

	let mut offset = [0; 4];
	endian.write_u32(&mut offset, ifd0_start as u32);
	out.extend_from_slice(&offset);

	let (ifd0_bytes, ifd0_overflow) = encode_flat(&ifd0_entries, endian, ifd0_overflow_start, 0);
	out.extend_from_slice(&ifd0_bytes);
	out.extend_from_slice(&ifd0_overflow);

	for (entries, &start) in sub_ifd_entries.iter().zip(sub_ifd_starts.iter()) {
		let overflow_start = start + 2 + 12 * entries.len() as u64 + 4;
		let (header, overflow) = encode_flat(entries, endian, overflow_start, 0);
		out.extend_from_slice(&header);
		out.extend_from_slice(&overflow);
	}

	Ok(out)
}

/// Encodes one flat directory's entries (assumed already sorted by tag) plus
/// its trailing next-IFD offset, returning `(header, overflow)` separately
/// so the caller can interleave multiple directories' overflow regions.
fn encode_flat(
	entries: &[IfdEntry],
	endian: Endian,
	overflow_base: u64,
	next_offset: u32,
) -> (Vec<u8>, Vec<u8>) {
	let mut header = Vec::new();

	let mut count_buf = [0; 2];
	endian.write_u16(&mut count_buf, entries.len() as u16);
	header.extend_from_slice(&count_buf);

	let mut overflow = Vec::new();
	let mut overflow_cursor = overflow_base;

	for entry in entries {
		let mut tag_buf = [0; 2];
		endian.write_u16(&mut tag_buf, entry.tag);
		header.extend_from_slice(&tag_buf);

		let mut type_buf = [0; 2];
		endian.write_u16(&mut type_buf, entry.value.entry_type().as_u16());
		header.extend_from_slice(&type_buf);

		let mut count_buf = [0; 4];
		endian.write_u32(&mut count_buf, entry.value.count());
		header.extend_from_slice(&count_buf);

		let encoded = entry.value.encode(endian);

		if encoded.len() <= 4 {
			let mut value_buf = [0; 4];
			value_buf[..encoded.len()].copy_from_slice(&encoded);
			header.extend_from_slice(&value_buf);
		} else {
			let mut offset_buf = [0; 4];
			endian.write_u32(&mut offset_buf, overflow_cursor as u32);
			header.extend_from_slice(&offset_buf);

			overflow.extend_from_slice(&encoded);
			overflow_cursor += encoded.len() as u64;
		}
	}

	let mut next_buf = [0; 4];
	endian.write_u32(&mut next_buf, next_offset);
	header.extend_from_slice(&next_buf);

	(header, overflow)
}
