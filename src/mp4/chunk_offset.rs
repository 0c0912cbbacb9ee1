use super::atom_info::{AtomIdent, AtomInfo};
use crate::error::{LoftyError, Result};

use std::convert::TryFrom;
use std::io::{Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

/// Walks every `trak/mdia/minf/stbl` under `moov`, patching each `stco`
/// (32-bit) or `co64` (64-bit) chunk offset table entry that points at or
/// past `threshold` by `delta` bytes.
///
/// `threshold` is the absolute position, in the *pre-edit* file, where bytes
/// were inserted or removed. Entries below it describe data that didn't
/// move (this covers the "moov placed after mdat" layout, where growing the
/// `ilst` atom doesn't touch anything `mdat` points into).
pub(crate) fn adjust_chunk_offsets<R>(
	data: &mut R,
	moov_start: u64,
	moov_len: u64,
	delta: i64,
	threshold: u64,
) -> Result<()>
where
	R: Read + Seek + Write,
{
	if delta == 0 {
		return Ok(());
	}

	let moov_end = moov_start + moov_len;
	data.seek(SeekFrom::Start(moov_start + 8))?;

	while data.seek(SeekFrom::Current(0))? < moov_end {
		let atom = AtomInfo::read(data)?;

		if atom.ident == AtomIdent::Fourcc(*b"trak") {
			adjust_trak(data, &atom, delta, threshold)?;
		}

		data.seek(SeekFrom::Start(atom.start + atom.len))?;
	}

	Ok(())
}

fn adjust_trak<R>(data: &mut R, trak: &AtomInfo, delta: i64, threshold: u64) -> Result<()>
where
	R: Read + Seek + Write,
{
	if let Some(mdia) = find_child(data, trak, b"mdia")? {
		if let Some(minf) = find_child(data, &mdia, b"minf")? {
			if let Some(stbl) = find_child(data, &minf, b"stbl")? {
				adjust_stbl(data, &stbl, delta, threshold)?;
			}
		}
	}

	Ok(())
}

fn adjust_stbl<R>(data: &mut R, stbl: &AtomInfo, delta: i64, threshold: u64) -> Result<()>
where
	R: Read + Seek + Write,
{
	let stbl_end = stbl.start + stbl.len;
	data.seek(SeekFrom::Start(stbl.start + 8))?;

	while data.seek(SeekFrom::Current(0))? < stbl_end {
		let atom = AtomInfo::read(data)?;

		match atom.ident {
			AtomIdent::Fourcc(ref f) if f == b"stco" => patch_stco(data, &atom, delta, threshold)?,
			AtomIdent::Fourcc(ref f) if f == b"co64" => patch_co64(data, &atom, delta, threshold)?,
			_ => {},
		}

		data.seek(SeekFrom::Start(atom.start + atom.len))?;
	}

	Ok(())
}

fn find_child<R>(data: &mut R, parent: &AtomInfo, fourcc: &[u8; 4]) -> Result<Option<AtomInfo>>
where
	R: Read + Seek,
{
	let parent_end = parent.start + parent.len;
	data.seek(SeekFrom::Start(parent.start + 8))?;

	while data.seek(SeekFrom::Current(0))? < parent_end {
		let atom = AtomInfo::read(data)?;

		if atom.ident == AtomIdent::Fourcc(*fourcc) {
			return Ok(Some(atom));
		}

		data.seek(SeekFrom::Start(atom.start + atom.len))?;
	}

	Ok(None)
}

// version (1) + flags (3) + entry count (4), then that many 32-bit offsets
fn patch_stco<R>(data: &mut R, atom: &AtomInfo, delta: i64, threshold: u64) -> Result<()>
where
	R: Read + Seek + Write,
{
	data.seek(SeekFrom::Start(atom.start + 12))?;
	let count = data.read_u32::<BigEndian>()?;

	let table_start = atom.start + 16;

	for i in 0..u64::from(count) {
		let pos = table_start + i * 4;

		data.seek(SeekFrom::Start(pos))?;
		let offset = data.read_u32::<BigEndian>()?;

		if u64::from(offset) < threshold {
			continue;
		}

		let shifted = (i64::from(offset) + delta).max(0);
		let new_offset = u32::try_from(shifted)
			.map_err(|_| LoftyError::Mp4("stco entry overflowed 32 bits after relocation"))?;

		data.seek(SeekFrom::Start(pos))?;
		data.write_u32::<BigEndian>(new_offset)?;
	}

	Ok(())
}

fn patch_co64<R>(data: &mut R, atom: &AtomInfo, delta: i64, threshold: u64) -> Result<()>
where
	R: Read + Seek + Write,
{
	data.seek(SeekFrom::Start(atom.start + 12))?;
	let count = data.read_u32::<BigEndian>()?;

	let table_start = atom.start + 16;

	for i in 0..u64::from(count) {
		let pos = table_start + i * 8;

		data.seek(SeekFrom::Start(pos))?;
		let offset = data.read_u64::<BigEndian>()?;

		if offset < threshold {
			continue;
		}

		let signed_offset = i64::try_from(offset)
			.map_err(|_| LoftyError::Mp4("co64 entry is too large to relocate"))?;
		let new_offset = u64::try_from((signed_offset + delta).max(0))
			.map_err(|_| LoftyError::Mp4("co64 entry overflowed 64 bits after relocation"))?;

		data.seek(SeekFrom::Start(pos))?;
		data.write_u64::<BigEndian>(new_offset)?;
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::convert::TryInto;
	use std::io::Cursor;

	fn atom(fourcc: &[u8; 4], payload: &[u8]) -> Vec<u8> {
		let mut out = ((8 + payload.len()) as u32).to_be_bytes().to_vec();
		out.extend_from_slice(fourcc);
		out.extend_from_slice(payload);
		out
	}

	fn stco(offsets: &[u32]) -> Vec<u8> {
		let mut payload = vec![0, 0, 0, 0]; // version + flags
		payload.extend_from_slice(&(offsets.len() as u32).to_be_bytes());
		for &o in offsets {
			payload.extend_from_slice(&o.to_be_bytes());
		}
		atom(b"stco", &payload)
	}

	fn build_moov(offsets: &[u32]) -> Vec<u8> {
		let stbl = atom(b"stbl", &stco(offsets));
		let minf = atom(b"minf", &stbl);
		let mdia = atom(b"mdia", &minf);
		let trak = atom(b"trak", &mdia);
		atom(b"moov", &trak)
	}

	fn read_stco_offsets(bytes: &[u8]) -> Vec<u32> {
		// stco payload starts 16 bytes into the atom path moov>trak>mdia>minf>stbl>stco,
		// each level contributes an 8 byte header
		let stco_atom_start = 8 * 5; // moov, trak, mdia, minf, stbl headers
		let count_pos = stco_atom_start + 8 + 4;
		let count = u32::from_be_bytes(bytes[count_pos..count_pos + 4].try_into().unwrap());

		(0..count)
			.map(|i| {
				let pos = count_pos + 4 + i as usize * 4;
				u32::from_be_bytes(bytes[pos..pos + 4].try_into().unwrap())
			})
			.collect()
	}

	#[test]
	fn patches_offsets_at_or_past_threshold_only() {
		let moov = build_moov(&[100, 2000]);
		let mut cursor = Cursor::new(moov);
		let moov_len = cursor.get_ref().len() as u64;

		adjust_chunk_offsets(&mut cursor, 0, moov_len, 50, 150).unwrap();

		let offsets = read_stco_offsets(cursor.get_ref());
		assert_eq!(offsets, vec![100, 2050]);
	}

	#[test]
	fn zero_delta_is_a_no_op() {
		let moov = build_moov(&[100, 2000]);
		let mut cursor = Cursor::new(moov.clone());
		let moov_len = cursor.get_ref().len() as u64;

		adjust_chunk_offsets(&mut cursor, 0, moov_len, 0, 0).unwrap();

		assert_eq!(cursor.into_inner(), moov);
	}

	#[test]
	fn negative_delta_clamps_at_zero() {
		let moov = build_moov(&[10, 2000]);
		let mut cursor = Cursor::new(moov);
		let moov_len = cursor.get_ref().len() as u64;

		adjust_chunk_offsets(&mut cursor, 0, moov_len, -1000, 0).unwrap();

		let offsets = read_stco_offsets(cursor.get_ref());
		assert_eq!(offsets, vec![0, 1000]);
	}
}
