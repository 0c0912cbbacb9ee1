use super::entry::{EntryType, EntryValue};
use super::{Endian, Ifd, IfdChain, EXIF_IFD_POINTER, GPS_IFD_POINTER, INTEROP_IFD_POINTER};
use crate::error::{LoftyError, Result};

use std::io::{Read, Seek, SeekFrom};

const ENTRY_SIZE: u64 = 12;

/// Decodes a full TIFF/EXIF byte stream (byte-order prefix, magic, IFD0 and
/// its chain, plus any EXIF/GPS/Interoperability sub-IFDs) starting at the
/// reader's current position
pub fn decode_ifd_chain<R>(reader: &mut R) -> Result<IfdChain>
where
	R: Read + Seek,
{
	let base = reader.seek(SeekFrom::Current(0))?;

	let mut prefix = [0; 2];
	reader.read_exact(&mut prefix)?;

	let endian =
		Endian::from_prefix(prefix).ok_or(LoftyError::Ifd("Invalid byte order marker"))?;

	let mut magic_buf = [0; 2];
	reader.read_exact(&mut magic_buf)?;

	if endian.read_u16(&magic_buf) != 42 {
		return Err(LoftyError::Ifd("Invalid TIFF magic number"));
	}

	let mut offset_buf = [0; 4];
	reader.read_exact(&mut offset_buf)?;
	let mut next_offset = Some(endian.read_u32(&offset_buf));

	let mut chain = IfdChain {
		byte_order: endian,
		..IfdChain::default()
	};

	// IFD0 and any further top-level directories chained off of it (eg.
	// multi-page TIFF). Each becomes its own entry in `ifds`.
	while let Some(offset) = next_offset {
		if offset == 0 {
			break;
		}

		let (ifd, corrupt, next) = decode_one_ifd(reader, base, offset, endian)?;
		chain.possibly_corrupt |= corrupt;

		let idx = chain.ifds.len();
		chain.ifds.push(ifd);

		resolve_sub_ifds(reader, base, endian, &mut chain, idx)?;

		next_offset = Some(next);
	}

	Ok(chain)
}

fn resolve_sub_ifds<R>(
	reader: &mut R,
	base: u64,
	endian: Endian,
	chain: &mut IfdChain,
	parent_idx: usize,
) -> Result<()>
where
	R: Read + Seek,
{
	for &pointer_tag in &[EXIF_IFD_POINTER, GPS_IFD_POINTER, INTEROP_IFD_POINTER] {
		let offset = chain.ifds[parent_idx]
			.get(pointer_tag)
			.and_then(EntryValue::as_pointer);

		if let Some(offset) = offset {
			// Sub-IFDs are not expected to chain further; their trailing
			// next-IFD offset is read and discarded.
			let (sub, corrupt, _) = decode_one_ifd(reader, base, offset, endian)?;
			chain.possibly_corrupt |= corrupt;
			chain.set_sub_ifd(parent_idx, pointer_tag, sub);
		}
	}

	Ok(())
}

/// Reads one 12-byte entry from the table, including its out-of-line value if any
///
/// Every byte belonging to the entry (and, for an out-of-line value, the return seek) is
/// consumed/restored before any semantic error is raised, so a bad entry type or value never
/// leaves the reader out of alignment for the next entry in the table.
fn decode_entry<R>(reader: &mut R, base: u64, endian: Endian) -> Result<(u16, EntryValue)>
where
	R: Read + Seek,
{
	let mut raw = [0; ENTRY_SIZE as usize];
	reader.read_exact(&mut raw)?;

	let tag = endian.read_u16(&raw[0..2]);
	let ty = EntryType::from_u16(endian.read_u16(&raw[2..4]));
	let count = endian.read_u32(&raw[4..8]);

	let ty = match ty {
		Some(ty) => ty,
		None => return Err(LoftyError::Ifd("Unknown entry type")),
	};

	let byte_len = u64::from(ty.unit_size()) * u64::from(count);

	let value = if byte_len <= 4 {
		EntryValue::decode(ty, count, endian, &raw[8..12])?
	} else {
		let value_offset = endian.read_u32(&raw[8..12]);

		let return_pos = reader.seek(SeekFrom::Current(0))?;

		let read_value = (|| -> Result<EntryValue> {
			reader.seek(SeekFrom::Start(base + u64::from(value_offset)))?;

			let mut buf = vec![0; byte_len as usize];
			reader.read_exact(&mut buf)?;

			EntryValue::decode(ty, count, endian, &buf)
		})();

		reader.seek(SeekFrom::Start(return_pos))?;

		read_value?
	};

	Ok((tag, value))
}

fn decode_one_ifd<R>(
	reader: &mut R,
	base: u64,
	offset: u32,
	endian: Endian,
) -> Result<(Ifd, bool, u32)>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(base + u64::from(offset)))?;

	let mut count_buf = [0; 2];
	reader.read_exact(&mut count_buf)?;
	let entry_count = endian.read_u16(&count_buf);

	let mut ifd = Ifd::new();
	let mut possibly_corrupt = false;

	for _ in 0..entry_count {
		match decode_entry(reader, base, endian) {
			Ok((tag, value)) => ifd.insert(tag, value),
			// A bad entry type/count/value is only discovered after its 12-byte slot (and any
			// out-of-line value) has already been fully consumed, so the reader stays aligned
			// for the next entry. An I/O error means the stream itself is broken.
			Err(LoftyError::Io(e)) => return Err(LoftyError::Io(e)),
			Err(e) => {
				log::warn!("skipping corrupt IFD entry: {}", e);
				possibly_corrupt = true;
			},
		}
	}

	let mut next_buf = [0; 4];
	reader.read_exact(&mut next_buf)?;
	let next_offset = endian.read_u32(&next_buf);

	Ok((ifd, possibly_corrupt, next_offset))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ifd::write::encode_ifd_chain;
	use std::io::Cursor;

	#[test]
	fn roundtrip_simple_ifd0() {
		let mut chain = IfdChain {
			byte_order: Endian::Little,
			..IfdChain::default()
		};

		let mut ifd0 = Ifd::new();
		ifd0.insert(0x0100, EntryValue::Long(vec![1920]));
		ifd0.insert(0x0101, EntryValue::Long(vec![1080]));
		ifd0.insert(0x010E, EntryValue::Ascii("a description".to_string()));
		chain.ifds.push(ifd0);

		let bytes = encode_ifd_chain(&chain).unwrap();

		let decoded = decode_ifd_chain(&mut Cursor::new(bytes)).unwrap();
		let ifd0 = decoded.ifd0().unwrap();

		assert_eq!(ifd0.get(0x0100), Some(&EntryValue::Long(vec![1920])));
		assert_eq!(ifd0.get(0x0101), Some(&EntryValue::Long(vec![1080])));
		assert_eq!(
			ifd0.get(0x010E).and_then(EntryValue::as_str),
			Some("a description")
		);
	}

	#[test]
	fn roundtrip_with_exif_sub_ifd() {
		let mut chain = IfdChain {
			byte_order: Endian::Big,
			..IfdChain::default()
		};

		chain.ifds.push(Ifd::new());

		let mut exif = Ifd::new();
		exif.insert(0xA002, EntryValue::Long(vec![4032]));
		chain.set_sub_ifd(0, EXIF_IFD_POINTER, exif);

		let bytes = encode_ifd_chain(&chain).unwrap();
		let decoded = decode_ifd_chain(&mut Cursor::new(bytes)).unwrap();

		assert_eq!(decoded.byte_order, Endian::Big);
		assert_eq!(
			decoded.exif_ifd().unwrap().get(0xA002),
			Some(&EntryValue::Long(vec![4032]))
		);
	}

	#[test]
	fn rejects_bad_magic() {
		let bytes = [b'I', b'I', 0x00, 0x00, 0, 0, 0, 0];
		let err = decode_ifd_chain(&mut Cursor::new(bytes)).unwrap_err();
		assert!(matches!(err, LoftyError::Ifd(_)));
	}
}
