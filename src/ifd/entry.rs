use super::Endian;
use crate::error::{LoftyError, Result};

/// The on-disk type tag of a 12-byte IFD entry
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum EntryType {
	Byte,
	Ascii,
	Short,
	Long,
	Rational,
	SByte,
	Undefined,
	SShort,
	SLong,
	SRational,
	Float,
	Double,
}

impl EntryType {
	pub(crate) fn from_u16(ty: u16) -> Option<Self> {
		Some(match ty {
			1 => EntryType::Byte,
			2 => EntryType::Ascii,
			3 => EntryType::Short,
			4 => EntryType::Long,
			5 => EntryType::Rational,
			6 => EntryType::SByte,
			7 => EntryType::Undefined,
			8 => EntryType::SShort,
			9 => EntryType::SLong,
			10 => EntryType::SRational,
			11 => EntryType::Float,
			12 => EntryType::Double,
			_ => return None,
		})
	}

	pub(crate) fn as_u16(self) -> u16 {
		match self {
			EntryType::Byte => 1,
			EntryType::Ascii => 2,
			EntryType::Short => 3,
			EntryType::Long => 4,
			EntryType::Rational => 5,
			EntryType::SByte => 6,
			EntryType::Undefined => 7,
			EntryType::SShort => 8,
			EntryType::SLong => 9,
			EntryType::SRational => 10,
			EntryType::Float => 11,
			EntryType::Double => 12,
		}
	}

	/// Size, in bytes, of a single value of this type
	pub(crate) fn unit_size(self) -> u32 {
		match self {
			EntryType::Byte | EntryType::Ascii | EntryType::SByte | EntryType::Undefined => 1,
			EntryType::Short | EntryType::SShort => 2,
			EntryType::Long | EntryType::SLong | EntryType::Float => 4,
			EntryType::Rational | EntryType::SRational | EntryType::Double => 8,
		}
	}
}

/// A decoded IFD entry value
#[derive(Clone, Debug, PartialEq)]
#[allow(missing_docs)]
pub enum EntryValue {
	Byte(Vec<u8>),
	Ascii(String),
	Short(Vec<u16>),
	Long(Vec<u32>),
	Rational(Vec<(u32, u32)>),
	SByte(Vec<i8>),
	Undefined(Vec<u8>),
	SShort(Vec<i16>),
	SLong(Vec<i32>),
	SRational(Vec<(i32, i32)>),
	Float(Vec<f32>),
	Double(Vec<f64>),
}

impl EntryValue {
	pub(crate) fn entry_type(&self) -> EntryType {
		match self {
			EntryValue::Byte(_) => EntryType::Byte,
			EntryValue::Ascii(_) => EntryType::Ascii,
			EntryValue::Short(_) => EntryType::Short,
			EntryValue::Long(_) => EntryType::Long,
			EntryValue::Rational(_) => EntryType::Rational,
			EntryValue::SByte(_) => EntryType::SByte,
			EntryValue::Undefined(_) => EntryType::Undefined,
			EntryValue::SShort(_) => EntryType::SShort,
			EntryValue::SLong(_) => EntryType::SLong,
			EntryValue::SRational(_) => EntryType::SRational,
			EntryValue::Float(_) => EntryType::Float,
			EntryValue::Double(_) => EntryType::Double,
		}
	}

	/// Number of individual values (the IFD entry's `count` field)
	pub(crate) fn count(&self) -> u32 {
		match self {
			EntryValue::Byte(v) | EntryValue::Undefined(v) => v.len() as u32,
			EntryValue::Ascii(s) => s.len() as u32 + 1, // NUL terminated
			EntryValue::Short(v) => v.len() as u32,
			EntryValue::Long(v) => v.len() as u32,
			EntryValue::Rational(v) => v.len() as u32,
			EntryValue::SByte(v) => v.len() as u32,
			EntryValue::SShort(v) => v.len() as u32,
			EntryValue::SLong(v) => v.len() as u32,
			EntryValue::SRational(v) => v.len() as u32,
			EntryValue::Float(v) => v.len() as u32,
			EntryValue::Double(v) => v.len() as u32,
		}
	}

	pub(crate) fn byte_len(&self) -> u32 {
		self.count() * self.entry_type().unit_size()
	}

	/// As a single `u32`, for pointer-tag entries (sub-IFD offsets)
	pub(crate) fn as_pointer(&self) -> Option<u32> {
		match self {
			EntryValue::Long(v) => v.first().copied(),
			_ => None,
		}
	}

	/// Convenience accessor for a single text value, used by formats that
	/// expose EXIF/XMP fields as plain strings
	pub fn as_str(&self) -> Option<&str> {
		match self {
			EntryValue::Ascii(s) => Some(s.trim_end_matches('\0')),
			_ => None,
		}
	}

	pub(crate) fn decode(
		ty: EntryType,
		count: u32,
		endian: Endian,
		bytes: &[u8],
	) -> Result<Self> {
		let unit = ty.unit_size() as usize;
		let count = count as usize;

		if bytes.len() < unit.saturating_mul(count) {
			return Err(LoftyError::Ifd("Entry value shorter than its declared count"));
		}

		Ok(match ty {
			EntryType::Byte => EntryValue::Byte(bytes[..count].to_vec()),
			EntryType::SByte => {
				EntryValue::SByte(bytes[..count].iter().map(|&b| b as i8).collect())
			},
			EntryType::Undefined => EntryValue::Undefined(bytes[..count].to_vec()),
			EntryType::Ascii => {
				let end = bytes[..count]
					.iter()
					.position(|&b| b == 0)
					.unwrap_or(count);
				EntryValue::Ascii(String::from_utf8_lossy(&bytes[..end]).into_owned())
			},
			EntryType::Short => EntryValue::Short(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| endian.read_u16(c))
					.collect(),
			),
			EntryType::SShort => EntryValue::SShort(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| endian.read_i16(c))
					.collect(),
			),
			EntryType::Long => EntryValue::Long(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| endian.read_u32(c))
					.collect(),
			),
			EntryType::SLong => EntryValue::SLong(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| endian.read_i32(c))
					.collect(),
			),
			EntryType::Float => EntryValue::Float(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| endian.read_f32(c))
					.collect(),
			),
			EntryType::Double => EntryValue::Double(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| endian.read_f64(c))
					.collect(),
			),
			EntryType::Rational => EntryValue::Rational(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| (endian.read_u32(&c[..4]), endian.read_u32(&c[4..])))
					.collect(),
			),
			EntryType::SRational => EntryValue::SRational(
				bytes
					.chunks_exact(unit)
					.take(count)
					.map(|c| (endian.read_i32(&c[..4]), endian.read_i32(&c[4..])))
					.collect(),
			),
		})
	}

	pub(crate) fn encode(&self, endian: Endian) -> Vec<u8> {
		let mut out = Vec::with_capacity(self.byte_len() as usize);

		match self {
			EntryValue::Byte(v) | EntryValue::Undefined(v) => out.extend_from_slice(v),
			EntryValue::SByte(v) => out.extend(v.iter().map(|&b| b as u8)),
			EntryValue::Ascii(s) => {
				out.extend_from_slice(s.as_bytes());
				out.push(0);
			},
			EntryValue::Short(v) => {
				for &x in v {
					let mut buf = [0; 2];
					endian.write_u16(&mut buf, x);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::SShort(v) => {
				for &x in v {
					let mut buf = [0; 2];
					endian.write_i16(&mut buf, x);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::Long(v) => {
				for &x in v {
					let mut buf = [0; 4];
					endian.write_u32(&mut buf, x);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::SLong(v) => {
				for &x in v {
					let mut buf = [0; 4];
					endian.write_i32(&mut buf, x);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::Float(v) => {
				for &x in v {
					let mut buf = [0; 4];
					endian.write_f32(&mut buf, x);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::Double(v) => {
				for &x in v {
					let mut buf = [0; 8];
					endian.write_f64(&mut buf, x);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::Rational(v) => {
				for &(n, d) in v {
					let mut buf = [0; 8];
					endian.write_u32(&mut buf[..4], n);
					endian.write_u32(&mut buf[4..], d);
					out.extend_from_slice(&buf);
				}
			},
			EntryValue::SRational(v) => {
				for &(n, d) in v {
					let mut buf = [0; 8];
					endian.write_i32(&mut buf[..4], n);
					endian.write_i32(&mut buf[4..], d);
					out.extend_from_slice(&buf);
				}
			},
		}

		out
	}
}

/// A single 12-byte IFD entry, decoded
#[derive(Clone, Debug, PartialEq)]
pub struct IfdEntry {
	/// The entry's tag id
	pub tag: u16,
	/// The entry's decoded value
	pub value: EntryValue,
}
