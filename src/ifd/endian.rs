use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// The byte order an IFD/EXIF directory declared for itself
///
/// Unlike the rest of the crate's readers, a container's byte order isn't
/// known until the first two bytes of the stream are read, so the generic
/// `byteorder::ByteOrder` type parameter used elsewhere doesn't apply here —
/// this is a runtime value instead.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endian {
	/// `II`, Intel byte order
	Little,
	/// `MM`, Motorola byte order
	Big,
}

impl Endian {
	pub(crate) fn from_prefix(prefix: [u8; 2]) -> Option<Self> {
		match &prefix {
			b"II" => Some(Endian::Little),
			b"MM" => Some(Endian::Big),
			_ => None,
		}
	}

	pub(crate) fn prefix(self) -> &'static [u8; 2] {
		match self {
			Endian::Little => b"II",
			Endian::Big => b"MM",
		}
	}

	pub(crate) fn read_u16(self, buf: &[u8]) -> u16 {
		match self {
			Endian::Little => LittleEndian::read_u16(buf),
			Endian::Big => BigEndian::read_u16(buf),
		}
	}

	pub(crate) fn read_u32(self, buf: &[u8]) -> u32 {
		match self {
			Endian::Little => LittleEndian::read_u32(buf),
			Endian::Big => BigEndian::read_u32(buf),
		}
	}

	pub(crate) fn read_i16(self, buf: &[u8]) -> i16 {
		match self {
			Endian::Little => LittleEndian::read_i16(buf),
			Endian::Big => BigEndian::read_i16(buf),
		}
	}

	pub(crate) fn read_i32(self, buf: &[u8]) -> i32 {
		match self {
			Endian::Little => LittleEndian::read_i32(buf),
			Endian::Big => BigEndian::read_i32(buf),
		}
	}

	pub(crate) fn read_f32(self, buf: &[u8]) -> f32 {
		match self {
			Endian::Little => LittleEndian::read_f32(buf),
			Endian::Big => BigEndian::read_f32(buf),
		}
	}

	pub(crate) fn read_f64(self, buf: &[u8]) -> f64 {
		match self {
			Endian::Little => LittleEndian::read_f64(buf),
			Endian::Big => BigEndian::read_f64(buf),
		}
	}

	pub(crate) fn write_u16(self, buf: &mut [u8], v: u16) {
		match self {
			Endian::Little => LittleEndian::write_u16(buf, v),
			Endian::Big => BigEndian::write_u16(buf, v),
		}
	}

	pub(crate) fn write_u32(self, buf: &mut [u8], v: u32) {
		match self {
			Endian::Little => LittleEndian::write_u32(buf, v),
			Endian::Big => BigEndian::write_u32(buf, v),
		}
	}

	pub(crate) fn write_i16(self, buf: &mut [u8], v: i16) {
		match self {
			Endian::Little => LittleEndian::write_i16(buf, v),
			Endian::Big => BigEndian::write_i16(buf, v),
		}
	}

	pub(crate) fn write_i32(self, buf: &mut [u8], v: i32) {
		match self {
			Endian::Little => LittleEndian::write_i32(buf, v),
			Endian::Big => BigEndian::write_i32(buf, v),
		}
	}

	pub(crate) fn write_f32(self, buf: &mut [u8], v: f32) {
		match self {
			Endian::Little => LittleEndian::write_f32(buf, v),
			Endian::Big => BigEndian::write_f32(buf, v),
		}
	}

	pub(crate) fn write_f64(self, buf: &mut [u8], v: f64) {
		match self {
			Endian::Little => LittleEndian::write_f64(buf, v),
			Endian::Big => BigEndian::write_f64(buf, v),
		}
	}
}

impl Default for Endian {
	fn default() -> Self {
		Endian::Little
	}
}
