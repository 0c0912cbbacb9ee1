use crate::error::Result;

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};

/// The 24-byte header shared by every ASF object: a 16-byte GUID followed by
/// an 8-byte little-endian size that includes the header itself.
pub(crate) struct AsfObject {
	pub(crate) guid: [u8; 16],
	pub(crate) size: u64,
	pub(crate) position: u64,
}

impl AsfObject {
	pub(crate) fn read<R>(data: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let position = data.seek(SeekFrom::Current(0))?;

		let mut guid = [0; 16];
		data.read_exact(&mut guid)?;

		let size = data.read_u64::<LittleEndian>()?;

		Ok(Self {
			guid,
			size,
			position,
		})
	}

	/// Number of content bytes following the 24-byte object header
	pub(crate) fn content_len(&self) -> u64 {
		self.size.saturating_sub(24)
	}

	pub(crate) fn skip_content<R>(&self, data: &mut R) -> Result<()>
	where
		R: Read + Seek,
	{
		data.seek(SeekFrom::Start(self.position + self.size))?;
		Ok(())
	}
}
