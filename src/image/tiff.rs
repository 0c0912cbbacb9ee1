//! TIFF specific items
//!
//! A TIFF file *is* an IFD chain; there's no outer container to unwrap, so
//! reading and writing goes straight through [`crate::ifd`].
use crate::error::{LoftyError, Result};
use crate::ifd::read::decode_ifd_chain;
use crate::ifd::write::encode_ifd_chain;
use crate::ifd::{EntryValue, Ifd, IfdChain};
use crate::image::properties::ImageProperties;
use crate::image::ImageFile;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

const IMAGE_WIDTH: u16 = 0x0100;
const IMAGE_LENGTH: u16 = 0x0101;

/// Reads the IFD chain from a TIFF file
pub fn read_from<R>(reader: &mut R) -> Result<IfdChain>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(0))?;
	decode_ifd_chain(reader)
}

/// Reads the pixel dimensions from a TIFF file's `ImageWidth`/`ImageLength`
/// tags
pub fn read_properties<R>(reader: &mut R) -> Result<ImageProperties>
where
	R: Read + Seek,
{
	let chain = read_from(reader)?;
	let ifd0 = chain
		.ifd0()
		.ok_or(LoftyError::Image("TIFF file has no IFD0"))?;

	let width = dimension(ifd0.get(IMAGE_WIDTH))
		.ok_or(LoftyError::Image("Missing ImageWidth tag"))?;
	let height = dimension(ifd0.get(IMAGE_LENGTH))
		.ok_or(LoftyError::Image("Missing ImageLength tag"))?;

	Ok(ImageProperties::new(width, height))
}

fn dimension(value: Option<&EntryValue>) -> Option<u32> {
	match value? {
		EntryValue::Short(v) => v.first().map(|&v| u32::from(v)),
		EntryValue::Long(v) => v.first().copied(),
		_ => None,
	}
}

/// Overwrites a TIFF file with the encoded contents of `chain`
pub fn write_to(file: &mut File, chain: &IfdChain) -> Result<()> {
	let bytes = encode_ifd_chain(chain)?;

	file.seek(SeekFrom::Start(0))?;
	file.set_len(0)?;
	file.write_all(&bytes)?;

	Ok(())
}

/// A TIFF file's IFD chain and pixel dimensions
pub struct TiffFile {
	chain: IfdChain,
	properties: ImageProperties,
}

impl ImageFile for TiffFile {
	type Tag = IfdChain;

	fn read_from<R>(reader: &mut R) -> Result<Self>
	where
		R: Read + Seek,
	{
		let chain = read_from(reader)?;
		let properties = read_properties(reader)?;

		Ok(Self { chain, properties })
	}

	fn properties(&self) -> &ImageProperties {
		&self.properties
	}

	fn tag(&self) -> Option<&IfdChain> {
		if chain_is_empty(&self.chain) {
			None
		} else {
			Some(&self.chain)
		}
	}
}

fn chain_is_empty(chain: &IfdChain) -> bool {
	chain.ifds.iter().all(Ifd::is_empty)
}
