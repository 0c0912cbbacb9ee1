use super::properties::DsfProperties;
use super::DsfFile;
use crate::error::{LoftyError, Result};
#[cfg(feature = "id3v2")]
use crate::id3::v2::read::parse_id3v2;
#[cfg(feature = "id3v2")]
use crate::id3::v2::read_id3v2_header;

use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

use byteorder::{LittleEndian, ReadBytesExt};

pub(crate) fn read_from<R>(data: &mut R, read_properties: bool) -> Result<DsfFile>
where
	R: Read + Seek,
{
	let mut dsd_id = [0; 4];
	data.read_exact(&mut dsd_id)?;

	if &dsd_id != b"DSD " {
		return Err(LoftyError::UnknownFormat);
	}

	let dsd_chunk_size = data.read_u64::<LittleEndian>()?;

	if dsd_chunk_size != 28 {
		return Err(LoftyError::Dsf("\"DSD \" chunk has an unexpected size"));
	}

	// Total file size, unused
	data.read_u64::<LittleEndian>()?;

	let metadata_pointer = data.read_u64::<LittleEndian>()?;

	let mut fmt_id = [0; 4];
	data.read_exact(&mut fmt_id)?;

	if &fmt_id != b"fmt " {
		return Err(LoftyError::Dsf("Expected a \"fmt \" chunk"));
	}

	let fmt_chunk_size = data.read_u64::<LittleEndian>()?;

	let properties = if read_properties {
		read_fmt_chunk(data)?
	} else {
		data.seek(SeekFrom::Current((fmt_chunk_size - 12) as i64))?;
		DsfProperties::default()
	};

	let mut data_id = [0; 4];
	data.read_exact(&mut data_id)?;

	if &data_id != b"data" {
		return Err(LoftyError::Dsf("Expected a \"data\" chunk"));
	}

	// We don't need the sample data itself, just need to move past it
	let data_chunk_size = data.read_u64::<LittleEndian>()?;
	data.seek(SeekFrom::Current((data_chunk_size.saturating_sub(12)) as i64))?;

	#[cfg(feature = "id3v2")]
	let id3v2 = if metadata_pointer != 0 {
		data.seek(SeekFrom::Start(metadata_pointer))?;

		let header = read_id3v2_header(data)?;
		Some(parse_id3v2(data, header)?)
	} else {
		None
	};

	Ok(DsfFile {
		#[cfg(feature = "id3v2")]
		id3v2,
		properties,
	})
}

fn read_fmt_chunk<R>(data: &mut R) -> Result<DsfProperties>
where
	R: Read + Seek,
{
	// Format version, unused
	data.read_u32::<LittleEndian>()?;
	// Format ID, 0 = DSD raw
	data.read_u32::<LittleEndian>()?;
	// Channel type, unused (channel count below is sufficient)
	data.read_u32::<LittleEndian>()?;

	let channels = data.read_u32::<LittleEndian>()? as u8;
	let sample_rate = data.read_u32::<LittleEndian>()?;
	let bits_per_sample = data.read_u32::<LittleEndian>()? as u8;
	let sample_count = data.read_u64::<LittleEndian>()?;

	// Block size per channel, reserved
	data.seek(SeekFrom::Current(8))?;

	let duration = if sample_rate > 0 {
		Duration::from_secs_f64(sample_count as f64 / f64::from(sample_rate))
	} else {
		Duration::ZERO
	};

	Ok(DsfProperties::new(
		duration,
		bits_per_sample,
		channels,
		sample_rate,
		sample_count,
	))
}
