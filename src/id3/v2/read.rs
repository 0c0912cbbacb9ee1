use super::frame::Frame;
use super::tag::Id3v2Tag;
use super::Id3v2Header;
use crate::error::{LoftyError, Result};

use std::io::Read;

#[allow(clippy::similar_names)]
pub(crate) fn parse_id3v2<R>(bytes: &mut R, header: Id3v2Header) -> Result<Id3v2Tag>
where
	R: Read,
{
	let mut tag_bytes = vec![0; header.size as usize];
	bytes.read_exact(&mut tag_bytes)?;

	let mut tag = Id3v2Tag::default();
	tag.original_version = header.version;
	tag.set_flags(header.flags);

	let reader = &mut &*tag_bytes;

	loop {
		// A frame's header and content bytes are always fully consumed by `Frame::read` before
		// it attempts to decompress or parse them, so a semantic error here never desyncs the
		// reader from the next frame's header. An I/O error means the byte buffer itself ran
		// out mid-frame.
		match Frame::read(reader, header.version) {
			Ok(None) => break,
			Ok(Some(f)) => drop(tag.insert(f)),
			Err(LoftyError::Io(e)) => return Err(LoftyError::Io(e)),
			Err(e) => {
				log::warn!("skipping corrupt ID3v2 frame: {}", e);
				tag.possibly_corrupt = true;
			},
		}
	}

	Ok(tag)
}
