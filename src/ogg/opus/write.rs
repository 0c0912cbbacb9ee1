use crate::error::Result;

use std::fs::File;
use std::io::{Read, Write};

use ogg_pager::Page;

pub(in crate::ogg) fn write_to(
	data: &mut File,
	writer: &mut Vec<u8>,
	ser: u32,
	pages: &mut [Page],
) -> Result<()> {
	let mut seq_num = 1;

	for page in pages.iter_mut() {
		seq_num += 1;

		page.serial = ser;
		page.seq_num = seq_num;

		writer.write_all(&*page.as_bytes())?;
	}

	let mut remaining = Vec::new();
	data.read_to_end(&mut remaining)?;
	writer.write_all(&remaining)?;

	Ok(())
}
