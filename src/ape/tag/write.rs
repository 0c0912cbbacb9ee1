use super::ape_tag::ApeTagRef;
use super::item::ApeItemRef;
use crate::error::Result;
use crate::types::item::ItemValueRef;

use std::fs::File;
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

pub(crate) fn write_to(file: &mut File, tag: &mut ApeTagRef) -> Result<()> {
	let mut item_count = 0_u32;
	let mut items = Vec::new();

	for item in &mut tag.items {
		encode_item(&mut items, &item)?;
		item_count += 1;
	}

	super::super::write::write_ape_tag(file, &items, item_count)
}

fn encode_item(out: &mut Vec<u8>, item: &ApeItemRef) -> Result<()> {
	let (item_type, value): (u32, &[u8]) = match &item.value {
		ItemValueRef::Text(text) => (0, text.as_bytes()),
		ItemValueRef::Binary(bin) => (1, bin),
		ItemValueRef::Locator(loc) => (2, loc.as_bytes()),
	};

	let flags = u32::from(item.read_only) | (item_type << 1);

	out.write_u32::<LittleEndian>(value.len() as u32)?;
	out.write_u32::<LittleEndian>(flags)?;
	out.write_all(item.key.as_bytes())?;
	out.write_u8(0)?;
	out.write_all(value)?;

	Ok(())
}
