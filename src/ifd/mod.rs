//! A decoder/encoder for TIFF-style Image File Directories
//!
//! This is the structure underlying both standalone TIFF files and embedded
//! EXIF blobs (JPEG `APP1`, PNG `eXIf`): a byte-order prefix followed by a
//! chain of directories, each a flat list of 12-byte tag/type/count/value
//! entries, with well-known tags pointing at further, nested directories
//! (EXIF, GPS, Interoperability).
mod endian;
pub mod entry;
pub mod read;
pub mod write;

pub use endian::Endian;
pub use entry::{EntryType, EntryValue, IfdEntry};

/// Tag pointing at the EXIF sub-IFD
pub const EXIF_IFD_POINTER: u16 = 0x8769;
/// Tag pointing at the GPS sub-IFD
pub const GPS_IFD_POINTER: u16 = 0x8825;
/// Tag pointing at the Interoperability sub-IFD
pub const INTEROP_IFD_POINTER: u16 = 0xA005;

/// A single Image File Directory: a flat set of tagged entries
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ifd {
	pub(crate) entries: Vec<IfdEntry>,
}

impl Ifd {
	/// Creates an empty directory
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value for `tag`, if present
	pub fn get(&self, tag: u16) -> Option<&EntryValue> {
		self.entries.iter().find(|e| e.tag == tag).map(|e| &e.value)
	}

	/// Inserts or replaces the value for `tag`
	pub fn insert(&mut self, tag: u16, value: EntryValue) {
		match self.entries.iter_mut().find(|e| e.tag == tag) {
			Some(entry) => entry.value = value,
			None => self.entries.push(IfdEntry { tag, value }),
		}
	}

	/// Removes `tag`, if present
	pub fn remove(&mut self, tag: u16) {
		self.entries.retain(|e| e.tag != tag);
	}

	/// Returns the stored entries as a slice
	pub fn entries(&self) -> &[IfdEntry] {
		&self.entries
	}

	/// Returns `true` if the directory has no entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// A fully decoded IFD chain
///
/// Sub-IFDs (EXIF, GPS, Interoperability) are stored alongside their parent
/// in a flat arena (`ifds`) and addressed by index through `sub_ifds`,
/// rather than as owned fields nested inside their parent `Ifd` — this
/// avoids the back-reference a tree of `Rc`/`RefCell` sub-directories would
/// otherwise need when a writer wants to walk back up to patch a parent's
/// pointer tag after laying out the child.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IfdChain {
	/// The byte order the directory declared for itself
	pub byte_order: Endian,
	/// Every directory discovered, `ifds[0]` is always IFD0
	pub ifds: Vec<Ifd>,
	/// `(owning ifd index, pointer tag) -> sub-ifd index`
	pub sub_ifds: std::collections::HashMap<(usize, u16), usize>,
	/// Set if a corrupt entry was skipped while decoding this chain
	pub possibly_corrupt: bool,
}

impl IfdChain {
	/// The primary directory (IFD0)
	pub fn ifd0(&self) -> Option<&Ifd> {
		self.ifds.first()
	}

	/// A mutable reference to IFD0
	pub fn ifd0_mut(&mut self) -> Option<&mut Ifd> {
		self.ifds.first_mut()
	}

	/// The EXIF sub-IFD nested under IFD0, if any
	pub fn exif_ifd(&self) -> Option<&Ifd> {
		self.sub_ifd(0, EXIF_IFD_POINTER)
	}

	/// The GPS sub-IFD nested under IFD0, if any
	pub fn gps_ifd(&self) -> Option<&Ifd> {
		self.sub_ifd(0, GPS_IFD_POINTER)
	}

	fn sub_ifd(&self, parent: usize, pointer_tag: u16) -> Option<&Ifd> {
		self.sub_ifds
			.get(&(parent, pointer_tag))
			.and_then(|&idx| self.ifds.get(idx))
	}

	/// Inserts (or replaces) the sub-IFD nested under `parent` at `pointer_tag`,
	/// returning its arena index
	pub fn set_sub_ifd(&mut self, parent: usize, pointer_tag: u16, ifd: Ifd) -> usize {
		if let Some(&idx) = self.sub_ifds.get(&(parent, pointer_tag)) {
			self.ifds[idx] = ifd;
			return idx;
		}

		let idx = self.ifds.len();
		self.ifds.push(ifd);
		self.sub_ifds.insert((parent, pointer_tag), idx);
		idx
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ifd_insert_get_remove() {
		let mut ifd = Ifd::new();
		ifd.insert(0x0100, EntryValue::Long(vec![800]));
		assert_eq!(ifd.get(0x0100), Some(&EntryValue::Long(vec![800])));

		ifd.remove(0x0100);
		assert_eq!(ifd.get(0x0100), None);
	}

	#[test]
	fn chain_sub_ifd_roundtrip() {
		let mut chain = IfdChain::default();
		chain.ifds.push(Ifd::new());

		let mut exif = Ifd::new();
		exif.insert(0x9000, EntryValue::Undefined(vec![b'0', b'2', b'3', b'1']));

		chain.set_sub_ifd(0, EXIF_IFD_POINTER, exif);

		assert!(chain.exif_ifd().is_some());
		assert_eq!(
			chain.exif_ifd().unwrap().get(0x9000),
			Some(&EntryValue::Undefined(vec![b'0', b'2', b'3', b'1']))
		);
	}
}
