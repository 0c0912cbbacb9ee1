//! A random-access byte-addressable file abstraction.
//!
//! Every format's `write_to` in this crate already performs a byte-exact
//! splice against an in-memory copy of the file (see
//! `id3::v2::write::chunk_file::write_to_chunk_file` or
//! `mp4::ilst::write::write_to`). `FileStream` generalizes that pattern into
//! one named primitive for the formats that don't already have a bespoke
//! splice routine (ASF, DSF), and is exercised directly by the insert/remove
//! property tests.

use crate::error::Result;

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// Minimum size of the window used to shift trailing bytes during [`FileStream::insert`].
const WINDOW_SIZE: usize = 1024;

/// A stream that can grow or shrink its backing storage.
///
/// [`std::fs::File`] already exposes `set_len`; this trait lets
/// [`FileStream`] stay generic over in-memory buffers (used in tests and by
/// callers who build a tag in memory before committing it) as well.
pub trait Resize {
	/// Resizes the stream to exactly `len` bytes, zero-filling on growth
	fn set_len(&mut self, len: u64) -> std::io::Result<()>;
}

impl Resize for std::fs::File {
	fn set_len(&mut self, len: u64) -> std::io::Result<()> {
		std::fs::File::set_len(self, len)
	}
}

impl Resize for Cursor<Vec<u8>> {
	fn set_len(&mut self, len: u64) -> std::io::Result<()> {
		self.get_mut().resize(len as usize, 0);
		Ok(())
	}
}

/// The access-mode state machine a [`FileStream`] moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// No stream is currently held open
	Closed,
	/// Open for reading only
	Read,
	/// Open for reading and writing
	ReadWrite,
}

/// An absolute byte range inside a container, tagged with its semantic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region<K> {
	/// Inclusive start offset
	pub start: u64,
	/// Exclusive end offset
	pub end: u64,
	/// The region's semantic kind (format-specific)
	pub kind: K,
}

impl<K> Region<K> {
	/// The length of the region in bytes
	pub fn len(&self) -> u64 {
		self.end - self.start
	}

	/// Returns `true` if the region is empty
	pub fn is_empty(&self) -> bool {
		self.end == self.start
	}
}

/// A random-access stream with in-place insert/remove primitives.
///
/// `S` is any stream that is readable, writable, and seekable — a
/// [`std::fs::File`] opened for read/write, or an in-memory [`std::io::Cursor`]
/// for tests.
pub struct FileStream<S> {
	stream: S,
	mode: Mode,
}

impl<S> FileStream<S> {
	/// Wraps an existing stream, starting in [`Mode::Read`]
	pub fn new(stream: S) -> Self {
		Self {
			stream,
			mode: Mode::Read,
		}
	}

	/// Wraps an existing stream, starting in [`Mode::ReadWrite`]
	pub fn new_read_write(stream: S) -> Self {
		Self {
			stream,
			mode: Mode::ReadWrite,
		}
	}

	/// Returns the current [`Mode`]
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Consumes the `FileStream`, returning the underlying stream
	pub fn into_inner(self) -> S {
		self.stream
	}

	/// Runs `f` with the stream in [`Mode::ReadWrite`].
	///
	/// The mode is reverted to [`Mode::Closed`] when `f` returns, whether it
	/// returns `Ok`, `Err`, or unwinds via panic — the revert happens in a
	/// `Drop` guard, not in the success path, so there is no exit from this
	/// function that leaves the mode at `ReadWrite`.
	pub fn with_read_write<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		struct ModeGuard<'a, S>(&'a mut FileStream<S>);

		impl<'a, S> Drop for ModeGuard<'a, S> {
			fn drop(&mut self) {
				self.0.mode = Mode::Closed;
			}
		}

		self.mode = Mode::ReadWrite;
		let mut guard = ModeGuard(self);

		f(&mut *guard.0)
	}
}

impl<S: Read + Write + Seek + Resize> FileStream<S> {
	/// Returns the total length of the stream in bytes
	pub fn length(&mut self) -> Result<u64> {
		let pos = self.stream.stream_position()?;
		let len = self.stream.seek(SeekFrom::End(0))?;
		self.stream.seek(SeekFrom::Start(pos))?;

		Ok(len)
	}

	/// Returns the current offset
	pub fn tell(&mut self) -> Result<u64> {
		Ok(self.stream.stream_position()?)
	}

	/// Seeks to an absolute offset
	pub fn seek(&mut self, pos: u64) -> Result<u64> {
		Ok(self.stream.seek(SeekFrom::Start(pos))?)
	}

	/// Reads up to `n` bytes starting at the current offset
	///
	/// If fewer than `n` bytes remain, the returned buffer is correspondingly
	/// shorter; this never fails solely because of a short read.
	pub fn read_block(&mut self, n: usize) -> Result<Vec<u8>> {
		let mut buf = vec![0_u8; n];
		let mut read = 0;

		while read < n {
			let chunk = self.stream.read(&mut buf[read..])?;

			if chunk == 0 {
				break;
			}

			read += chunk;
		}

		buf.truncate(read);
		Ok(buf)
	}

	/// Atomically replaces `[at, at + replace_length)` with `bytes`.
	///
	/// The tail `[at + replace_length, length)` is shifted by
	/// `bytes.len() - replace_length`. Implemented as a windowed copy so
	/// large files are never fully materialized in memory:
	///
	/// * growth > 0: extend the stream first, then copy the tail backward
	///   (from the end towards `at`) in fixed-size windows so source and
	///   destination windows never overlap in the wrong direction;
	/// * growth < 0: copy the tail forward (from `at` towards the end), then
	///   truncate;
	/// * growth == 0: overwrite `[at, at + bytes.len())` in place.
	///
	/// In all cases the inserted `bytes` are written at `at` last, after the
	/// tail has been relocated.
	pub fn insert(&mut self, bytes: &[u8], at: u64, replace_length: u64) -> Result<()> {
		let old_len = self.length()?;
		let tail_start = at + replace_length;
		let tail_len = old_len.saturating_sub(tail_start);
		let growth = bytes.len() as i64 - replace_length as i64;

		match growth.cmp(&0) {
			std::cmp::Ordering::Greater => {
				let new_len = old_len + growth as u64;
				self.stream.seek(SeekFrom::Start(new_len))?;
				self.stream.set_len(new_len)?;

				self.shift_tail_backward(tail_start, tail_len, growth as u64)?;
			},
			std::cmp::Ordering::Less => {
				let shrink = (-growth) as u64;
				self.shift_tail_forward(tail_start, tail_len, shrink)?;

				let new_len = old_len - shrink;
				self.stream.set_len(new_len)?;
			},
			std::cmp::Ordering::Equal => {},
		}

		self.stream.seek(SeekFrom::Start(at))?;
		self.stream.write_all(bytes)?;

		Ok(())
	}

	/// Removes `length` bytes starting at `at`, shifting the tail left.
	///
	/// Equivalent to `insert(&[], at, length)`.
	pub fn remove(&mut self, at: u64, length: u64) -> Result<()> {
		self.insert(&[], at, length)
	}

	/// Moves the tail `[tail_start, tail_start + tail_len)` forward (toward
	/// the start of the file) by `shrink` bytes, reading/writing in
	/// `WINDOW_SIZE`-or-larger windows from the front of the tail to the back.
	fn shift_tail_forward(&mut self, tail_start: u64, tail_len: u64, shrink: u64) -> Result<()> {
		let mut buf = vec![0_u8; WINDOW_SIZE.max(1)];
		let mut offset = 0_u64;

		while offset < tail_len {
			let chunk_len = buf.len().min((tail_len - offset) as usize);

			self.stream
				.seek(SeekFrom::Start(tail_start + offset))?;
			self.stream.read_exact(&mut buf[..chunk_len])?;

			self.stream
				.seek(SeekFrom::Start(tail_start - shrink + offset))?;
			self.stream.write_all(&buf[..chunk_len])?;

			offset += chunk_len as u64;
		}

		Ok(())
	}

	/// Moves the tail `[tail_start, tail_start + tail_len)` backward (toward
	/// the end of the file, which has already been extended by `growth`
	/// bytes) by reading/writing windows from the back of the tail to the
	/// front, so overlapping source/destination ranges never clobber
	/// not-yet-copied data.
	fn shift_tail_backward(&mut self, tail_start: u64, tail_len: u64, growth: u64) -> Result<()> {
		let mut buf = vec![0_u8; WINDOW_SIZE.max(1)];
		let mut remaining = tail_len;

		while remaining > 0 {
			let chunk_len = buf.len().min(remaining as usize) as u64;
			let window_start = tail_start + remaining - chunk_len;

			self.stream.seek(SeekFrom::Start(window_start))?;
			self.stream
				.read_exact(&mut buf[..chunk_len as usize])?;

			self.stream
				.seek(SeekFrom::Start(window_start + growth))?;
			self.stream.write_all(&buf[..chunk_len as usize])?;

			remaining -= chunk_len;
		}

		Ok(())
	}

	/// Searches for `pattern` starting at `from`, returning its absolute
	/// offset, or `None` if not found before `before` (if given) or EOF.
	pub fn find(&mut self, pattern: &[u8], from: u64, before: Option<&[u8]>) -> Result<Option<u64>> {
		let len = self.length()?;
		let mut pos = from;

		while pos + pattern.len() as u64 <= len {
			self.stream.seek(SeekFrom::Start(pos))?;
			let mut buf = vec![0_u8; pattern.len()];
			self.stream.read_exact(&mut buf)?;

			if buf == pattern {
				return Ok(Some(pos));
			}

			if let Some(before) = before {
				if buf.starts_with(&before[..before.len().min(buf.len())]) && buf == *before {
					return Ok(None);
				}
			}

			pos += 1;
		}

		Ok(None)
	}

	/// The time-reversed analog of [`FileStream::find`]: searches backward
	/// from `from`, returning the first (highest-offset) match.
	pub fn rfind(&mut self, pattern: &[u8], from: u64, after: Option<&[u8]>) -> Result<Option<u64>> {
		if pattern.is_empty() {
			return Ok(None);
		}

		let mut pos = from;

		loop {
			self.stream.seek(SeekFrom::Start(pos))?;
			let mut buf = vec![0_u8; pattern.len()];

			if self.stream.read_exact(&mut buf).is_ok() && buf == pattern {
				return Ok(Some(pos));
			}

			if let Some(after) = after {
				if buf == *after {
					return Ok(None);
				}
			}

			if pos == 0 {
				return Ok(None);
			}

			pos -= 1;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	fn stream(data: &[u8]) -> FileStream<Cursor<Vec<u8>>> {
		FileStream::new_read_write(Cursor::new(data.to_vec()))
	}

	#[test]
	fn insert_grows_and_preserves_tail() {
		let mut fs = stream(b"HEAD----TAIL");
		fs.insert(b"NEWDATA", 4, 4).unwrap();

		let out = fs.into_inner().into_inner();
		assert_eq!(&out, b"HEADNEWDATATAIL");
	}

	#[test]
	fn insert_shrinks_and_preserves_tail() {
		let mut fs = stream(b"HEADLONGSECTIONTAIL");
		fs.insert(b"X", 4, 11).unwrap();

		let out = fs.into_inner().into_inner();
		assert_eq!(&out, b"HEADXTAIL");
	}

	#[test]
	fn insert_same_length_overwrites_in_place() {
		let mut fs = stream(b"HEAD1234TAIL");
		fs.insert(b"5678", 4, 4).unwrap();

		let out = fs.into_inner().into_inner();
		assert_eq!(&out, b"HEAD5678TAIL");
	}

	#[test]
	fn remove_shifts_tail_left() {
		let mut fs = stream(b"HEADJUNKTAIL");
		fs.remove(4, 4).unwrap();

		let out = fs.into_inner().into_inner();
		assert_eq!(&out, b"HEADTAIL");
	}

	#[test]
	fn sequential_inserts_compose() {
		let mut fs = stream(b"AB");
		fs.insert(b"1", 1, 0).unwrap();
		fs.insert(b"2", 2, 0).unwrap();

		let out = fs.into_inner().into_inner();
		assert_eq!(&out, b"A12B");
	}

	#[test]
	fn insert_across_multiple_windows() {
		let head = vec![b'H'; 10];
		let tail = vec![b'T'; 3000];
		let mut data = head.clone();
		data.extend_from_slice(b"MID");
		data.extend_from_slice(&tail);

		let mut fs = stream(&data);
		fs.insert(b"REPLACED", 10, 3).unwrap();

		let out = fs.into_inner().into_inner();
		assert!(out.starts_with(b"HHHHHHHHHHREPLACED"));
		assert!(out.ends_with(&tail));
		assert_eq!(out.len(), head.len() + "REPLACED".len() + tail.len());
	}

	#[test]
	fn with_read_write_reverts_mode_on_success() {
		let mut fs = stream(b"HEAD----TAIL");
		assert_eq!(fs.mode(), Mode::ReadWrite);

		fs.with_read_write(|inner| {
			assert_eq!(inner.mode(), Mode::ReadWrite);
			inner.insert(b"NEWDATA", 4, 4)
		})
		.unwrap();

		assert_eq!(fs.mode(), Mode::Closed);
	}

	#[test]
	fn with_read_write_reverts_mode_on_error() {
		let mut fs = stream(b"HEAD----TAIL");

		let result = fs.with_read_write(|inner| {
			inner.insert(b"X", 0, 0)?;
			Err(crate::error::LoftyError::Ifd("synthetic failure"))
		});

		assert!(result.is_err());
		assert_eq!(fs.mode(), Mode::Closed);
	}

	#[test]
	fn find_and_rfind() {
		let mut fs = stream(b"abcXYZdefXYZghi");

		assert_eq!(fs.find(b"XYZ", 0, None).unwrap(), Some(3));
		assert_eq!(fs.find(b"XYZ", 4, None).unwrap(), Some(9));
		assert_eq!(fs.find(b"nope", 0, None).unwrap(), None);

		let len = fs.length().unwrap();
		assert_eq!(fs.rfind(b"XYZ", len - 3, None).unwrap(), Some(9));
	}
}
