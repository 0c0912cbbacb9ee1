use crate::types::properties::FileProperties;

use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Default)]
/// A DSF file's audio properties
pub struct DsfProperties {
	duration: Duration,
	bits_per_sample: u8,
	channels: u8,
	sample_rate: u32,
	sample_count: u64,
}

impl From<DsfProperties> for FileProperties {
	fn from(input: DsfProperties) -> Self {
		let bitrate = if input.duration.as_secs() > 0 {
			Some(
				(u64::from(input.sample_rate)
					* u64::from(input.channels)
					* u64::from(input.bits_per_sample)
					/ 1000) as u32,
			)
		} else {
			None
		};

		Self {
			duration: input.duration,
			overall_bitrate: bitrate,
			audio_bitrate: bitrate,
			sample_rate: Some(input.sample_rate),
			channels: Some(input.channels),
		}
	}
}

impl DsfProperties {
	/// Creates a new [`DsfProperties`]
	pub const fn new(
		duration: Duration,
		bits_per_sample: u8,
		channels: u8,
		sample_rate: u32,
		sample_count: u64,
	) -> Self {
		Self {
			duration,
			bits_per_sample,
			channels,
			sample_rate,
			sample_count,
		}
	}

	/// Duration
	pub fn duration(&self) -> Duration {
		self.duration
	}

	/// Bits per sample (1 for standard DSD)
	pub fn bits_per_sample(&self) -> u8 {
		self.bits_per_sample
	}

	/// Channel count
	pub fn channels(&self) -> u8 {
		self.channels
	}

	/// Sampling frequency (Hz)
	pub fn sample_rate(&self) -> u32 {
		self.sample_rate
	}

	/// Total sample count per channel
	pub fn sample_count(&self) -> u64 {
		self.sample_count
	}
}
