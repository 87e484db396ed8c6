#![no_std]

//! Fixed-size spectrum analysis for microcontrollers: sample acquisition into
//! a preallocated complex buffer, an in-place FFT, magnitude extraction and
//! peak detection. Nothing here allocates.

pub mod analog;
pub mod error;
pub mod magnitude;
pub mod peak;
pub mod sample_buffer;
pub mod transform;

pub use analog::{bin_frequency_hz, normalize_sample, AdcFormat, AnalogInput, SamplingConfig};
pub use error::ConfigError;
pub use magnitude::{compute_magnitude, magnitude, SpectrumBuffer};
pub use microfft::Complex32;
pub use peak::{locate_peak, PeakInfo};
pub use sample_buffer::{SampleBuffer, TimeDomain};
pub use transform::{
    check_transform_size, FrequencyDomain, SpectralTransform, MAX_TRANSFORM_SIZE,
    MIN_TRANSFORM_SIZE,
};

/// Run one frame of analysis over already-normalized samples: transform,
/// extract magnitudes into `spectrum` and return its peak.
pub fn process_frame<const N: usize>(
    transform: &SpectralTransform<N>,
    buffer: &mut SampleBuffer<N>,
    samples: &[f32; N],
    spectrum: &mut SpectrumBuffer<N>,
) -> PeakInfo {
    let transformed = transform.process(buffer.load(samples));
    spectrum.extract(&transformed).peak()
}
