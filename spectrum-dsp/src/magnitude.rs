use microfft::Complex32;

use crate::peak::{locate_peak, PeakInfo};
use crate::transform::FrequencyDomain;

/// Modulus of one complex bin.
pub fn magnitude(bin: Complex32) -> f32 {
    libm::sqrtf(bin.re * bin.re + bin.im * bin.im)
}

/// Compute the magnitude of every bin into `magnitudes`.
///
/// Both slices must be the same length.
pub fn compute_magnitude(
    fft_output: &[Complex32],
    magnitudes: &mut [f32],
) -> Result<(), &'static str> {
    if fft_output.len() != magnitudes.len() {
        return Err("FFT output and magnitude buffer must have the same length");
    }
    for (out, &bin) in magnitudes.iter_mut().zip(fft_output) {
        *out = magnitude(bin);
    }
    Ok(())
}

/// One non-negative magnitude per frequency bin, reused frame to frame.
///
/// Bin 0 is DC. For a real input the bins above `N / 2` mirror the ones below.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumBuffer<const N: usize> {
    magnitudes: [f32; N],
}

impl<const N: usize> SpectrumBuffer<N> {
    pub const fn new() -> Self {
        Self {
            magnitudes: [0.0; N],
        }
    }

    /// Build a spectrum from precomputed values. Negative and NaN entries
    /// become 0.
    pub fn from_magnitudes(mut magnitudes: [f32; N]) -> Self {
        for m in magnitudes.iter_mut() {
            *m = m.max(0.0);
        }
        Self { magnitudes }
    }

    /// Overwrite every bin with the magnitudes of `transformed`.
    pub fn extract(&mut self, transformed: &FrequencyDomain<'_, N>) -> &Self {
        // Both sides hold exactly N entries.
        let _ = compute_magnitude(transformed.bins(), &mut self.magnitudes);
        self
    }

    pub fn peak(&self) -> PeakInfo {
        locate_peak(&self.magnitudes)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.magnitudes
    }

    pub fn get(&self, bin: usize) -> Option<f32> {
        self.magnitudes.get(bin).copied()
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

impl<const N: usize> Default for SpectrumBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
