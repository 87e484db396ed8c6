use embedded_hal::delay::DelayNs;
use microfft::Complex32;

use crate::analog::{AnalogInput, SamplingConfig};

const ZERO: Complex32 = Complex32 { re: 0.0, im: 0.0 };

/// Fixed storage for `N` complex samples, laid out as `[re0, im0, re1, im1, ...]`.
///
/// The buffer is allocated once and reused every frame. Its contents can only
/// be reached through the view returned by [`SampleBuffer::fill`] or
/// [`SampleBuffer::load`], so a transformed buffer is never mistaken for
/// fresh samples.
pub struct SampleBuffer<const N: usize> {
    storage: [Complex32; N],
}

impl<const N: usize> SampleBuffer<N> {
    pub const fn new() -> Self {
        Self {
            storage: [ZERO; N],
        }
    }

    /// Number of complex slots (the transform size).
    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Number of `f32` values in the interleaved layout.
    pub const fn interleaved_len(&self) -> usize {
        2 * N
    }

    /// Take one reading per slot from `input`, normalize it and clear the
    /// imaginary part.
    ///
    /// A failed read aborts the fill. The storage then holds a partial frame,
    /// but no time-domain view escapes, so the next fill starts clean.
    pub fn fill<A, D>(
        &mut self,
        input: &mut A,
        sampling: &SamplingConfig,
        delay: &mut D,
    ) -> Result<TimeDomain<'_, N>, A::Error>
    where
        A: AnalogInput,
        D: DelayNs,
    {
        for slot in self.storage.iter_mut() {
            if sampling.interval_us > 0 {
                delay.delay_us(sampling.interval_us);
            }
            let raw = input.read_channel(sampling.channel)?;
            *slot = Complex32 {
                re: sampling.format.normalize(raw),
                im: 0.0,
            };
        }
        Ok(TimeDomain {
            bins: &mut self.storage,
        })
    }

    /// Load already-normalized real samples, clearing the imaginary parts.
    pub fn load(&mut self, samples: &[f32; N]) -> TimeDomain<'_, N> {
        for (slot, &re) in self.storage.iter_mut().zip(samples.iter()) {
            *slot = Complex32 { re, im: 0.0 };
        }
        TimeDomain {
            bins: &mut self.storage,
        }
    }
}

impl<const N: usize> Default for SampleBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// A freshly filled sample buffer: real input, zero imaginary parts.
///
/// Consumed by [`crate::SpectralTransform::process`].
pub struct TimeDomain<'a, const N: usize> {
    pub(crate) bins: &'a mut [Complex32; N],
}

impl<'a, const N: usize> TimeDomain<'a, N> {
    /// Real parts of the samples, in acquisition order.
    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.bins.iter().map(|c| c.re)
    }

    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        self.bins.iter().flat_map(|c| [c.re, c.im])
    }

    pub(crate) fn into_bins(self) -> &'a mut [Complex32; N] {
        self.bins
    }
}
