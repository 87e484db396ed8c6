use microfft::{complex, Complex32};

use crate::error::ConfigError;
use crate::sample_buffer::TimeDomain;

pub const MIN_TRANSFORM_SIZE: usize = 4;
pub const MAX_TRANSFORM_SIZE: usize = 4096;

/// Reject sizes the complex FFT cannot run on.
pub const fn check_transform_size(size: usize) -> Result<(), ConfigError> {
    if !size.is_power_of_two() {
        return Err(ConfigError::NonPowerOfTwo { size });
    }
    if size < MIN_TRANSFORM_SIZE || size > MAX_TRANSFORM_SIZE {
        return Err(ConfigError::UnsupportedSize { size });
    }
    Ok(())
}

/// In-place radix-2 complex FFT of a fixed size `N`.
///
/// The twiddle and bit-reversal tables are compile-time constants of
/// `microfft`, so the transform holds no runtime state of its own. Building
/// one is how the size gets validated.
#[derive(Debug, Clone, Copy)]
pub struct SpectralTransform<const N: usize> {
    _validated: (),
}

impl<const N: usize> SpectralTransform<N> {
    pub const fn new() -> Result<Self, ConfigError> {
        match check_transform_size(N) {
            Ok(()) => Ok(Self { _validated: () }),
            Err(e) => Err(e),
        }
    }

    pub const fn size(&self) -> usize {
        N
    }

    /// Transform the samples in place. The output is in natural bin order,
    /// bin 0 being DC.
    pub fn process<'a>(&self, input: TimeDomain<'a, N>) -> FrequencyDomain<'a, N> {
        let bins = input.into_bins();
        cfft_in_place(&mut bins[..]);
        FrequencyDomain { bins }
    }
}

macro_rules! dispatch_cfft {
    ($bins:expr, $($size:literal => $cfft:ident),+ $(,)?) => {
        match $bins.len() {
            $(
                $size => {
                    if let Ok(fixed) = <&mut [Complex32; $size]>::try_from(&mut *$bins) {
                        let _ = complex::$cfft(fixed);
                    }
                }
            )+
            size => unreachable!("transform size {} was not validated", size),
        }
    };
}

fn cfft_in_place(bins: &mut [Complex32]) {
    dispatch_cfft!(
        bins,
        4 => cfft_4,
        8 => cfft_8,
        16 => cfft_16,
        32 => cfft_32,
        64 => cfft_64,
        128 => cfft_128,
        256 => cfft_256,
        512 => cfft_512,
        1024 => cfft_1024,
        2048 => cfft_2048,
        4096 => cfft_4096,
    );
}

/// Frequency-domain bins produced by [`SpectralTransform::process`].
///
/// Borrows the sample buffer's storage until it is dropped; the next frame
/// must refill the buffer to get samples again.
pub struct FrequencyDomain<'a, const N: usize> {
    bins: &'a mut [Complex32; N],
}

impl<const N: usize> FrequencyDomain<'_, N> {
    pub fn bins(&self) -> &[Complex32; N] {
        self.bins
    }

    pub fn interleaved(&self) -> impl Iterator<Item = f32> + '_ {
        self.bins.iter().flat_map(|c| [c.re, c.im])
    }
}
