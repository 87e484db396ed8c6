use core::fmt;

/// Fatal configuration problems, detected before the acquisition loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum ConfigError {
    /// Transform size is not a power of two.
    NonPowerOfTwo { size: usize },
    /// Power of two, but outside the sizes the FFT backend provides.
    UnsupportedSize { size: usize },
    /// ADC bit depth must be between 1 and 16.
    InvalidBitDepth { bits: u8 },
    /// Rendered bin range selects nothing.
    EmptyBinRange { start: usize, end: usize },
    /// Rendered bin range runs past the spectrum.
    BinRangeOutOfBounds { end: usize, bins: usize },
    /// A bar needs at least one pixel of height.
    ZeroBarHeight,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::NonPowerOfTwo { size } => {
                write!(f, "transform size {} is not a power of two", size)
            }
            ConfigError::UnsupportedSize { size } => write!(
                f,
                "transform size {} is outside the supported range {}..={}",
                size,
                crate::transform::MIN_TRANSFORM_SIZE,
                crate::transform::MAX_TRANSFORM_SIZE
            ),
            ConfigError::InvalidBitDepth { bits } => {
                write!(f, "ADC bit depth {} must be between 1 and 16", bits)
            }
            ConfigError::EmptyBinRange { start, end } => {
                write!(f, "bin range {}..{} is empty", start, end)
            }
            ConfigError::BinRangeOutOfBounds { end, bins } => {
                write!(f, "bin range ends at {} but the spectrum has {} bins", end, bins)
            }
            ConfigError::ZeroBarHeight => f.write_str("maximum bar height must be non-zero"),
        }
    }
}

impl core::error::Error for ConfigError {}
