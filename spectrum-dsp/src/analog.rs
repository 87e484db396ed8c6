use crate::error::ConfigError;

/// Source of raw analog readings, one conversion per call.
///
/// Reads are synchronous and blocking. Most ADC drivers cannot fail once
/// configured and can use [`core::convert::Infallible`] as their error. If a
/// driver does report an error, the acquisition loop drops the frame and
/// starts sampling again.
pub trait AnalogInput {
    type Error;

    fn read_channel(&mut self, channel: u8) -> Result<u16, Self::Error>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    type Error = T::Error;

    fn read_channel(&mut self, channel: u8) -> Result<u16, Self::Error> {
        T::read_channel(self, channel)
    }
}

/// Fixed bit depth of the unsigned readings an [`AnalogInput`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct AdcFormat {
    bits: u8,
}

impl AdcFormat {
    /// 0..=4095, midpoint 2048.
    pub const TWELVE_BIT: AdcFormat = AdcFormat { bits: 12 };

    pub const fn new(bits: u8) -> Result<Self, ConfigError> {
        if bits == 0 || bits > 16 {
            return Err(ConfigError::InvalidBitDepth { bits });
        }
        Ok(Self { bits })
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }

    pub const fn max_raw(&self) -> u16 {
        ((1u32 << self.bits) - 1) as u16
    }

    pub const fn midpoint(&self) -> u16 {
        1 << (self.bits - 1)
    }

    /// Map a raw reading onto roughly [-1, 1] around the ADC midpoint.
    pub fn normalize(&self, raw: u16) -> f32 {
        normalize_sample(raw.min(self.max_raw()), self.midpoint())
    }
}

/// `(raw - midpoint) / midpoint`
pub fn normalize_sample(raw: u16, midpoint: u16) -> f32 {
    let midpoint = midpoint as f32;
    (raw as f32 - midpoint) / midpoint
}

/// Everything the sample buffer needs to know to fill itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct SamplingConfig {
    pub channel: u8,
    pub format: AdcFormat,
    /// Busy-wait before every conversion. 0 polls as fast as the loop runs.
    pub interval_us: u32,
}

impl SamplingConfig {
    pub const fn new(channel: u8, format: AdcFormat) -> Self {
        Self {
            channel,
            format,
            interval_us: 0,
        }
    }

    pub const fn with_interval_us(mut self, interval_us: u32) -> Self {
        self.interval_us = interval_us;
        self
    }

    /// Rough sample rate, given how long one conversion plus bookkeeping takes
    /// on top of the configured delay. Polling without a timer only gets close.
    pub fn estimated_sample_rate_hz(&self, overhead_us: u32) -> f32 {
        let period_us = self.interval_us.saturating_add(overhead_us).max(1);
        1_000_000.0 / period_us as f32
    }
}

/// Centre frequency of `bin` for a transform of `size` points.
pub fn bin_frequency_hz(bin: usize, size: usize, sample_rate_hz: f32) -> f32 {
    if size == 0 {
        return 0.0;
    }
    bin as f32 * sample_rate_hz / size as f32
}
