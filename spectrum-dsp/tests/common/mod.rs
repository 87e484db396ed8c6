#![allow(dead_code)]

use core::convert::Infallible;

use rand::Rng;
use spectrum_dsp::{AdcFormat, AnalogInput};
use wavegen::{sine, Waveform};

pub const FFT_SIZE: usize = 256;

/// 12 full cycles over a 256-sample frame: lands exactly on bin 12.
pub fn generate_sine_samples_f32() -> [f32; FFT_SIZE] {
    let wf = Waveform::<f32>::with_components(256.0, vec![sine!(12.0, 0.8)]);
    collect_frame(wf.iter())
}

/// 20.5 cycles per frame: energy straddles bins 20 and 21.
pub fn generate_off_bin_sine_samples_f32() -> [f32; FFT_SIZE] {
    let wf = Waveform::<f32>::with_components(256.0, vec![sine!(20.5, 0.8)]);
    collect_frame(wf.iter())
}

pub fn generate_noise_samples_f32() -> [f32; FFT_SIZE] {
    let mut rng = rand::rng();
    let mut samples = [0.0; FFT_SIZE];
    for s in samples.iter_mut() {
        *s = rng.random_range(-1.0..=1.0);
    }
    samples
}

fn collect_frame(samples: impl Iterator<Item = f32>) -> [f32; FFT_SIZE] {
    let mut frame = [0.0; FFT_SIZE];
    for (slot, s) in frame.iter_mut().zip(samples) {
        *slot = s;
    }
    frame
}

/// Pretend ADC replaying a waveform as unsigned readings centred on the
/// format's midpoint.
pub struct WaveformAdc {
    samples: [f32; FFT_SIZE],
    position: usize,
    format: AdcFormat,
    pub reads: usize,
}

impl WaveformAdc {
    pub fn new(samples: [f32; FFT_SIZE], format: AdcFormat) -> Self {
        Self {
            samples,
            position: 0,
            format,
            reads: 0,
        }
    }
}

impl AnalogInput for WaveformAdc {
    type Error = Infallible;

    fn read_channel(&mut self, _channel: u8) -> Result<u16, Infallible> {
        let midpoint = self.format.midpoint() as f32;
        let value = self.samples[self.position % FFT_SIZE];
        self.position += 1;
        self.reads += 1;
        let raw = (midpoint + value * midpoint).clamp(0.0, self.format.max_raw() as f32);
        Ok(raw as u16)
    }
}

pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
