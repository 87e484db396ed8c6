use core::convert::Infallible;
use std::{
    thread,
    time::{Duration, Instant},
};

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use embedded_hal::delay::DelayNs;
use rand::{rngs::ThreadRng, Rng};
use spectrum_dsp::{bin_frequency_hz, AnalogInput, SamplingConfig};
use spectrum_viz::{GraphicsTarget, SpectrumAnalyzer};

mod config;
use config::*;

/// Frames between two console status lines.
const STATUS_INTERVAL: u32 = 60;

/// Stands in for the ADC: a tone sweeping up and down the band plus its
/// third harmonic and some noise, sampled at the configured rate.
struct SyntheticAdc {
    sample_rate_hz: f32,
    samples_taken: u64,
    rng: ThreadRng,
}

impl SyntheticAdc {
    fn new(sampling: &SamplingConfig) -> Self {
        Self {
            sample_rate_hz: sampling.estimated_sample_rate_hz(CONVERSION_OVERHEAD_US),
            samples_taken: 0,
            rng: rand::rng(),
        }
    }

    fn tone_hz(&self) -> f32 {
        // One full sweep every ~4 seconds of simulated time.
        let t = self.samples_taken as f32 / self.sample_rate_hz;
        let sweep = (t * core::f32::consts::PI / 2.0).sin().abs();
        500.0 + sweep * (self.sample_rate_hz / 2.0 - 1_000.0)
    }
}

impl AnalogInput for SyntheticAdc {
    type Error = Infallible;

    fn read_channel(&mut self, _channel: u8) -> Result<u16, Infallible> {
        let t = self.samples_taken as f32 / self.sample_rate_hz;
        let phase = 2.0 * core::f32::consts::PI * self.tone_hz() * t;
        let signal = 0.6 * phase.sin() + 0.2 * (3.0 * phase).sin();
        let noise: f32 = self.rng.random_range(-0.05..0.05);
        self.samples_taken += 1;

        let raw = 2048.0 + (signal + noise) * 2047.0;
        Ok(raw.clamp(0.0, 4095.0) as u16)
    }
}

/// Busy-waits like a MCU delay loop; `thread::sleep` is far too coarse for
/// microsecond pacing.
struct SpinDelay;

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        let until = Instant::now() + Duration::from_nanos(ns as u64);
        while Instant::now() < until {
            core::hint::spin_loop();
        }
    }
}

fn main() -> Result<(), Infallible> {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(WIDTH, HEIGHT));
    display.clear(SCREEN_BACKGROUND)?;

    let mut window = Window::new(
        "Spectrum Analyzer Simulator",
        &OutputSettingsBuilder::new().scale(WINDOW_SCALE).build(),
    );

    let sampling = sampling();
    let adc = SyntheticAdc::new(&sampling);
    let sample_rate_hz = sampling.estimated_sample_rate_hz(CONVERSION_OVERHEAD_US);

    let mut analyzer = match SpectrumAnalyzer::<_, _, _, FFT_SIZE>::new(
        adc,
        GraphicsTarget::new(display),
        SpinDelay,
        analyzer_config(),
    ) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    analyzer.setup()?;

    'running: loop {
        match analyzer.run_once() {
            Ok(peak) => {
                let frame = analyzer.stats().completed;
                if frame % STATUS_INTERVAL == 0 {
                    println!(
                        "frame {}: peak {:.2} at bin {} (~{:.0} Hz), tone {:.0} Hz",
                        frame,
                        peak.magnitude,
                        peak.index,
                        bin_frequency_hz(peak.index, FFT_SIZE, sample_rate_hz),
                        analyzer.input_mut().tone_hz()
                    );
                }
            }
            Err(e) => println!("frame dropped: {}", e),
        }

        window.update(analyzer.display().inner());

        for event in window.events() {
            if let SimulatorEvent::Quit = event {
                break 'running;
            }
        }

        thread::sleep(Duration::from_millis(FRAME_DELAY_MS));
    }

    Ok(())
}
