//! Spectrum analyzer on an ESP32-S3.
//!
//! Samples GPIO1 through ADC1, runs a 256-point FFT and draws the lower half
//! of the spectrum as bars on an SSD1306 OLED.
//!
//! The following wiring is assumed:
//! - Signal => GPIO1 (biased to mid-rail, 0..3.1 V)
//! - SDA    => GPIO8
//! - SCL    => GPIO9

#![no_std]
#![no_main]

use defmt::info;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use esp_hal::{
    analog::adc::{Adc, AdcConfig, Attenuation},
    clock::CpuClock,
    delay::Delay,
    i2c::master::{Config as I2cConfig, I2c},
    time::Rate,
};
use ssd1306::{prelude::*, I2CDisplayInterface, Ssd1306};
use {defmt_rtt as _, esp_backtrace as _};

use spectrum_dsp::bin_frequency_hz;
use spectrum_scope::{adc::OneShotAdc, config::*};
use spectrum_viz::{BufferedTarget, SpectrumAnalyzer};

#[esp_hal::main]
fn main() -> ! {
    info!("Init!");

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    // Analog input
    let mut adc1_config = AdcConfig::new();
    let mut signal_pin = adc1_config.enable_pin(peripherals.GPIO1, Attenuation::_11dB);
    let mut adc1 = Adc::new(peripherals.ADC1, adc1_config);
    let adc = OneShotAdc::new(ADC_CHANNEL, move || adc1.read_oneshot(&mut signal_pin));

    // Display
    let i2c = I2c::new(
        peripherals.I2C0,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
    )
    .unwrap()
    .with_sda(peripherals.GPIO8)
    .with_scl(peripherals.GPIO9);

    let mut oled = Ssd1306::new(
        I2CDisplayInterface::new(i2c),
        DisplaySize128x64,
        DisplayRotation::Rotate0,
    )
    .into_buffered_graphics_mode();
    oled.init().unwrap();
    DrawTarget::clear(&mut oled, BinaryColor::Off).unwrap();
    let display = BufferedTarget::new(oled, |oled| oled.flush());

    let sample_rate_hz = SAMPLING.estimated_sample_rate_hz(CONVERSION_OVERHEAD_US);
    info!(
        "{}x{} display, {} point FFT, ~{} Hz sampling, {} Hz per bin",
        WIDTH,
        HEIGHT,
        FFT_SIZE,
        sample_rate_hz,
        bin_frequency_hz(1, FFT_SIZE, sample_rate_hz)
    );

    let mut analyzer = SpectrumAnalyzer::<_, _, _, FFT_SIZE>::new(
        adc,
        display,
        Delay::new(),
        analyzer_config(),
    )
    .unwrap();
    analyzer.setup().unwrap();

    info!("Start");
    analyzer.run()
}
