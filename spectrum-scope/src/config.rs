use embedded_graphics::{
    geometry::Point,
    mono_font::{ascii::FONT_6X10, MonoFont},
    pixelcolor::BinaryColor,
};
use spectrum_dsp::{AdcFormat, SamplingConfig};
use spectrum_viz::{AnalyzerConfig, Banner, BarGeometry, BinSpan};

// --- Display Config ---
pub const WIDTH: u32 = 128; // SSD1306 128x64 over I2C
pub const HEIGHT: u32 = 64;
pub const I2C_FREQUENCY_KHZ: u32 = 400;

// --- Audio Config ---
pub const FFT_SIZE: usize = 256; // 256 complex bins, 128 drawn
pub const ADC_CHANNEL: u8 = 0; // ADC1 on GPIO1
pub const ADC_FORMAT: AdcFormat = AdcFormat::TWELVE_BIT;
pub const SAMPLE_INTERVAL_US: u32 = 21; // ~45 kHz with the conversion time on top
pub const CONVERSION_OVERHEAD_US: u32 = 1;

// --- Bar Config ---
pub const BAR_ORIGIN_X: i32 = 0;
pub const BAR_STRIDE: i32 = 1;
pub const BAR_BASELINE_Y: i32 = HEIGHT as i32 - 1;
pub const BAR_MAX_HEIGHT: u16 = 50; // Leaves the banner row untouched
pub const BIN_SPAN: BinSpan = BinSpan::LowerHalf;

// --- Banner ---
pub const BANNER_TEXT: &str = "Spectrum";
pub const BANNER_FONT: &MonoFont<'static> = &FONT_6X10;
pub const BANNER_POSITION: Point = Point::new(0, 0);

pub const SAMPLING: SamplingConfig =
    SamplingConfig::new(ADC_CHANNEL, ADC_FORMAT).with_interval_us(SAMPLE_INTERVAL_US);

pub fn analyzer_config() -> AnalyzerConfig<BinaryColor> {
    AnalyzerConfig::new(
        SAMPLING,
        BarGeometry {
            origin_x: BAR_ORIGIN_X,
            bar_stride: BAR_STRIDE,
            baseline_y: BAR_BASELINE_Y,
            max_height: BAR_MAX_HEIGHT,
            foreground: BinaryColor::On,
            background: BinaryColor::Off,
        },
    )
    .with_bins(BIN_SPAN)
    .with_banner(Banner {
        text: BANNER_TEXT,
        position: BANNER_POSITION,
        font: BANNER_FONT,
        foreground: BinaryColor::Off,
        background: BinaryColor::On,
    })
}
