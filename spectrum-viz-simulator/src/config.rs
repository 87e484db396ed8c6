use embedded_graphics::{
    geometry::Point,
    mono_font::{ascii::FONT_10X20, MonoFont},
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565,
    },
    prelude::*,
};
use spectrum_dsp::{AdcFormat, SamplingConfig};
use spectrum_viz::{AnalyzerConfig, Banner, BarGeometry, BinSpan};

// --- Display Config ---
pub const WIDTH: u32 = 320; // Landscape ILI9341
pub const HEIGHT: u32 = 240;
pub const FRAME_DELAY_MS: u64 = 16;
pub const WINDOW_SCALE: u32 = 2;

// --- Audio Config ---
pub const FFT_SIZE: usize = 256; // 512 interleaved floats
pub const ADC_CHANNEL: u8 = 0;
pub const SAMPLE_INTERVAL_US: u32 = 21; // + ~1us conversion, ~45 kHz
pub const CONVERSION_OVERHEAD_US: u32 = 1;

// --- Bar Config ---
pub const BAR_ORIGIN_X: i32 = 30;
pub const BAR_STRIDE: i32 = 2;
pub const BAR_BASELINE_Y: i32 = 220;
pub const BAR_MAX_HEIGHT: u16 = 120; // 120 px on the LCD
pub const BAR_FOREGROUND: Rgb565 = Rgb565::new(0x02, 0x11, 0x14); // 0x1234
pub const BAR_BACKGROUND: Rgb565 = Rgb565::WHITE;
pub const SCREEN_BACKGROUND: Rgb565 = Rgb565::WHITE;

// --- Banner ---
pub const BANNER_TEXT: &str = "Spectrum Analyzer";
pub const BANNER_FONT: &MonoFont<'static> = &FONT_10X20;

pub fn sampling() -> SamplingConfig {
    SamplingConfig::new(ADC_CHANNEL, AdcFormat::TWELVE_BIT).with_interval_us(SAMPLE_INTERVAL_US)
}

pub fn analyzer_config() -> AnalyzerConfig<Rgb565> {
    debug_assert_eq!(RawU16::from(BAR_FOREGROUND).into_inner(), 0x1234);

    AnalyzerConfig::new(
        sampling(),
        BarGeometry {
            origin_x: BAR_ORIGIN_X,
            bar_stride: BAR_STRIDE,
            baseline_y: BAR_BASELINE_Y,
            max_height: BAR_MAX_HEIGHT,
            foreground: BAR_FOREGROUND,
            background: BAR_BACKGROUND,
        },
    )
    .with_bins(BinSpan::LowerHalf)
    .with_banner(Banner {
        text: BANNER_TEXT,
        position: Point::new(10, 10),
        font: BANNER_FONT,
        foreground: Rgb565::BLACK,
        background: Rgb565::GREEN,
    })
}
