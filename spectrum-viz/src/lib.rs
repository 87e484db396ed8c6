#![no_std]

#[cfg(feature = "std")]
extern crate std; // println mirrors of the defmt logs, guarded by feature flag

pub mod acquisition;
pub mod bar_renderer;
pub mod config;
pub mod display;

pub use acquisition::{CycleError, FrameStats, SpectrumAnalyzer};
pub use bar_renderer::{bar_height, BarGeometry, BarRenderer, BinSpan};
pub use config::AnalyzerConfig;
pub use display::{draw_banner, Banner, BufferedTarget, DisplayOutput, GraphicsTarget};
pub use spectrum_dsp;
