use spectrum_dsp::SamplingConfig;

use crate::bar_renderer::{BarGeometry, BinSpan};
use crate::display::Banner;

/// Everything the acquisition loop is configured with. Binaries build this
/// from compiled-in constants.
#[derive(Clone, Copy)]
pub struct AnalyzerConfig<C> {
    pub sampling: SamplingConfig,
    pub geometry: BarGeometry<C>,
    pub bins: BinSpan,
    /// Drawn once by `SpectrumAnalyzer::setup`.
    pub banner: Option<Banner<C>>,
}

impl<C> AnalyzerConfig<C> {
    pub const fn new(sampling: SamplingConfig, geometry: BarGeometry<C>) -> Self {
        Self {
            sampling,
            geometry,
            bins: BinSpan::LowerHalf,
            banner: None,
        }
    }

    pub const fn with_bins(mut self, bins: BinSpan) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_banner(mut self, banner: Banner<C>) -> Self {
        self.banner = Some(banner);
        self
    }
}
