use core::fmt;

#[cfg(feature = "logging")]
use defmt::{info, warn};
#[cfg(feature = "logging")]
use defmt_rtt as _;
use embedded_hal::delay::DelayNs;
use spectrum_dsp::{
    AnalogInput, ConfigError, PeakInfo, SampleBuffer, SamplingConfig, SpectralTransform,
    SpectrumBuffer,
};

use crate::bar_renderer::BarRenderer;
use crate::config::AnalyzerConfig;
use crate::display::{Banner, DisplayOutput};

/// Completed frames between two status lines.
const LOG_INTERVAL: u32 = 200;

/// Why a frame was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleError<AE, DE> {
    /// The analog input failed while the buffer was filling.
    Sample(AE),
    /// The display rejected a bar or the end-of-frame flush.
    Render(DE),
}

impl<AE, DE> CycleError<AE, DE> {
    pub fn stage(&self) -> &'static str {
        match self {
            CycleError::Sample(_) => "sample",
            CycleError::Render(_) => "render",
        }
    }
}

impl<AE: fmt::Debug, DE: fmt::Debug> fmt::Display for CycleError<AE, DE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleError::Sample(e) => write!(f, "analog input failed: {:?}", e),
            CycleError::Render(e) => write!(f, "display failed: {:?}", e),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct FrameStats {
    pub completed: u32,
    pub dropped: u32,
}

/// Sample, transform, extract, locate, render; forever.
///
/// Owns every buffer it touches. They are sized by `N` once, at
/// construction, and reused by every frame.
pub struct SpectrumAnalyzer<A, T, D, const N: usize>
where
    T: DisplayOutput,
{
    input: A,
    display: T,
    delay: D,
    sampling: SamplingConfig,
    samples: SampleBuffer<N>,
    transform: SpectralTransform<N>,
    spectrum: SpectrumBuffer<N>,
    renderer: BarRenderer<T::Color>,
    banner: Option<Banner<T::Color>>,
    last_peak: PeakInfo,
    stats: FrameStats,
}

impl<A, T, D, const N: usize> SpectrumAnalyzer<A, T, D, N>
where
    A: AnalogInput,
    T: DisplayOutput,
    D: DelayNs,
{
    /// Validates the transform size and bar layout; nothing runs yet.
    pub fn new(
        input: A,
        display: T,
        delay: D,
        config: AnalyzerConfig<T::Color>,
    ) -> Result<Self, ConfigError> {
        let transform = SpectralTransform::new()?;
        let renderer = BarRenderer::new(config.geometry, config.bins, N)?;

        #[cfg(feature = "std")]
        std::println!(
            "SpectrumAnalyzer::new called with size: {}, bins: {:?}, interval_us: {}",
            N,
            renderer.bins(),
            config.sampling.interval_us
        );
        #[cfg(feature = "logging")]
        info!(
            "SpectrumAnalyzer::new called with size: {}, bins: {}..{}, interval_us: {}",
            N,
            renderer.bins().start,
            renderer.bins().end,
            config.sampling.interval_us
        );

        Ok(Self {
            input,
            display,
            delay,
            sampling: config.sampling,
            samples: SampleBuffer::new(),
            transform,
            spectrum: SpectrumBuffer::new(),
            renderer,
            banner: config.banner,
            last_peak: PeakInfo::SILENT,
            stats: FrameStats::default(),
        })
    }

    /// One-time drawing before the loop starts.
    pub fn setup(&mut self) -> Result<(), T::Error> {
        if let Some(banner) = &self.banner {
            self.display.draw_text(banner)?;
            self.display.present()?;
        }
        Ok(())
    }

    /// Run a single frame. A failure abandons the frame.
    ///
    /// `spectrum()` and `last_peak()` always describe the same frame: the
    /// last one that made it through the transform. A sampling failure
    /// leaves both untouched; a display failure still updates both, since
    /// the frame was analyzed before the display rejected it.
    pub fn run_once(&mut self) -> Result<PeakInfo, CycleError<A::Error, T::Error>> {
        let result = self.cycle();
        match result {
            Ok(_) => self.stats.completed = self.stats.completed.wrapping_add(1),
            Err(_) => self.stats.dropped = self.stats.dropped.wrapping_add(1),
        }
        result
    }

    fn cycle(&mut self) -> Result<PeakInfo, CycleError<A::Error, T::Error>> {
        let time = self
            .samples
            .fill(&mut self.input, &self.sampling, &mut self.delay)
            .map_err(CycleError::Sample)?;
        let transformed = self.transform.process(time);
        let peak = self.spectrum.extract(&transformed).peak();
        self.last_peak = peak;

        self.renderer
            .render(&mut self.display, &self.spectrum, &peak)
            .map_err(CycleError::Render)?;
        self.display.present().map_err(CycleError::Render)?;
        Ok(peak)
    }

    /// Loop until power-off. Failed frames are logged and skipped.
    pub fn run(&mut self) -> ! {
        loop {
            match self.run_once() {
                Ok(_peak) => {
                    if self.stats.completed % LOG_INTERVAL == 0 {
                        #[cfg(feature = "logging")]
                        info!(
                            "frame {}: peak {} at bin {} ({} dropped)",
                            self.stats.completed,
                            _peak.magnitude,
                            _peak.index,
                            self.stats.dropped
                        );
                        #[cfg(feature = "std")]
                        std::println!(
                            "frame {}: peak {:.3} at bin {} ({} dropped)",
                            self.stats.completed,
                            _peak.magnitude,
                            _peak.index,
                            self.stats.dropped
                        );
                    }
                }
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    warn!("frame dropped: {} stage failed", _e.stage());
                    #[cfg(feature = "std")]
                    std::println!("frame dropped: {} stage failed", _e.stage());
                }
            }
        }
    }

    pub fn spectrum(&self) -> &SpectrumBuffer<N> {
        &self.spectrum
    }

    pub fn last_peak(&self) -> PeakInfo {
        self.last_peak
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn renderer(&self) -> &BarRenderer<T::Color> {
        &self.renderer
    }

    pub fn display(&self) -> &T {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut T {
        &mut self.display
    }

    pub fn input_mut(&mut self) -> &mut A {
        &mut self.input
    }
}
