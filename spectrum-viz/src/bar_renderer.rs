use core::ops::Range;

#[allow(unused_imports)]
use micromath::F32Ext;
use spectrum_dsp::{ConfigError, PeakInfo, SpectrumBuffer};

use crate::display::DisplayOutput;

/// Which bins get a bar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub enum BinSpan {
    /// Bins `0..N/2`. For a real input this is DC up to Nyquist; the upper
    /// half only mirrors it.
    #[default]
    LowerHalf,
    /// All `N` bins, mirror image included.
    Full,
    /// Bins `start..end`.
    Range { start: usize, end: usize },
}

impl BinSpan {
    pub fn resolve(&self, bins: usize) -> Result<Range<usize>, ConfigError> {
        let (start, end) = match *self {
            BinSpan::LowerHalf => (0, bins / 2),
            BinSpan::Full => (0, bins),
            BinSpan::Range { start, end } => (start, end),
        };
        if start >= end {
            return Err(ConfigError::EmptyBinRange { start, end });
        }
        if end > bins {
            return Err(ConfigError::BinRangeOutOfBounds { end, bins });
        }
        Ok(start..end)
    }
}

/// Where and how tall bars are drawn. Rows grow downwards, so bars rise from
/// `baseline_y` towards smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarGeometry<C> {
    /// Column of the first rendered bin.
    pub origin_x: i32,
    /// Columns between neighbouring bins.
    pub bar_stride: i32,
    pub baseline_y: i32,
    pub max_height: u16,
    pub foreground: C,
    pub background: C,
}

/// Scale `magnitude` against `peak` onto `0..=max_height`.
///
/// Only a magnitude at or above the peak reaches `max_height`. A silent
/// peak, or a magnitude that is NaN or not positive, gives 0.
pub fn bar_height(magnitude: f32, peak: f32, max_height: u16) -> u16 {
    if !(peak > 0.0) || !(magnitude > 0.0) || max_height == 0 {
        return 0;
    }
    if magnitude >= peak {
        return max_height;
    }
    let scaled = (magnitude / peak * max_height as f32).round();
    (scaled as u16).min(max_height - 1)
}

/// Draws one vertical bar per bin. Each bar repaints its whole column, so
/// a shrinking bar is erased without clearing the screen.
pub struct BarRenderer<C> {
    geometry: BarGeometry<C>,
    bins: Range<usize>,
}

impl<C: Copy> BarRenderer<C> {
    pub fn new(geometry: BarGeometry<C>, span: BinSpan, bins: usize) -> Result<Self, ConfigError> {
        if geometry.max_height == 0 {
            return Err(ConfigError::ZeroBarHeight);
        }
        let bins = span.resolve(bins)?;
        Ok(Self { geometry, bins })
    }

    pub fn geometry(&self) -> &BarGeometry<C> {
        &self.geometry
    }

    pub fn bins(&self) -> Range<usize> {
        self.bins.clone()
    }

    /// Column the bar for `bin` is drawn in.
    pub fn column(&self, bin: usize) -> i32 {
        let offset = bin.saturating_sub(self.bins.start) as i32;
        self.geometry.origin_x + offset * self.geometry.bar_stride
    }

    pub fn render<T, const N: usize>(
        &self,
        target: &mut T,
        spectrum: &SpectrumBuffer<N>,
        peak: &PeakInfo,
    ) -> Result<(), T::Error>
    where
        T: DisplayOutput<Color = C>,
    {
        let magnitudes = spectrum.as_slice().get(self.bins.clone()).unwrap_or(&[]);
        for (offset, &magnitude) in magnitudes.iter().enumerate() {
            let height = bar_height(magnitude, peak.magnitude, self.geometry.max_height);
            self.draw_bar(target, self.column(self.bins.start + offset), height)?;
        }
        Ok(())
    }

    /// Foreground covers the lowest `height` rows, background the rest of
    /// the `max_height` rows.
    fn draw_bar<T>(&self, target: &mut T, x: i32, height: u16) -> Result<(), T::Error>
    where
        T: DisplayOutput<Color = C>,
    {
        let baseline = self.geometry.baseline_y;
        let height = height.min(self.geometry.max_height) as i32;
        let max_height = self.geometry.max_height as i32;

        if height > 0 {
            target.draw_vertical_line(x, baseline, baseline - height + 1, self.geometry.foreground)?;
        }
        if height < max_height {
            target.draw_vertical_line(
                x,
                baseline - height,
                baseline - max_height + 1,
                self.geometry.background,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::display::GraphicsTarget;
    use core::convert::Infallible;
    use embedded_graphics::{mock_display::MockDisplay, pixelcolor::BinaryColor};
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Ink {
        Fg,
        Bg,
    }

    #[derive(Default)]
    struct Recorder {
        lines: Vec<(i32, i32, i32, Ink)>,
    }

    impl DisplayOutput for Recorder {
        type Color = Ink;
        type Error = Infallible;

        fn draw_vertical_line(
            &mut self,
            x: i32,
            y_start: i32,
            y_end: i32,
            color: Ink,
        ) -> Result<(), Infallible> {
            self.lines.push((x, y_start, y_end, color));
            Ok(())
        }
    }

    fn geometry() -> BarGeometry<Ink> {
        BarGeometry {
            origin_x: 30,
            bar_stride: 2,
            baseline_y: 220,
            max_height: 120,
            foreground: Ink::Fg,
            background: Ink::Bg,
        }
    }

    #[test]
    fn test_bar_height_scales_against_peak() {
        assert_eq!(bar_height(50.0, 100.0, 120), 60);
        assert_eq!(bar_height(100.0, 100.0, 120), 120);
        assert_eq!(bar_height(250.0, 100.0, 120), 120);
        assert_eq!(bar_height(0.0, 100.0, 120), 0);
    }

    #[test]
    fn test_bar_height_only_tops_out_at_the_peak() {
        assert_eq!(bar_height(99.9, 100.0, 120), 119);
        for step in 0..1000 {
            let m = step as f32 * 0.25;
            let h = bar_height(m, 100.0, 120);
            assert!(h <= 120);
            assert_eq!(h == 120, m >= 100.0, "magnitude {}", m);
        }
    }

    #[test]
    fn test_bar_height_degenerate_inputs() {
        assert_eq!(bar_height(5.0, 0.0, 120), 0);
        assert_eq!(bar_height(5.0, f32::NAN, 120), 0);
        assert_eq!(bar_height(f32::NAN, 10.0, 120), 0);
        assert_eq!(bar_height(-3.0, 10.0, 120), 0);
        assert_eq!(bar_height(5.0, 10.0, 0), 0);
    }

    #[test]
    fn test_span_resolution() {
        assert_eq!(BinSpan::LowerHalf.resolve(256), Ok(0..128));
        assert_eq!(BinSpan::Full.resolve(256), Ok(0..256));
        assert_eq!(BinSpan::Range { start: 4, end: 40 }.resolve(256), Ok(4..40));
        assert_eq!(
            BinSpan::Range { start: 10, end: 10 }.resolve(256),
            Err(ConfigError::EmptyBinRange { start: 10, end: 10 })
        );
        assert_eq!(
            BinSpan::Range { start: 0, end: 300 }.resolve(256),
            Err(ConfigError::BinRangeOutOfBounds { end: 300, bins: 256 })
        );
    }

    #[test]
    fn test_zero_height_geometry_rejected() {
        let mut g = geometry();
        g.max_height = 0;
        assert_eq!(
            BarRenderer::new(g, BinSpan::LowerHalf, 256).err(),
            Some(ConfigError::ZeroBarHeight)
        );
    }

    #[test]
    fn test_render_half_height_bar() {
        let renderer = BarRenderer::new(geometry(), BinSpan::LowerHalf, 256).unwrap();
        let mut magnitudes = [0.0; 256];
        magnitudes[5] = 50.0;
        magnitudes[9] = 100.0;
        let spectrum = SpectrumBuffer::from_magnitudes(magnitudes);
        let peak = spectrum.peak();
        let mut recorder = Recorder::default();

        renderer.render(&mut recorder, &spectrum, &peak).unwrap();

        // 128 bars: the two lit ones draw two segments, the peak only one.
        assert_eq!(recorder.lines.len(), 126 + 2 + 1);
        assert!(recorder.lines.contains(&(40, 220, 161, Ink::Fg)));
        assert!(recorder.lines.contains(&(40, 160, 101, Ink::Bg)));
        assert!(recorder.lines.contains(&(48, 220, 101, Ink::Fg)));
        assert!(recorder.lines.contains(&(30, 220, 101, Ink::Bg)));
        let last = recorder.lines.last().unwrap();
        assert_eq!(last.0, 30 + 2 * 127);
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = BarRenderer::new(geometry(), BinSpan::Full, 64).unwrap();
        let mut magnitudes = [0.0; 64];
        for (i, m) in magnitudes.iter_mut().enumerate() {
            *m = (i % 7) as f32 * 1.5;
        }
        let spectrum = SpectrumBuffer::from_magnitudes(magnitudes);
        let peak = spectrum.peak();

        let mut first = Recorder::default();
        let mut second = Recorder::default();
        renderer.render(&mut first, &spectrum, &peak).unwrap();
        renderer.render(&mut second, &spectrum, &peak).unwrap();

        assert_eq!(first.lines, second.lines);
    }

    #[test]
    fn test_silent_peak_only_erases() {
        let renderer = BarRenderer::new(geometry(), BinSpan::LowerHalf, 32).unwrap();
        let spectrum = SpectrumBuffer::<32>::new();
        let mut recorder = Recorder::default();

        renderer
            .render(&mut recorder, &spectrum, &PeakInfo::SILENT)
            .unwrap();

        assert_eq!(recorder.lines.len(), 16);
        assert!(recorder
            .lines
            .iter()
            .all(|&(_, y0, y1, ink)| ink == Ink::Bg && y0 == 220 && y1 == 101));
    }

    #[test]
    fn test_custom_range_starts_at_origin() {
        let renderer =
            BarRenderer::new(geometry(), BinSpan::Range { start: 10, end: 12 }, 64).unwrap();
        assert_eq!(renderer.column(10), 30);
        assert_eq!(renderer.column(11), 32);

        let mut recorder = Recorder::default();
        let spectrum = SpectrumBuffer::<64>::new();
        renderer
            .render(&mut recorder, &spectrum, &PeakInfo::SILENT)
            .unwrap();
        let columns: Vec<i32> = recorder.lines.iter().map(|l| l.0).collect();
        assert_eq!(columns, [30, 32]);
    }

    #[test]
    fn test_render_pixels() {
        let geometry = BarGeometry {
            origin_x: 0,
            bar_stride: 2,
            baseline_y: 3,
            max_height: 4,
            foreground: BinaryColor::On,
            background: BinaryColor::Off,
        };
        let renderer = BarRenderer::new(geometry, BinSpan::Range { start: 0, end: 3 }, 4).unwrap();
        let spectrum = SpectrumBuffer::from_magnitudes([4.0, 2.0, 0.0, 1.0]);
        let mut target = GraphicsTarget::new(MockDisplay::new());

        renderer
            .render(&mut target, &spectrum, &spectrum.peak())
            .unwrap();

        target.into_inner().assert_pattern(&[
            "# . .", //
            "# . .",
            "# # .",
            "# # .",
        ]);
    }
}
