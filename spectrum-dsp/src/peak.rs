/// Largest magnitude of one frame and the bin it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "logging", derive(defmt::Format))]
pub struct PeakInfo {
    pub magnitude: f32,
    pub index: usize,
}

impl PeakInfo {
    /// What an all-zero spectrum reports.
    pub const SILENT: PeakInfo = PeakInfo {
        magnitude: 0.0,
        index: 0,
    };

    /// A zero peak means there is nothing to scale bars against.
    pub fn is_silent(&self) -> bool {
        !(self.magnitude > 0.0)
    }
}

impl Default for PeakInfo {
    fn default() -> Self {
        Self::SILENT
    }
}

/// Linear scan for the maximum. On exact ties the lowest index wins; an
/// empty or all-zero input yields [`PeakInfo::SILENT`].
pub fn locate_peak(magnitudes: &[f32]) -> PeakInfo {
    let mut peak = PeakInfo::SILENT;
    for (index, &magnitude) in magnitudes.iter().enumerate() {
        if magnitude > peak.magnitude {
            peak = PeakInfo { magnitude, index };
        }
    }
    peak
}
