//! Battery gauge math
//!
//! Millivolts to percent through a LiPo discharge table, plus a small
//! moving average so ADC noise does not flap the sidebar gauge between
//! adjacent percent steps.

use heapless::HistoryBuffer;

/// LiPo discharge curve, (millivolts, percent)
///
/// Open-circuit voltage under light load for a single 3.7 V cell, the
/// usual keyboard-half battery. Between entries the percent is
/// interpolated linearly; the curve's steep tail below 3.5 V is what
/// makes the last few percent drop quickly, which is honest.
const CHARGE_TABLE: &[(u16, u8)] = &[
    (4200, 100), // fully charged
    (4100, 90),
    (4000, 80),
    (3900, 70),
    (3800, 55),
    (3700, 40),
    (3600, 25),
    (3500, 10),
    (3400, 5),
    (3300, 0), // protection cutoff territory
];

/// Convert a cell voltage to a charge percent
///
/// Clamps outside the table range, interpolates inside it. Integer-only.
pub fn percent_from_mv(mv: u16) -> u8 {
    let (top_mv, top_pct) = CHARGE_TABLE[0];
    if mv >= top_mv {
        return top_pct;
    }
    let (bottom_mv, bottom_pct) = CHARGE_TABLE[CHARGE_TABLE.len() - 1];
    if mv <= bottom_mv {
        return bottom_pct;
    }

    // Table is sorted by decreasing voltage.
    for pair in CHARGE_TABLE.windows(2) {
        let (mv_high, pct_high) = pair[0];
        let (mv_low, pct_low) = pair[1];
        if mv <= mv_high && mv >= mv_low {
            let span = (mv_high - mv_low) as u32;
            let rise = (pct_high - pct_low) as u32;
            let offset = (mv - mv_low) as u32;
            return pct_low + (rise * offset / span) as u8;
        }
    }

    bottom_pct
}

/// Samples averaged per gauge reading
pub const FILTER_DEPTH: usize = 8;

/// Moving average over raw millivolt samples
///
/// The window is tiny and the sample cadence is seconds, so the gauge
/// settles within a minute of boot while single-sample spikes (key
/// scanning load, radio bursts on the central half) barely move it.
pub struct BatteryFilter {
    samples: HistoryBuffer<u16, FILTER_DEPTH>,
}

impl Default for BatteryFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl BatteryFilter {
    pub fn new() -> Self {
        Self {
            samples: HistoryBuffer::new(),
        }
    }

    /// Push one raw sample and return the filtered charge percent
    pub fn update(&mut self, mv: u16) -> u8 {
        self.samples.write(mv);
        let sum: u32 = self.samples.oldest_ordered().map(|&v| v as u32).sum();
        let mean = sum / self.samples.len() as u32;
        percent_from_mv(mean as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_endpoints_clamp() {
        assert_eq!(percent_from_mv(4200), 100);
        assert_eq!(percent_from_mv(4350), 100);
        assert_eq!(percent_from_mv(3300), 0);
        assert_eq!(percent_from_mv(2900), 0);
    }

    #[test]
    fn test_interpolation_between_entries() {
        // Halfway between 3800 mV (55 %) and 3900 mV (70 %).
        assert_eq!(percent_from_mv(3850), 62);
        // Exact table entries map exactly.
        assert_eq!(percent_from_mv(3700), 40);
        assert_eq!(percent_from_mv(4100), 90);
    }

    #[test]
    fn test_percent_is_monotone_in_voltage() {
        let mut last = 0;
        for mv in (3300..=4200).step_by(10) {
            let pct = percent_from_mv(mv);
            assert!(pct >= last, "gauge went backwards at {} mV", mv);
            last = pct;
        }
    }

    #[test]
    fn test_filter_converges_on_steady_input() {
        let mut filter = BatteryFilter::new();
        let mut pct = 0;
        for _ in 0..FILTER_DEPTH {
            pct = filter.update(3700);
        }
        assert_eq!(pct, 40);
    }

    #[test]
    fn test_filter_damps_single_spike() {
        let mut filter = BatteryFilter::new();
        for _ in 0..FILTER_DEPTH {
            filter.update(3800);
        }
        // One sagging sample moves the mean by 1/8 of the sag.
        let pct = filter.update(3400);
        assert!(pct >= 47, "one spike dropped the gauge to {}", pct);
    }
}
