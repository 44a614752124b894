//! Headline figures derived from a series (KPI cards next to the charts)

use crate::{Series, SeriesEntry};
use serde::{Deserialize, Serialize};

/// Total, mean and best entry of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub total: f64,
    pub average: f64,
    /// Highest-valued entry; the earliest one wins ties
    pub best: Option<SeriesEntry>,
}

impl SeriesSummary {
    pub fn from_series(series: &Series) -> Self {
        let count = series.len();
        let total = series.total();
        let average = if count == 0 { 0.0 } else { total / count as f64 };

        let best = series
            .iter()
            .fold(None::<&SeriesEntry>, |best, entry| match best {
                Some(b) if entry.value <= b.value => Some(b),
                _ => Some(entry),
            })
            .cloned();

        Self {
            count,
            total,
            average,
            best,
        }
    }
}

impl Series {
    pub fn summary(&self) -> SeriesSummary {
        SeriesSummary::from_series(self)
    }

    /// Share of the total held by entry `index`, in `[0, 1]`
    ///
    /// Negative and non-finite values count as zero, so shares match the donut
    /// segments. 0 when that total is 0.
    pub fn share(&self, index: usize) -> f64 {
        let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        let total: f64 = self.iter().map(|e| clamp(e.value)).sum();
        match self.get(index) {
            Some(entry) if total > 0.0 => clamp(entry.value) / total,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_summary() {
        let months = Series::from_pairs([
            ("Jul 2024", 12_500_000.0),
            ("Oct 2024", 28_500_000.0),
            ("Nov 2024", 32_100_000.0),
            ("Dec 2024", 27_600_000.0),
        ]);

        let summary = months.summary();
        assert_eq!(summary.count, 4);
        assert_relative_eq!(summary.total, 100_700_000.0);
        assert_relative_eq!(summary.average, 25_175_000.0);
        assert_eq!(summary.best.map(|e| e.label), Some("Nov 2024".to_string()));
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let series = Series::from_pairs([("a", 5.0), ("b", 5.0)]);
        assert_eq!(series.summary().best.map(|e| e.label), Some("a".to_string()));
    }

    #[test]
    fn test_empty_summary() {
        let summary = Series::new().summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert!(summary.best.is_none());
    }

    #[test]
    fn test_share() {
        let series = Series::from_pairs([("a", 1.0), ("b", 3.0)]);
        assert_relative_eq!(series.share(1), 0.75);
        assert_eq!(series.share(9), 0.0);
        assert_eq!(Series::from_pairs([("z", 0.0)]).share(0), 0.0);
    }

    #[test]
    fn test_share_ignores_negative_values() {
        let series = Series::from_pairs([("refunds", -5.0), ("sales", 10.0)]);
        assert_eq!(series.share(0), 0.0);
        assert_eq!(series.share(1), 1.0);

        let all_negative = Series::from_pairs([("a", -1.0), ("b", -2.0)]);
        assert_eq!(all_negative.share(1), 0.0);
    }
}
