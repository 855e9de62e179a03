//! Fitness statistics reported at the end of each generation.

use serde::Serialize;

/// Descriptive statistics over one generation's fitness values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitnessStats {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
    /// Upper median for even-sized samples.
    pub median: u32,
    pub std_dev: f64,
}

impl FitnessStats {
    /// Computes statistics from unsorted values.
    ///
    /// Returns `None` for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// # use evoflap_training::stats::FitnessStats;
    /// let stats = FitnessStats::new([5, 2, 4, 1, 3]).unwrap();
    /// assert_eq!(stats.min, 1);
    /// assert_eq!(stats.max, 5);
    /// assert_eq!(stats.median, 3);
    /// assert!((stats.mean - 3.0).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_unstable();
        Self::from_sorted(&values)
    }

    /// Computes statistics from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[u32]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted(),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let n = sorted_values.len() as f64;
        let mean = sorted_values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
        let median = sorted_values[sorted_values.len() / 2];
        let variance = sorted_values
            .iter()
            .map(|&v| (f64::from(v) - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }
}

/// What happened in one finished generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    /// The generation that just ended (starts at 1).
    pub generation: u32,
    pub best_fitness: u32,
    /// Integer mean, truncated.
    pub average_fitness: u32,
    pub best_fitness_ever: u32,
    /// Number of agents that reproduced.
    pub elite_count: usize,
    /// `true` if nobody qualified as a parent and the next generation was
    /// built from founders.
    pub restarted: bool,
    pub fitness: FitnessStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(FitnessStats::new([]), None);
    }

    #[test]
    fn test_single_value() {
        let stats = FitnessStats::new([7]).unwrap();
        assert_eq!((stats.min, stats.max, stats.median), (7, 7, 7));
        assert!(stats.std_dev.abs() < 1e-12);
    }

    #[test]
    fn test_spread() {
        let stats = FitnessStats::new([2, 4, 4, 4, 5, 5, 7, 9]).unwrap();
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(stats.median, 5);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = FitnessStats::from_sorted(&[3, 1]);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = GenerationSummary {
            generation: 3,
            best_fitness: 400,
            average_fitness: 120,
            best_fitness_ever: 450,
            elite_count: 2,
            restarted: false,
            fitness: FitnessStats::new([400, 20]).unwrap(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["generation"], 3);
        assert_eq!(json["fitness"]["max"], 400);
        assert_eq!(json["restarted"], false);
    }
}
