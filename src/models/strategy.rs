use serde::{Deserialize, Serialize};

/// Scheduling strategy selecting the scoring formula and, for
/// [`Strategy::MaxObjects`], a different scheduling algorithm entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Prefer targets with the longest total visibility.
    LongestDuration,
    /// Fit as many targets as possible into the night
    /// (slot-sampling greedy with gap repair).
    MaxObjects,
    /// Prefer high elevation and bright targets jointly.
    OptimalSnr,
    /// Prefer targets needing the fewest mosaic panels.
    MinimalMosaic,
    /// Balance available time against imaging difficulty.
    DifficultyBalanced,
    /// Prefer combined mosaic groups over individual objects.
    MosaicGroups,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_serde_names() {
        let json = serde_json::to_string(&Strategy::MaxObjects).unwrap();
        assert_eq!(json, "\"max_objects\"");

        let back: Strategy = serde_json::from_str("\"mosaic_groups\"").unwrap();
        assert_eq!(back, Strategy::MosaicGroups);
    }
}
