//! Zone assigner: labels scored candidates Safe / Stretch / Adventure and fills
//! the per-zone quota for the request's exploration level.
//!
//! Labels are always score-derived. Quotas are counts: an under-supplied zone
//! borrows the best leftover candidates from its neighbours, and a borrowed
//! candidate keeps its own label while filling the borrowing zone's slot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Safe,
    Stretch,
    Adventure,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Safe, Zone::Stretch, Zone::Adventure];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Safe => "safe",
            Zone::Stretch => "stretch",
            Zone::Adventure => "adventure",
        }
    }

    pub fn from_score(score: u32, thresholds: &ZoneThresholds) -> Self {
        if score >= thresholds.safe {
            Zone::Safe
        } else if score >= thresholds.stretch {
            Zone::Stretch
        } else {
            Zone::Adventure
        }
    }

    /// Zones an under-supplied zone borrows from, nearest first.
    fn borrow_order(&self) -> [Zone; 2] {
        match self {
            Zone::Safe => [Zone::Stretch, Zone::Adventure],
            Zone::Stretch => [Zone::Safe, Zone::Adventure],
            Zone::Adventure => [Zone::Stretch, Zone::Safe],
        }
    }
}

/// Lower score bounds of the Safe and Stretch bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneThresholds {
    pub safe: u32,
    pub stretch: u32,
}

impl Default for ZoneThresholds {
    fn default() -> Self {
        Self {
            safe: 75,
            stretch: 60,
        }
    }
}

/// Exploration level, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ExplorationLevel(u8);

impl ExplorationLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Clamps out-of-range values; `None` means level 1.
    pub fn resolve(requested: Option<i64>) -> Self {
        let level = requested
            .map(|v| v.clamp(Self::MIN as i64, Self::MAX as i64) as u8)
            .unwrap_or(Self::MIN);
        Self(level)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for ExplorationLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// How many recommendations of each zone one exploration level returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneQuota {
    pub level: u8,
    pub safe: usize,
    pub stretch: usize,
    pub adventure: usize,
}

impl ZoneQuota {
    pub fn for_zone(&self, zone: Zone) -> usize {
        match zone {
            Zone::Safe => self.safe,
            Zone::Stretch => self.stretch,
            Zone::Adventure => self.adventure,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.stretch + self.adventure
    }
}

/// The exploration-level table. Data only; any table covering levels 1..=5 is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneDistribution {
    quotas: Vec<ZoneQuota>,
}

impl Default for ZoneDistribution {
    fn default() -> Self {
        Self::new(vec![
            ZoneQuota { level: 1, safe: 5, stretch: 3, adventure: 1 },
            ZoneQuota { level: 2, safe: 4, stretch: 4, adventure: 2 },
            ZoneQuota { level: 3, safe: 3, stretch: 4, adventure: 4 },
            ZoneQuota { level: 4, safe: 2, stretch: 4, adventure: 5 },
            ZoneQuota { level: 5, safe: 2, stretch: 3, adventure: 6 },
        ])
    }
}

impl ZoneDistribution {
    pub fn new(quotas: Vec<ZoneQuota>) -> Self {
        Self { quotas }
    }

    /// Every level in 1..=5 must appear exactly once.
    pub fn validate(&self) -> Result<(), String> {
        for level in ExplorationLevel::MIN..=ExplorationLevel::MAX {
            let rows = self.quotas.iter().filter(|q| q.level == level).count();
            if rows != 1 {
                return Err(format!(
                    "zone distribution must define level {level} exactly once (found {rows})"
                ));
            }
        }
        if let Some(extra) = self
            .quotas
            .iter()
            .find(|q| !(ExplorationLevel::MIN..=ExplorationLevel::MAX).contains(&q.level))
        {
            return Err(format!("zone distribution has unknown level {}", extra.level));
        }
        Ok(())
    }

    /// Quota for `level`; an empty quota if the table lacks the row.
    pub fn quota(&self, level: ExplorationLevel) -> ZoneQuota {
        self.quotas
            .iter()
            .find(|q| q.level == level.value())
            .copied()
            .unwrap_or(ZoneQuota {
                level: level.value(),
                safe: 0,
                stretch: 0,
                adventure: 0,
            })
    }
}

/// Filled quota slots per zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCounts {
    pub safe: usize,
    pub stretch: usize,
    pub adventure: usize,
}

impl ZoneCounts {
    pub fn get(&self, zone: Zone) -> usize {
        match zone {
            Zone::Safe => self.safe,
            Zone::Stretch => self.stretch,
            Zone::Adventure => self.adventure,
        }
    }

    fn increment(&mut self, zone: Zone) {
        match zone {
            Zone::Safe => self.safe += 1,
            Zone::Stretch => self.stretch += 1,
            Zone::Adventure => self.adventure += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.safe + self.stretch + self.adventure
    }
}

/// One selected candidate: its position in the ranked input and the slot it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub index: usize,
    pub slot: Zone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Ordered by rank.
    pub picks: Vec<Pick>,
    pub counts: ZoneCounts,
}

impl Selection {
    pub fn is_selected(&self, index: usize) -> bool {
        self.picks.iter().any(|p| p.index == index)
    }
}

/// Fills `quota` from `labels`, which must already be in rank order
/// (score descending, then career id ascending).
pub fn select(labels: &[Zone], quota: &ZoneQuota) -> Selection {
    let mut taken = vec![false; labels.len()];
    let mut selection = Selection::default();

    let mut take = |zone: Zone, donor: Zone, selection: &mut Selection| {
        let want = quota.for_zone(zone);
        for (index, label) in labels.iter().enumerate() {
            if selection.counts.get(zone) >= want {
                break;
            }
            if *label == donor && !taken[index] {
                taken[index] = true;
                selection.picks.push(Pick { index, slot: zone });
                selection.counts.increment(zone);
            }
        }
    };

    for zone in Zone::ALL {
        take(zone, zone, &mut selection);
    }
    for zone in Zone::ALL {
        for donor in zone.borrow_order() {
            take(zone, donor, &mut selection);
        }
    }

    selection.picks.sort_by_key(|p| p.index);
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(scores: &[u32]) -> Vec<Zone> {
        let thresholds = ZoneThresholds::default();
        scores.iter().map(|s| Zone::from_score(*s, &thresholds)).collect()
    }

    #[test]
    fn test_score_bands() {
        let t = ZoneThresholds::default();
        assert_eq!(Zone::from_score(100, &t), Zone::Safe);
        assert_eq!(Zone::from_score(75, &t), Zone::Safe);
        assert_eq!(Zone::from_score(74, &t), Zone::Stretch);
        assert_eq!(Zone::from_score(60, &t), Zone::Stretch);
        assert_eq!(Zone::from_score(59, &t), Zone::Adventure);
        assert_eq!(Zone::from_score(0, &t), Zone::Adventure);
    }

    #[test]
    fn test_exploration_level_clamped() {
        assert_eq!(ExplorationLevel::resolve(None).value(), 1);
        assert_eq!(ExplorationLevel::resolve(Some(0)).value(), 1);
        assert_eq!(ExplorationLevel::resolve(Some(-3)).value(), 1);
        assert_eq!(ExplorationLevel::resolve(Some(3)).value(), 3);
        assert_eq!(ExplorationLevel::resolve(Some(6)).value(), 5);
    }

    #[test]
    fn test_default_table_totals() {
        let table = ZoneDistribution::default();
        table.validate().unwrap();
        let totals: Vec<usize> = (1..=5)
            .map(|l| table.quota(ExplorationLevel::resolve(Some(l))).total())
            .collect();
        assert_eq!(totals, vec![9, 10, 11, 11, 11]);
    }

    #[test]
    fn test_table_missing_level_is_invalid() {
        let table = ZoneDistribution::new(vec![ZoneQuota {
            level: 1,
            safe: 1,
            stretch: 1,
            adventure: 1,
        }]);
        assert!(table.validate().unwrap_err().contains("level 2"));
    }

    #[test]
    fn test_fill_from_own_bands() {
        // 6 safe, 5 stretch, 3 adventure
        let scores = [95, 90, 88, 85, 80, 76, 74, 70, 66, 63, 61, 50, 40, 30];
        let quota = ZoneDistribution::default().quota(ExplorationLevel::resolve(Some(1)));
        let selection = select(&labels(&scores), &quota);

        assert_eq!(
            selection.counts,
            ZoneCounts {
                safe: 5,
                stretch: 3,
                adventure: 1
            }
        );
        let indices: Vec<usize> = selection.picks.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 6, 7, 8, 11]);
    }

    #[test]
    fn test_safe_borrows_from_stretch_first() {
        // 1 safe, 6 stretch, 3 adventure; level 1 wants 5/3/1
        let scores = [80, 74, 72, 70, 68, 65, 62, 50, 45, 40];
        let quota = ZoneDistribution::default().quota(ExplorationLevel::resolve(Some(1)));
        let selection = select(&labels(&scores), &quota);

        assert_eq!(selection.counts.total(), 9);
        assert_eq!(selection.counts.safe, 5);
        let safe_slots: Vec<usize> = selection
            .picks
            .iter()
            .filter(|p| p.slot == Zone::Safe)
            .map(|p| p.index)
            .collect();
        // own safe candidate, then the three stretch leftovers, then the best adventure
        assert_eq!(safe_slots, vec![0, 4, 5, 6, 8]);
    }

    #[test]
    fn test_adventure_borrows_from_stretch_before_safe() {
        let scores = [90, 88, 86, 84, 82, 80, 78, 70, 68, 66, 64];
        let quota = ZoneDistribution::default().quota(ExplorationLevel::resolve(Some(5)));
        let selection = select(&labels(&scores), &quota);

        assert_eq!(selection.counts.total(), 11);
        let adventure_slots: Vec<usize> = selection
            .picks
            .iter()
            .filter(|p| p.slot == Zone::Adventure)
            .map(|p| p.index)
            .collect();
        // stretch leftovers (index 10) first, then safe leftovers best-first
        assert_eq!(adventure_slots, vec![2, 3, 4, 5, 6, 10]);
    }

    #[test]
    fn test_under_supply_returns_what_exists() {
        let scores = [90, 50];
        let quota = ZoneDistribution::default().quota(ExplorationLevel::resolve(Some(3)));
        let selection = select(&labels(&scores), &quota);
        assert_eq!(selection.picks.len(), 2);
        assert_eq!(selection.counts.total(), 2);
    }

    #[test]
    fn test_empty_input() {
        let quota = ZoneDistribution::default().quota(ExplorationLevel::default());
        let selection = select(&[], &quota);
        assert!(selection.picks.is_empty());
        assert_eq!(selection.counts, ZoneCounts::default());
    }

    #[test]
    fn test_custom_table_needs_no_code_change() {
        let table: ZoneDistribution = serde_json::from_str(
            r#"[
                {"level": 1, "safe": 1, "stretch": 0, "adventure": 0},
                {"level": 2, "safe": 1, "stretch": 1, "adventure": 0},
                {"level": 3, "safe": 1, "stretch": 1, "adventure": 1},
                {"level": 4, "safe": 0, "stretch": 1, "adventure": 2},
                {"level": 5, "safe": 0, "stretch": 0, "adventure": 3}
            ]"#,
        )
        .unwrap();
        table.validate().unwrap();
        let selection = select(
            &labels(&[90, 70, 50, 40]),
            &table.quota(ExplorationLevel::resolve(Some(5))),
        );
        assert_eq!(selection.counts.adventure, 3);
        let indices: Vec<usize> = selection.picks.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
    }
}
