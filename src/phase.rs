//! Game phases (early / mid / late) and a fixed three-slot record keyed by them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Early, Phase::Mid, Phase::Late];
}

/// Inclusive minute range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteRange {
    pub start: u32,
    pub end: u32,
}

impl MinuteRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, minute: u32) -> bool {
        (self.start..=self.end).contains(&minute)
    }
}

/// Phase boundaries in game-minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindows {
    #[serde(default = "default_early")]
    pub early: MinuteRange,
    #[serde(default = "default_mid")]
    pub mid: MinuteRange,
    #[serde(default = "default_late")]
    pub late: MinuteRange,
}

fn default_early() -> MinuteRange {
    MinuteRange::new(0, 10)
}
fn default_mid() -> MinuteRange {
    MinuteRange::new(11, 20)
}
fn default_late() -> MinuteRange {
    MinuteRange::new(21, 100)
}

impl Default for PhaseWindows {
    fn default() -> Self {
        Self {
            early: default_early(),
            mid: default_mid(),
            late: default_late(),
        }
    }
}

impl PhaseWindows {
    pub fn range(&self, phase: Phase) -> MinuteRange {
        match phase {
            Phase::Early => self.early,
            Phase::Mid => self.mid,
            Phase::Late => self.late,
        }
    }

    /// Phase owning the given minute; `None` past the last window.
    pub fn phase_of(&self, minute: u32) -> Option<Phase> {
        Phase::ALL
            .into_iter()
            .find(|p| self.range(*p).contains(minute))
    }
}

/// One value per phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerPhase<T> {
    pub early: T,
    pub mid: T,
    pub late: T,
}

impl<T> PerPhase<T> {
    pub fn get(&self, phase: Phase) -> &T {
        match phase {
            Phase::Early => &self.early,
            Phase::Mid => &self.mid,
            Phase::Late => &self.late,
        }
    }

    pub fn get_mut(&mut self, phase: Phase) -> &mut T {
        match phase {
            Phase::Early => &mut self.early,
            Phase::Mid => &mut self.mid,
            Phase::Late => &mut self.late,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> PerPhase<U> {
        PerPhase {
            early: f(&self.early),
            mid: f(&self.mid),
            late: f(&self.late),
        }
    }

    /// Values in early → mid → late order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &T)> {
        Phase::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_windows_are_contiguous() {
        let w = PhaseWindows::default();
        assert_eq!(w.phase_of(0), Some(Phase::Early));
        assert_eq!(w.phase_of(10), Some(Phase::Early));
        assert_eq!(w.phase_of(11), Some(Phase::Mid));
        assert_eq!(w.phase_of(20), Some(Phase::Mid));
        assert_eq!(w.phase_of(21), Some(Phase::Late));
        assert_eq!(w.phase_of(101), None);
    }

    #[test]
    fn per_phase_iterates_in_order() {
        let p = PerPhase {
            early: 1,
            mid: 2,
            late: 3,
        };
        let order: Vec<_> = p.iter().map(|(ph, v)| (ph, *v)).collect();
        assert_eq!(order, vec![(Phase::Early, 1), (Phase::Mid, 2), (Phase::Late, 3)]);
    }
}
