use std::time::Duration;

use time::OffsetDateTime;

use crate::dao::models::{TimerEntity, TimerTable};

/// Pull-based per-team countdowns anchored lazily on first query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamTimers {
    starts: TimerTable,
}

/// Remaining time for a team, and whether this query anchored its clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLeft {
    /// Whole seconds left, within `[0, duration]`.
    pub seconds: u64,
    /// True when the clock did not exist before this query.
    pub started_now: bool,
}

impl TeamTimers {
    /// Seconds left for `team`, anchoring its clock at `now` if it has none.
    pub fn time_left(&mut self, team: &str, now: OffsetDateTime, duration: Duration) -> TimeLeft {
        let started_now = self.ensure_started(team, now);
        let started_at = self
            .starts
            .get(team)
            .map(|timer| timer.started_at)
            .unwrap_or(now);

        // Clock skew may put the anchor in the future; treat it as no time elapsed.
        let elapsed = (now - started_at).whole_seconds().max(0) as u64;
        TimeLeft {
            seconds: duration.as_secs().saturating_sub(elapsed),
            started_now,
        }
    }

    /// Anchor the clock at `now` unless one exists. Returns whether it was anchored.
    pub fn ensure_started(&mut self, team: &str, now: OffsetDateTime) -> bool {
        if self.starts.contains_key(team) {
            return false;
        }
        self.starts
            .insert(team.to_string(), TimerEntity { started_at: now });
        true
    }

    /// Force the clock of `team` to restart at `now`.
    pub fn reset(&mut self, team: &str, now: OffsetDateTime) {
        self.starts
            .insert(team.to_string(), TimerEntity { started_at: now });
    }

    /// Forget every clock.
    pub fn clear(&mut self) {
        self.starts.clear();
    }

    /// Table form used for persistence.
    pub fn to_table(&self) -> TimerTable {
        self.starts.clone()
    }
}

impl From<TimerTable> for TeamTimers {
    fn from(starts: TimerTable) -> Self {
        Self { starts }
    }
}

#[cfg(test)]
mod tests {
    use time::Duration as TimeDelta;

    use super::*;

    const ROUND: Duration = Duration::from_secs(60);

    fn anchor() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap()
    }

    #[test]
    fn first_query_anchors_the_clock() {
        let mut timers = TeamTimers::default();
        let left = timers.time_left("Alpha", anchor(), ROUND);
        assert_eq!(
            left,
            TimeLeft {
                seconds: 60,
                started_now: true
            }
        );

        let later = timers.time_left("Alpha", anchor() + TimeDelta::seconds(5), ROUND);
        assert_eq!(later.seconds, 55);
        assert!(!later.started_now);
    }

    #[test]
    fn partial_seconds_are_floored() {
        let mut timers = TeamTimers::default();
        timers.time_left("Alpha", anchor(), ROUND);
        let left = timers.time_left("Alpha", anchor() + TimeDelta::milliseconds(1_900), ROUND);
        assert_eq!(left.seconds, 59);
    }

    #[test]
    fn countdown_never_goes_negative() {
        let mut timers = TeamTimers::default();
        timers.time_left("Alpha", anchor(), ROUND);
        let left = timers.time_left("Alpha", anchor() + TimeDelta::minutes(10), ROUND);
        assert_eq!(left.seconds, 0);
    }

    #[test]
    fn anchor_in_the_future_reports_full_duration() {
        let mut timers = TeamTimers::default();
        timers.reset("Alpha", anchor() + TimeDelta::seconds(30));
        assert_eq!(timers.time_left("Alpha", anchor(), ROUND).seconds, 60);
    }

    #[test]
    fn reset_restores_the_full_duration() {
        let mut timers = TeamTimers::default();
        timers.time_left("Alpha", anchor(), ROUND);
        let now = anchor() + TimeDelta::seconds(45);
        assert_eq!(timers.time_left("Alpha", now, ROUND).seconds, 15);

        timers.reset("Alpha", now);
        assert_eq!(timers.time_left("Alpha", now, ROUND).seconds, 60);
    }

    #[test]
    fn teams_are_timed_independently() {
        let mut timers = TeamTimers::default();
        timers.time_left("Alpha", anchor(), ROUND);
        let now = anchor() + TimeDelta::seconds(20);
        assert_eq!(timers.time_left("Beta", now, ROUND).seconds, 60);
        assert_eq!(timers.time_left("Alpha", now, ROUND).seconds, 40);
    }
}
