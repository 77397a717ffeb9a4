use indexmap::IndexSet;
use rand::{Rng, seq::IteratorRandom};

use crate::dao::models::RoundStateEntity;

/// Result of a single spin of the wheel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinOutcome {
    /// A team was drawn and moved to the end of the spun list.
    Selected {
        /// Name of the drawn team.
        team: String,
    },
    /// The pool was empty: a new round began and nobody was drawn.
    RoundReset {
        /// Number of the round that just began.
        round: u32,
    },
}

/// Progress of the team wheel: who can still be drawn this round and who
/// already was.
///
/// Between operations `remaining` and `spun` are disjoint and, unless a team
/// was removed by hand, together cover every active team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    round: u32,
    remaining: IndexSet<String>,
    spun: Vec<String>,
    started: bool,
}

impl RoundState {
    /// Fresh, not yet started, first round over `active` teams.
    pub fn new(active: Vec<String>) -> Self {
        Self {
            round: 1,
            remaining: active.into_iter().collect(),
            spun: Vec::new(),
            started: false,
        }
    }

    /// Begin the game from round 1 with every active team in the pool.
    pub fn start(&mut self, active: Vec<String>) {
        *self = Self {
            started: true,
            ..Self::new(active)
        };
    }

    /// Return to a fresh, unstarted first round.
    pub fn reset(&mut self, active: Vec<String>) {
        *self = Self::new(active);
    }

    /// Draw one team uniformly at random from the remaining pool.
    ///
    /// When the pool is exhausted the round advances instead, the pool is
    /// refilled with `active` and no team is drawn.
    pub fn spin<R: Rng + ?Sized>(&mut self, active: Vec<String>, rng: &mut R) -> SpinOutcome {
        let Some(team) = self.remaining.iter().choose(rng).cloned() else {
            return self.advance_round(active);
        };

        self.remaining.shift_remove(&team);
        self.spun.push(team.clone());
        SpinOutcome::Selected { team }
    }

    /// Drop `team` from both the pool and the spun list. Returns whether it was present.
    pub fn remove_team(&mut self, team: &str) -> bool {
        let was_remaining = self.remaining.shift_remove(team);
        let before = self.spun.len();
        self.spun.retain(|spun| spun != team);
        was_remaining || self.spun.len() != before
    }

    fn advance_round(&mut self, active: Vec<String>) -> SpinOutcome {
        self.round = self.round.saturating_add(1);
        self.remaining = active.into_iter().collect();
        self.spun.clear();
        SpinOutcome::RoundReset { round: self.round }
    }

    /// Current round number.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Teams still in the pool, in their original order.
    pub fn remaining(&self) -> &IndexSet<String> {
        &self.remaining
    }

    /// Teams drawn this round, in draw order.
    pub fn spun(&self) -> &[String] {
        &self.spun
    }

    /// Whether an admin started the game.
    pub fn started(&self) -> bool {
        self.started
    }
}

impl From<RoundStateEntity> for RoundState {
    fn from(value: RoundStateEntity) -> Self {
        let mut remaining = value.remaining_teams;
        // A team cannot be both drawn and pending.
        remaining.retain(|team| !value.spun_teams.contains(team));
        Self {
            round: value.round.max(1),
            remaining,
            spun: value.spun_teams,
            started: value.started,
        }
    }
}

impl From<&RoundState> for RoundStateEntity {
    fn from(value: &RoundState) -> Self {
        Self {
            round: value.round,
            remaining_teams: value.remaining.clone(),
            spun_teams: value.spun.clone(),
            started: value.started,
        }
    }
}
