//! Ranked Ladder Progression
//!
//! Pure state transitions for a rank + star ladder. A player starts at some
//! rank and climbs toward rank 0 by collecting stars.
//!
//! ## Rules
//! 1. A win adds one star, two while on a win streak of 3+ above rank 5
//! 2. Collecting more stars than the rank's capacity promotes to rank - 1
//! 3. A loss removes one star and resets the win streak
//! 4. Losing at zero stars demotes to rank + 1, except on milestone ranks
//!
//! Promotion and demotion move at most one rank per match.

/// Ranks that cannot be demoted out of by a loss.
pub const MILESTONE_RANKS: [u32; 4] = [5, 10, 15, 20];

/// Consecutive wins needed before the streak bonus applies.
pub const STREAK_BONUS_THRESHOLD: u32 = 3;

/// Ranks at or below this never earn the streak bonus.
pub const STREAK_BONUS_MAX_RANK: u32 = 5;

const DEFAULT_CAPACITY: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Tiering {
    /// Every rank holds 5 stars. Matches the historical ladder output.
    #[default]
    Legacy,
    /// Ranks in [15,50) hold 3 stars, ranks in [10,15) hold 4, others 5.
    Tiered,
}

impl Tiering {
    pub fn all() -> Vec<Self> {
        vec![Self::Legacy, Self::Tiered]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "Legacy (flat 5 stars)",
            Self::Tiered => "Tiered (3/4/5 stars)",
        }
    }

    /// Stars required to promote out of `rank`.
    pub fn capacity(&self, rank: u32) -> u32 {
        match self {
            Self::Legacy => DEFAULT_CAPACITY,
            Self::Tiered => match rank {
                15..=49 => 3,
                10..=14 => 4,
                _ => DEFAULT_CAPACITY,
            },
        }
    }
}

pub fn is_milestone(rank: u32) -> bool {
    MILESTONE_RANKS.contains(&rank)
}

/// Stars awarded for a win, given the streak *including* that win.
pub fn stars_earned_on_win(rank: u32, win_streak: u32) -> u32 {
    if rank > STREAK_BONUS_MAX_RANK && win_streak >= STREAK_BONUS_THRESHOLD {
        2
    } else {
        1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LadderState {
    pub rank: u32,
    pub stars: u32,
    pub win_streak: u32,
}

impl LadderState {
    pub fn new(rank: u32, stars: u32) -> Self {
        Self {
            rank,
            stars,
            win_streak: 0,
        }
    }

    /// Rank 0 is the top of the ladder and absorbs every further outcome.
    pub fn is_top(&self) -> bool {
        self.rank == 0
    }

    pub fn apply(self, outcome: Outcome, tiering: &Tiering) -> Self {
        match outcome {
            Outcome::Win => self.apply_win(tiering),
            Outcome::Loss => self.apply_loss(tiering),
        }
    }

    pub fn apply_win(self, tiering: &Tiering) -> Self {
        if self.is_top() {
            return self;
        }

        let win_streak = self.win_streak.saturating_add(1);
        let stars = self
            .stars
            .saturating_add(stars_earned_on_win(self.rank, win_streak));
        let capacity = tiering.capacity(self.rank);

        if stars > capacity {
            Self {
                rank: self.rank - 1,
                stars: stars - capacity,
                win_streak,
            }
        } else {
            Self {
                rank: self.rank,
                stars,
                win_streak,
            }
        }
    }

    pub fn apply_loss(self, tiering: &Tiering) -> Self {
        if self.is_top() {
            return self;
        }

        if self.stars > 0 {
            return Self {
                rank: self.rank,
                stars: self.stars - 1,
                win_streak: 0,
            };
        }

        // Out of stars: drop a rank unless sitting on a milestone floor.
        let rank = if is_milestone(self.rank) {
            self.rank
        } else {
            self.rank.saturating_add(1)
        };

        Self {
            rank,
            stars: tiering.capacity(rank),
            win_streak: 0,
        }
    }
}
