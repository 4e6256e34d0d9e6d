//! Things the snake can pick up: the ordinary food, the short-lived bonus
//! food and the power-up slot.

use rand::Rng;

use crate::board::Cell;
use crate::timers::Countdown;

pub const BONUS_TICKS: u32 = 100;
pub const TOKEN_TICKS: u32 = 150;
pub const CLAIM_TICKS: u32 = 200;

/// Always on the board; moves somewhere else when eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusFood {
    Dormant,
    Visible { cell: Cell, expires: Countdown },
}

impl BonusFood {
    pub fn is_visible(&self) -> bool {
        matches!(self, BonusFood::Visible { .. })
    }

    pub fn cell(&self) -> Option<Cell> {
        match self {
            BonusFood::Visible { cell, .. } => Some(*cell),
            BonusFood::Dormant => None,
        }
    }

    pub fn spawn(&mut self, cell: Cell) {
        *self = BonusFood::Visible { cell, expires: Countdown::new(BONUS_TICKS) };
    }

    /// Returns true if the bonus food expired on this tick.
    pub fn tick(&mut self) -> bool {
        if let BonusFood::Visible { expires, .. } = self {
            if expires.tick() {
                *self = BonusFood::Dormant;
                return true;
            }
        }
        false
    }

    /// Removes the bonus food if it sits on `head`.
    pub fn take_at(&mut self, head: Cell) -> bool {
        if self.cell() == Some(head) {
            *self = BonusFood::Dormant;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    SpeedBoost,
    Invincibility,
}

impl PowerUpKind {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            PowerUpKind::SpeedBoost
        } else {
            PowerUpKind::Invincibility
        }
    }
}

/// The single power-up slot: empty, a token waiting on the board, or an
/// effect running after the token was picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUp {
    Dormant,
    Token { cell: Cell, expires: Countdown },
    Claimed { kind: PowerUpKind, remaining: Countdown },
}

impl PowerUp {
    pub fn is_dormant(&self) -> bool {
        matches!(self, PowerUp::Dormant)
    }

    pub fn token_cell(&self) -> Option<Cell> {
        match self {
            PowerUp::Token { cell, .. } => Some(*cell),
            _ => None,
        }
    }

    pub fn active_kind(&self) -> Option<PowerUpKind> {
        match self {
            PowerUp::Claimed { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Ticks left on a claimed effect, zero otherwise.
    pub fn remaining(&self) -> u32 {
        match self {
            PowerUp::Claimed { remaining, .. } => remaining.remaining(),
            _ => 0,
        }
    }

    /// Places a token. Does nothing unless the slot is empty.
    pub fn spawn_token(&mut self, cell: Cell) -> bool {
        if !self.is_dormant() {
            return false;
        }
        *self = PowerUp::Token { cell, expires: Countdown::new(TOKEN_TICKS) };
        true
    }

    /// Returns true if an unclaimed token expired on this tick.
    pub fn tick_token(&mut self) -> bool {
        if let PowerUp::Token { expires, .. } = self {
            if expires.tick() {
                *self = PowerUp::Dormant;
                return true;
            }
        }
        false
    }

    /// Claims the token if it sits on `head`.
    pub fn claim_at(&mut self, head: Cell, kind: PowerUpKind) -> bool {
        if self.token_cell() != Some(head) {
            return false;
        }
        *self = PowerUp::Claimed { kind, remaining: Countdown::new(CLAIM_TICKS) };
        true
    }

    /// Runs down a claimed effect. Returns its kind on the tick it ends.
    pub fn tick_claim(&mut self) -> Option<PowerUpKind> {
        if let PowerUp::Claimed { kind, remaining } = self {
            let kind = *kind;
            if remaining.tick() {
                *self = PowerUp::Dormant;
                return Some(kind);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn bonus_food_expires_after_its_countdown() {
        let mut bonus = BonusFood::Dormant;
        bonus.spawn(Cell::new(40, 40));
        for _ in 0..BONUS_TICKS - 1 {
            assert!(!bonus.tick());
        }
        assert!(bonus.tick());
        assert_eq!(bonus, BonusFood::Dormant);
    }

    #[test]
    fn bonus_food_is_taken_only_on_its_cell() {
        let mut bonus = BonusFood::Dormant;
        assert!(!bonus.take_at(Cell::new(0, 0)));

        bonus.spawn(Cell::new(40, 40));
        assert!(!bonus.take_at(Cell::new(0, 0)));
        assert!(bonus.take_at(Cell::new(40, 40)));
        assert!(!bonus.is_visible());
    }

    #[test]
    fn token_expires_unclaimed() {
        let mut slot = PowerUp::Dormant;
        assert!(slot.spawn_token(Cell::new(20, 20)));
        for _ in 0..TOKEN_TICKS - 1 {
            assert!(!slot.tick_token());
        }
        assert!(slot.tick_token());
        assert!(slot.is_dormant());
    }

    #[test]
    fn only_one_power_up_at_a_time() {
        let mut slot = PowerUp::Dormant;
        assert!(slot.spawn_token(Cell::new(20, 20)));
        assert!(!slot.spawn_token(Cell::new(60, 60)));
        assert_eq!(slot.token_cell(), Some(Cell::new(20, 20)));

        assert!(slot.claim_at(Cell::new(20, 20), PowerUpKind::Invincibility));
        assert!(!slot.spawn_token(Cell::new(60, 60)));
        assert_eq!(slot.active_kind(), Some(PowerUpKind::Invincibility));
    }

    #[test]
    fn claimed_effect_runs_for_its_duration() {
        let mut slot = PowerUp::Dormant;
        slot.spawn_token(Cell::new(20, 20));
        assert!(!slot.claim_at(Cell::new(40, 20), PowerUpKind::SpeedBoost));
        assert!(slot.claim_at(Cell::new(20, 20), PowerUpKind::SpeedBoost));
        assert_eq!(slot.remaining(), CLAIM_TICKS);

        for _ in 0..CLAIM_TICKS - 1 {
            assert_eq!(slot.tick_claim(), None);
        }
        assert_eq!(slot.tick_claim(), Some(PowerUpKind::SpeedBoost));
        assert!(slot.is_dormant());
        assert_eq!(slot.tick_claim(), None);
    }

    #[test]
    fn random_kind_yields_both_variants() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let kinds: Vec<_> = (0..64).map(|_| PowerUpKind::random(&mut rng)).collect();
        assert!(kinds.contains(&PowerUpKind::SpeedBoost));
        assert!(kinds.contains(&PowerUpKind::Invincibility));
    }
}
