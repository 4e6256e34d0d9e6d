pub const FOOD_POINTS: u32 = 10;
pub const BONUS_POINTS: u32 = 50;
pub const POINTS_PER_LEVEL: u32 = 50;

pub fn level_for(score: u32) -> u32 {
    1 + score / POINTS_PER_LEVEL
}

/// Score and level of one session. The level always follows from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    score: u32,
    level: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Scoreboard { score: 0, level: 1 }
    }
}

impl Scoreboard {
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Adds points and returns how many levels were gained.
    pub fn add(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        let level = level_for(self.score);
        let gained = level - self.level;
        self.level = level;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_formula() {
        assert_eq!(level_for(0), 1);
        assert_eq!(level_for(40), 1);
        assert_eq!(level_for(50), 2);
        assert_eq!(level_for(149), 3);
    }

    #[test]
    fn crossing_a_multiple_gains_a_level() {
        let mut board = Scoreboard::default();
        for _ in 0..4 {
            assert_eq!(board.add(FOOD_POINTS), 0);
        }
        assert_eq!(board.add(FOOD_POINTS), 1);
        assert_eq!(board.score(), 50);
        assert_eq!(board.level(), 2);
    }

    #[test]
    fn bonus_can_cross_a_multiple_mid_way() {
        let mut board = Scoreboard::default();
        board.add(FOOD_POINTS);
        assert_eq!(board.add(BONUS_POINTS), 1);
        assert_eq!(board.score(), 60);
        assert_eq!(board.level(), level_for(60));
    }
}
