/// Level number and progress toward the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelState {
    level: u32,
    foods_eaten: u32,
    target: u32,
    progression: bool,
}

impl LevelState {
    pub fn new(target: u32, progression: bool) -> Self {
        Self {
            level: 1,
            foods_eaten: 0,
            target: target.max(1),
            progression,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Foods eaten since the last level-up (or since the run started).
    pub fn foods_eaten(&self) -> u32 {
        self.foods_eaten
    }

    /// Counts one food. Returns `true` if this food completed the level.
    pub fn record_food(&mut self) -> bool {
        self.foods_eaten += 1;
        if self.progression && self.foods_eaten >= self.target {
            self.level += 1;
            self.foods_eaten = 0;
            return true;
        }
        false
    }
}
