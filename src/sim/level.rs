//! Level parameters and the per-level game data
//!
//! Speeds in [`LevelParams`] are percentages of [`BASE_SPEED`]. Levels beyond
//! the last table row reuse that row.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bonus::Bonus;
use super::house::HouseRules;
use super::world::World;
use crate::consts::BASE_SPEED;

/// Which arcade game is simulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameVariant {
    #[default]
    PacMan,
    MsPacMan,
}

impl GameVariant {
    /// Stable key used for file names and logs
    pub fn key(self) -> &'static str {
        match self {
            GameVariant::PacMan => "pacman",
            GameVariant::MsPacMan => "ms_pacman",
        }
    }

    pub fn player_name(self) -> &'static str {
        match self {
            GameVariant::PacMan => "Pac-Man",
            GameVariant::MsPacMan => "Ms. Pac-Man",
        }
    }
}

/// Bonus symbols of both games
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusSymbol {
    Cherries,
    Strawberry,
    Peach,
    Apple,
    Grapes,
    Galaxian,
    Bell,
    Key,
    Pretzel,
    Pear,
    Banana,
}

impl BonusSymbol {
    /// Symbols Ms. Pac-Man picks from at random from level 8 on
    pub const MS_PACMAN_SYMBOLS: [BonusSymbol; 7] = [
        BonusSymbol::Cherries,
        BonusSymbol::Strawberry,
        BonusSymbol::Peach,
        BonusSymbol::Pretzel,
        BonusSymbol::Apple,
        BonusSymbol::Pear,
        BonusSymbol::Banana,
    ];

    pub fn points(self, variant: GameVariant) -> u32 {
        match variant {
            GameVariant::PacMan => match self {
                BonusSymbol::Cherries => 100,
                BonusSymbol::Strawberry => 300,
                BonusSymbol::Peach => 500,
                BonusSymbol::Apple => 700,
                BonusSymbol::Grapes => 1000,
                BonusSymbol::Galaxian => 2000,
                BonusSymbol::Bell => 3000,
                BonusSymbol::Key => 5000,
                other => panic!("{other:?} is not a Pac-Man bonus symbol"),
            },
            GameVariant::MsPacMan => match self {
                BonusSymbol::Cherries => 100,
                BonusSymbol::Strawberry => 200,
                BonusSymbol::Peach => 500,
                BonusSymbol::Pretzel => 700,
                BonusSymbol::Apple => 1000,
                BonusSymbol::Pear => 2000,
                BonusSymbol::Banana => 5000,
                other => panic!("{other:?} is not a Ms. Pac-Man bonus symbol"),
            },
        }
    }
}

/// One row of the level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    pub bonus_symbol: BonusSymbol,
    pub player_speed: u8,
    pub ghost_speed: u8,
    pub ghost_speed_tunnel: u8,
    pub elroy1_dots_left: u32,
    pub elroy1_speed: u8,
    pub elroy2_dots_left: u32,
    pub elroy2_speed: u8,
    pub player_speed_powered: u8,
    pub ghost_speed_frightened: u8,
    pub frightened_seconds: u32,
    pub num_flashes: u32,
}

#[allow(clippy::too_many_arguments)]
const fn row(
    bonus_symbol: BonusSymbol,
    player_speed: u8,
    ghost_speed: u8,
    ghost_speed_tunnel: u8,
    elroy1_dots_left: u32,
    elroy1_speed: u8,
    elroy2_dots_left: u32,
    elroy2_speed: u8,
    player_speed_powered: u8,
    ghost_speed_frightened: u8,
    frightened_seconds: u32,
    num_flashes: u32,
) -> LevelParams {
    LevelParams {
        bonus_symbol,
        player_speed,
        ghost_speed,
        ghost_speed_tunnel,
        elroy1_dots_left,
        elroy1_speed,
        elroy2_dots_left,
        elroy2_speed,
        player_speed_powered,
        ghost_speed_frightened,
        frightened_seconds,
        num_flashes,
    }
}

use BonusSymbol::*;

#[rustfmt::skip]
const PACMAN_LEVELS: [LevelParams; 21] = [
    row(Cherries,    80, 75, 40,  20,  80, 10,  85,  90, 50, 6, 5),
    row(Strawberry,  90, 85, 45,  30,  90, 15,  95,  95, 55, 5, 5),
    row(Peach,       90, 85, 45,  40,  90, 20,  95,  95, 55, 4, 5),
    row(Peach,       90, 85, 45,  40,  90, 20,  95,  95, 55, 3, 5),
    row(Apple,      100, 95, 50,  40, 100, 20, 105, 100, 60, 2, 5),
    row(Apple,      100, 95, 50,  50, 100, 25, 105, 100, 60, 5, 5),
    row(Grapes,     100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5),
    row(Grapes,     100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5),
    row(Galaxian,   100, 95, 50,  60, 100, 30, 105, 100, 60, 1, 3),
    row(Galaxian,   100, 95, 50,  60, 100, 30, 105, 100, 60, 5, 5),
    row(Bell,       100, 95, 50,  60, 100, 30, 105, 100, 60, 2, 5),
    row(Bell,       100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3),
    row(Key,        100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3),
    row(Key,        100, 95, 50,  80, 100, 40, 105, 100, 60, 3, 5),
    row(Key,        100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    row(Key,        100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    row(Key,        100, 95, 50, 100, 100, 50, 105,   0,  0, 0, 0),
    row(Key,        100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    row(Key,        100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
    row(Key,        100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
    row(Key,         90, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
];

#[rustfmt::skip]
const MS_PACMAN_LEVELS: [LevelParams; 21] = [
    row(Cherries,    80, 75, 40,  20,  80, 10,  85,  90, 50, 6, 5),
    row(Strawberry,  90, 85, 45,  30,  90, 15,  95,  95, 55, 5, 5),
    row(Peach,       90, 85, 45,  40,  90, 20,  95,  95, 55, 4, 5),
    row(Pretzel,     90, 85, 45,  40,  90, 20,  95,  95, 55, 3, 5),
    row(Apple,      100, 95, 50,  40, 100, 20, 105, 100, 60, 2, 5),
    row(Pear,       100, 95, 50,  50, 100, 25, 105, 100, 60, 5, 5),
    row(Banana,     100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5),
    row(Banana,     100, 95, 50,  50, 100, 25, 105, 100, 60, 2, 5),
    row(Banana,     100, 95, 50,  60, 100, 30, 105, 100, 60, 1, 3),
    row(Banana,     100, 95, 50,  60, 100, 30, 105, 100, 60, 4, 5),
    row(Banana,     100, 95, 50,  60, 100, 30, 105, 100, 60, 2, 5),
    row(Banana,     100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3),
    row(Banana,     100, 95, 50,  80, 100, 40, 105, 100, 60, 1, 3),
    row(Banana,     100, 95, 50,  80, 100, 40, 105, 100, 60, 3, 5),
    row(Banana,     100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    row(Banana,     100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    row(Banana,     100, 95, 50, 100, 100, 50, 105,   0,  0, 0, 0),
    row(Banana,     100, 95, 50, 100, 100, 50, 105, 100, 60, 1, 3),
    row(Banana,     100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
    row(Banana,     100, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
    row(Banana,      90, 95, 50, 120, 100, 60, 105,   0,  0, 0, 0),
];

impl LevelParams {
    /// Parameters of a level, clamped to the last table row
    pub fn for_level(variant: GameVariant, number: u32) -> LevelParams {
        assert!(number >= 1, "Level number must be at least 1, but is: {number}");
        let table = match variant {
            GameVariant::PacMan => &PACMAN_LEVELS,
            GameVariant::MsPacMan => &MS_PACMAN_LEVELS,
        };
        let index = (number as usize - 1).min(table.len() - 1);
        table[index]
    }
}

/// Converts a speed percentage into pixels per tick
pub fn speed(percentage: u8) -> f32 {
    percentage as f32 * BASE_SPEED / 100.0
}

/// Intermission played after a level (0 = none)
pub fn intermission_after(level_number: u32) -> u8 {
    match level_number {
        2 => 1,
        5 => 2,
        9 | 13 | 17 => 3,
        _ => 0,
    }
}

/// Ms. Pac-Man maze shown on a level (1..=6)
pub fn ms_pacman_maze_number(level_number: u32) -> u32 {
    match level_number {
        1 | 2 => 1,
        3..=5 => 2,
        6..=9 => 3,
        10..=13 => 4,
        n if (n - 14) % 8 < 4 => 5,
        _ => 6,
    }
}

/// Map layout behind a Ms. Pac-Man maze (mazes 5 and 6 reuse maps 3 and 4)
pub fn ms_pacman_map_number(maze_number: u32) -> u32 {
    match maze_number {
        5 => 3,
        6 => 4,
        n => n,
    }
}

/// Everything that lives exactly as long as one level
#[derive(Debug, Clone)]
pub struct GameLevel {
    pub number: u32,
    pub params: LevelParams,
    pub maze_number: u32,
    pub world: World,
    pub bonus: Bonus,
    pub house_rules: HouseRules,
    /// Ghosts killed in this level
    pub num_ghosts_killed: u32,
    /// Cruise Elroy state of the red ghost: 0 off, 1 or 2 active, negative when paused
    pub cruise_elroy: i8,
}

impl GameLevel {
    pub fn new(variant: GameVariant, number: u32, rng: &mut Pcg32) -> Self {
        let mut params = LevelParams::for_level(variant, number);
        let (maze_number, world) = match variant {
            GameVariant::PacMan => (1, World::pacman()),
            GameVariant::MsPacMan => {
                let maze = ms_pacman_maze_number(number);
                (maze, World::ms_pacman(ms_pacman_map_number(maze)))
            }
        };
        if variant == GameVariant::MsPacMan && number >= 8 {
            let symbols = BonusSymbol::MS_PACMAN_SYMBOLS;
            params.bonus_symbol = symbols[rng.random_range(0..symbols.len())];
        }
        let bonus = Bonus::new(variant, params.bonus_symbol.points(variant));
        Self {
            number,
            params,
            maze_number,
            world,
            bonus,
            house_rules: HouseRules::new(number),
            num_ghosts_killed: 0,
            cruise_elroy: 0,
        }
    }

    /// Start cruise elroy mode when the remaining food hits a threshold
    pub fn check_cruise_elroy(&mut self) {
        let remaining = self.world.food_remaining();
        if remaining == self.params.elroy1_dots_left {
            self.cruise_elroy = 1;
            log::info!("Cruise Elroy 1 (food left: {remaining})");
        } else if remaining == self.params.elroy2_dots_left {
            self.cruise_elroy = 2;
            log::info!("Cruise Elroy 2 (food left: {remaining})");
        }
    }

    /// Paused elroy mode keeps its level but has no effect
    pub fn pause_cruise_elroy(&mut self) {
        if self.cruise_elroy > 0 {
            self.cruise_elroy = -self.cruise_elroy;
            log::debug!("Cruise Elroy paused");
        }
    }

    pub fn resume_cruise_elroy(&mut self) {
        if self.cruise_elroy < 0 {
            self.cruise_elroy = -self.cruise_elroy;
            log::debug!("Cruise Elroy {} resumed", self.cruise_elroy);
        }
    }

    pub fn is_complete(&self) -> bool {
        self.world.food_remaining() == 0
    }
}
