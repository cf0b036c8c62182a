//! Bonus fruit
//!
//! Pac-Man shows a static bonus below the ghost house. In Ms. Pac-Man the
//! bonus enters through a portal, tumbles around the house and leaves the
//! maze on the other side.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::creature::Creature;
use super::direction::Direction;
use super::event::GameEvent;
use super::level::{BonusSymbol, GameVariant};
use super::timer::TickTimer;
use super::world::World;
use crate::consts::FPS;
use crate::{half_tile_right_of, sec_to_ticks, tile_center};

/// How long the points stay visible after eating
const EATEN_TICKS: u64 = sec_to_ticks(2);

/// Pixels per tick of the moving bonus
const MOVING_SPEED: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusState {
    Inactive,
    Edible,
    Eaten,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bonus {
    moving: bool,
    state: BonusState,
    symbol: Option<BonusSymbol>,
    points: u32,
    pub body: Creature,
    timer: TickTimer,
    route: Vec<IVec2>,
    route_index: usize,
}

impl Bonus {
    pub fn new(variant: GameVariant, points: u32) -> Self {
        let mut body = Creature::new("Bonus");
        body.can_teleport = false;
        Self {
            moving: variant == GameVariant::MsPacMan,
            state: BonusState::Inactive,
            symbol: None,
            points,
            body,
            timer: TickTimer::new("BonusTimer"),
            route: Vec::new(),
            route_index: 0,
        }
    }

    pub fn state(&self) -> BonusState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Symbol while edible or showing its points
    pub fn symbol(&self) -> Option<BonusSymbol> {
        match self.state {
            BonusState::Inactive => None,
            _ => self.symbol,
        }
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn tile(&self) -> IVec2 {
        self.body.tile()
    }

    pub fn route(&self) -> &[IVec2] {
        &self.route
    }

    /// Make the bonus edible
    pub fn activate(&mut self, symbol: BonusSymbol, world: &World, rng: &mut Pcg32) -> GameEvent {
        self.symbol = Some(symbol);
        self.state = BonusState::Edible;
        self.body.visible = true;
        if self.moving {
            let (start, route) = Self::random_route(world, rng);
            self.set_route(start, route);
            self.body.speed = MOVING_SPEED;
            self.timer.reset_indefinite();
        } else {
            self.body.place_at(half_tile_right_of(IVec2::new(13, 20)));
            self.body.speed = 0.0;
            self.timer.reset(sec_to_ticks(9) + rng.random_range(0..FPS));
        }
        self.timer.start();
        log::info!("Bonus {:?} ({} points) edible at {}", symbol, self.points, self.tile());
        GameEvent::BonusActivated {
            symbol,
            tile: self.tile(),
        }
    }

    /// Enter through one portal, pass above and below the house, leave
    /// through the opposite side of a (possibly different) portal
    fn random_route(world: &World, rng: &mut Pcg32) -> (IVec2, Vec<IVec2>) {
        let portals = world.portals();
        let entry = portals[rng.random_range(0..portals.len())];
        let exit = portals[rng.random_range(0..portals.len())];
        let from_left = rng.random_bool(0.5);
        let (start, goal) = if from_left {
            (entry.left, exit.right)
        } else {
            (entry.right, exit.left)
        };
        let house = world.house();
        let above_house = house.entry_tile();
        let below_house = IVec2::new(above_house.x, house.top_left.y + house.size.y);
        (start, vec![above_house, below_house, goal])
    }

    /// Place the bonus on `start` heading into the maze
    pub fn set_route(&mut self, start: IVec2, route: Vec<IVec2>) {
        assert!(!route.is_empty(), "Bonus route must contain at least one tile");
        self.body.place_at(tile_center(start));
        let dir = if start.x < 0 { Direction::Right } else { Direction::Left };
        self.body.set_both_dirs(dir);
        self.body.target_tile = Some(route[0]);
        self.route = route;
        self.route_index = 0;
    }

    pub fn deactivate(&mut self) {
        self.state = BonusState::Inactive;
        self.body.visible = false;
        self.body.speed = 0.0;
        self.timer.reset(0);
    }

    /// One tick. Returns [`GameEvent::BonusEaten`] when Pac got it; the
    /// caller awards the points.
    pub fn update(&mut self, world: &World, pac_tile: IVec2) -> Option<GameEvent> {
        match self.state {
            BonusState::Inactive => None,
            BonusState::Edible => {
                if pac_tile == self.tile() {
                    self.state = BonusState::Eaten;
                    self.body.speed = 0.0;
                    self.timer.reset(EATEN_TICKS);
                    self.timer.start();
                    log::info!("Bonus eaten at {}, {} points", self.tile(), self.points);
                    return Some(GameEvent::BonusEaten {
                        points: self.points,
                        tile: self.tile(),
                    });
                }
                let finished = if self.moving {
                    self.follow_route(world)
                } else {
                    self.timer.advance()
                };
                if finished {
                    log::info!("Bonus expired at {}", self.tile());
                    self.deactivate();
                    return Some(GameEvent::BonusExpired);
                }
                None
            }
            BonusState::Eaten => {
                if self.timer.advance() {
                    self.deactivate();
                    return Some(GameEvent::BonusExpired);
                }
                None
            }
        }
    }

    /// Steer towards the next route tile. Returns true when the last one
    /// was reached. On the last leg any portal ends the route since the
    /// bonus cannot teleport.
    fn follow_route(&mut self, world: &World) -> bool {
        let tile = self.tile();
        let last_leg = self.route_index + 1 == self.route.len();
        if tile == self.route[self.route_index] || (last_leg && world.is_portal(tile)) {
            self.route_index += 1;
            if self.route_index == self.route.len() {
                return true;
            }
            self.body.target_tile = Some(self.route[self.route_index]);
        }
        self.body.navigate_towards_target(world, false);
        self.body.try_moving(world);
        false
    }
}
