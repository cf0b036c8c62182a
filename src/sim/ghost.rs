//! Ghosts: identity, behaviour state and per-state movement
//!
//! ```text
//! LOCKED -> LEAVING_HOUSE -> HUNTING_PAC <-> FRIGHTENED
//!                 ^                              |
//!                 |                            eaten
//!          ENTERING_HOUSE <------------------- DEAD
//! ```

use glam::{IVec2, Vec2};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::creature::Creature;
use super::direction::{Direction, tiles_ahead};
use super::event::GameEvent;
use super::level::{GameVariant, LevelParams, speed};
use super::world::{GhostHouse, World};
use crate::consts::HTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GhostId {
    Red,
    Pink,
    Cyan,
    Orange,
}

impl GhostId {
    pub const ALL: [GhostId; 4] = [GhostId::Red, GhostId::Pink, GhostId::Cyan, GhostId::Orange];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        match index {
            0 => GhostId::Red,
            1 => GhostId::Pink,
            2 => GhostId::Cyan,
            3 => GhostId::Orange,
            _ => panic!("Illegal ghost ID: {index}"),
        }
    }

    pub fn name(self, variant: GameVariant) -> &'static str {
        match self {
            GhostId::Red => "Blinky",
            GhostId::Pink => "Pinky",
            GhostId::Cyan => "Inky",
            GhostId::Orange if variant == GameVariant::MsPacMan => "Sue",
            GhostId::Orange => "Clyde",
        }
    }

    /// Corner tile targeted while scattering
    pub fn scatter_tile(self) -> IVec2 {
        match self {
            GhostId::Red => IVec2::new(25, 0),
            GhostId::Pink => IVec2::new(2, 0),
            GhostId::Cyan => IVec2::new(27, 34),
            GhostId::Orange => IVec2::new(0, 34),
        }
    }

    pub fn start_dir(self) -> Direction {
        match self {
            GhostId::Red => Direction::Left,
            GhostId::Pink => Direction::Down,
            GhostId::Cyan | GhostId::Orange => Direction::Up,
        }
    }

    pub fn home_position(self, house: &GhostHouse) -> Vec2 {
        match self {
            GhostId::Red => house.entry_position,
            GhostId::Pink => house.seats[1],
            GhostId::Cyan => house.seats[0],
            GhostId::Orange => house.seats[2],
        }
    }

    /// Where a dead ghost goes before leaving the house again
    pub fn revival_position(self, house: &GhostHouse) -> Vec2 {
        match self {
            GhostId::Red => house.seats[1],
            other => other.home_position(house),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GhostState {
    Locked,
    LeavingHouse,
    HuntingPac,
    Frightened,
    Dead,
    EnteringHouse,
}

/// What a ghost needs to know about the rest of the game for one update
#[derive(Debug, Clone, Copy)]
pub struct GhostContext {
    pub pac_tile: IVec2,
    pub pac_dir: Direction,
    pub red_tile: IVec2,
    /// True in chase phases, false while scattering
    pub chasing: bool,
    pub params: LevelParams,
    pub cruise_elroy: i8,
}

impl GhostContext {
    fn pac_ahead(&self, n: i32) -> IVec2 {
        tiles_ahead(self.pac_tile, self.pac_dir, n)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub id: GhostId,
    pub body: Creature,
    pub state: GhostState,
    /// Private dot counter for the house release policy
    pub dot_counter: u32,
    /// Points shown after being eaten; non-zero until the kill pause ends
    pub bounty: u32,
}

impl Ghost {
    pub fn new(id: GhostId, variant: GameVariant) -> Self {
        Self {
            id,
            body: Creature::new(id.name(variant)),
            state: GhostState::Locked,
            dot_counter: 0,
            bounty: 0,
        }
    }

    pub fn is(&self, state: GhostState) -> bool {
        self.state == state
    }

    pub fn tile(&self) -> IVec2 {
        self.body.tile()
    }

    pub fn set_state(&mut self, state: GhostState) {
        if self.state != state {
            log::trace!("{} {:?} -> {:?}", self.body.name, self.state, state);
        }
        self.state = state;
        self.body.can_pass_door = matches!(state, GhostState::LeavingHouse | GhostState::EnteringHouse);
    }

    /// Put the ghost at its home position, locked
    pub fn reset(&mut self, house: &GhostHouse) {
        self.body.place_at(self.id.home_position(house));
        self.body.set_both_dirs(self.id.start_dir());
        self.body.target_tile = None;
        self.body.visible = true;
        self.body.speed = 0.0;
        self.bounty = 0;
        self.set_state(GhostState::Locked);
    }

    /// Ghost is eaten: it returns to the house as a pair of eyes
    pub fn kill(&mut self, house: &GhostHouse, bounty: u32) {
        self.bounty = bounty;
        self.set_state(GhostState::Dead);
        self.body.target_tile = Some(house.entry_tile());
    }

    /// Release from the house; the red ghost starts outside and hunts at once
    pub fn unlock(&mut self) -> GameEvent {
        if self.id == GhostId::Red {
            self.set_state(GhostState::HuntingPac);
        } else {
            self.set_state(GhostState::LeavingHouse);
        }
        GameEvent::GhostStartsLeavingHouse { ghost: self.id }
    }

    /// Target tile while hunting
    pub fn hunting_target(&self, ctx: &GhostContext) -> IVec2 {
        let elroy_chase = self.id == GhostId::Red && ctx.cruise_elroy > 0;
        if !ctx.chasing && !elroy_chase {
            return self.id.scatter_tile();
        }
        match self.id {
            GhostId::Red => ctx.pac_tile,
            GhostId::Pink => ctx.pac_ahead(4),
            GhostId::Cyan => ctx.pac_ahead(2) * 2 - ctx.red_tile,
            GhostId::Orange => {
                let distance = (self.tile() - ctx.pac_tile).as_vec2().length();
                if distance < 8.0 {
                    self.id.scatter_tile()
                } else {
                    ctx.pac_tile
                }
            }
        }
    }

    fn select_speed(&self, world: &World, ctx: &GhostContext) -> f32 {
        let p = &ctx.params;
        let in_tunnel = world.is_tunnel(self.tile());
        match self.state {
            GhostState::Locked | GhostState::LeavingHouse => 0.75 * speed(p.ghost_speed),
            GhostState::Dead | GhostState::EnteringHouse => 2.0 * speed(p.ghost_speed),
            GhostState::Frightened if in_tunnel => speed(p.ghost_speed_tunnel),
            GhostState::Frightened => speed(p.ghost_speed_frightened),
            GhostState::HuntingPac if in_tunnel => speed(p.ghost_speed_tunnel),
            GhostState::HuntingPac => match (self.id, ctx.cruise_elroy) {
                (GhostId::Red, 1) => speed(p.elroy1_speed),
                (GhostId::Red, 2) => speed(p.elroy2_speed),
                _ => speed(p.ghost_speed),
            },
        }
    }

    /// One tick of behaviour. Returns an event when the ghost changed state
    /// on its own (house entered, left, revived).
    pub fn update(&mut self, world: &World, ctx: &GhostContext, rng: &mut Pcg32) -> Option<GameEvent> {
        self.body.speed = self.select_speed(world, ctx);
        match self.state {
            GhostState::Locked => {
                self.bounce(world.house());
                None
            }
            GhostState::LeavingHouse => self.leave_house(world.house()),
            GhostState::HuntingPac => {
                self.body.target_tile = Some(self.hunting_target(ctx));
                let forbid_up = world.is_upward_blocked(self.tile());
                self.body.navigate_towards_target(world, forbid_up);
                self.body.try_moving(world);
                None
            }
            GhostState::Frightened => {
                self.body.target_tile = None;
                self.body.roam_randomly(world, rng);
                self.body.try_moving(world);
                None
            }
            GhostState::Dead => self.return_to_house(world),
            GhostState::EnteringHouse => self.enter_house(world.house()),
        }
    }

    /// Locked ghosts hop up and down on their seat
    fn bounce(&mut self, house: &GhostHouse) {
        if self.id == GhostId::Red {
            return;
        }
        let seat_y = self.id.home_position(house).y;
        let amplitude = HTS as f32 / 2.0;
        if self.body.position.y <= seat_y - amplitude {
            self.body.set_both_dirs(Direction::Down);
        } else if self.body.position.y >= seat_y + amplitude {
            self.body.set_both_dirs(Direction::Up);
        }
        self.body.position += self.body.move_dir.unit() * self.body.speed;
    }

    /// Move to the house center, then up through the door
    fn leave_house(&mut self, house: &GhostHouse) -> Option<GameEvent> {
        let entry = house.entry_position;
        let step = self.body.speed;
        let pos = self.body.position;
        if pos.y <= entry.y {
            self.body.place_at(entry);
            self.body.set_both_dirs(Direction::Left);
            self.set_state(GhostState::HuntingPac);
            return Some(GameEvent::GhostCompletesLeavingHouse { ghost: self.id });
        }
        let center_x = house.center_x();
        if (pos.x - center_x).abs() <= step {
            self.body.position.x = center_x;
            self.body.set_both_dirs(Direction::Up);
            self.body.position.y = (pos.y - step).max(entry.y);
        } else if pos.x < center_x {
            self.body.set_both_dirs(Direction::Right);
            self.body.position.x += step;
        } else {
            self.body.set_both_dirs(Direction::Left);
            self.body.position.x -= step;
        }
        None
    }

    fn return_to_house(&mut self, world: &World) -> Option<GameEvent> {
        let house = world.house();
        self.body.target_tile = Some(house.entry_tile());
        self.body.navigate_towards_target(world, false);
        self.body.try_moving(world);
        let pos = self.body.position;
        let entry = house.entry_position;
        let arrived = (pos.y - entry.y).abs() < 0.5 && (pos.x - entry.x).abs() <= self.body.speed;
        if arrived {
            self.body.place_at(entry);
            self.body.set_both_dirs(Direction::Down);
            self.body.target_tile = None;
            self.set_state(GhostState::EnteringHouse);
            return Some(GameEvent::GhostEntersHouse { ghost: self.id });
        }
        None
    }

    /// Sink down through the door, then slide to the revival seat
    fn enter_house(&mut self, house: &GhostHouse) -> Option<GameEvent> {
        let seat = self.id.revival_position(house);
        let step = self.body.speed;
        let pos = self.body.position;
        if pos.y < seat.y {
            self.body.set_both_dirs(Direction::Down);
            self.body.position.y = (pos.y + step).min(seat.y);
        } else if (pos.x - seat.x).abs() > step {
            let dir = if pos.x < seat.x { Direction::Right } else { Direction::Left };
            self.body.set_both_dirs(dir);
            self.body.position.x += dir.unit().x * step;
        } else {
            self.body.position = seat;
            self.body.set_both_dirs(Direction::Up);
            self.set_state(GhostState::LeavingHouse);
            return Some(GameEvent::GhostRevived { ghost: self.id });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::LevelParams;
    use crate::tile_center;
    use rand::SeedableRng;

    fn context(pac_tile: IVec2, pac_dir: Direction, chasing: bool) -> GhostContext {
        GhostContext {
            pac_tile,
            pac_dir,
            red_tile: IVec2::new(20, 8),
            chasing,
            params: LevelParams::for_level(GameVariant::PacMan, 1),
            cruise_elroy: 0,
        }
    }

    fn ghost_at(id: GhostId, tile: IVec2, state: GhostState) -> Ghost {
        let mut ghost = Ghost::new(id, GameVariant::PacMan);
        ghost.body.place_at(tile_center(tile));
        ghost.set_state(state);
        ghost
    }

    #[test]
    #[should_panic(expected = "Illegal ghost ID")]
    fn test_illegal_ghost_id() {
        GhostId::from_index(4);
    }

    #[test]
    fn test_ids_roundtrip() {
        for id in GhostId::ALL {
            assert_eq!(GhostId::from_index(id.index()), id);
        }
        assert_eq!(GhostId::Orange.name(GameVariant::MsPacMan), "Sue");
    }

    #[test]
    fn test_scatter_targets() {
        let ctx = context(IVec2::new(13, 26), Direction::Left, false);
        for id in GhostId::ALL {
            let ghost = ghost_at(id, IVec2::new(6, 8), GhostState::HuntingPac);
            assert_eq!(ghost.hunting_target(&ctx), id.scatter_tile());
        }
    }

    #[test]
    fn test_chase_targets() {
        let ctx = context(IVec2::new(13, 26), Direction::Up, true);
        let red = ghost_at(GhostId::Red, IVec2::new(20, 8), GhostState::HuntingPac);
        assert_eq!(red.hunting_target(&ctx), IVec2::new(13, 26));

        let pink = ghost_at(GhostId::Pink, IVec2::new(1, 4), GhostState::HuntingPac);
        assert_eq!(pink.hunting_target(&ctx), IVec2::new(9, 22));

        // Two ahead with overflow is (11, 24); doubled minus red (20, 8)
        let cyan = ghost_at(GhostId::Cyan, IVec2::new(1, 4), GhostState::HuntingPac);
        assert_eq!(cyan.hunting_target(&ctx), IVec2::new(2, 40));

        let far = ghost_at(GhostId::Orange, IVec2::new(1, 4), GhostState::HuntingPac);
        assert_eq!(far.hunting_target(&ctx), IVec2::new(13, 26));
        let near = ghost_at(GhostId::Orange, IVec2::new(12, 23), GhostState::HuntingPac);
        assert_eq!(near.hunting_target(&ctx), GhostId::Orange.scatter_tile());
    }

    #[test]
    fn test_elroy_chases_while_scattering() {
        let mut ctx = context(IVec2::new(13, 26), Direction::Left, false);
        ctx.cruise_elroy = 1;
        let red = ghost_at(GhostId::Red, IVec2::new(20, 8), GhostState::HuntingPac);
        assert_eq!(red.hunting_target(&ctx), IVec2::new(13, 26));
        ctx.cruise_elroy = -1;
        assert_eq!(red.hunting_target(&ctx), GhostId::Red.scatter_tile());
    }

    #[test]
    fn test_speeds_by_state() {
        let world = World::pacman();
        let mut ctx = context(IVec2::new(13, 26), Direction::Left, true);
        let mut red = ghost_at(GhostId::Red, IVec2::new(6, 8), GhostState::HuntingPac);
        assert!((red.select_speed(&world, &ctx) - 0.9375).abs() < 1e-5);
        ctx.cruise_elroy = 2;
        assert!((red.select_speed(&world, &ctx) - speed(85)).abs() < 1e-5);
        red.set_state(GhostState::Frightened);
        assert!((red.select_speed(&world, &ctx) - speed(50)).abs() < 1e-5);
        red.body.place_at(tile_center(IVec2::new(2, 17)));
        assert!((red.select_speed(&world, &ctx) - speed(40)).abs() < 1e-5);
        red.set_state(GhostState::Dead);
        assert!((red.select_speed(&world, &ctx) - 2.0 * speed(75)).abs() < 1e-5);
    }

    #[test]
    fn test_leaves_house_and_hunts() {
        let world = World::pacman();
        let ctx = context(IVec2::new(13, 26), Direction::Left, false);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut cyan = Ghost::new(GhostId::Cyan, GameVariant::PacMan);
        cyan.reset(world.house());
        cyan.unlock();
        assert_eq!(cyan.state, GhostState::LeavingHouse);
        let mut event = None;
        for _ in 0..200 {
            event = cyan.update(&world, &ctx, &mut rng);
            if event.is_some() {
                break;
            }
        }
        assert_eq!(event, Some(GameEvent::GhostCompletesLeavingHouse { ghost: GhostId::Cyan }));
        assert_eq!(cyan.state, GhostState::HuntingPac);
        assert_eq!(cyan.body.position, world.house().entry_position);
        assert_eq!(cyan.body.move_dir, Direction::Left);
        assert!(!cyan.body.can_pass_door);
    }

    #[test]
    fn test_red_unlocks_directly_into_hunting() {
        let world = World::pacman();
        let mut red = Ghost::new(GhostId::Red, GameVariant::PacMan);
        red.reset(world.house());
        red.unlock();
        assert_eq!(red.state, GhostState::HuntingPac);
    }

    #[test]
    fn test_dead_ghost_returns_and_revives() {
        let world = World::pacman();
        let ctx = context(IVec2::new(13, 26), Direction::Left, true);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut pink = ghost_at(GhostId::Pink, IVec2::new(17, 14), GhostState::Frightened);
        pink.body.set_both_dirs(Direction::Left);
        pink.kill(world.house(), 200);
        assert_eq!(pink.state, GhostState::Dead);

        let mut events = Vec::new();
        for _ in 0..400 {
            if let Some(event) = pink.update(&world, &ctx, &mut rng) {
                events.push(event);
            }
            if pink.is(GhostState::HuntingPac) {
                break;
            }
        }
        assert_eq!(
            events,
            vec![
                GameEvent::GhostEntersHouse { ghost: GhostId::Pink },
                GameEvent::GhostRevived { ghost: GhostId::Pink },
                GameEvent::GhostCompletesLeavingHouse { ghost: GhostId::Pink },
            ]
        );
    }

    #[test]
    fn test_locked_ghost_stays_in_house() {
        let world = World::pacman();
        let ctx = context(IVec2::new(13, 26), Direction::Left, true);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut orange = Ghost::new(GhostId::Orange, GameVariant::PacMan);
        orange.reset(world.house());
        for _ in 0..500 {
            orange.update(&world, &ctx, &mut rng);
            assert!(world.house().contains(orange.tile()));
        }
    }
}
