//! Tile-grid movement shared by the player, the ghosts and the moving bonus
//!
//! A creature's position is the pixel center of its collision box; its tile
//! is always derived from that position, never stored. Movement per tick:
//!
//! 1. Teleport through a portal (and do nothing else this tick).
//! 2. Try the wish direction. Turning requires being within one tick of the
//!    tile center on the perpendicular axis.
//! 3. If that got stuck, keep going in the current move direction.
//!
//! Target steering only happens when a new tile was entered or the creature
//! is stuck, which gives the arcade "committed" cornering feel.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::world::World;
use crate::{tile_at, tile_center};

/// What happened during one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub moved: bool,
    pub tunnel_entered: bool,
    pub teleported: bool,
}

/// Movement state shared by every moving actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub position: Vec2,
    /// Pixels per tick
    pub speed: f32,
    pub move_dir: Direction,
    pub wish_dir: Direction,
    pub target_tile: Option<IVec2>,
    pub visible: bool,
    pub new_tile_entered: bool,
    pub stuck: bool,
    pub can_teleport: bool,
    /// Whether the ghost-house door may be passed
    pub can_pass_door: bool,
}

impl Creature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec2::ZERO,
            speed: 0.0,
            move_dir: Direction::Right,
            wish_dir: Direction::Right,
            target_tile: None,
            visible: false,
            new_tile_entered: true,
            stuck: false,
            can_teleport: true,
            can_pass_door: false,
        }
    }

    pub fn tile(&self) -> IVec2 {
        tile_at(self.position)
    }

    /// Offset from the center of the current tile
    pub fn offset(&self) -> Vec2 {
        self.position - tile_center(self.tile())
    }

    fn set_offset(&mut self, offset: Vec2) {
        self.position = tile_center(self.tile()) + offset;
    }

    pub fn velocity(&self) -> Vec2 {
        self.move_dir.unit() * self.speed
    }

    pub fn place_at(&mut self, position: Vec2) {
        self.position = position;
        self.new_tile_entered = true;
        self.stuck = false;
    }

    pub fn set_both_dirs(&mut self, dir: Direction) {
        self.move_dir = dir;
        self.wish_dir = dir;
    }

    pub fn same_tile(&self, other: &Creature) -> bool {
        self.tile() == other.tile()
    }

    pub fn can_access_tile(&self, world: &World, tile: IVec2) -> bool {
        if !world.inside_bounds(tile) {
            return world.is_portal(tile);
        }
        if world.house().is_door(tile) {
            return self.can_pass_door;
        }
        !world.is_wall(tile)
    }

    /// Reverse if the tile behind is accessible
    pub fn force_turning_back(&mut self, world: &World) {
        let back = self.move_dir.opposite();
        if self.can_access_tile(world, self.tile() + back.vector()) {
            self.set_both_dirs(back);
            log::trace!("{} turns back {:?}", self.name, back);
        }
    }

    /// Advance one tick through the world
    pub fn try_moving(&mut self, world: &World) -> MoveResult {
        if self.can_teleport && self.try_teleport(world) {
            return MoveResult {
                moved: true,
                tunnel_entered: false,
                teleported: true,
            };
        }
        let tile_before = self.tile();
        self.try_moving_dir(world, self.wish_dir);
        if self.stuck {
            self.try_moving_dir(world, self.move_dir);
        } else {
            self.move_dir = self.wish_dir;
        }
        let tile_after = self.tile();
        MoveResult {
            moved: !self.stuck,
            tunnel_entered: tile_after != tile_before
                && world.is_tunnel(tile_after)
                && !world.is_tunnel(tile_before),
            teleported: false,
        }
    }

    fn try_teleport(&mut self, world: &World) -> bool {
        let tile = self.tile();
        let destination = world.portals().iter().find_map(|portal| {
            match self.move_dir {
                Direction::Right if tile == portal.right => Some(portal.left),
                Direction::Left if tile == portal.left => Some(portal.right),
                _ => None,
            }
        });
        match destination {
            Some(destination) => {
                self.place_at(tile_center(destination));
                log::trace!("{} teleported to {}", self.name, destination);
                true
            }
            None => false,
        }
    }

    fn try_moving_dir(&mut self, world: &World, dir: Direction) {
        let tile = self.tile();
        let neighbor = tile + dir.vector();
        let speed = self.speed;
        let offset = self.offset();
        let neighbor_accessible = self.can_access_tile(world, neighbor);

        if neighbor_accessible {
            // Only turn when close enough to the tile center
            if dir.is_horizontal() {
                if offset.y.abs() > speed {
                    self.stuck = true;
                    return;
                }
                self.set_offset(Vec2::new(offset.x, 0.0));
            } else {
                if offset.x.abs() > speed {
                    self.stuck = true;
                    return;
                }
                self.set_offset(Vec2::new(0.0, offset.y));
            }
        }

        let new_position = self.position + dir.unit() * speed;
        let new_tile = tile_at(new_position);
        if !self.can_access_tile(world, new_tile) {
            self.stuck = true;
            return;
        }

        if !neighbor_accessible {
            // Stop at the tile center in front of the blocked neighbor
            let new_offset = new_position - tile_center(new_tile);
            let overshoot = match dir {
                Direction::Right => new_offset.x > 0.0,
                Direction::Left => new_offset.x < 0.0,
                Direction::Down => new_offset.y > 0.0,
                Direction::Up => new_offset.y < 0.0,
            };
            if overshoot {
                let offset = self.offset();
                if dir.is_horizontal() {
                    self.set_offset(Vec2::new(0.0, offset.y));
                } else {
                    self.set_offset(Vec2::new(offset.x, 0.0));
                }
                self.stuck = true;
                return;
            }
        }

        self.position = new_position;
        self.new_tile_entered = new_tile != tile;
        self.stuck = false;
    }

    /// Pick the wish direction bringing the creature closest to its target.
    ///
    /// Greedy one-tile lookahead: the reverse direction is excluded and ties
    /// go to the first direction in [`Direction::TURN_PRIORITY`]. When no
    /// other direction is open, reversing is allowed.
    pub fn navigate_towards_target(&mut self, world: &World, forbid_up: bool) {
        let Some(target) = self.target_tile else {
            return;
        };
        if !self.new_tile_entered && !self.stuck {
            return;
        }
        let tile = self.tile();
        if world.is_portal(tile) {
            return;
        }
        let reverse = self.move_dir.opposite();
        let mut best: Option<(Direction, i32)> = None;
        for dir in Direction::TURN_PRIORITY {
            if dir == reverse || (forbid_up && dir == Direction::Up) {
                continue;
            }
            let neighbor = tile + dir.vector();
            if !self.can_access_tile(world, neighbor) {
                continue;
            }
            let distance = (neighbor - target).length_squared();
            if best.is_none_or(|(_, min)| distance < min) {
                best = Some((dir, distance));
            }
        }
        match best {
            Some((dir, _)) => self.wish_dir = dir,
            None => {
                if self.can_access_tile(world, tile + reverse.vector()) {
                    self.wish_dir = reverse;
                }
            }
        }
    }

    /// Random non-reverse direction, used by frightened ghosts
    pub fn roam_randomly(&mut self, world: &World, rng: &mut Pcg32) {
        if !self.new_tile_entered && !self.stuck {
            return;
        }
        let tile = self.tile();
        if world.is_portal(tile) {
            return;
        }
        let reverse = self.move_dir.opposite();
        let options: Vec<Direction> = Direction::TURN_PRIORITY
            .into_iter()
            .filter(|&dir| dir != reverse && self.can_access_tile(world, tile + dir.vector()))
            .collect();
        if options.is_empty() {
            if self.can_access_tile(world, tile + reverse.vector()) {
                self.wish_dir = reverse;
            }
        } else {
            self.wish_dir = options[rng.random_range(0..options.len())];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TS, WORLD_COLS};
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng};

    fn creature_at(tile: IVec2, dir: Direction, speed: f32) -> Creature {
        let mut c = Creature::new("test");
        c.place_at(tile_center(tile));
        c.set_both_dirs(dir);
        c.speed = speed;
        c
    }

    #[test]
    fn test_moves_along_corridor() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
        let result = c.try_moving(&world);
        assert!(result.moved);
        assert_eq!(c.position, tile_center(IVec2::new(6, 8)) + Vec2::new(1.0, 0.0));
        assert!(!c.stuck);
    }

    #[test]
    fn test_stops_at_center_before_wall() {
        let world = World::pacman();
        // (1,4) has a wall to its left
        let mut c = creature_at(IVec2::new(1, 4), Direction::Left, 1.0);
        c.position.x += 0.5;
        c.try_moving(&world);
        assert_eq!(c.position, tile_center(IVec2::new(1, 4)));
        c.try_moving(&world);
        assert!(c.stuck);
        assert_eq!(c.position, tile_center(IVec2::new(1, 4)));
    }

    #[test]
    fn test_turn_deferred_until_aligned() {
        let world = World::pacman();
        // Moving right along row 8; column 6 has an opening downwards
        let mut c = creature_at(IVec2::new(5, 8), Direction::Right, 1.0);
        c.wish_dir = Direction::Down;
        c.try_moving(&world);
        // (5,9) is a wall, so the creature keeps going right
        assert_eq!(c.move_dir, Direction::Right);
        for _ in 0..7 {
            c.try_moving(&world);
        }
        assert_eq!(c.tile(), IVec2::new(6, 8));
        c.try_moving(&world);
        assert_eq!(c.move_dir, Direction::Down);
        assert_eq!(c.offset().x, 0.0);
    }

    #[test]
    fn test_perpendicular_turn_rejected_when_far_from_center() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
        c.position.x -= 3.0;
        c.wish_dir = Direction::Down;
        c.try_moving(&world);
        assert_eq!(c.move_dir, Direction::Right);
    }

    #[test]
    fn test_door_blocks_unless_permitted() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(13, 14), Direction::Down, 1.0);
        assert!(!c.can_access_tile(&world, IVec2::new(13, 15)));
        c.can_pass_door = true;
        assert!(c.can_access_tile(&world, IVec2::new(13, 15)));
    }

    #[test]
    fn test_teleport_right_to_left() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(WORLD_COLS, 17), Direction::Right, 1.0);
        let result = c.try_moving(&world);
        assert!(result.teleported);
        assert_eq!(c.position, tile_center(IVec2::new(-1, 17)));
        // No second teleport on the following tick: the creature is now moving away
        let result = c.try_moving(&world);
        assert!(!result.teleported);
    }

    #[test]
    fn test_teleport_left_to_right() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(-1, 17), Direction::Left, 1.0);
        assert!(c.try_moving(&world).teleported);
        assert_eq!(c.tile(), IVec2::new(WORLD_COLS, 17));
    }

    #[test]
    fn test_navigation_prefers_up_on_ties() {
        let world = World::pacman();
        // Intersection (6,8): up, down, right are open when coming from the left
        let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
        c.target_tile = Some(IVec2::new(6, 8));
        c.navigate_towards_target(&world, false);
        assert_eq!(c.wish_dir, Direction::Up);
    }

    #[test]
    fn test_navigation_towards_target() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
        c.target_tile = Some(IVec2::new(6, 30));
        c.navigate_towards_target(&world, false);
        assert_eq!(c.wish_dir, Direction::Down);
        c.navigate_towards_target(&world, false);
        c.target_tile = Some(IVec2::new(26, 8));
        c.navigate_towards_target(&world, false);
        assert_eq!(c.wish_dir, Direction::Right);
    }

    #[test]
    fn test_navigation_never_reverses_when_other_exit_exists() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
        c.target_tile = Some(IVec2::new(0, 8));
        c.navigate_towards_target(&world, false);
        assert_ne!(c.wish_dir, Direction::Left);
    }

    #[test]
    fn test_navigation_falls_back_to_reverse_in_dead_end() {
        let mut layout = crate::sim::maps::PACMAN_MAZE;
        layout[7] = "############################";
        layout[8] = "#..#########################";
        layout[9] = "############################";
        let world = World::from_layout(&layout, &[]);
        let mut c = creature_at(IVec2::new(2, 8), Direction::Right, 1.0);
        c.target_tile = Some(IVec2::new(27, 8));
        c.navigate_towards_target(&world, false);
        assert_eq!(c.wish_dir, Direction::Left);
    }

    #[test]
    fn test_forbid_up() {
        let world = World::pacman();
        let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
        c.target_tile = Some(IVec2::new(6, 0));
        c.navigate_towards_target(&world, true);
        assert_ne!(c.wish_dir, Direction::Up);
    }

    #[test]
    fn test_roam_randomly_picks_open_non_reverse() {
        let world = World::pacman();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let mut c = creature_at(IVec2::new(6, 8), Direction::Right, 1.0);
            c.roam_randomly(&world, &mut rng);
            assert_ne!(c.wish_dir, Direction::Left);
            assert!(c.can_access_tile(&world, c.tile() + c.wish_dir.vector()));
        }
    }

    proptest! {
        #[test]
        fn prop_never_enters_wall(
            seed in any::<u64>(),
            speed in 0.5f32..2.0,
            steps in 1usize..600,
        ) {
            let world = World::pacman();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut c = creature_at(IVec2::new(13, 26), Direction::Left, speed);
            c.position.x += 4.0;
            for _ in 0..steps {
                if rng.random_range(0..8) == 0 {
                    c.wish_dir = Direction::TURN_PRIORITY[rng.random_range(0..4)];
                }
                c.try_moving(&world);
                let tile = c.tile();
                prop_assert!(c.can_access_tile(&world, tile));
                prop_assert_eq!(tile, (c.position / TS as f32).floor().as_ivec2());
                // Leading edge never reaches into a wall
                let edge = c.position + c.move_dir.unit() * (crate::consts::HTS as f32 - 0.001);
                prop_assert!(!world.is_wall(tile_at(edge)));
            }
        }

        #[test]
        fn prop_teleport_is_idempotent(x_offset in -3.9f32..3.9) {
            let world = World::pacman();
            let mut a = creature_at(IVec2::new(WORLD_COLS, 17), Direction::Right, 1.0);
            a.position.x += x_offset;
            let mut b = creature_at(IVec2::new(WORLD_COLS, 17), Direction::Right, 1.0);
            prop_assert!(a.try_moving(&world).teleported);
            prop_assert!(b.try_moving(&world).teleported);
            prop_assert_eq!(a.position, b.position);
        }
    }
}
