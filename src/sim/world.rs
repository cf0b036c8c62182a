//! Tile world: static maze classification plus the mutable food state
//!
//! A world is built when a level starts and thrown away when the next level
//! begins, so eaten food never carries over.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::maps;
use crate::consts::{WORLD_COLS, WORLD_ROWS};
use crate::half_tile_right_of;

/// Static classification of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Space,
    Wall,
    Tunnel,
    Pellet,
    Energizer,
}

impl TileKind {
    fn from_char(c: char) -> Self {
        match c {
            ' ' => TileKind::Space,
            '#' => TileKind::Wall,
            'T' => TileKind::Tunnel,
            '.' => TileKind::Pellet,
            'o' => TileKind::Energizer,
            _ => panic!("Unknown tile character '{c}'"),
        }
    }

    pub fn is_food(self) -> bool {
        matches!(self, TileKind::Pellet | TileKind::Energizer)
    }
}

/// Pair of tiles just outside the left and right border of a tunnel row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portal {
    pub left: IVec2,
    pub right: IVec2,
}

impl Portal {
    pub fn row(row: i32) -> Self {
        Self {
            left: IVec2::new(-1, row),
            right: IVec2::new(WORLD_COLS, row),
        }
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile == self.left || tile == self.right
    }
}

/// The ghost house: door on top, three seats inside
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GhostHouse {
    pub top_left: IVec2,
    pub size: IVec2,
    pub door: [IVec2; 2],
    /// Position just above the door where ghosts enter and leave
    pub entry_position: Vec2,
    /// Left, middle and right seat positions
    pub seats: [Vec2; 3],
}

impl GhostHouse {
    pub fn arcade() -> Self {
        Self {
            top_left: IVec2::new(10, 15),
            size: IVec2::new(8, 5),
            door: [IVec2::new(13, 15), IVec2::new(14, 15)],
            entry_position: half_tile_right_of(IVec2::new(13, 14)),
            seats: [
                half_tile_right_of(IVec2::new(11, 17)),
                half_tile_right_of(IVec2::new(13, 17)),
                half_tile_right_of(IVec2::new(15, 17)),
            ],
        }
    }

    pub fn entry_tile(&self) -> IVec2 {
        crate::tile_at(self.entry_position)
    }

    pub fn center_x(&self) -> f32 {
        self.seats[1].x
    }

    pub fn is_door(&self, tile: IVec2) -> bool {
        self.door.contains(&tile)
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        let max = self.top_left + self.size;
        tile.cmpge(self.top_left).all() && tile.cmplt(max).all()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    tiles: Vec<TileKind>,
    /// One bit per tile, set when the food on it was eaten
    eaten: Vec<u64>,
    portals: Vec<Portal>,
    house: GhostHouse,
    upward_blocked: Vec<IVec2>,
    total_food: u32,
    eaten_count: u32,
}

impl World {
    /// Build a world from a 28x36 layout (see [`maps`] for the legend)
    pub fn from_layout(layout: &[&str; WORLD_ROWS as usize], upward_blocked: &[(i32, i32)]) -> Self {
        let mut tiles = Vec::with_capacity((WORLD_COLS * WORLD_ROWS) as usize);
        for (row, line) in layout.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                WORLD_COLS as usize,
                "Maze row {row} must have {WORLD_COLS} tiles"
            );
            tiles.extend(line.chars().map(TileKind::from_char));
        }

        let portals = (0..WORLD_ROWS)
            .filter(|&row| {
                tiles[(row * WORLD_COLS) as usize] == TileKind::Tunnel
                    && tiles[(row * WORLD_COLS + WORLD_COLS - 1) as usize] == TileKind::Tunnel
            })
            .map(Portal::row)
            .collect();

        let total_food = tiles.iter().filter(|t| t.is_food()).count() as u32;
        let words = tiles.len().div_ceil(64);

        Self {
            tiles,
            eaten: vec![0; words],
            portals,
            house: GhostHouse::arcade(),
            upward_blocked: upward_blocked.iter().map(|&(x, y)| IVec2::new(x, y)).collect(),
            total_food,
            eaten_count: 0,
        }
    }

    pub fn pacman() -> Self {
        Self::from_layout(&maps::PACMAN_MAZE, &maps::PACMAN_UPWARD_BLOCKED)
    }

    pub fn ms_pacman(map_number: u32) -> Self {
        Self::from_layout(maps::ms_pacman_maze(map_number), &[])
    }

    fn index(&self, tile: IVec2) -> Option<usize> {
        self.inside_bounds(tile)
            .then(|| (tile.y * WORLD_COLS + tile.x) as usize)
    }

    pub fn inside_bounds(&self, tile: IVec2) -> bool {
        (0..WORLD_COLS).contains(&tile.x) && (0..WORLD_ROWS).contains(&tile.y)
    }

    /// Classification of a tile, `None` outside the map
    pub fn tile_kind(&self, tile: IVec2) -> Option<TileKind> {
        self.index(tile).map(|i| self.tiles[i])
    }

    pub fn is_wall(&self, tile: IVec2) -> bool {
        self.tile_kind(tile) == Some(TileKind::Wall)
    }

    /// Tunnel tiles slow ghosts down; portal tiles count as tunnel
    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.tile_kind(tile) == Some(TileKind::Tunnel) || self.is_portal(tile)
    }

    pub fn is_food_tile(&self, tile: IVec2) -> bool {
        self.tile_kind(tile).is_some_and(TileKind::is_food)
    }

    pub fn is_energizer_tile(&self, tile: IVec2) -> bool {
        self.tile_kind(tile) == Some(TileKind::Energizer)
    }

    pub fn is_intersection(&self, tile: IVec2) -> bool {
        if self.house.contains(tile) || self.house.is_door(tile + IVec2::new(0, 1)) {
            return false;
        }
        super::Direction::TURN_PRIORITY
            .iter()
            .filter(|dir| {
                let neighbor = tile + dir.vector();
                self.inside_bounds(neighbor) && !self.is_wall(neighbor)
            })
            .count()
            >= 3
    }

    pub fn contains_food(&self, tile: IVec2) -> bool {
        match self.index(tile) {
            Some(i) => self.tiles[i].is_food() && !self.bit(i),
            None => false,
        }
    }

    pub fn contains_eaten_food(&self, tile: IVec2) -> bool {
        match self.index(tile) {
            Some(i) => self.tiles[i].is_food() && self.bit(i),
            None => false,
        }
    }

    /// Mark the food on a tile as eaten. Returns `false` if there was none.
    pub fn remove_food(&mut self, tile: IVec2) -> bool {
        if !self.contains_food(tile) {
            return false;
        }
        if let Some(i) = self.index(tile) {
            self.eaten[i / 64] |= 1 << (i % 64);
            self.eaten_count += 1;
        }
        true
    }

    /// Mark all remaining food as eaten
    pub fn eat_all_food(&mut self) {
        let food: Vec<IVec2> = self.tiles_iter().filter(|&t| self.contains_food(t)).collect();
        for tile in food {
            self.remove_food(tile);
        }
    }

    fn bit(&self, i: usize) -> bool {
        self.eaten[i / 64] & (1 << (i % 64)) != 0
    }

    /// Raw eaten bitset, one bit per tile in row-major order
    pub fn eaten_bits(&self) -> &[u64] {
        &self.eaten
    }

    pub fn food_remaining(&self) -> u32 {
        self.total_food - self.eaten_count
    }

    pub fn eaten_food_count(&self) -> u32 {
        self.eaten_count
    }

    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    pub fn energizer_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.tiles_iter()
            .filter(move |&tile| self.is_energizer_tile(tile))
    }

    /// All tiles in row-major order
    pub fn tiles_iter(&self) -> impl Iterator<Item = IVec2> {
        (0..WORLD_ROWS).flat_map(|y| (0..WORLD_COLS).map(move |x| IVec2::new(x, y)))
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn is_portal(&self, tile: IVec2) -> bool {
        self.portals.iter().any(|p| p.contains(tile))
    }

    pub fn house(&self) -> &GhostHouse {
        &self.house
    }

    pub fn is_upward_blocked(&self, tile: IVec2) -> bool {
        self.upward_blocked.contains(&tile)
    }
}
