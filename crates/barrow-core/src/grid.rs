//! Terrain: the layered tile grid and the geometry queries the scheduler needs.

use serde::{Deserialize, Serialize};

use crate::geom::Pos;

/// What a tile is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Floor = 0,
    Wall = 1,
}

impl TileKind {
    pub const fn is_wall(self) -> bool {
        matches!(self, TileKind::Wall)
    }
}

/// Read-only terrain queries.
///
/// This is the only view of the map the movement rules consume, so worlds can
/// run on anything from a fixed grid to procedurally backed terrain.
pub trait Terrain {
    /// Check if the position lies on the grid at all.
    fn in_bounds(&self, pos: Pos) -> bool;

    /// Check if the position is blocked by a wall.
    ///
    /// Out-of-bounds positions read as wall.
    fn is_wall(&self, pos: Pos) -> bool;
}

/// A dense layered tile grid.
///
/// Layers are stacked floors of identical width and height. Tiles are stored
/// row-major per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    width: i32,
    height: i32,
    layers: i32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Create a grid of open floor.
    pub fn open(width: i32, height: i32, layers: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let layers = layers.max(1);
        Self {
            width,
            height,
            layers,
            tiles: vec![TileKind::Floor; (width * height * layers) as usize],
        }
    }

    /// Create a grid of open floor with a one-tile wall border on every layer.
    pub fn walled(width: i32, height: i32, layers: i32) -> Self {
        let mut grid = Self::open(width, height, layers);
        for layer in 0..grid.layers {
            for x in 0..grid.width {
                grid.set(Pos::new(x, 0, layer), TileKind::Wall);
                grid.set(Pos::new(x, grid.height - 1, layer), TileKind::Wall);
            }
            for y in 0..grid.height {
                grid.set(Pos::new(0, y, layer), TileKind::Wall);
                grid.set(Pos::new(grid.width - 1, y, layer), TileKind::Wall);
            }
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn layers(&self) -> i32 {
        self.layers
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let per_layer = self.width * self.height;
        Some((pos.layer * per_layer + pos.y * self.width + pos.x) as usize)
    }

    /// Get the tile at a position, if in bounds.
    pub fn get(&self, pos: Pos) -> Option<TileKind> {
        self.index(pos).map(|i| self.tiles[i])
    }

    /// Set the tile at a position. Out-of-bounds writes are ignored.
    pub fn set(&mut self, pos: Pos, kind: TileKind) {
        if let Some(i) = self.index(pos) {
            self.tiles[i] = kind;
        }
    }
}

impl Terrain for TileGrid {
    fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.x < self.width
            && pos.y >= 0
            && pos.y < self.height
            && pos.layer >= 0
            && pos.layer < self.layers
    }

    fn is_wall(&self, pos: Pos) -> bool {
        match self.get(pos) {
            Some(kind) => kind.is_wall(),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_grid_is_all_floor() {
        let grid = TileGrid::open(8, 6, 2);
        for layer in 0..2 {
            for y in 0..6 {
                for x in 0..8 {
                    assert!(!grid.is_wall(Pos::new(x, y, layer)));
                }
            }
        }
    }

    #[test]
    fn test_walled_border() {
        let grid = TileGrid::walled(8, 6, 1);
        assert!(grid.is_wall(Pos::new(0, 3, 0)));
        assert!(grid.is_wall(Pos::new(7, 3, 0)));
        assert!(grid.is_wall(Pos::new(4, 0, 0)));
        assert!(grid.is_wall(Pos::new(4, 5, 0)));
        assert!(!grid.is_wall(Pos::new(4, 3, 0)));
    }

    #[test]
    fn test_out_of_bounds_reads_as_wall() {
        let grid = TileGrid::open(4, 4, 1);
        assert!(!grid.in_bounds(Pos::new(-1, 0, 0)));
        assert!(!grid.in_bounds(Pos::new(0, 0, 1)));
        assert!(grid.is_wall(Pos::new(4, 0, 0)));
        assert!(grid.is_wall(Pos::new(0, 0, -1)));
        assert_eq!(grid.get(Pos::new(9, 9, 0)), None);
    }

    #[test]
    fn test_layers_are_independent() {
        let mut grid = TileGrid::open(4, 4, 2);
        grid.set(Pos::new(2, 2, 0), TileKind::Wall);
        assert!(grid.is_wall(Pos::new(2, 2, 0)));
        assert!(!grid.is_wall(Pos::new(2, 2, 1)));
    }

    #[test]
    fn test_out_of_bounds_set_is_ignored() {
        let mut grid = TileGrid::open(4, 4, 1);
        grid.set(Pos::new(10, 10, 0), TileKind::Wall);
        assert_eq!(grid.get(Pos::new(3, 3, 0)), Some(TileKind::Floor));
    }
}
