//! Fixed-size tile grid for bounded sub-regions

use super::block::{Block, BlockPalette};
use super::collision::TileQuery;
use crate::error::{Result, WorldError};

/// A bounded grid of tiles, row-major, origin at the top-left.
///
/// Unlike [`super::InfiniteWorld`] this never grows: reads and writes
/// outside the grid are errors, and solidity queries outside it report solid
/// so nothing can leave.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    default_block: Option<Block>,
    tiles: Vec<Option<Block>>,
}

impl WorldGrid {
    /// Create a grid filled with `default_block`
    pub fn new(width: usize, height: usize, default_block: Option<Block>) -> Self {
        Self {
            width,
            height,
            tiles: vec![default_block.clone(); width * height],
            default_block,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn default_block(&self) -> Option<&Block> {
        self.default_block.as_ref()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Result<usize> {
        if !self.in_bounds(x, y) {
            return Err(WorldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Result<Option<&Block>> {
        let index = self.index(x, y)?;
        Ok(self.tiles[index].as_ref())
    }

    pub fn set(&mut self, x: i32, y: i32, block: Option<Block>) -> Result<()> {
        let index = self.index(x, y)?;
        self.tiles[index] = block;
        Ok(())
    }

    /// Out-of-bounds tiles count as solid
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        match self.get(x, y) {
            Ok(block) => block.is_some_and(|block| block.solid),
            Err(_) => true,
        }
    }

    /// Swap every tile whose block name appears in `palette` for the
    /// palette's block of that name
    pub fn retheme(&mut self, palette: &BlockPalette) {
        for tile in self.tiles.iter_mut() {
            if let Some(replacement) = tile.as_ref().and_then(|block| palette.by_name(&block.name)) {
                *tile = Some(replacement.clone());
            }
        }
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Block>]> {
        self.tiles.chunks(self.width.max(1)).take(self.height)
    }
}

impl TileQuery for WorldGrid {
    fn is_solid(&mut self, x: i32, y: i32) -> bool {
        WorldGrid::is_solid(self, x, y)
    }

    fn vertical_extent(&self) -> (i32, i32) {
        (0, self.height as i32 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::{build_palette, BlockType};

    #[test]
    fn test_world_grid_bounds_and_solidity() {
        let mut empty = WorldGrid::new(4, 3, None);
        let rock = BlockType::new("Rock", [10, 10, 10]).into_block();

        empty.set(1, 2, Some(rock.clone())).unwrap();
        assert_eq!(empty.get(1, 2).unwrap(), Some(&rock));
        assert!(empty.is_solid(1, 2));
        assert!(!empty.is_solid(3, 0));

        assert_eq!(
            empty.get(6, 0),
            Err(WorldError::OutOfBounds {
                x: 6,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(empty.set(0, 3, None).is_err());

        // Out-of-bounds should be treated as solid so the player cannot leave
        assert!(empty.is_solid(-1, 0));
        assert!(empty.is_solid(0, 3));
    }

    #[test]
    fn test_passable_blocks_are_not_solid() {
        let mist = BlockType::passable("Mist", [200, 200, 220]).into_block();
        let grid = WorldGrid::new(2, 2, Some(mist));
        assert!(!grid.is_solid(0, 0));
        assert!(grid.get(1, 1).unwrap().is_some());
    }

    #[test]
    fn test_grid_retheme_by_name() {
        let first = build_palette(0.1);
        let second = build_palette(0.6);
        let mut grid = WorldGrid::new(3, 1, None);
        grid.set(0, 0, first.nth(1).cloned()).unwrap();
        grid.set(1, 0, Some(BlockType::stone().into_block())).unwrap();

        grid.retheme(&second);

        assert_eq!(grid.get(0, 0).unwrap(), second.nth(1));
        assert_eq!(grid.get(1, 0).unwrap().unwrap().name, "Stone");
        assert_eq!(grid.get(2, 0).unwrap(), None);
        assert_eq!(grid.rows().count(), 1);
    }
}
