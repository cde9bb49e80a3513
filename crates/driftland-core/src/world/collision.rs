//! Tile collision queries shared by the bounded and the infinite world

/// Solidity lookups needed by player physics.
///
/// `is_solid` takes `&mut self` because the infinite world realizes columns
/// and rows on demand while answering.
pub trait TileQuery {
    /// True if the tile holds a solid block
    fn is_solid(&mut self, x: i32, y: i32) -> bool;

    /// Currently realized rows `(top, bottom)`, inclusive
    fn vertical_extent(&self) -> (i32, i32);
}

/// Tile index containing pixel coordinate `coord`
#[inline]
pub fn tile_of(coord: f32, tile_size: f32) -> i32 {
    (coord / tile_size).floor() as i32
}

/// First and last tile touched by the pixel span `[start, start + length)`.
///
/// The far edge is pulled in by one pixel so a box resting exactly on a
/// tile boundary does not count the next tile.
#[inline]
pub fn tile_span(start: f32, length: f32, tile_size: f32) -> (i32, i32) {
    (
        tile_of(start, tile_size),
        tile_of(start + length - 1.0, tile_size),
    )
}

/// Check whether a pixel-space rectangle overlaps any solid tile
pub fn area_intersects_solid<W: TileQuery + ?Sized>(
    world: &mut W,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    tile_size: f32,
) -> bool {
    let (x_start, x_end) = tile_span(left, width, tile_size);
    let (y_start, y_end) = tile_span(top, height, tile_size);
    for tile_x in x_start..=x_end {
        for tile_y in y_start..=y_end {
            if world.is_solid(tile_x, tile_y) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::BlockType;
    use crate::world::grid::WorldGrid;

    #[test]
    fn test_tile_span_boundaries() {
        assert_eq!(tile_span(0.0, 24.0, 24.0), (0, 0));
        assert_eq!(tile_span(0.0, 25.0, 24.0), (0, 1));
        assert_eq!(tile_span(-1.0, 2.0, 24.0), (-1, 0));
        assert_eq!(tile_span(30.0, 14.4, 24.0), (1, 1));
        assert_eq!(tile_of(-0.5, 24.0), -1);
    }

    #[test]
    fn test_area_intersects_solid() {
        let mut grid = WorldGrid::new(4, 4, None);
        grid.set(2, 2, Some(BlockType::stone().into_block())).unwrap();

        assert!(area_intersects_solid(&mut grid, 40.0, 40.0, 10.0, 10.0, 24.0));
        assert!(!area_intersects_solid(&mut grid, 0.0, 0.0, 24.0, 48.0, 24.0));
        // Touching the tile's edge is not an overlap
        assert!(!area_intersects_solid(&mut grid, 24.0, 24.0, 24.0, 24.0, 24.0));
    }
}
