//! InfiniteWorld - lazily generated, endlessly expanding tile store

use std::collections::HashMap;

use super::block::{Block, BlockPalette};
use super::collision::TileQuery;
use super::generation::TerrainGenerator;

/// One vertical slice of the world, indexed by `y - top`
pub type Column = Vec<Option<Block>>;

type ColumnMap = HashMap<i32, Column, ahash::RandomState>;

/// The endless world, stored as one column per x coordinate.
///
/// All columns share the vertical bounds `top..=bottom`. Columns are created
/// on first touch and never dropped. Widening the bounds extends every
/// existing column with freshly generated rows, so cells the player edited
/// keep their edits forever.
pub struct InfiniteWorld {
    /// Realized columns keyed by x
    columns: ColumnMap,

    /// First realized row (inclusive)
    top: i32,

    /// Last realized row (inclusive)
    bottom: i32,

    /// Terrain rules for newly realized cells
    generator: TerrainGenerator,

    /// Palette the generator and existing decorations use
    palette: BlockPalette,
}

impl InfiniteWorld {
    /// Create a world whose initial extent is rows `0..height`.
    ///
    /// The horizon sits at `height / 2 + 4`; rows above it hold
    /// `default_block` unless a decoration rule fills them.
    pub fn new(height: i32, palette: BlockPalette, default_block: Option<Block>) -> Self {
        let horizon = height / 2 + 4;
        Self {
            columns: ColumnMap::default(),
            top: 0,
            bottom: height - 1,
            generator: TerrainGenerator::new(horizon, &palette, default_block),
            palette,
        }
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    /// Number of realized rows
    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    pub fn horizon(&self) -> i32 {
        self.generator.horizon()
    }

    pub fn palette(&self) -> &BlockPalette {
        &self.palette
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Number of realized columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_column_generated(&self, x: i32) -> bool {
        self.columns.contains_key(&x)
    }

    /// Widen the shared bounds so row `y` is realized
    fn ensure_vertical_bounds(&mut self, y: i32) {
        if y < self.top || y > self.bottom {
            let new_top = self.top.min(y);
            let new_bottom = self.bottom.max(y);
            self.expand_columns_to(new_top, new_bottom);
        }
    }

    fn expand_columns_to(&mut self, new_top: i32, new_bottom: i32) {
        log::debug!(
            "Expanding world rows {}..={} -> {}..={} ({} columns)",
            self.top,
            self.bottom,
            new_top,
            new_bottom,
            self.columns.len()
        );

        let (old_top, old_bottom) = (self.top, self.bottom);
        let generator = &self.generator;
        let extend = |x: i32, column: &mut Column| {
            if new_top < old_top {
                let prepend = generator.generate_column(x, new_top, old_top - 1);
                column.splice(0..0, prepend);
            }
            if new_bottom > old_bottom {
                column.extend(generator.generate_column(x, old_bottom + 1, new_bottom));
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            use rayon::prelude::*;
            self.columns
                .par_iter_mut()
                .for_each(|(&x, column)| extend(x, column));
        }

        #[cfg(target_arch = "wasm32")]
        {
            for (&x, column) in self.columns.iter_mut() {
                extend(x, column);
            }
        }

        self.top = self.top.min(new_top);
        self.bottom = self.bottom.max(new_bottom);
    }

    fn ensure_column(&mut self, x: i32) -> &mut Column {
        let (top, bottom) = (self.top, self.bottom);
        let generator = &self.generator;
        self.columns
            .entry(x)
            .or_insert_with(|| generator.generate_column(x, top, bottom))
    }

    /// Realize row `y` and column `x`, returning the cell index
    fn realize(&mut self, x: i32, y: i32) -> (&mut Column, usize) {
        self.ensure_vertical_bounds(y);
        let index = (y - self.top) as usize;
        (self.ensure_column(x), index)
    }

    /// Realize columns `start_x..start_x + width` over the current bounds
    pub fn ensure_range(&mut self, start_x: i32, width: i32) {
        let missing: Vec<i32> = (start_x..start_x.saturating_add(width))
            .filter(|x| !self.columns.contains_key(x))
            .collect();
        if missing.is_empty() {
            return;
        }

        let (top, bottom) = (self.top, self.bottom);
        let generator = &self.generator;

        #[cfg(not(target_arch = "wasm32"))]
        let generated: Vec<(i32, Column)> = {
            use rayon::prelude::*;
            missing
                .par_iter()
                .map(|&x| (x, generator.generate_column(x, top, bottom)))
                .collect()
        };

        #[cfg(target_arch = "wasm32")]
        let generated: Vec<(i32, Column)> = missing
            .iter()
            .map(|&x| (x, generator.generate_column(x, top, bottom)))
            .collect();

        log::trace!("Generated {} columns from x={}", generated.len(), start_x);
        self.columns.extend(generated);
    }

    /// Realize rows `start_y..start_y + height` for every column
    pub fn ensure_vertical_range(&mut self, start_y: i32, height: i32) {
        if height <= 0 {
            return;
        }
        let end_y = start_y + height - 1;
        self.ensure_vertical_bounds(start_y);
        self.ensure_vertical_bounds(end_y);
    }

    /// Full column at `x`, generating it when necessary
    pub fn column(&mut self, x: i32) -> &[Option<Block>] {
        self.ensure_column(x)
    }

    pub fn get(&mut self, x: i32, y: i32) -> Option<Block> {
        let (column, index) = self.realize(x, y);
        column[index].clone()
    }

    /// Overwrite a cell; the edit survives later bound expansion
    pub fn set(&mut self, x: i32, y: i32, block: Option<Block>) {
        let (column, index) = self.realize(x, y);
        column[index] = block;
    }

    pub fn is_solid(&mut self, x: i32, y: i32) -> bool {
        let (column, index) = self.realize(x, y);
        column[index].as_ref().is_some_and(|block| block.solid)
    }

    /// Rows `top..=bottom` of the window `start_x..start_x + width`
    pub fn iter_window(
        &mut self,
        start_x: i32,
        width: i32,
    ) -> impl Iterator<Item = Vec<Option<Block>>> + '_ {
        self.ensure_range(start_x, width);
        let columns = &self.columns;
        (0..self.height().max(0) as usize).map(move |row| {
            (start_x..start_x.saturating_add(width))
                .map(|x| columns.get(&x).and_then(|column| column[row].clone()))
                .collect()
        })
    }

    /// Switch to `palette`.
    ///
    /// Every realized cell whose block name matches a palette entry now holds
    /// that entry; other cells are untouched. Cells realized later are
    /// generated with the new palette.
    pub fn retheme(&mut self, palette: BlockPalette) {
        let mut replaced = 0usize;
        for column in self.columns.values_mut() {
            for cell in column.iter_mut() {
                let replacement = cell
                    .as_ref()
                    .and_then(|block| palette.by_name(&block.name));
                if let Some(replacement) = replacement {
                    *cell = Some(replacement.clone());
                    replaced += 1;
                }
            }
        }

        self.generator = self.generator.with_palette(&palette);
        self.palette = palette;
        log::info!(
            "Rethemed world: {} cells across {} columns",
            replaced,
            self.columns.len()
        );
    }
}

impl TileQuery for InfiniteWorld {
    fn is_solid(&mut self, x: i32, y: i32) -> bool {
        InfiniteWorld::is_solid(self, x, y)
    }

    fn vertical_extent(&self) -> (i32, i32) {
        (self.top, self.bottom)
    }
}

/// Generate the endless landscape with a handcrafted-feeling opening view.
///
/// Columns `-width..2 * width` are realized up front; everything beyond is
/// generated as the player wanders.
pub fn create_prebuilt_world(width: i32, height: i32, palette: BlockPalette) -> InfiniteWorld {
    let mut world = InfiniteWorld::new(height, palette, None);
    world.ensure_range(-width, width * 3);
    log::info!(
        "Created world: {} columns, rows {}..={}, horizon {}",
        world.column_count(),
        world.top(),
        world.bottom(),
        world.horizon()
    );
    world
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::block::{build_palette, BlockType, DEFAULT_HUE};

    fn world() -> InfiniteWorld {
        create_prebuilt_world(40, 30, build_palette(DEFAULT_HUE))
    }

    #[test]
    fn test_prebuilt_world_extent() {
        let world = world();
        assert_eq!(world.top(), 0);
        assert_eq!(world.bottom(), 29);
        assert_eq!(world.height(), 30);
        assert_eq!(world.horizon(), 19);
        assert_eq!(world.column_count(), 120);
        assert!(world.is_column_generated(-40));
        assert!(world.is_column_generated(79));
        assert!(!world.is_column_generated(80));
    }

    #[test]
    fn test_grass_layer_spans_origin() {
        let mut world = world();
        let horizon = world.horizon();
        for x in -20..20 {
            assert!(world.get(x, horizon).is_some(), "missing ground at x={x}");
        }
    }

    #[test]
    fn test_sky_has_some_floating_blocks() {
        let mut world = world();
        let horizon = world.horizon();
        let mut sky_blocks = 0;
        for y in 0..horizon {
            for x in -20..20 {
                if world.get(x, y).is_some() {
                    sky_blocks += 1;
                }
            }
        }
        assert!(sky_blocks > 0);
        assert!(sky_blocks < horizon * 40);
    }

    #[test]
    fn test_world_matches_generator() {
        let mut world = world();
        let generator = world.generator().clone();
        for x in [-300, -41, 0, 17, 250] {
            for y in -10..45 {
                assert_eq!(world.get(x, y), generator.generate(x, y), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_columns_keep_uniform_length() {
        let mut world = world();
        world.get(5, -12);
        world.get(900, 70);
        world.ensure_range(-60, 10);
        let height = world.height() as usize;
        for x in [-60, -40, 5, 79, 900] {
            assert_eq!(world.column(x).len(), height);
        }
    }

    #[test]
    fn test_set_survives_expansion() {
        let mut world = world();
        let marker = BlockType::new("Marker", [1, 2, 3]).into_block();
        world.set(3, 4, Some(marker.clone()));
        world.set(4, 4, None);

        world.ensure_vertical_range(-50, 200);

        assert_eq!(world.get(3, 4), Some(marker));
        assert_eq!(world.get(4, 4), None);
        assert_eq!(world.top(), -50);
        assert_eq!(world.bottom(), 149);
    }

    #[test]
    fn test_ensure_range_is_idempotent() {
        let mut world = world();
        let marker = BlockType::new("Marker", [1, 2, 3]).into_block();
        world.set(0, 0, Some(marker.clone()));
        let before = world.column_count();
        world.ensure_range(-40, 120);
        assert_eq!(world.column_count(), before);
        assert_eq!(world.get(0, 0), Some(marker));

        world.ensure_vertical_range(0, 30);
        assert_eq!((world.top(), world.bottom()), (0, 29));
        world.ensure_vertical_range(5, 0);
        assert_eq!((world.top(), world.bottom()), (0, 29));
    }

    #[test]
    fn test_iter_window_prefills_columns() {
        let mut world = world();
        let height = world.height() as usize;
        let rows: Vec<_> = world.iter_window(-5, 11).collect();
        assert_eq!(rows.len(), height);
        assert!(rows.iter().all(|row| row.len() == 11));

        let rows: Vec<_> = world.iter_window(500, 3).collect();
        assert_eq!(rows.len(), height);
        assert!(world.is_column_generated(502));
    }

    #[test]
    fn test_ranges_near_max_column() {
        let mut world = world();
        let count = world.column_count();
        world.ensure_range(i32::MAX - 2, 10);
        assert_eq!(world.column_count(), count + 2);
        assert!(world.is_column_generated(i32::MAX - 1));

        let rows: Vec<_> = world.iter_window(i32::MAX - 2, 10).collect();
        assert!(rows.iter().all(|row| row.len() == 2));
    }

    #[test]
    fn test_retheme_leaves_terrain_alone() {
        let mut world = world();
        let horizon = world.horizon();
        let grass = world.get(100, horizon);
        world.retheme(build_palette(0.3));
        assert_eq!(world.get(100, horizon), grass);
        assert_eq!(world.palette(), &build_palette(0.3));
    }
}
