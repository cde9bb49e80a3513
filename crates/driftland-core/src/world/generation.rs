//! Deterministic terrain generation
//!
//! Every tile is a pure function of its coordinate, the horizon and the
//! active palette. Rules are evaluated in a fixed order and the first rule
//! that yields a block wins:
//!
//! 1. floating palette platforms in repeating 9-column patterns
//! 2. crystal outcrops (one or two blocks) just above the grass
//! 3. a stone staircase near the origin
//! 4. base layering: sky, grass, soil, stone

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use super::block::{Block, BlockPalette, BlockType};

/// Columns per platform pattern
pub const PLATFORM_PATTERN_WIDTH: i32 = 9;
/// Rows of soil between grass and stone (exclusive of grass)
pub const SOIL_DEPTH: i32 = 6;
/// Chance that a column carries a crystal outcrop
pub const CRYSTAL_CHANCE: f64 = 0.1;
/// Chance that a crystal is two blocks tall
pub const CRYSTAL_STACK_CHANCE: f64 = 0.5;

const CRYSTAL_SEED_OFFSET: i64 = 3000;
const CRYSTAL_SEED_MULTIPLIER: i64 = 92821;

/// Leftmost and rightmost column of the origin staircase
const STAIRCASE_COLUMNS: (i32, i32) = (-2, 8);
const STAIRCASE_PEAK: i32 = 8;

/// Per-column decoration decided by the column's seeded RNG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrystalOutcrop {
    /// Second crystal on top of the first
    pub stacked: bool,
}

/// Pure terrain generator.
///
/// Holds no mutable state; the palette is swapped by building a new
/// generator (see [`TerrainGenerator::with_palette`]).
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    horizon: i32,
    default_block: Option<Block>,
    grass: Block,
    soil: Block,
    stone: Block,
    palette_blocks: Vec<Block>,
}

impl TerrainGenerator {
    pub fn new(horizon: i32, palette: &BlockPalette, default_block: Option<Block>) -> Self {
        Self {
            horizon,
            default_block,
            grass: BlockType::grass().into_block(),
            soil: BlockType::soil().into_block(),
            stone: BlockType::stone().into_block(),
            palette_blocks: palette.blocks(),
        }
    }

    /// Same layering and horizon, new palette for decorations
    pub fn with_palette(&self, palette: &BlockPalette) -> Self {
        Self {
            palette_blocks: palette.blocks(),
            ..self.clone()
        }
    }

    /// Ground level row; rows above it are sky
    pub fn horizon(&self) -> i32 {
        self.horizon
    }

    pub fn default_block(&self) -> Option<&Block> {
        self.default_block.as_ref()
    }

    pub fn grass(&self) -> &Block {
        &self.grass
    }

    pub fn soil(&self) -> &Block {
        &self.soil
    }

    pub fn stone(&self) -> &Block {
        &self.stone
    }

    /// Block generated at `(x, y)`, `None` for air
    pub fn generate(&self, x: i32, y: i32) -> Option<Block> {
        self.generate_with(x, y, Self::crystal_outcrop(x))
    }

    /// Generate rows `top..=bottom` of column `x`.
    ///
    /// Equivalent to calling [`generate`](Self::generate) for every row, but
    /// seeds the column RNG only once.
    pub fn generate_column(&self, x: i32, top: i32, bottom: i32) -> Vec<Option<Block>> {
        let crystal = Self::crystal_outcrop(x);
        (top..=bottom)
            .map(|y| self.generate_with(x, y, crystal))
            .collect()
    }

    fn generate_with(&self, x: i32, y: i32, crystal: Option<CrystalOutcrop>) -> Option<Block> {
        if let Some(block) = self.platform_block(x, y) {
            return Some(block);
        }
        if let Some(block) = self.crystal_block(x, y, crystal) {
            return Some(block);
        }
        if let Some(block) = self.staircase_block(x, y) {
            return Some(block);
        }
        self.base_block(y)
    }

    /// Floating platforms: the first three columns of every 9-column pattern
    /// carry a palette block at one of three heights.
    fn platform_block(&self, x: i32, y: i32) -> Option<Block> {
        let pattern_index = x.div_euclid(PLATFORM_PATTERN_WIDTH);
        let phase = x.rem_euclid(PLATFORM_PATTERN_WIDTH);
        if phase > 2 {
            return None;
        }
        let height_offset = pattern_index.rem_euclid(3);
        let platform_y = self.horizon - 4 - height_offset * 2;
        if y != platform_y {
            return None;
        }
        self.palette_choice(pattern_index as i64)
    }

    fn crystal_block(&self, x: i32, y: i32, crystal: Option<CrystalOutcrop>) -> Option<Block> {
        let crystal = crystal?;
        if y == self.horizon - 1 {
            if let Some(block) = self.palette_choice(x as i64) {
                return Some(block);
            }
        }
        if crystal.stacked && y == self.horizon - 2 {
            return self.palette_choice(x as i64 + 1);
        }
        None
    }

    fn staircase_block(&self, x: i32, y: i32) -> Option<Block> {
        let (first, last) = STAIRCASE_COLUMNS;
        if !(first..=last).contains(&x) {
            return None;
        }
        let step = (STAIRCASE_PEAK - x).max(0);
        (y == self.horizon - 1 - step).then(|| self.stone.clone())
    }

    fn base_block(&self, y: i32) -> Option<Block> {
        if y < self.horizon {
            return self.default_block.clone();
        }
        let depth = y - self.horizon;
        let block = if depth == 0 {
            &self.grass
        } else if depth < SOIL_DEPTH {
            &self.soil
        } else {
            &self.stone
        };
        Some(block.clone())
    }

    fn palette_choice(&self, index: i64) -> Option<Block> {
        if self.palette_blocks.is_empty() {
            return None;
        }
        let len = self.palette_blocks.len() as i64;
        Some(self.palette_blocks[index.rem_euclid(len) as usize].clone())
    }

    /// Decide the crystal outcrop for column `x`.
    ///
    /// A fresh RNG is seeded from the column coordinate on every call, so the
    /// outcome never depends on query order.
    pub fn crystal_outcrop(x: i32) -> Option<CrystalOutcrop> {
        let mut rng = Self::column_rng(x);
        if rng.gen::<f64>() >= CRYSTAL_CHANCE {
            return None;
        }
        let stacked = rng.gen::<f64>() < CRYSTAL_STACK_CHANCE;
        Some(CrystalOutcrop { stacked })
    }

    fn column_rng(x: i32) -> Xoshiro256StarStar {
        let seed = (x as i64 + CRYSTAL_SEED_OFFSET).wrapping_mul(CRYSTAL_SEED_MULTIPLIER);
        Xoshiro256StarStar::seed_from_u64(seed as u64)
    }
}
