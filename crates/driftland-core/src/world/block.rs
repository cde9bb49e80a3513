//! Block definitions and hue-derived palettes

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Hue of the default (gentle teal) palette
pub const DEFAULT_HUE: f32 = 0.58;

/// A single kind of tile.
///
/// Blocks are compared by value; retheming swaps cells whose block shares a
/// `name` with an entry of the new palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockType {
    /// Human readable name, also the retheme key
    pub name: String,
    /// RGB colour used for drawing
    pub color: [u8; 3],
    /// Whether the block obstructs the player
    pub solid: bool,
}

/// Shared handle stored in world cells
pub type Block = Arc<BlockType>;

impl BlockType {
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            color,
            solid: true,
        }
    }

    /// Non-obstructing variant (decorations the player walks through)
    pub fn passable(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            solid: false,
            ..Self::new(name, color)
        }
    }

    pub fn into_block(self) -> Block {
        Arc::new(self)
    }

    pub fn grass() -> Self {
        Self::new("Grass", [118, 158, 108])
    }

    pub fn soil() -> Self {
        Self::new("Soil", [124, 98, 76])
    }

    pub fn stone() -> Self {
        Self::new("Stone", [105, 110, 125])
    }
}

/// Ordered, key-addressable set of buildable blocks.
///
/// Insertion order is preserved so inventory listings stay predictable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockPalette {
    entries: Vec<(String, Block)>,
}

impl BlockPalette {
    /// Build from `(key, block)` pairs. A repeated key replaces the earlier
    /// block but keeps the original position.
    pub fn new<I, K>(blocks: I) -> Self
    where
        I: IntoIterator<Item = (K, BlockType)>,
        K: Into<String>,
    {
        let mut entries: Vec<(String, Block)> = Vec::new();
        for (key, block) in blocks {
            let key = key.into();
            let block = block.into_block();
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = block,
                None => entries.push((key, block)),
            }
        }
        Self { entries }
    }

    /// Look up a block by palette key (e.g. `"moss_brick"`)
    pub fn get(&self, key: &str) -> Option<&Block> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, block)| block)
    }

    /// Look up a block by its display name (e.g. `"Moss Brick"`)
    pub fn by_name(&self, name: &str) -> Option<&Block> {
        self.iter().find(|block| block.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.entries.iter().map(|(_, block)| block)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Block at `index` in insertion order
    pub fn nth(&self, index: usize) -> Option<&Block> {
        self.entries.get(index).map(|(_, block)| block)
    }

    /// Owned handles in insertion order (inventory slots, generator input)
    pub fn blocks(&self) -> Vec<Block> {
        self.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convert an HLS colour to RGB, tuned for soft pastel palettes.
///
/// `hue` wraps into [0, 1).
pub fn soft_colour(hue: f32, lightness: f32, saturation: f32) -> [u8; 3] {
    const ONE_THIRD: f32 = 1.0 / 3.0;

    let hue = hue.rem_euclid(1.0);
    let (r, g, b) = if saturation == 0.0 {
        (lightness, lightness, lightness)
    } else {
        let m2 = if lightness <= 0.5 {
            lightness * (1.0 + saturation)
        } else {
            lightness + saturation - lightness * saturation
        };
        let m1 = 2.0 * lightness - m2;
        (
            hue_channel(m1, m2, hue + ONE_THIRD),
            hue_channel(m1, m2, hue),
            hue_channel(m1, m2, hue - ONE_THIRD),
        )
    };

    [to_byte(r), to_byte(g), to_byte(b)]
}

fn hue_channel(m1: f32, m2: f32, hue: f32) -> f32 {
    const ONE_SIXTH: f32 = 1.0 / 6.0;
    const TWO_THIRDS: f32 = 2.0 / 3.0;

    let hue = hue.rem_euclid(1.0);
    if hue < ONE_SIXTH {
        m1 + (m2 - m1) * hue * 6.0
    } else if hue < 0.5 {
        m2
    } else if hue < TWO_THIRDS {
        m1 + (m2 - m1) * (TWO_THIRDS - hue) * 6.0
    } else {
        m1
    }
}

fn to_byte(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Create the harmonic building palette derived from `base_hue` (0-1).
pub fn build_palette(base_hue: f32) -> BlockPalette {
    BlockPalette::new([
        (
            "cloudstone",
            BlockType::new("Cloudstone", soft_colour(base_hue - 0.05, 0.74, 0.22)),
        ),
        (
            "petal_clay",
            BlockType::new("Petal Clay", soft_colour(base_hue, 0.63, 0.28)),
        ),
        (
            "moss_brick",
            BlockType::new("Moss Brick", soft_colour(base_hue + 0.07, 0.58, 0.26)),
        ),
        (
            "glass_tile",
            BlockType::new("Glass Tile", soft_colour(base_hue + 0.14, 0.68, 0.18)),
        ),
        (
            "dune_sand",
            BlockType::new("Dune Sand", soft_colour(base_hue - 0.12, 0.82, 0.18)),
        ),
    ])
}
