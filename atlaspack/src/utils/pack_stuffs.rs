use atlas::SpriteGeometry;

use super::constants::{
    AREA_MARGIN_DENOMINATOR, AREA_MARGIN_NUMERATOR, MAX_ATLAS_SIZE, MIN_ATLAS_SIZE,
};

/// Sprite name with its pixel dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteSize {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl SpriteSize {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// Smallest power of two square that covers the total area plus margin.
///
/// Capped at [`MAX_ATLAS_SIZE`] even when it is not enough.
pub fn plan_atlas_size(sprites: &[SpriteSize]) -> u32 {
    let total_area: u64 = sprites
        .iter()
        .map(|sprite| sprite.width as u64 * sprite.height as u64)
        .sum();

    let needed_area = total_area * AREA_MARGIN_NUMERATOR / AREA_MARGIN_DENOMINATOR;

    let mut side = MIN_ATLAS_SIZE as u64;

    while side * side < needed_area && side < MAX_ATLAS_SIZE as u64 {
        side *= 2;
    }

    side.min(MAX_ATLAS_SIZE as u64) as u32
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackLayout {
    pub side: u32,
    /// In packing order.
    pub placements: Vec<SpriteGeometry>,
    /// Sprites that did not fit, in packing order.
    pub dropped: Vec<SpriteSize>,
}

/// Shelf packing. Tallest first, left to right, new row when the current one is full.
///
/// Ties in height keep the input order.
pub fn pack_rows(side: u32, sprites: &[SpriteSize]) -> PackLayout {
    let mut order = sprites.iter().collect::<Vec<&SpriteSize>>();
    // stable
    order.sort_by(|a, b| b.height.cmp(&a.height));

    let mut layout = PackLayout {
        side,
        ..Default::default()
    };

    let mut cursor_x = 0u32;
    let mut cursor_y = 0u32;
    let mut row_height = 0u32;

    for sprite in order {
        let SpriteSize {
            name,
            width,
            height,
        } = sprite;

        if cursor_x.saturating_add(*width) > side {
            cursor_x = 0;
            cursor_y += row_height;
            row_height = 0;
        }

        // the wrap above stays even when the sprite is dropped
        if *width > side || cursor_y.saturating_add(*height) > side {
            layout.dropped.push(sprite.clone());
            continue;
        }

        layout.placements.push(SpriteGeometry::new(
            name.as_str(),
            cursor_x,
            cursor_y,
            *width,
            *height,
        ));

        cursor_x += width;
        row_height = row_height.max(*height);
    }

    layout
}
