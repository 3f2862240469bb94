use std::{collections::HashMap, fs, path::Path};

use atlas::SpriteGeometry;
use image::{imageops, RgbaImage};

use crate::error::AtlasPackError;

pub fn load_sprite_image(path: &Path) -> Result<RgbaImage, AtlasPackError> {
    if !path.exists() {
        return Err(AtlasPackError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let img = image::open(path)?;

    Ok(img.into_rgba8())
}

/// Copies the region of `geometry` out of `img`.
///
/// Regions reaching past the image are an error, not clamped.
pub fn crop_sprite(img: &RgbaImage, geometry: &SpriteGeometry) -> Result<RgbaImage, AtlasPackError> {
    let (image_width, image_height) = img.dimensions();

    let fits_x = geometry
        .x
        .checked_add(geometry.width)
        .is_some_and(|right| right <= image_width);
    let fits_y = geometry
        .y
        .checked_add(geometry.height)
        .is_some_and(|bottom| bottom <= image_height);

    if !fits_x || !fits_y {
        return Err(AtlasPackError::OutOfBounds {
            name: geometry.name.clone(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            image_width,
            image_height,
        });
    }

    Ok(imageops::crop_imm(
        img,
        geometry.x,
        geometry.y,
        geometry.width,
        geometry.height,
    )
    .to_image())
}

/// Fully transparent square canvas with every placement pasted at its position.
///
/// Pixels are replaced, never blended.
pub fn compose_atlas(
    side: u32,
    placements: &[SpriteGeometry],
    sprites: &HashMap<String, RgbaImage>,
) -> RgbaImage {
    let mut canvas = RgbaImage::new(side, side);

    placements.iter().for_each(|placement| {
        if let Some(sprite) = sprites.get(&placement.name) {
            imageops::replace(&mut canvas, sprite, placement.x as i64, placement.y as i64);
        }
    });

    canvas
}

/// Creates the parent folder if needed.
pub fn save_rgba_image(img: &RgbaImage, path: &Path) -> Result<(), AtlasPackError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    img.save(path)?;

    Ok(())
}
