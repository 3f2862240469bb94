use std::collections::HashMap;

use crate::error::AtlasError;

/// Stretch or padding insets, in `left, right, top, bottom` order.
pub type Insets = [i32; 4];

/// Whether `name` can be written as a sprite name line and read back as the same name.
///
/// Empty names, names with `:` or line breaks and names with surrounding whitespace cannot.
pub fn is_valid_sprite_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains(|c: char| matches!(c, ':' | '\n' | '\r'))
}

/// Position and dimensions of a named sprite inside an atlas page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpriteGeometry {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteGeometry {
    pub fn new(name: impl Into<String>, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    pub fn overlaps(&self, other: &SpriteGeometry) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteMetadata {
    pub name: String,
    pub split: Option<Insets>,
    pub pad: Option<Insets>,
}

impl SpriteMetadata {
    pub fn is_empty(&self) -> bool {
        self.split.is_none() && self.pad.is_none()
    }
}

pub type MetadataMap = HashMap<String, SpriteMetadata>;

/// One sprite block as it appears in a descriptor.
///
/// Every field is optional because a block may be incomplete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpriteEntry {
    pub name: String,
    pub xy: Option<(u32, u32)>,
    pub size: Option<(u32, u32)>,
    pub split: Option<Insets>,
    pub pad: Option<Insets>,
}

impl SpriteEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns [`None`] if either `xy` or `size` is missing.
    pub fn geometry(&self) -> Option<SpriteGeometry> {
        let (x, y) = self.xy?;
        let (width, height) = self.size?;

        Some(SpriteGeometry::new(self.name.as_str(), x, y, width, height))
    }

    pub fn metadata(&self) -> SpriteMetadata {
        SpriteMetadata {
            name: self.name.clone(),
            split: self.split,
            pad: self.pad,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AtlasHeader {
    /// File name of the page image.
    pub texture: Option<String>,
    pub size: Option<(u32, u32)>,
    pub format: Option<String>,
    pub filter: Option<String>,
    pub repeat: Option<String>,
}

#[derive(Debug, Default)]
pub struct Descriptor {
    pub header: AtlasHeader,
    /// Sprite blocks in the order they first appear.
    pub sprites: Vec<SpriteEntry>,
    /// Field level problems found while parsing. None of them stop parsing.
    pub errors: Vec<AtlasError>,
}

impl Descriptor {
    pub fn get(&self, name: &str) -> Option<&SpriteEntry> {
        self.sprites.iter().find(|sprite| sprite.name == name)
    }

    /// Sprites with both `xy` and `size`, in descriptor order.
    pub fn geometries(&self) -> Vec<SpriteGeometry> {
        self.sprites
            .iter()
            .filter_map(SpriteEntry::geometry)
            .collect()
    }

    /// Names of sprites that cannot be cropped or packed.
    pub fn incomplete(&self) -> Vec<&str> {
        self.sprites
            .iter()
            .filter(|sprite| sprite.geometry().is_none())
            .map(|sprite| sprite.name.as_str())
            .collect()
    }

    /// Split and pad hints of every sprite that has at least one of them.
    pub fn metadata(&self) -> MetadataMap {
        self.sprites
            .iter()
            .map(SpriteEntry::metadata)
            .filter(|metadata| !metadata.is_empty())
            .map(|metadata| (metadata.name.clone(), metadata))
            .collect()
    }
}
