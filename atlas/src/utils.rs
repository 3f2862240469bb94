use std::{fs, io::ErrorKind, path::Path};

use crate::{
    error::AtlasError, parser::parse_descriptor, AtlasHeader, Descriptor, MetadataMap,
    SpriteEntry, SpriteGeometry,
};

impl Descriptor {
    pub fn open_from_str(i: &str) -> Descriptor {
        parse_descriptor(i)
    }

    pub fn open_from_file(path: impl AsRef<Path>) -> Result<Descriptor, AtlasError> {
        let path = path.as_ref();

        let text = fs::read_to_string(path).map_err(|op| match op.kind() {
            ErrorKind::NotFound => AtlasError::NotFound {
                path: path.to_path_buf(),
            },
            _ => AtlasError::IOError { source: op },
        })?;

        Ok(Self::open_from_str(&text))
    }

    /// Builds a single page descriptor out of packed placements.
    ///
    /// Split and pad are copied from `metadata` when the sprite name matches.
    pub fn from_layout(
        texture: impl Into<String>,
        side: u32,
        placements: &[SpriteGeometry],
        metadata: Option<&MetadataMap>,
    ) -> Descriptor {
        let sprites = placements
            .iter()
            .map(|placement| {
                let extra = metadata.and_then(|metadata| metadata.get(&placement.name));

                SpriteEntry {
                    name: placement.name.clone(),
                    xy: Some((placement.x, placement.y)),
                    size: Some((placement.width, placement.height)),
                    split: extra.and_then(|extra| extra.split),
                    pad: extra.and_then(|extra| extra.pad),
                }
            })
            .collect();

        Descriptor {
            header: AtlasHeader {
                texture: Some(texture.into()),
                size: Some((side, side)),
                ..Default::default()
            },
            sprites,
            errors: vec![],
        }
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<(), AtlasError> {
        fs::write(path, self.write_to_string())?;

        Ok(())
    }
}
