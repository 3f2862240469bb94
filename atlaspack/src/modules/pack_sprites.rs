//! Packs a folder of sprites into one atlas page and its descriptor.
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use atlas::{is_valid_sprite_name, Descriptor, MetadataMap, SpriteGeometry};
use image::RgbaImage;
use log::{error, info, warn};
use rayon::prelude::*;

use crate::{
    err,
    error::AtlasPackError,
    utils::{
        constants::DEFAULT_IMAGE_EXTENSIONS,
        img_stuffs::{compose_atlas, load_sprite_image, save_rgba_image},
        misc::{backup_file, list_image_files, sprite_name_from_path},
        pack_stuffs::{pack_rows, plan_atlas_size, SpriteSize},
    },
};

pub struct PackSpritesOptions {
    /// Files with other extensions are ignored.
    pub extensions: Vec<String>,
    /// Existing outputs are copied here before being overwritten.
    pub backup_dir: Option<PathBuf>,
}

impl Default for PackSpritesOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_IMAGE_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            backup_dir: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct PackReport {
    pub side: u32,
    /// In packing order, same as in the written descriptor.
    pub placements: Vec<SpriteGeometry>,
    /// [`AtlasPackError::CapacityExceeded`] for every sprite left out of the atlas.
    pub dropped: Vec<AtlasPackError>,
    /// Files that could not be loaded.
    pub failed: Vec<(PathBuf, AtlasPackError)>,
    /// How many placed sprites got split or pad from the metadata descriptor.
    pub carried_metadata: usize,
    pub backups: Vec<PathBuf>,
}

impl PackReport {
    pub fn is_complete(&self) -> bool {
        self.dropped.is_empty() && self.failed.is_empty()
    }
}

pub struct PackSprites {
    sprites_dir: PathBuf,
    output_texture: Option<PathBuf>,
    output_descriptor: Option<PathBuf>,
    /// Only split and pad are taken from here. Geometry is always computed again.
    metadata_descriptor: Option<PathBuf>,
    options: PackSpritesOptions,
}

struct CollectedFiles {
    files: Vec<(String, PathBuf)>,
    rejected: Vec<(PathBuf, AtlasPackError)>,
}

struct LoadedSprites {
    sprites: Vec<(String, RgbaImage)>,
    failed: Vec<(PathBuf, AtlasPackError)>,
}

impl PackSprites {
    pub fn new(sprites_dir: impl AsRef<Path> + Into<PathBuf>) -> Self {
        Self {
            sprites_dir: sprites_dir.into(),
            output_texture: None,
            output_descriptor: None,
            metadata_descriptor: None,
            options: PackSpritesOptions::default(),
        }
    }

    pub fn output_texture(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.output_texture = Some(path.into());
        self
    }

    pub fn output_descriptor(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.output_descriptor = Some(path.into());
        self
    }

    pub fn metadata_descriptor(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.metadata_descriptor = Some(path.into());
        self
    }

    pub fn extensions(&mut self, a: &[String]) -> &mut Self {
        self.options.extensions = a.to_vec();
        self
    }

    pub fn backup_dir(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.options.backup_dir = Some(path.into());
        self
    }

    fn check_sprites_dir(&self) -> eyre::Result<()> {
        if !self.sprites_dir.is_dir() {
            return Err(AtlasPackError::NotFound {
                path: self.sprites_dir.clone(),
            }
            .into());
        }

        Ok(())
    }

    /// Sprite name to file, refusing two files with the same stem.
    ///
    /// Files whose stem cannot be written as a descriptor name are returned separately.
    fn collect_sprite_files(&self) -> eyre::Result<CollectedFiles> {
        let files = list_image_files(&self.sprites_dir, &self.options.extensions);

        if files.is_empty() {
            return Err(AtlasPackError::NoSprites {
                path: self.sprites_dir.clone(),
            }
            .into());
        }

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut res = CollectedFiles {
            files: vec![],
            rejected: vec![],
        };

        for path in files {
            let Some(name) = sprite_name_from_path(&path) else {
                warn!("Skipping `{}`: file name is not valid UTF-8", path.display());
                continue;
            };

            if !is_valid_sprite_name(&name) {
                warn!("Skipping `{}`: `{}` cannot be a sprite name", path.display(), name);
                res.rejected
                    .push((path.clone(), AtlasPackError::InvalidName { name, path }));
                continue;
            }

            if let Some(first) = seen.get(&name) {
                return Err(AtlasPackError::NameCollision {
                    name,
                    first: first.clone(),
                    second: path,
                }
                .into());
            }

            seen.insert(name.clone(), path.clone());
            res.files.push((name, path));
        }

        Ok(res)
    }

    fn load_sprites(files: Vec<(String, PathBuf)>) -> LoadedSprites {
        // par_iter keeps the order when collecting
        let loaded = files
            .into_par_iter()
            .map(|(name, path)| {
                let img = load_sprite_image(&path);
                (name, path, img)
            })
            .collect::<Vec<_>>();

        let mut res = LoadedSprites {
            sprites: vec![],
            failed: vec![],
        };

        for (name, path, img) in loaded {
            match img {
                Ok(img) => {
                    info!("Loaded {} ({}x{})", name, img.width(), img.height());
                    res.sprites.push((name, img));
                }
                Err(err) => {
                    warn!("Cannot load `{}`: {}", path.display(), err);
                    res.failed.push((path, err));
                }
            }
        }

        res
    }

    fn load_metadata(&self) -> eyre::Result<MetadataMap> {
        let Some(path) = self.metadata_descriptor.as_ref() else {
            return Ok(MetadataMap::new());
        };

        let descriptor = Descriptor::open_from_file(path).map_err(AtlasPackError::from)?;

        descriptor.errors.iter().for_each(|err| {
            warn!("{}: {}", path.display(), err);
        });

        Ok(descriptor.metadata())
    }

    pub fn work(&self) -> eyre::Result<PackReport> {
        let Some(output_texture) = self.output_texture.as_ref() else {
            return err!("output texture is not set");
        };

        let Some(output_descriptor) = self.output_descriptor.as_ref() else {
            return err!("output descriptor is not set");
        };

        let Some(texture_name) = output_texture
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
        else {
            return err!("output texture `{}` has no file name", output_texture.display());
        };

        self.check_sprites_dir()?;

        let CollectedFiles { files, rejected } = self.collect_sprite_files()?;
        info!(
            "Found {} sprites in `{}`",
            files.len(),
            self.sprites_dir.display()
        );

        let LoadedSprites {
            sprites,
            mut failed,
        } = Self::load_sprites(files);
        failed.extend(rejected);

        if sprites.is_empty() {
            return Err(AtlasPackError::NoSprites {
                path: self.sprites_dir.clone(),
            }
            .into());
        }

        let metadata = self.load_metadata()?;

        let sizes = sprites
            .iter()
            .map(|(name, img)| SpriteSize::new(name.as_str(), img.width(), img.height()))
            .collect::<Vec<SpriteSize>>();

        let side = plan_atlas_size(&sizes);
        info!("Atlas size: {side}x{side}");

        let layout = pack_rows(side, &sizes);

        let dropped = layout
            .dropped
            .into_iter()
            .map(|sprite| {
                warn!(
                    "Sprite {} ({}x{}) does not fit in the {side}x{side} atlas",
                    sprite.name, sprite.width, sprite.height
                );

                AtlasPackError::CapacityExceeded {
                    name: sprite.name,
                    width: sprite.width,
                    height: sprite.height,
                    side,
                }
            })
            .collect::<Vec<_>>();

        if !dropped.is_empty() {
            error!(
                "{} of {} sprites were left out of the atlas",
                dropped.len(),
                sizes.len()
            );
        }

        if layout.placements.is_empty() {
            return err!("no sprite fits in a {side}x{side} atlas");
        }

        let images = sprites.into_iter().collect::<HashMap<String, RgbaImage>>();
        let canvas = compose_atlas(side, &layout.placements, &images);

        let descriptor =
            Descriptor::from_layout(texture_name, side, &layout.placements, Some(&metadata));

        let carried_metadata = descriptor
            .sprites
            .iter()
            .filter(|sprite| sprite.split.is_some() || sprite.pad.is_some())
            .count();

        let mut backups = vec![];

        if let Some(backup_dir) = self.options.backup_dir.as_ref() {
            for path in [output_texture, output_descriptor] {
                if let Some(backup) = backup_file(path, backup_dir)? {
                    info!("Backup: {} -> {}", path.display(), backup.display());
                    backups.push(backup);
                }
            }
        }

        save_rgba_image(&canvas, output_texture)?;
        info!("Saved texture {}", output_texture.display());

        descriptor
            .write_to_file(output_descriptor)
            .map_err(AtlasPackError::from)?;
        info!("Saved descriptor {}", output_descriptor.display());

        info!(
            "Packed {}/{} sprites",
            layout.placements.len(),
            sizes.len() + failed.len()
        );

        Ok(PackReport {
            side,
            placements: layout.placements,
            dropped,
            failed,
            carried_metadata,
            backups,
        })
    }
}
