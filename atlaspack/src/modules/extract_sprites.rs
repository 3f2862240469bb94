//! Cuts every sprite of an atlas page out into its own file.
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use atlas::{error::AtlasError, Descriptor, SpriteGeometry};
use image::RgbaImage;
use log::{info, warn};
use rayon::prelude::*;

use crate::{
    err,
    error::AtlasPackError,
    utils::{
        constants::SPRITE_EXTENSION,
        img_stuffs::{crop_sprite, load_sprite_image, save_rgba_image},
        misc::sanitize_sprite_name,
    },
};

#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Sprite name and the written file, in descriptor order.
    pub extracted: Vec<(String, PathBuf)>,
    /// Sprites without `xy` or `size`.
    pub incomplete: Vec<String>,
    pub failed: Vec<(String, AtlasPackError)>,
    /// Problems found in the descriptor itself.
    pub descriptor_errors: Vec<AtlasError>,
}

impl ExtractReport {
    pub fn total(&self) -> usize {
        self.extracted.len() + self.incomplete.len() + self.failed.len()
    }
}

/// Output path of every sprite, or why it cannot have one.
fn assign_output_paths(
    geometries: Vec<SpriteGeometry>,
    output_dir: &Path,
) -> Vec<Result<(SpriteGeometry, PathBuf), (String, AtlasPackError)>> {
    let mut taken: HashMap<PathBuf, String> = HashMap::new();

    geometries
        .into_iter()
        .map(|geometry| {
            let file_name = format!(
                "{}.{}",
                sanitize_sprite_name(&geometry.name),
                SPRITE_EXTENSION
            );
            let path = output_dir.join(file_name);

            if let Some(other) = taken.get(&path) {
                return Err((
                    geometry.name.clone(),
                    AtlasPackError::OutputCollision {
                        name: geometry.name,
                        other: other.clone(),
                        path,
                    },
                ));
            }

            taken.insert(path.clone(), geometry.name.clone());

            Ok((geometry, path))
        })
        .collect()
}

/// Crops and saves each geometry. Failures do not stop the others.
///
/// Returned lists keep the order of `geometries`.
pub fn extract_geometries(
    img: &RgbaImage,
    geometries: Vec<SpriteGeometry>,
    output_dir: &Path,
) -> (Vec<(String, PathBuf)>, Vec<(String, AtlasPackError)>) {
    let results = assign_output_paths(geometries, output_dir)
        .into_par_iter()
        .map(|assigned| -> Result<(String, PathBuf), (String, AtlasPackError)> {
            let (geometry, path) = assigned?;

            // nothing is written when the crop fails
            crop_sprite(img, &geometry)
                .and_then(|sprite| save_rgba_image(&sprite, &path))
                .map(|_| (geometry.name.clone(), path))
                .map_err(|err| (geometry.name, err))
        })
        .collect::<Vec<_>>();

    let mut extracted = vec![];
    let mut failed = vec![];

    for res in results {
        match res {
            Ok((name, path)) => {
                info!("Extracted {} -> {}", name, path.display());
                extracted.push((name, path));
            }
            Err((name, err)) => {
                warn!("Cannot extract {}: {}", name, err);
                failed.push((name, err));
            }
        }
    }

    (extracted, failed)
}

pub struct ExtractSprites {
    texture: Option<PathBuf>,
    descriptor: Option<PathBuf>,
    output_dir: Option<PathBuf>,
}

impl Default for ExtractSprites {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractSprites {
    pub fn new() -> Self {
        Self {
            texture: None,
            descriptor: None,
            output_dir: None,
        }
    }

    pub fn texture(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.texture = Some(path.into());
        self
    }

    pub fn descriptor(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.descriptor = Some(path.into());
        self
    }

    pub fn output_dir(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.output_dir = Some(path.into());
        self
    }

    pub fn work(&self) -> eyre::Result<ExtractReport> {
        let Some(texture) = self.texture.as_ref() else {
            return err!("texture is not set");
        };

        let Some(descriptor_path) = self.descriptor.as_ref() else {
            return err!("descriptor is not set");
        };

        let Some(output_dir) = self.output_dir.as_ref() else {
            return err!("output folder is not set");
        };

        info!("Texture: {}", texture.display());
        info!("Descriptor: {}", descriptor_path.display());

        let img = load_sprite_image(texture)?;
        info!("Texture size: {}x{}", img.width(), img.height());

        let Descriptor {
            sprites, errors, ..
        } = Descriptor::open_from_file(descriptor_path).map_err(AtlasPackError::from)?;

        info!("Found {} sprites in descriptor", sprites.len());

        errors.iter().for_each(|err| {
            warn!("{}: {}", descriptor_path.display(), err);
        });

        let mut geometries = vec![];
        let mut incomplete = vec![];

        for sprite in sprites {
            match sprite.geometry() {
                Some(geometry) => geometries.push(geometry),
                None => {
                    warn!("Sprite {} is missing xy or size", sprite.name);
                    incomplete.push(sprite.name);
                }
            }
        }

        fs::create_dir_all(output_dir)?;

        let (extracted, failed) = extract_geometries(&img, geometries, output_dir);

        let report = ExtractReport {
            extracted,
            incomplete,
            failed,
            descriptor_errors: errors,
        };

        info!(
            "Extracted {}/{} sprites",
            report.extracted.len(),
            report.total()
        );

        Ok(report)
    }
}

#[cfg(test)]
mod test {
    use image::Rgba;

    use super::*;

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(32, 32, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        })
    }

    #[test]
    fn extract_with_bad_sprite() {
        let dir = tempfile::tempdir().unwrap();
        let texture = dir.path().join("textures.png");
        checkerboard().save(&texture).unwrap();

        let descriptor = dir.path().join("textures.atlas");
        fs::write(
            &descriptor,
            "
textures.png
size: 32,32
format: RGBA8888
filter: Nearest,Nearest
repeat: none
white
  rotate: false
  xy: 0, 0
  size: 8, 8
clear
  xy: 8, 0
  size: 8, 8
outside
  xy: 28, 28
  size: 8, 8
lost
  size: 4, 4
",
        )
        .unwrap();

        let out = dir.path().join("sprites");
        let report = ExtractSprites::new()
            .texture(texture.as_path())
            .descriptor(descriptor.as_path())
            .output_dir(out.as_path())
            .work()
            .unwrap();

        assert_eq!(report.total(), 4);
        assert_eq!(report.incomplete, vec!["lost".to_string()]);

        let names = report
            .extracted
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["white", "clear"]);

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "outside");
        assert!(matches!(
            report.failed[0].1,
            AtlasPackError::OutOfBounds { .. }
        ));
        assert!(!out.join("outside.png").exists());

        let white = image::open(out.join("white.png")).unwrap().into_rgba8();
        assert_eq!(white.dimensions(), (8, 8));
        assert!(white.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));

        let clear = image::open(out.join("clear.png")).unwrap().into_rgba8();
        assert!(clear.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn sanitized_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let img = checkerboard();

        let (extracted, failed) = extract_geometries(
            &img,
            vec![SpriteGeometry::new("icon/button:hover", 0, 0, 4, 4)],
            dir.path(),
        );

        assert!(failed.is_empty());
        assert_eq!(extracted[0].1, dir.path().join("icon_button_hover.png"));
        assert!(dir.path().join("icon_button_hover.png").exists());
    }

    #[test]
    fn sanitized_names_collide() {
        let dir = tempfile::tempdir().unwrap();
        let img = checkerboard();

        let (extracted, failed) = extract_geometries(
            &img,
            vec![
                SpriteGeometry::new("a:b", 0, 0, 4, 4),
                SpriteGeometry::new("a/b", 8, 0, 4, 4),
            ],
            dir.path(),
        );

        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].0, "a:b");
        assert!(matches!(
            &failed[0].1,
            AtlasPackError::OutputCollision { other, .. } if other == "a:b"
        ));
    }

    #[test]
    fn missing_texture() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.atlas"), "").unwrap();

        let err = ExtractSprites::new()
            .texture(dir.path().join("nope.png"))
            .descriptor(dir.path().join("a.atlas"))
            .output_dir(dir.path().join("out"))
            .work()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<AtlasPackError>(),
            Some(AtlasPackError::NotFound { .. })
        ));
        assert!(!dir.path().join("out").exists());
    }
}
