//! Splits texture atlases into sprites and packs sprites back into atlases.
pub mod error;
pub mod modules;
pub mod utils;

pub use atlas;

#[cfg(test)]
mod test {
    use std::fs;

    use image::{Rgba, RgbaImage};

    use crate::modules::{extract_sprites::ExtractSprites, pack_sprites::PackSprites};

    /// Extract, repack, extract again. Sprites must come out pixel identical.
    #[test]
    fn extract_then_repack() {
        let dir = tempfile::tempdir().unwrap();

        let source = RgbaImage::from_fn(64, 64, |x, y| Rgba([x as u8 * 4, y as u8 * 4, 7, 255]));
        source.save(dir.path().join("textures.png")).unwrap();

        fs::write(
            dir.path().join("textures.atlas"),
            "
textures.png
size: 64,64
format: RGBA8888
filter: Nearest,Nearest
repeat: none
button
  rotate: false
  xy: 0, 0
  size: 20, 10
  split: 5, 5, 5, 4
  orig: 20, 10
  offset: 0, 0
  index: -1
panel
  rotate: false
  xy: 20, 0
  size: 30, 30
  pad: 1, 1, 2, 2
  orig: 30, 30
  offset: 0, 0
  index: -1
",
        )
        .unwrap();

        let sprites_dir = dir.path().join("sprites");

        let extracted = ExtractSprites::new()
            .texture(dir.path().join("textures.png"))
            .descriptor(dir.path().join("textures.atlas"))
            .output_dir(sprites_dir.as_path())
            .work()
            .unwrap();
        assert_eq!(extracted.extracted.len(), 2);

        let packed = PackSprites::new(sprites_dir.as_path())
            .output_texture(dir.path().join("textures_new.png"))
            .output_descriptor(dir.path().join("textures_new.atlas"))
            .metadata_descriptor(dir.path().join("textures.atlas"))
            .work()
            .unwrap();
        assert!(packed.is_complete());
        assert_eq!(packed.carried_metadata, 2);

        let again = dir.path().join("again");
        let report = ExtractSprites::new()
            .texture(dir.path().join("textures_new.png"))
            .descriptor(dir.path().join("textures_new.atlas"))
            .output_dir(again.as_path())
            .work()
            .unwrap();
        assert_eq!(report.extracted.len(), 2);

        for name in ["button.png", "panel.png"] {
            let first = image::open(sprites_dir.join(name)).unwrap().into_rgba8();
            let second = image::open(again.join(name)).unwrap().into_rgba8();

            assert_eq!(first, second);
        }

        let regenerated = atlas::Descriptor::open_from_file(dir.path().join("textures_new.atlas"))
            .unwrap();
        assert_eq!(regenerated.get("panel").unwrap().pad, Some([1, 1, 2, 2]));
        assert_eq!(regenerated.get("button").unwrap().split, Some([5, 5, 5, 4]));
    }
}
