use crate::{AtlasHeader, Descriptor, Insets, SpriteEntry};

pub const DEFAULT_FORMAT: &str = "RGBA8888";
pub const DEFAULT_FILTER: &str = "Nearest,Nearest";
pub const DEFAULT_REPEAT: &str = "none";

trait WriteToString {
    fn write_to_string(&self, s: &mut String);
}

impl Descriptor {
    /// Sprites without complete geometry are left out.
    pub fn write_to_string(&self) -> String {
        let mut s = String::new();

        let Self {
            header, sprites, ..
        } = self;

        header.write_to_string(&mut s);
        sprites.write_to_string(&mut s);

        s
    }
}

impl WriteToString for AtlasHeader {
    fn write_to_string(&self, s: &mut String) {
        let Self {
            texture,
            size,
            format,
            filter,
            repeat,
        } = self;

        s.push('\n');

        if let Some(texture) = texture {
            s.push_str(&format!("{}\n", texture));
        }

        if let Some((width, height)) = size {
            s.push_str(&format!("size: {},{}\n", width, height));
        }

        s.push_str(&format!(
            "format: {}\n",
            format.as_deref().unwrap_or(DEFAULT_FORMAT)
        ));
        s.push_str(&format!(
            "filter: {}\n",
            filter.as_deref().unwrap_or(DEFAULT_FILTER)
        ));
        s.push_str(&format!(
            "repeat: {}\n",
            repeat.as_deref().unwrap_or(DEFAULT_REPEAT)
        ));
    }
}

fn write_insets(s: &mut String, key: &str, insets: &Insets) {
    let [a, b, c, d] = insets;

    s.push_str(&format!("  {key}: {a}, {b}, {c}, {d}\n"));
}

impl WriteToString for SpriteEntry {
    fn write_to_string(&self, s: &mut String) {
        let Some(geometry) = self.geometry() else {
            return;
        };

        s.push_str(&format!("{}\n", geometry.name));
        s.push_str("  rotate: false\n");
        s.push_str(&format!("  xy: {}, {}\n", geometry.x, geometry.y));
        s.push_str(&format!("  size: {}, {}\n", geometry.width, geometry.height));

        if let Some(split) = &self.split {
            write_insets(s, "split", split);
        }

        if let Some(pad) = &self.pad {
            write_insets(s, "pad", pad);
        }

        // no trimming so the original size is the packed size
        s.push_str(&format!("  orig: {}, {}\n", geometry.width, geometry.height));
        s.push_str("  offset: 0, 0\n");
        s.push_str("  index: -1\n");
    }
}

impl WriteToString for Vec<SpriteEntry> {
    fn write_to_string(&self, s: &mut String) {
        self.iter().for_each(|sprite| sprite.write_to_string(s));
    }
}

#[cfg(test)]
mod test {
    use crate::{parse_descriptor, Descriptor, MetadataMap, SpriteGeometry, SpriteMetadata};

    #[test]
    fn exact_layout() {
        let placements = vec![SpriteGeometry::new("b", 0, 0, 80, 80)];
        let descriptor = Descriptor::from_layout("atlas.png", 256, &placements, None);

        assert_eq!(
            descriptor.write_to_string(),
            "
atlas.png
size: 256,256
format: RGBA8888
filter: Nearest,Nearest
repeat: none
b
  rotate: false
  xy: 0, 0
  size: 80, 80
  orig: 80, 80
  offset: 0, 0
  index: -1
"
        );
    }

    #[test]
    fn metadata_goes_between_size_and_orig() {
        let placements = vec![SpriteGeometry::new("button", 10, 20, 30, 40)];
        let mut metadata = MetadataMap::new();
        metadata.insert(
            "button".to_string(),
            SpriteMetadata {
                name: "button".to_string(),
                split: Some([5, 5, 5, 4]),
                pad: Some([0, 1, 0, 1]),
            },
        );

        let text = Descriptor::from_layout("atlas.png", 64, &placements, Some(&metadata))
            .write_to_string();

        assert!(text.contains(
            "  size: 30, 40\n  split: 5, 5, 5, 4\n  pad: 0, 1, 0, 1\n  orig: 30, 40\n"
        ));
    }

    #[test]
    fn round_trip() {
        let placements = vec![
            SpriteGeometry::new("tall", 0, 0, 10, 90),
            SpriteGeometry::new("wide", 10, 0, 100, 20),
            SpriteGeometry::new("dot", 110, 0, 1, 1),
            SpriteGeometry::new("ui/panel", 0, 90, 64, 12),
        ];

        let text = Descriptor::from_layout("pack.png", 128, &placements, None).write_to_string();
        let parsed = parse_descriptor(&text);

        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.geometries(), placements);
        assert_eq!(parsed.header.texture.as_deref(), Some("pack.png"));
        assert_eq!(parsed.header.size, Some((128, 128)));
    }

    #[test]
    fn incomplete_sprites_are_not_written() {
        let descriptor = parse_descriptor("a\n  xy: 0, 0\nb\n  xy: 0, 0\n  size: 2, 2\n");
        let text = descriptor.write_to_string();
        let parsed = parse_descriptor(&text);

        assert!(parsed.get("a").is_none());
        assert!(parsed.get("b").is_some());
        assert!(text.contains("b\n  rotate: false\n"));
    }
}
