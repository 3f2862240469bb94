/// Atlas side is never bigger than this, even if the sprites need more room.
pub const MAX_ATLAS_SIZE: u32 = 2048;

/// Row packing wastes space, so ask for 20% more area than the sprites cover.
///
/// Kept as a ratio to stay in integers.
pub const AREA_MARGIN_NUMERATOR: u64 = 6;
pub const AREA_MARGIN_DENOMINATOR: u64 = 5;

pub const MIN_ATLAS_SIZE: u32 = 2;

pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["png"];

/// Output extension of extracted sprites.
pub const SPRITE_EXTENSION: &str = "png";

/// `clean` never deletes files with these stems.
pub const KEEP_STEMS: &[&str] = &["icon", "logo"];

pub const BACKUP_SUFFIX: &str = "_backup";
