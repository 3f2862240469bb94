//! Parses config file
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Folder holding one image per sprite
    pub sprites_dir: PathBuf,
    /// Atlas page the game loads
    pub texture: PathBuf,
    /// Descriptor of [`Config::texture`]
    pub atlas: PathBuf,
    /// Where `pack --mode replace` copies the old files
    pub backup_dir: PathBuf,
    pub extensions: Vec<String>,
    /// File stems `clean` never deletes
    pub keep: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sprites_dir: PathBuf::from("sprites"),
            texture: PathBuf::from("../android/assets/textures.png"),
            atlas: PathBuf::from("../android/assets/textures.atlas"),
            backup_dir: PathBuf::from("../texture_backup_auto"),
            extensions: vec!["png".to_string()],
            keep: vec!["icon".to_string(), "logo".to_string()],
        }
    }
}

pub static CONFIG_FILE_NAME: &str = "atlaspack.toml";

/// `atlaspack.toml` next to the binary, then in the current folder.
///
/// Defaults when neither exists.
pub fn parse_config() -> eyre::Result<Config> {
    let candidates = [
        env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(|parent| parent.join(CONFIG_FILE_NAME))),
        Some(PathBuf::from(CONFIG_FILE_NAME)),
    ];

    for path in candidates.into_iter().flatten() {
        if path.is_file() {
            tracing::debug!("Using config {}", path.display());
            return parse_config_from_file(path.as_path());
        }
    }

    Ok(Config::default())
}

/// Relative paths are resolved against the folder of the config file.
pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let buffer = fs::read_to_string(path)?;

    let config: Config = toml::from_str(&buffer)?;

    let root = path.parent().unwrap_or(Path::new(""));

    let resolve = |p: PathBuf| {
        if p.is_relative() {
            root.join(p)
        } else {
            p
        }
    };

    Ok(Config {
        sprites_dir: resolve(config.sprites_dir),
        texture: resolve(config.texture),
        atlas: resolve(config.atlas),
        backup_dir: resolve(config.backup_dir),
        extensions: config.extensions,
        keep: config.keep,
    })
}

/// Explicit `--config` wins over the lookup.
pub fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    match path {
        Some(path) => parse_config_from_file(path),
        None => parse_config(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(
            &path,
            r#"
sprites_dir = "art"
keep = ["icon"]
"#,
        )
        .unwrap();

        let config = parse_config_from_file(&path).unwrap();

        assert_eq!(config.sprites_dir, dir.path().join("art"));
        assert_eq!(config.keep, vec!["icon".to_string()]);
        assert_eq!(config.extensions, vec!["png".to_string()]);
        assert_eq!(
            config.backup_dir,
            dir.path().join("../texture_backup_auto")
        );
    }

    #[test]
    fn absolute_paths_stay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let texture = dir.path().join("elsewhere").join("page.png");

        fs::write(
            &path,
            format!("texture = {:?}\n", texture.display().to_string()),
        )
        .unwrap();

        let config = parse_config_from_file(&path).unwrap();

        assert_eq!(config.texture, texture);
    }

    #[test]
    fn bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&path, "extensions = 3\n").unwrap();

        assert!(parse_config_from_file(&path).is_err());
        assert!(load_config(Some(dir.path().join("missing.toml").as_path())).is_err());
    }
}
