use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::constants::BACKUP_SUFFIX;

#[macro_export]
macro_rules! err {
    ($e: ident) => {{
        use eyre::eyre;

        Err(eyre!($e))
    }};

    ($format_string: literal) => {{
        use eyre::eyre;

        Err(eyre!($format_string))
    }};

    ($($arg:tt)*) => {{
        use eyre::eyre;

        Err(eyre!($($arg)*))
    }};
}

pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            extensions
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(ext))
        })
}

/// Files directly inside `path` with one of the extensions, sorted by file name.
pub fn list_image_files(path: &Path, extensions: &[String]) -> Vec<PathBuf> {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, extensions))
        .collect()
}

/// `sprites/button.png` is sprite `button`
pub fn sprite_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}

/// Anything outside `[A-Za-z0-9_.-]` becomes `_`.
pub fn sanitize_sprite_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Copies `path` into `backup_dir` as `<stem>_backup.<ext>`.
///
/// Returns [`None`] when there is nothing to back up.
pub fn backup_file(path: &Path, backup_dir: &Path) -> std::io::Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, BACKUP_SUFFIX, ext.to_string_lossy()),
        None => format!("{}{}", stem, BACKUP_SUFFIX),
    };

    fs::create_dir_all(backup_dir)?;

    let out_path = backup_dir.join(file_name);
    fs::copy(path, out_path.as_path())?;

    Ok(Some(out_path))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sanitize() {
        assert_eq!(sanitize_sprite_name("icon/button:hover"), "icon_button_hover");
        assert_eq!(sanitize_sprite_name("hero-walk_01.v2"), "hero-walk_01.v2");
        assert_eq!(sanitize_sprite_name("a b\\c"), "a_b_c");
        assert_eq!(sanitize_sprite_name("épée"), "_p_e");
    }

    #[test]
    fn sprite_name() {
        assert_eq!(
            sprite_name_from_path(Path::new("sprites/button.png")).as_deref(),
            Some("button")
        );
        assert_eq!(
            sprite_name_from_path(Path::new("sprites/hero.walk.png")).as_deref(),
            Some("hero.walk")
        );
    }

    #[test]
    fn list_only_matching_files() {
        let dir = tempfile::tempdir().unwrap();

        fs::write(dir.path().join("b.png"), b"").unwrap();
        fs::write(dir.path().join("a.PNG"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("nested.png")).unwrap();
        fs::write(dir.path().join("nested.png").join("c.png"), b"").unwrap();

        let files = list_image_files(dir.path(), &["png".to_string()]);
        let names = files
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn backup() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("textures.atlas");
        let backup_dir = dir.path().join("backup");

        assert!(backup_file(&original, &backup_dir).unwrap().is_none());

        fs::write(&original, "hello").unwrap();

        let out = backup_file(&original, &backup_dir).unwrap().unwrap();

        assert_eq!(out, backup_dir.join("textures_backup.atlas"));
        assert_eq!(fs::read_to_string(out).unwrap(), "hello");
    }
}
