use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use atlaspack::{err, modules::pack_sprites::PackSprites};
use clap::{Parser, ValueEnum};

use crate::config::load_config;

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PackMode {
    /// Writes `<texture>_new.png` and `<atlas>_new.atlas` next to the originals
    New,
    /// Overwrites the originals after backing them up
    Replace,
    /// Writes to `--texture-out` and `--atlas-out`
    Custom,
}

#[derive(Debug, Parser)]
#[command(name = "pack", version, about = "Packs a folder of sprites into one atlas page", long_about = None)]
struct PackCli {
    /// Folder with one image per sprite
    #[arg(short, long)]
    sprites: Option<PathBuf>,
    /// Current atlas texture
    #[arg(long)]
    texture: Option<PathBuf>,
    /// Current atlas descriptor
    #[arg(long)]
    atlas: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = PackMode::New)]
    mode: PackMode,
    #[arg(long)]
    texture_out: Option<PathBuf>,
    #[arg(long)]
    atlas_out: Option<PathBuf>,
    /// Descriptor to take split and pad from, defaults to the current atlas
    #[arg(long, conflicts_with = "no_metadata")]
    metadata: Option<PathBuf>,
    /// Do not carry split and pad over
    #[arg(long)]
    no_metadata: bool,
    #[arg(long)]
    backup_dir: Option<PathBuf>,
    /// Do not ask before replacing
    #[arg(short, long)]
    yes: bool,
    /// Succeed even when some sprites did not fit
    #[arg(long)]
    allow_drop: bool,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
struct Outputs {
    texture: PathBuf,
    atlas: PathBuf,
    backup_dir: Option<PathBuf>,
}

/// `a/textures.png` with `_new` is `a/textures_new.png`
fn with_stem_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };

    path.with_file_name(file_name)
}

fn resolve_outputs(
    mode: PackMode,
    texture: &Path,
    atlas: &Path,
    texture_out: Option<PathBuf>,
    atlas_out: Option<PathBuf>,
    backup_dir: &Path,
) -> eyre::Result<Outputs> {
    match mode {
        PackMode::New => Ok(Outputs {
            texture: texture_out.unwrap_or_else(|| with_stem_suffix(texture, "_new")),
            atlas: atlas_out.unwrap_or_else(|| with_stem_suffix(atlas, "_new")),
            backup_dir: None,
        }),
        PackMode::Replace => {
            if texture_out.is_some() || atlas_out.is_some() {
                return err!("--texture-out and --atlas-out cannot be used with --mode replace");
            }

            Ok(Outputs {
                texture: texture.to_path_buf(),
                atlas: atlas.to_path_buf(),
                backup_dir: Some(backup_dir.to_path_buf()),
            })
        }
        PackMode::Custom => {
            let (Some(texture), Some(atlas)) = (texture_out, atlas_out) else {
                return err!("--mode custom needs both --texture-out and --atlas-out");
            };

            Ok(Outputs {
                texture,
                atlas,
                backup_dir: None,
            })
        }
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();

    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}

fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    Ok(is_yes(&answer))
}

/// Returns whether every sprite made it into the atlas, or drops were allowed.
fn pack(cli: PackCli) -> eyre::Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let sprites = cli.sprites.unwrap_or(config.sprites_dir);
    let texture = cli.texture.unwrap_or(config.texture);
    let atlas = cli.atlas.unwrap_or(config.atlas);
    let backup_dir = cli.backup_dir.unwrap_or(config.backup_dir);

    let outputs = resolve_outputs(
        cli.mode,
        &texture,
        &atlas,
        cli.texture_out,
        cli.atlas_out,
        &backup_dir,
    )?;

    if cli.mode == PackMode::Replace
        && !cli.yes
        && !confirm(&format!(
            "Replace {} and {}? Backups go to {}",
            outputs.texture.display(),
            outputs.atlas.display(),
            backup_dir.display()
        ))?
    {
        println!("Cancelled");
        return Ok(true);
    }

    let mut packer = PackSprites::new(sprites);

    packer
        .output_texture(outputs.texture.as_path())
        .output_descriptor(outputs.atlas.as_path())
        .extensions(&config.extensions);

    if let Some(dir) = outputs.backup_dir.as_ref() {
        packer.backup_dir(dir.as_path());
    }

    match cli.metadata {
        Some(path) => {
            packer.metadata_descriptor(path);
        }
        None if !cli.no_metadata && atlas.is_file() => {
            packer.metadata_descriptor(atlas.as_path());
        }
        None => (),
    }

    let report = packer.work()?;

    println!(
        "Packed {} sprites into a {side}x{side} atlas",
        report.placements.len(),
        side = report.side
    );
    println!("Texture: {}", outputs.texture.display());
    println!("Atlas: {}", outputs.atlas.display());

    if report.carried_metadata > 0 {
        println!("Carried split/pad for {} sprites", report.carried_metadata);
    }

    for backup in &report.backups {
        println!("Backup: {}", backup.display());
    }

    for (path, err) in &report.failed {
        println!("Failed to load {}: {}", path.display(), err);
    }

    for err in &report.dropped {
        println!("Dropped: {}", err);
    }

    Ok(report.is_complete() || cli.allow_drop)
}

pub struct Pack;

impl Cli for Pack {
    fn name(&self) -> &'static str {
        "pack"
    }

    fn cli(&self) -> CliRes {
        let cli = PackCli::parse_from(module_args());

        match pack(cli) {
            Ok(true) => CliRes::Ok,
            Ok(false) => CliRes::Err,
            Err(err) => {
                println!("{}", err);
                CliRes::Err
            }
        }
    }

    fn cli_help(&self) {
        // handled by clap
        unreachable!()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_names() {
        let outputs = resolve_outputs(
            PackMode::New,
            Path::new("assets/textures.png"),
            Path::new("assets/textures.atlas"),
            None,
            None,
            Path::new("backup"),
        )
        .unwrap();

        assert_eq!(
            outputs,
            Outputs {
                texture: PathBuf::from("assets/textures_new.png"),
                atlas: PathBuf::from("assets/textures_new.atlas"),
                backup_dir: None,
            }
        );
    }

    #[test]
    fn replace_backs_up() {
        let outputs = resolve_outputs(
            PackMode::Replace,
            Path::new("textures.png"),
            Path::new("textures.atlas"),
            None,
            None,
            Path::new("backup"),
        )
        .unwrap();

        assert_eq!(outputs.texture, PathBuf::from("textures.png"));
        assert_eq!(outputs.backup_dir, Some(PathBuf::from("backup")));

        assert!(resolve_outputs(
            PackMode::Replace,
            Path::new("textures.png"),
            Path::new("textures.atlas"),
            Some(PathBuf::from("other.png")),
            None,
            Path::new("backup"),
        )
        .is_err());
    }

    #[test]
    fn custom_needs_both() {
        assert!(resolve_outputs(
            PackMode::Custom,
            Path::new("textures.png"),
            Path::new("textures.atlas"),
            Some(PathBuf::from("out.png")),
            None,
            Path::new("backup"),
        )
        .is_err());

        let outputs = resolve_outputs(
            PackMode::Custom,
            Path::new("textures.png"),
            Path::new("textures.atlas"),
            Some(PathBuf::from("out.png")),
            Some(PathBuf::from("out.atlas")),
            Path::new("backup"),
        )
        .unwrap();

        assert_eq!(outputs.atlas, PathBuf::from("out.atlas"));
    }

    #[test]
    fn answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }

    #[test]
    fn parse_args() {
        let cli = PackCli::parse_from(["pack", "--mode", "replace", "-y", "--sprites", "art"]);

        assert_eq!(cli.mode, PackMode::Replace);
        assert!(cli.yes);
        assert_eq!(cli.sprites, Some(PathBuf::from("art")));
        assert!(!cli.allow_drop);
    }

    #[test]
    fn metadata_flags_conflict() {
        let res = PackCli::try_parse_from(["pack", "--metadata", "old.atlas", "--no-metadata"]);

        assert!(res.is_err());

        let cli = PackCli::try_parse_from(["pack", "--no-metadata"]).unwrap();
        assert!(cli.no_metadata);
        assert_eq!(cli.metadata, None);
    }
}
