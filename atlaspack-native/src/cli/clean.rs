use std::path::PathBuf;

use atlaspack::modules::clean_sprites::CleanSprites;
use clap::Parser;

use crate::config::load_config;

use super::*;

#[derive(Debug, Parser)]
#[command(name = "clean", version, about = "Deletes extracted sprites", long_about = None)]
struct CleanCli {
    /// Sprites folder
    #[arg(short, long)]
    dir: Option<PathBuf>,
    /// File stem to keep, can be repeated
    #[arg(short, long)]
    keep: Vec<String>,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn clean(cli: CleanCli) -> eyre::Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let keep = if cli.keep.is_empty() {
        config.keep
    } else {
        cli.keep
    };

    let report = CleanSprites::new(cli.dir.unwrap_or(config.sprites_dir))
        .extensions(&config.extensions)
        .keep(&keep)
        .work()?;

    println!(
        "Deleted {} files, kept {}",
        report.deleted.len(),
        report.kept.len()
    );

    for (path, err) in &report.failed {
        println!("Cannot delete {}: {}", path.display(), err);
    }

    Ok(report.failed.is_empty())
}

pub struct Clean;

impl Cli for Clean {
    fn name(&self) -> &'static str {
        "clean"
    }

    fn cli(&self) -> CliRes {
        let cli = CleanCli::parse_from(module_args());

        match clean(cli) {
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
