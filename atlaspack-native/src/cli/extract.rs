use std::path::PathBuf;

use atlaspack::modules::extract_sprites::{ExtractReport, ExtractSprites};
use clap::Parser;

use crate::config::load_config;

use super::*;

#[derive(Debug, Parser)]
#[command(name = "extract", version, about = "Cuts every sprite of an atlas into its own image", long_about = None)]
struct ExtractCli {
    /// Atlas texture
    #[arg(long)]
    texture: Option<PathBuf>,
    /// Atlas descriptor
    #[arg(long)]
    atlas: Option<PathBuf>,
    /// Output folder
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn print_report(report: &ExtractReport) {
    println!(
        "Extracted {}/{} sprites",
        report.extracted.len(),
        report.total()
    );

    for name in &report.incomplete {
        println!("Incomplete: {}", name);
    }

    for (name, err) in &report.failed {
        println!("Failed {}: {}", name, err);
    }

    for err in &report.descriptor_errors {
        println!("Descriptor: {}", err);
    }
}

fn extract(cli: ExtractCli) -> eyre::Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let report = ExtractSprites::new()
        .texture(cli.texture.unwrap_or(config.texture))
        .descriptor(cli.atlas.unwrap_or(config.atlas))
        .output_dir(cli.output.unwrap_or(config.sprites_dir))
        .work()?;

    print_report(&report);

    Ok(report.failed.is_empty())
}

pub struct Extract;

impl Cli for Extract {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn cli(&self) -> CliRes {
        let cli = ExtractCli::parse_from(module_args());

        match extract(cli) {
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
