use std::path::PathBuf;

use atlas::Descriptor;
use clap::Parser;

use crate::config::load_config;

use super::*;

#[derive(Debug, Parser)]
#[command(name = "inspect", version, about = "Prints what a descriptor contains", long_about = None)]
struct InspectCli {
    /// Atlas descriptor
    #[arg(long)]
    atlas: Option<PathBuf>,
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn or_missing(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn inspect(cli: InspectCli) -> eyre::Result<bool> {
    let path = match cli.atlas {
        Some(path) => path,
        None => load_config(cli.config.as_deref())?.atlas,
    };

    let descriptor = Descriptor::open_from_file(&path)?;
    let header = &descriptor.header;

    println!("{}", path.display());
    println!("texture: {}", or_missing(header.texture.as_deref()));
    match header.size {
        Some((width, height)) => println!("size: {}x{}", width, height),
        None => println!("size: -"),
    }
    println!("format: {}", or_missing(header.format.as_deref()));
    println!("filter: {}", or_missing(header.filter.as_deref()));
    println!("repeat: {}", or_missing(header.repeat.as_deref()));
    println!("sprites: {}", descriptor.sprites.len());

    let incomplete = descriptor.incomplete();

    for name in &incomplete {
        println!("incomplete: {}", name);
    }

    for err in &descriptor.errors {
        println!("error: {}", err);
    }

    Ok(incomplete.is_empty() && descriptor.errors.is_empty())
}

pub struct Inspect;

impl Cli for Inspect {
    fn name(&self) -> &'static str {
        "inspect"
    }

    fn cli(&self) -> CliRes {
        let cli = InspectCli::parse_from(module_args());

        match inspect(cli) {
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
