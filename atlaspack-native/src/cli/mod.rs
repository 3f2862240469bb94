use self::{clean::Clean, extract::Extract, inspect::Inspect, pack::Pack};

mod clean;
mod extract;
mod inspect;
mod pack;

pub enum CliRes {
    NoCli,
    Ok,
    Err,
}

pub trait Cli {
    fn name(&self) -> &'static str;
    /// Each module has to handle the arguments by itself.
    ///
    /// `args[1]` is the name of the module.
    fn cli(&self) -> CliRes;
    fn cli_help(&self);
}

// Add new modules here.
const MODULES: &[&dyn Cli] = &[&Pack, &Extract, &Clean, &Inspect];

pub fn help() {
    println!(
        "\
atlaspack

Available modules:"
    );

    for module in MODULES {
        println!("{}", module.name());
    }
}

/// Runs command-line options
pub fn cli() -> CliRes {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        return CliRes::NoCli;
    }

    for module in MODULES {
        if args[1] == module.name() {
            return module.cli();
        }
    }

    // In case nothing fits then prints this again.
    help();

    CliRes::Err
}

/// Arguments after the module name, with the module name in place of the binary name.
fn module_args() -> impl Iterator<Item = String> {
    std::env::args().skip(1)
}
