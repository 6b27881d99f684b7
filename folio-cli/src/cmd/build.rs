use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use folio_core::ThemeStore;
use folio_core::build_site;
use std::path::Path;

use crate::config::FolioConfig;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("content")
                .short('i')
                .long("content")
                .value_name("FILE")
                .help("Content model file describing the portfolio")
                .default_value("./portfolio.toml"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .help("Output directory for the generated site")
                .default_value("./out"),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .value_name("DIR")
                .help("Theme directory holding the page skeleton")
                .default_value("./theme"),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .value_name("FILE")
                .help("File holding the persisted theme preference")
                .default_value("./.folio-theme"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./folio.toml"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Build the portfolio site from the content model")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let folio_config = FolioConfig::load(args)?;
    let build_config = folio_config.build_config();

    let content = Path::new(&build_config.content);
    let output_dir = Path::new(&build_config.output);
    let theme_dir = Path::new(&build_config.theme);
    let store = ThemeStore::new(&build_config.state);

    build_site(content, theme_dir, output_dir, &store, None)?;

    println!("Site built successfully in {}", output_dir.display());

    Ok(())
}
