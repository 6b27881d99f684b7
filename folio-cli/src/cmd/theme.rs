use anyhow::{Result, bail};
use clap::{Arg, ArgMatches, Command};
use folio_core::{ContentModel, Theme, ThemeStore};

use crate::config::FolioConfig;

pub fn make_subcommand() -> Command {
    Command::new("theme")
        .about("Inspect or change the persisted theme preference")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("content")
                .short('i')
                .long("content")
                .value_name("FILE")
                .help("Content model file describing the portfolio")
                .default_value("./portfolio.toml")
                .global(true),
        )
        .arg(
            Arg::new("state")
                .long("state")
                .value_name("FILE")
                .help("File holding the persisted theme preference")
                .default_value("./.folio-theme")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./folio.toml")
                .global(true),
        )
        .subcommand(Command::new("show").about("Print the active theme"))
        .subcommand(Command::new("toggle").about("Flip between dark and light"))
        .subcommand(
            Command::new("set").about("Set the theme explicitly").arg(
                Arg::new("value")
                    .value_name("THEME")
                    .help("dark or light")
                    .required(true),
            ),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let config = FolioConfig::load(args)?;
    let build_config = config.build_config();

    let model = ContentModel::read(&build_config.content)?;
    let default = Theme::parse(&model.settings.theme.default).unwrap_or(Theme::Dark);
    let store = ThemeStore::new(&build_config.state);

    match args.subcommand() {
        Some(("show", _)) => {
            println!("{}", store.load(default));
        }
        Some(("toggle", _)) => {
            if !model.settings.theme.enable_toggle {
                bail!("Theme toggling is disabled in the content settings");
            }
            let theme = store.toggle(default)?;
            println!("Theme set to {}", theme);
        }
        Some(("set", set_args)) => {
            let value = set_args.get_one::<String>("value").expect("required arg");
            let Some(theme) = Theme::parse(value) else {
                bail!("Unknown theme {:?} (expected dark or light)", value);
            };
            store.save(theme)?;
            println!("Theme set to {}", theme);
        }
        _ => unreachable!("subcommand required"),
    }

    Ok(())
}
