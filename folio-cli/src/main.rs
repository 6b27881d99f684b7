use anyhow::Result;
use clap::Command;

mod cmd;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    let app = Command::new("folio")
        .about("Generate a single-page portfolio site from one TOML content file")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd::build::make_subcommand())
        .subcommand(cmd::serve::make_subcommand())
        .subcommand(cmd::theme::make_subcommand());

    let matches = app.get_matches();

    match matches.subcommand() {
        Some(("build", args)) => cmd::build::execute(args),
        Some(("serve", args)) => cmd::serve::execute(args).await,
        Some(("theme", args)) => cmd::theme::execute(args),
        _ => unreachable!("subcommand required"),
    }
}
