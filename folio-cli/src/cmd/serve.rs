use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use folio_core::contact::ContactForm;
use folio_core::{ContentModel, ThemeStore, build_site};
use folio_dev_server::{PreviewServer, PreviewServerConfig};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use std::{path::PathBuf, time::Duration};

use crate::config::FolioConfig;

pub fn make_subcommand() -> Command {
    crate::cmd::build::add_build_args(Command::new("serve"))
        .about("Preview the portfolio with live reload")
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Port to serve on")
                .default_value("3000"),
        )
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("HOST")
                .help("Host to bind to")
                .default_value("127.0.0.1"),
        )
        .arg(
            Arg::new("open")
                .long("open")
                .help("Open browser automatically")
                .action(clap::ArgAction::SetTrue),
        )
}

pub async fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let config = FolioConfig::load(args)?;
    let build_config = config.build_config();

    let content = PathBuf::from(&build_config.content);
    let output_dir = PathBuf::from(&build_config.output);
    let theme_dir = PathBuf::from(&build_config.theme);
    let state = PathBuf::from(&build_config.state);
    let host = build_config.host.clone();
    let port = build_config.port;
    let open = build_config.open;

    // The contact route reuses the model's form settings and status
    // messages. A missing model is fatal here, before anything renders.
    let model = ContentModel::read(&content)?;
    let contact = ContactForm::new(&model.settings.form, model.contact.messages.clone());

    let store = ThemeStore::new(&state);
    build_site(&content, &theme_dir, &output_dir, &store, Some((&host, port)))?;

    // Start the preview server (handles its own file watching of the
    // output dir)
    let server_config = PreviewServerConfig {
        host: host.clone(),
        port,
        root: output_dir.clone(),
        open,
        ignore: vec![".git".to_string(), "*.tmp".to_string()],
    };

    let server = PreviewServer::new(server_config, contact);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            eprintln!("Preview server error: {}", e);
        }
    });

    // Watch sources and rebuild on changes
    let watcher_config = config.clone();
    let watcher_handle = tokio::spawn(async move {
        if let Err(e) = watch_sources(watcher_config).await {
            eprintln!("Source watcher error: {}", e);
        }
    });

    // Wait for both tasks
    let _ = tokio::try_join!(server_handle, watcher_handle)?;

    Ok(())
}

async fn watch_sources(config: FolioConfig) -> Result<()> {
    let build_config = config.build_config();
    let content = PathBuf::from(&build_config.content);
    let output_dir = PathBuf::from(&build_config.output);
    let theme_dir = PathBuf::from(&build_config.theme);
    let state = PathBuf::from(&build_config.state);
    let config_file = PathBuf::from(&build_config.config);
    let host = build_config.host.clone();
    let port = build_config.port;

    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500), // Slightly longer delay for rebuilds
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    let _ = tx.blocking_send(event.path);
                }
            }
        },
    )?;

    // Watch the content model itself
    debouncer
        .watcher()
        .watch(&content, notify::RecursiveMode::NonRecursive)?;
    println!("Watching content model: {}", content.display());

    // Watch theme directory if it exists
    if theme_dir.exists() {
        debouncer
            .watcher()
            .watch(&theme_dir, notify::RecursiveMode::Recursive)?;
        println!("Watching theme directory: {}", theme_dir.display());
    }

    // Watch config file if it exists
    if config_file.exists() {
        debouncer
            .watcher()
            .watch(&config_file, notify::RecursiveMode::NonRecursive)?;
        println!("Watching config file: {}", config_file.display());
    }

    while let Some(path) = rx.recv().await {
        println!("Source file changed: {}", path.display());

        // Rebuild; the preview server notices the output change and
        // pushes a reload to connected pages.
        let store = ThemeStore::new(&state);
        match build_site(&content, &theme_dir, &output_dir, &store, Some((&host, port))) {
            Ok(_) => {
                println!("Site rebuilt successfully");
            }
            Err(e) => {
                eprintln!("Build error: {}", e);
            }
        }
    }

    Ok(())
}
