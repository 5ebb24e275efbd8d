use clap::Parser;
use payman::application::{init::init, ConfigService, PayloadStore};
use payman::cli::{confirm, format_config, format_tree, Cli, Commands, LogLevel};
use payman::domain::{split_lines, NodePath, NodeRef};
use payman::error::PayloadError;
use payman::infrastructure::config::CONFIG_FILENAME;
use payman::infrastructure::Settings;
use std::io;
use std::path::PathBuf;
use tracing::debug;

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.log_level);
    debug!("Parsed CLI arguments: {cli:?}");

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn setup_tracing(log_level: LogLevel) {
    if let Some(level) = log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

fn run(cli: Cli) -> Result<(), PayloadError> {
    match cli.command {
        Commands::Init { path } => init(&path),
        Commands::Config { key, value, list } => {
            let config_path = cli.config.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
            let service = ConfigService::new(config_path);

            if list {
                println!("{}", format_config(&service.list()?));
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: payman config [--list | <key> [<value>]]");
                println!("Valid keys: data_file, indent, removal_match");
            }
            Ok(())
        }
        command => {
            let settings = Settings::resolve(cli.config, cli.data)?;
            debug!(data = %settings.data_path.display(), "using payload document");
            let mut store = PayloadStore::open(settings.repository())?
                .with_removal_match(settings.config.removal_match);
            run_store_command(&mut store, command)
        }
    }
}

fn run_store_command(store: &mut PayloadStore, command: Commands) -> Result<(), PayloadError> {
    match command {
        Commands::Tree { path } => {
            let path = NodePath::from(path.as_deref().unwrap_or_default());
            match store.resolve(&path)? {
                NodeRef::Folder(folder) => println!("{}", format_tree(folder)),
                NodeRef::File(_) => return Err(PayloadError::NotAFolder(path)),
            }
        }
        Commands::Show { path } => {
            println!("{}", store.read_file(&NodePath::from(path.as_str()))?);
        }
        Commands::Mkdir { path } => {
            let path = NodePath::from(path.as_str());
            let (parent, name) = split_target(&path)?;
            store.create_folder(&parent, name)?;
            println!("Created folder {}", path);
        }
        Commands::Touch { path } => {
            let path = NodePath::from(path.as_str());
            let (parent, name) = split_target(&path)?;
            store.create_file(&parent, name)?;
            println!("Created file {}", path);
        }
        Commands::Rm { path, yes } => {
            let path = NodePath::from(path.as_str());
            store.resolve(&path)?;

            let question = format!("Delete '{}' and everything under it?", path);
            if !yes && !confirm(&question, &mut io::stdin().lock(), &mut io::stderr())? {
                println!("Cancelled");
                return Ok(());
            }

            store.delete_node(&path)?;
            println!("Deleted {}", path);
        }
        Commands::Add { path, lines } => {
            let lines = input_lines(lines)?;
            let content = store.append_lines(&NodePath::from(path.as_str()), &lines)?;
            println!("{}", content);
        }
        Commands::Remove { path, lines } => {
            let lines = input_lines(lines)?;
            let (content, changed) = store.remove_lines(&NodePath::from(path.as_str()), &lines)?;
            if changed {
                println!("{}", content);
            } else {
                println!("No matching lines found");
            }
        }
        Commands::Import { path, source } => {
            let content = store.import_lines_from_file(&NodePath::from(path.as_str()), &source)?;
            println!("{}", content);
        }
        Commands::Init { .. } | Commands::Config { .. } => {}
    }
    Ok(())
}

/// Parent folder and entry name of a path to create
fn split_target(path: &NodePath) -> Result<(NodePath, &str), PayloadError> {
    path.split_last()
        .ok_or_else(|| PayloadError::InvalidName(path.to_string()))
}

/// Lines given as arguments (each may hold several lines), or stdin when none
fn input_lines(args: Vec<String>) -> Result<Vec<String>, PayloadError> {
    if args.is_empty() {
        let text = io::read_to_string(io::stdin())?;
        return Ok(split_lines(&text));
    }
    Ok(args.iter().flat_map(|arg| split_lines(arg)).collect())
}
