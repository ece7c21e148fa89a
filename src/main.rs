use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use qab::app::App;
use qab::config::Config;
use qab::error::{AppError, AppResult};
use qab::logging;

/// Pick one line from a list with a floating search bar.
#[derive(Debug, Parser)]
#[command(name = "qab", version)]
struct Cli {
    /// File with one item per line; read from stdin when omitted.
    #[arg(long, value_name = "FILE")]
    items: Option<PathBuf>,
    /// Initial search text.
    #[arg(long, value_name = "TEXT")]
    query: Option<String>,
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,
    #[arg(long, value_name = "TEXT")]
    icon: Option<String>,
    /// Show modifier+digit labels on the first nine rows.
    #[arg(long, overrides_with = "no_shortcuts")]
    shortcuts: bool,
    /// Hide shortcut labels even when the config enables them.
    #[arg(long, overrides_with = "shortcuts")]
    no_shortcuts: bool,
    #[arg(long, value_name = "N")]
    debounce_ms: Option<u64>,
    /// Artificial delay added to every search.
    #[arg(long, value_name = "N")]
    latency_ms: Option<u64>,
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> AppResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(placeholder) = &self.placeholder {
            config.bar.placeholder = placeholder.clone();
        }
        if let Some(icon) = &self.icon {
            config.bar.icon = (!icon.is_empty()).then(|| icon.clone());
        }
        if self.shortcuts {
            config.bar.show_keyboard_shortcuts = true;
        } else if self.no_shortcuts {
            config.bar.show_keyboard_shortcuts = false;
        }
        if let Some(debounce_ms) = self.debounce_ms {
            config.bar.debounce_ms = debounce_ms;
        }
        if let Some(latency_ms) = self.latency_ms {
            config.source.latency_ms = latency_ms;
        }
    }

    fn read_items(&self) -> AppResult<Vec<String>> {
        let raw = match &self.items {
            Some(path) => fs::read_to_string(path).map_err(|source| {
                let context = format!("failed to read items: {}", path.display());
                AppError::io_with_context(source, context)
            })?,
            None => {
                let mut stdin = io::stdin();
                if stdin.is_terminal() {
                    return Err(AppError::invalid_argument(
                        "no items: pass --items FILE or pipe lines on stdin",
                    ));
                }
                let mut raw = String::new();
                stdin.read_to_string(&mut raw)?;
                raw
            }
        };
        Ok(parse_items(&raw))
    }
}

fn parse_items(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    match run().await {
        Ok(Some(line)) => println!("{line}"),
        Ok(None) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

async fn run() -> AppResult<Option<String>> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    let _log_guard = logging::init(&config.log).unwrap_or_else(|err| {
        eprintln!("logging disabled: {err}");
        None
    });

    let items = cli.read_items()?;
    if items.is_empty() {
        return Err(AppError::invalid_argument("no items to choose from"));
    }
    tracing::info!(items = items.len(), "presenting quick action bar");

    let mut app = App::new_with_config(items, config).with_initial_query(cli.query.clone());
    app.run().await
}
