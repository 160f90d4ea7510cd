use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::event::{Event as CrosstermEvent, EventStream};
use futures_util::StreamExt;
use log::{error, info};

use swiftdocs::app::App;
use swiftdocs::commands::{render_report, tree_report};
use swiftdocs::config::{source_from_location, ConfigLoader};
use swiftdocs::event::Event;
use swiftdocs::preferences::Preferences;
use swiftdocs::tui::{init, restore, Tui};
use swiftdocs::{logging, ui};

#[derive(Parser)]
#[command(name = "swiftdocs", version, about = "Browse a SwiftDocs documentation site in the terminal")]
struct Cli {
    /// Site root: an http(s) URL or a local directory.
    #[arg(short, long, default_value = ".")]
    source: String,

    /// Preferences file (theme). Defaults to the user config directory.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// log4rs YAML configuration for the viewer.
    #[arg(long)]
    log_config: Option<PathBuf>,

    /// Do not append a `v=<timestamp>` query to HTTP fetches.
    #[arg(long)]
    no_cache_bust: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive viewer (default).
    View,
    /// Print the menu hierarchy.
    Tree {
        #[arg(long)]
        lang: Option<String>,
        /// Emit the nested menu as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Render one document to stdout.
    Render {
        #[arg(long)]
        lang: Option<String>,
        /// Menu file to render; the first declared document by default.
        #[arg(long)]
        file: Option<String>,
        #[arg(long)]
        html: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let source = source_from_location(&cli.source, !cli.no_cache_bust)
        .with_context(|| format!("invalid source {}", cli.source))?;

    match cli.command.unwrap_or(Command::View) {
        Command::View => {
            logging::init_for_tui(cli.log_config.as_deref())?;
            let prefs = cli.prefs.unwrap_or_else(Preferences::default_path);
            let mut app = App::new(source, Some(prefs));
            app.start();

            let mut tui = init()?;
            let outcome = run(&mut tui, &mut app).await;
            restore()?;
            if let Err(err) = &outcome {
                error!("Viewer stopped: {err:#}");
            }
            outcome
        }
        Command::Tree { lang, json } => {
            logging::init_for_cli();
            let loader = ConfigLoader::new(source);
            print!("{}", tree_report(&loader, lang.as_deref(), json).await?);
            Ok(())
        }
        Command::Render { lang, file, html } => {
            logging::init_for_cli();
            let loader = ConfigLoader::new(source);
            print!(
                "{}",
                render_report(&loader, lang.as_deref(), file.as_deref(), html).await?
            );
            Ok(())
        }
    }
}

async fn run(tui: &mut Tui, app: &mut App) -> Result<()> {
    let mut stream = EventStream::new();
    let mut interval = tokio::time::interval(Duration::from_millis(100));

    while !app.should_quit {
        tui.draw(|frame| ui::render(frame, app))?;

        let event = tokio::select! {
            _ = interval.tick() => Event::Tick,
            maybe_event = stream.next() => {
                match maybe_event {
                    Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
                    Some(Ok(CrosstermEvent::Resize(_, _))) => Event::Resize,
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => return Err(err).context("terminal event stream failed"),
                    None => break,
                }
            }
        };

        match event {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.handle_key(key),
            Event::Resize => tui.autoresize()?,
        }
    }

    info!("Viewer closed");
    Ok(())
}
