use clap::{Args, Parser, Subcommand};
use eventboard::api::{EventDraft, EventSource, HttpEventSource};
use eventboard::app::{EventListViewModel, SortMode};
use eventboard::observability::init_tracing;
use eventboard::ui::{render, render_event_details, EventListView};
use eventboard::{Config, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "eventboard", version, about = "Browse and edit events from an events backend")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend root, overriding `api_base_url`.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Bearer token, overriding `api_token` and the environment.
    #[arg(long, global = true)]
    token: Option<String>,
    /// Level filter, overriding `trace_level`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events, page by page, with optional filters.
    List(ListArgs),
    /// Show every field of one event.
    Show { id: String },
    /// Create an event from a JSON file.
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Replace an event with the contents of a JSON file.
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Number of pages to load.
    #[arg(long, default_value_t = 1)]
    pages: u32,
    /// Case-insensitive text matched against title, description and location.
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// Earliest date, `YYYY-MM-DD`.
    #[arg(long)]
    from: Option<String>,
    /// Latest date, `YYYY-MM-DD`.
    #[arg(long)]
    to: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    attire: Option<String>,
    /// Include events dated before yesterday.
    #[arg(long)]
    show_past: bool,
    /// nearest, newest or cheapest.
    #[arg(long, default_value_t = SortMode::Nearest)]
    sort: SortMode,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    init_tracing(&config)?;
    tracing::debug!(base_url = %config.api_base_url, "starting");

    let source = config.event_source()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List(args) => list(source, args, &mut out).await?,
        Command::Show { id } => {
            let event = source.fetch_event(&id).await?;
            render_event_details(&event, &mut out)?;
        }
        Command::Create { file } => {
            let draft = read_draft(&file)?;
            let event = source.create_event(&draft).await?;
            writeln!(out, "created {}", event.id)?;
            render_event_details(&event, &mut out)?;
        }
        Command::Update { id, file } => {
            let draft = read_draft(&file)?;
            let event = source.update_event(&id, &draft).await?;
            writeln!(out, "updated {}", event.id)?;
            render_event_details(&event, &mut out)?;
        }
    }

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default().with_env_overrides(),
    };

    if let Some(url) = &cli.api_url {
        config.api_base_url.clone_from(url);
    }
    if let Some(token) = &cli.token {
        config.api_token = Some(token.clone());
    }
    if let Some(level) = &cli.log_level {
        config.trace_level.clone_from(level);
    }

    config.validate()?;
    Ok(config)
}

async fn list(source: HttpEventSource, args: ListArgs, out: &mut impl Write) -> Result<()> {
    let mut list = EventListViewModel::new(source);

    if let Some(text) = args.search {
        list.set_search_text(text);
    }
    if let Some(city) = args.city {
        list.set_city(city);
    }
    if let Some(from) = args.from {
        list.set_date_from(from);
    }
    if let Some(to) = args.to {
        list.set_date_to(to);
    }
    if let Some(min) = args.min_price {
        list.set_price_min(min);
    }
    if let Some(max) = args.max_price {
        list.set_price_max(max);
    }
    if let Some(attire) = args.attire {
        list.set_attire(attire);
    }
    list.set_show_past(args.show_past);
    list.set_sort_by(args.sort);

    list.activate().await?;
    for _ in 1..args.pages {
        if !list.can_load_more() || list.error().is_some() {
            break;
        }
        list.load_more().await?;
    }

    render(&EventListView::from_state(list.state()), out)?;
    Ok(())
}

fn read_draft(path: &Path) -> Result<EventDraft> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
