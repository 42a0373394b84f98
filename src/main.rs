//! Command-line entry point.
//!
//! A thin shell over the library: each subcommand turns its flags into
//! [`Event`]s, dispatches them through the [`Executor`] against the JSON
//! store, and prints the result.
//!
//! # Lifecycle
//!
//! 1. **Load**: read config, apply flag overrides, initialize logging
//! 2. **Open**: open the JSON store and build an empty `AppState`
//! 3. **Refresh**: load the snapshot through the normal event path
//! 4. **Apply**: location, filters, search, sort and page events
//! 5. **Print**: render the page, counts, link or outbox

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use regdesk::app::{LoadState, ShareableLocation};
use regdesk::filter::FilterState;
use regdesk::infrastructure::{data_dir, CONFIG_FILE_NAME};
use regdesk::observability::init_tracing;
use regdesk::runtime::Executor;
use regdesk::storage::{JsonStore, SessionContext};
use regdesk::{initialize, AppState, Config, Event, Field, Theme, ViewMode};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "regdesk", version)]
#[command(about = "Filter, search, sort and page through program registrations", long_about = None)]
struct Cli {
    /// Config file (default: <data dir>/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON store file, overriding the config
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Operator name recorded on attendance marks
    #[arg(long, global = true)]
    user: Option<String>,

    /// Built-in theme name
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Disable colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one page of registrations
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Page number, clamped to the available pages
        #[arg(long)]
        page: Option<usize>,

        /// Terminal width (default: detected or 120)
        #[arg(long)]
        width: Option<usize>,

        /// Compose a message to every parent in the result instead of
        /// rendering
        #[arg(long)]
        message: Option<String>,
    },
    /// Count results per value of a bounded field
    Counts {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long)]
        field: Field,
    },
    /// Print the shareable location query
    Link {
        #[arg(long)]
        cohort: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        arrivals: bool,
    },
    /// Mark a child as arrived (or absent) for a cohort and day
    Mark {
        #[arg(long)]
        cohort: String,
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        record: String,
        #[arg(long)]
        absent: bool,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Simple-mode equality filter, e.g. --where school=Alon (repeatable)
    #[arg(long = "where", value_name = "KEY=VALUE")]
    filters_where: Vec<String>,

    /// JSON file holding a full filter state (simple, advanced or grouped)
    #[arg(long)]
    filters: Option<PathBuf>,

    /// Free-text search
    #[arg(long)]
    search: Option<String>,

    /// Header click on a column (repeat to cycle asc, desc, off)
    #[arg(long)]
    sort: Vec<Field>,

    /// Cohort id for the arrivals view
    #[arg(long)]
    cohort: Option<String>,

    /// Attendance date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Show the arrivals view instead of all registrations
    #[arg(long)]
    arrivals: bool,
}

impl ViewArgs {
    /// Converts the flags into events, in the order a user would click.
    fn events(&self) -> anyhow::Result<Vec<Event>> {
        let mut events = vec![
            Event::SelectCohort(self.cohort.clone()),
            Event::SelectDate(self.date),
            Event::SetViewMode(view_mode(self.arrivals)),
        ];

        if let Some(path) = &self.filters {
            let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            let filters: FilterState =
                serde_json::from_str(&text).with_context(|| format!("invalid filter state in {}", path.display()))?;
            events.push(Event::ReplaceFilters(filters));
        }

        for pair in &self.filters_where {
            let (key, value) = pair
                .split_once('=')
                .with_context(|| format!("expected KEY=VALUE, got {pair:?}"))?;
            let field: Field = key.trim().parse().map_err(anyhow::Error::msg)?;
            events.push(Event::SetSimpleFilter {
                field,
                value: value.trim().to_string(),
            });
        }

        if let Some(search) = &self.search {
            events.push(Event::SetSearch(search.clone()));
        }
        events.extend(self.sort.iter().copied().map(Event::SortBy));
        Ok(events)
    }
}

const fn view_mode(arrivals: bool) -> ViewMode {
    if arrivals {
        ViewMode::Arrivals
    } else {
        ViewMode::Registrations
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => {
            let default_path = data_dir().join(CONFIG_FILE_NAME);
            if default_path.exists() {
                Config::from_file(&default_path)?
            } else {
                Config::default()
            }
        }
    };

    if let Some(store) = &cli.store {
        config.store_path = Some(store.display().to_string());
    }
    if let Some(user) = &cli.user {
        config.user.clone_from(user);
    }
    if let Some(theme) = &cli.theme {
        config.theme = Some(theme.clone());
        config.theme_file = None;
    }
    Ok(config)
}

fn resolve_theme(cli: &Cli, config: &Config) -> Theme {
    let no_color = cli.no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal();
    if no_color {
        Theme::monochrome()
    } else {
        config.load_theme()
    }
}

/// Opens the store and loads the snapshot, failing if it cannot be loaded.
fn open(config: &Config, theme: Theme) -> anyhow::Result<(Executor<JsonStore>, AppState)> {
    let store_path = config.store_path();
    let store = JsonStore::new(store_path.clone())
        .with_context(|| format!("failed to open store {}", store_path.display()))?;

    let mut executor = Executor::new(store, SessionContext::new(config.user.clone()));
    let mut state = initialize(config, theme);
    executor.dispatch(&mut state, Event::Refresh)?;

    if let LoadState::Failed(error) = &state.load {
        bail!("could not load registrations: {error}");
    }
    Ok((executor, state))
}

fn apply_view(executor: &mut Executor<JsonStore>, state: &mut AppState, view: &ViewArgs) -> anyhow::Result<()> {
    for event in view.events()? {
        executor.dispatch(state, event)?;
    }
    Ok(())
}

fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.trim().parse().ok())
        .filter(|&c: &usize| c > 0)
        .unwrap_or(120)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config);

    match &cli.command {
        Commands::List {
            view,
            page,
            width,
            message,
        } => {
            let (mut executor, mut state) = open(&config, resolve_theme(&cli, &config))?;
            apply_view(&mut executor, &mut state, view)?;
            if let Some(page) = page {
                executor.dispatch(&mut state, Event::GoToPage(*page))?;
            }

            if let Some(text) = message {
                executor.dispatch(&mut state, Event::ComposeBulkMessage { text: text.clone() })?;
                let Some(outgoing) = executor.outbox().last() else {
                    println!("Nothing to send.");
                    return Ok(());
                };
                println!("To {} recipients:", outgoing.recipients.len());
                for phone in &outgoing.recipients {
                    println!("  {phone}");
                }
                println!("\n{}", outgoing.text);
                return Ok(());
            }

            print!("{}", regdesk::ui::render(&state, width.unwrap_or_else(terminal_width)));
        }
        Commands::Counts { view, field } => {
            if !Field::BOUNDED.contains(field) {
                bail!("{field} has no fixed value list; choose one of cycle, course, school, class, status");
            }
            let (mut executor, mut state) = open(&config, Theme::monochrome())?;
            apply_view(&mut executor, &mut state, view)?;

            for count in state.badge_counts(*field) {
                println!("{}\t{}", count.count, count.value);
            }
        }
        Commands::Link { cohort, date, arrivals } => {
            let location = ShareableLocation {
                cohort: cohort.clone(),
                date: *date,
                view: view_mode(*arrivals),
            };
            println!("?{}", location.to_query());
        }
        Commands::Mark {
            cohort,
            date,
            record,
            absent,
        } => {
            let (mut executor, mut state) = open(&config, Theme::monochrome())?;
            for event in [
                Event::SelectCohort(Some(cohort.clone())),
                Event::SelectDate(Some(*date)),
                Event::SetViewMode(ViewMode::Arrivals),
            ] {
                executor.dispatch(&mut state, event)?;
            }

            let in_cohort = state
                .records()
                .iter()
                .any(|r| r.id == *record && r.cycle_id.as_deref() == Some(cohort.as_str()));
            if !in_cohort {
                bail!("record {record} is not enrolled in cohort {cohort}");
            }
            if state.attendance.is_none() {
                bail!("could not load attendance for {cohort} on {date}");
            }

            let present = !absent;
            if state.is_present(record) != present {
                executor.dispatch(
                    &mut state,
                    Event::ToggleArrival {
                        record_id: record.clone(),
                    },
                )?;
            }
            if let Some(failure) = executor.failures().first() {
                bail!("{failure}");
            }

            let mark = if present { "arrived" } else { "absent" };
            println!("{record}: {mark} ({cohort}, {date})");
        }
    }

    Ok(())
}
