//! `ta` entry point.
//!
//! Thin operator surface over the computation crates: resolve an instant
//! through the desk clock, build one snapshot, print it. All market logic
//! lives in the library crates; this binary only parses, formats and logs.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use tracing::debug;

use ta_clock::DeskClock;
use ta_cycle::{cycle_day_info, cycle_state, ThreeDayCycleState};
use ta_schemas::{DailyBias, WeeklyTemplateId};
use ta_state::{CurrentMarketState, MarketStateEngine};
use ta_weekly::{
    load_selection, save_selection, week_start_key, StoreError, WeekTemplateStore,
    WEEKLY_TEMPLATES,
};

#[derive(Parser)]
#[command(name = "ta")]
#[command(about = "Market time-phase snapshot CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the market snapshot for now (or for --at)
    Now {
        /// Daily bias (bullish | bearish | neutral)
        #[arg(long, default_value = "neutral")]
        bias: String,

        /// Treat the day-model as delayed (seek & destroy variant)
        #[arg(long, default_value_t = false)]
        delayed: bool,

        /// Weekly template id (see `ta catalog templates`)
        #[arg(long)]
        template: Option<String>,

        /// Evaluate at this UTC instant (RFC3339) instead of the wall clock
        #[arg(long)]
        at: Option<String>,

        /// IANA zone for the desk clock
        #[arg(long, default_value = ta_clock::REFERENCE_ZONE)]
        zone: String,

        /// Include the 3-day cycle, counted from this date (YYYY-MM-DD)
        #[arg(long = "cycle-start")]
        cycle_start: Option<String>,

        /// Emit pretty JSON instead of the text block
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Dump the static catalogs
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCmd,
    },

    /// Read or write the weekly template selection
    Template {
        #[command(subcommand)]
        cmd: TemplateCmd,
    },
}

#[derive(Subcommand)]
enum CatalogCmd {
    Sessions,
    Macros,
    Templates,
    Strategies,
    Patterns,
}

#[derive(Subcommand)]
enum TemplateCmd {
    /// Print the selection for the week containing --date (default: today)
    Get {
        /// Desk-zone date (YYYY-MM-DD) whose week to read
        #[arg(long)]
        date: Option<String>,

        /// Selection store file
        #[arg(long, default_value = "ta_templates.json")]
        store: PathBuf,
    },

    /// Set the selection for the week containing --date (default: today)
    Set {
        /// Template id (see `ta catalog templates`)
        id: String,

        /// Desk-zone date (YYYY-MM-DD) whose week to write
        #[arg(long)]
        date: Option<String>,

        /// Selection store file
        #[arg(long, default_value = "ta_templates.json")]
        store: PathBuf,
    },
}

// ---------------------------------------------------------------------------
// File-backed selection store
// ---------------------------------------------------------------------------

/// One JSON object per file, week-start key → template id. Read-modify-write
/// per put; the CLI is a single-shot operator tool, not a concurrent host.
struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read_rows(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| StoreError::Backend(format!("malformed store file: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

#[async_trait]
impl WeekTemplateStore for JsonFileStore {
    async fn get(&self, week_key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_rows()?.get(week_key).cloned())
    }

    async fn put(&self, week_key: &str, template_id: &str) -> Result<(), StoreError> {
        let mut rows = self.read_rows()?;
        rows.insert(week_key.to_string(), template_id.to_string());
        let raw = serde_json::to_string_pretty(&rows)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[derive(serde::Serialize)]
struct Snapshot {
    zone: &'static str,
    instant: ta_schemas::CivilInstant,
    #[serde(flatten)]
    state: CurrentMarketState,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle: Option<ThreeDayCycleState>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Now { bias, delayed, template, at, zone, cycle_start, json } => {
            let clock = DeskClock::from_zone_name(&zone)?;
            let instant = match at {
                Some(raw) => {
                    let utc: DateTime<Utc> = DateTime::parse_from_rfc3339(&raw)
                        .with_context(|| format!("invalid --at instant: {raw}"))?
                        .with_timezone(&Utc);
                    clock.civil(utc)
                }
                None => clock.now(),
            };
            debug!(zone = clock.zone_name(), minute = instant.minute_of_day(), "resolved instant");

            let engine = MarketStateEngine::load()?;
            let state = engine.build_state(
                &instant,
                parse_bias(&bias)?,
                delayed,
                template.as_deref().map(parse_template).transpose()?,
            );

            let cycle = cycle_start
                .map(|raw| -> Result<ThreeDayCycleState> {
                    let start = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .with_context(|| format!("invalid --cycle-start date: {raw}"))?;
                    Ok(cycle_state(start, &instant))
                })
                .transpose()?;

            let snapshot = Snapshot { zone: clock.zone_name(), instant, state, cycle };
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_snapshot(&snapshot);
            }
        }

        Commands::Catalog { cmd } => match cmd {
            CatalogCmd::Sessions => {
                let catalog = ta_sessions::SessionCatalog::load()?;
                for s in catalog.sessions() {
                    println!(
                        "{:<8} {}-{}  {}",
                        s.id.as_str(),
                        s.window.start_label(),
                        end_label(&s.window),
                        s.id.display_name(),
                    );
                }
                for q in catalog.quarters() {
                    println!(
                        "{:<8} {}  {}-{}",
                        q.session.as_str(),
                        q.quarter.as_str(),
                        q.window.start_label(),
                        end_label(&q.window),
                    );
                }
            }
            CatalogCmd::Macros => {
                let catalog = ta_macros::MacroCatalog::load()?;
                for m in catalog.macros() {
                    println!(
                        "{:<16} {}-{}  {}",
                        m.id,
                        m.window.start_label(),
                        end_label(&m.window),
                        m.description,
                    );
                }
            }
            CatalogCmd::Templates => {
                for t in WEEKLY_TEMPLATES.iter() {
                    println!("{:<28} {:<10} {}", t.id.as_str(), bias_label(t.bias), t.name);
                }
            }
            CatalogCmd::Strategies => {
                for s in ta_sessions::SESSION_STRATEGIES.iter() {
                    println!("{:<44} {}", s.id, s.name);
                    println!("{:<44} {}", "", s.entry_guidance);
                }
            }
            CatalogCmd::Patterns => {
                for p in ta_cycle::CYCLE_PATTERNS.iter() {
                    println!("{:<16} {:<28} {}", p.id, p.name, p.description);
                }
            }
        },

        Commands::Template { cmd } => match cmd {
            TemplateCmd::Get { date, store } => {
                let store = JsonFileStore::new(store);
                let date = resolve_date(date)?;
                let selected = load_selection(&store, date).await?;
                match selected {
                    Some(id) => {
                        println!("week={} template={}", week_start_key(date), id.as_str())
                    }
                    None => println!(
                        "week={} template=none (default weekly profile)",
                        week_start_key(date)
                    ),
                }
            }
            TemplateCmd::Set { id, date, store } => {
                let template_id = parse_template(&id)?;
                let store = JsonFileStore::new(store);
                let date = resolve_date(date)?;
                save_selection(&store, date, template_id).await?;
                println!("week={} template={}", week_start_key(date), template_id.as_str());
            }
        },
    }

    Ok(())
}

/// `--date` as a desk-zone calendar date; defaults to today on the desk clock.
fn resolve_date(raw: Option<String>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("invalid --date: {raw}")),
        None => Ok(DeskClock::new_york().now().date()),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn parse_bias(raw: &str) -> Result<DailyBias> {
    match raw {
        "bullish" => Ok(DailyBias::Bullish),
        "bearish" => Ok(DailyBias::Bearish),
        "neutral" => Ok(DailyBias::Neutral),
        other => bail!("invalid --bias {other:?} (expected bullish | bearish | neutral)"),
    }
}

fn parse_template(raw: &str) -> Result<WeeklyTemplateId> {
    match WeeklyTemplateId::parse(raw) {
        Some(id) => Ok(id),
        None => bail!("unknown template id {raw:?} (see `ta catalog templates`)"),
    }
}

fn bias_label(bias: ta_schemas::TemplateBias) -> &'static str {
    match bias {
        ta_schemas::TemplateBias::Bullish => "bullish",
        ta_schemas::TemplateBias::Bearish => "bearish",
    }
}

fn end_label(window: &ta_schemas::TimeWindow) -> String {
    format!("{:02}:{:02}", window.end_hour, window.end_minute)
}

fn print_snapshot(snap: &Snapshot) {
    let i = &snap.instant;
    println!(
        "time={:04}-{:02}-{:02} {:02}:{:02} zone={}",
        i.year, i.month, i.day, i.hour, i.minute, snap.zone
    );
    println!(
        "session={} quarter={} phase={}",
        snap.state.session,
        snap.state.session_quarter.as_str(),
        snap.state.amd_phase.display_name(),
    );
    if let Some(q) = &snap.state.quarter_state {
        println!("micro={} micro_progress={:.1}%", q.micro, q.progress);
    }
    println!(
        "day={} expected_action={:?} day_phase={}",
        snap.state.day_of_week.as_str(),
        snap.state.day_profile.expected_action,
        snap.state.day_profile.amd_phase.display_name(),
    );
    if let Some(profile) = snap.state.intraday_profile {
        let info = ta_state::intraday_profile_info(profile);
        println!("intraday_profile={} entry_window={}", info.name, info.entry_window);
    }
    if let Some(m) = &snap.state.active_macro {
        println!("active_macro={} ({})", m.name, m.id);
    }
    if let Some(next) = &snap.state.next_key_time {
        println!(
            "next_key_time={} at={} in={}h{:02}m",
            next.label, next.time, next.hours_away, next.minutes_away
        );
    }
    if let Some(cycle) = &snap.cycle {
        let info = cycle_day_info(cycle.current_day);
        println!(
            "cycle_day={} number={} extended={} action={}",
            info.name, cycle.day_number, cycle.is_extended, info.action
        );
    }
}
