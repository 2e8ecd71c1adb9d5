//! DineConnect booking CLI
//!
//! ```sh
//! # Seed the baseline (idempotent) using ~/.config/dineconnect/config.toml
//! dineconnect-booking seed
//!
//! # Free slots for a day
//! dineconnect-booking slots --date 2025-06-02
//!
//! # Book and cancel as a seeded user
//! dineconnect-booking book --user alice --restaurant 20000001 --at 2025-06-02T19:00:00 --party 2
//! dineconnect-booking cancel --user alice --id 50000003
//!
//! # Validate config without touching the database
//! dineconnect-booking --check
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use dineconnect_booking::config::{AppConfig, IdAssignment};
use dineconnect_booking::domain::{
    DomainError, RepositoryProvider, ReservationStatus, Session, SharedClock, SystemClock,
};
use dineconnect_booking::logging::init_tracing;
use dineconnect_booking::shared::errors::{AppError, InfraError};
use dineconnect_booking::{
    default_config_path, init_database, ReservationService, SeaOrmRepositoryProvider,
    SeedCoordinator,
};

/// Reservation booking and availability for DineConnect.
#[derive(Parser, Debug)]
#[command(name = "dineconnect-booking", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DINECONNECT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema and insert the baseline data where missing
    Seed,
    /// Restaurants available for booking
    Restaurants,
    /// Bookable time slots for a day (default: today)
    Slots {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// A user's reservations
    List {
        #[arg(long)]
        user: String,
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    /// Book a table. `--at` is wall-clock time at the configured UTC offset.
    Book {
        #[arg(long)]
        user: String,
        #[arg(long)]
        restaurant: i32,
        #[arg(long)]
        at: NaiveDateTime,
        #[arg(long)]
        party: i32,
    },
    /// Delete one of the user's reservations
    Cancel {
        #[arg(long)]
        user: String,
        #[arg(long)]
        id: i32,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        match &e {
            AppError::Domain(d) if d.is_client_correctable() => eprintln!("{}", d.user_message()),
            other => {
                error!("{}", other);
                eprintln!("error: {}", other);
            }
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = AppConfig::load(&config_path)?;

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);
    if config_path.exists() {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!(
            "No config file at {}, using defaults",
            config_path.display()
        );
    }

    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Hours       : {} - {} every {} min (UTC{:+} min)",
            config.booking.opening_time,
            config.booking.closing_time,
            config.booking.slot_interval_minutes,
            config.booking.utc_offset_minutes
        );
        println!("   Ids         : {:?}", config.booking.id_assignment);
        return Ok(());
    }

    // ── Store and services ─────────────────────────────────────
    let db = init_database(&config.database_config())
        .await
        .map_err(InfraError::from)?;
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db));
    let clock: SharedClock = Arc::new(SystemClock);

    let seeding = SeedCoordinator::new(repos.clone(), clock.clone());
    let command = cli.command.unwrap_or(Command::Seed);
    if config.seed.enabled || matches!(command, Command::Seed) {
        let report = seeding.ensure_seeded().await?;
        if !report.is_noop() {
            info!(seeded = ?report.seeded, "Baseline data inserted");
        }
    } else {
        repos.ensure_schema().await?;
    }

    let mut service = ReservationService::new(repos.clone(), clock, &config.booking)?;
    if config.booking.id_assignment == IdAssignment::Sequenced {
        service = service.with_sequencer(seeding.sequencer());
    }

    // Ctrl+C cancels whatever is in flight.
    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    match command {
        Command::Seed => println!("Baseline data is in place"),
        Command::Restaurants => {
            let restaurants = service.list_restaurants().await?;
            print_list(cli.json, &restaurants, |r| format!("{:>9}  {}", r.id, r))?;
        }
        Command::Slots { date } => {
            let slots = service.slot_generator();
            let day = date.unwrap_or_else(|| slots.today());
            let free = service.available_slots(day);
            print_list(cli.json, &free, |at| {
                at.with_timezone(&slots.offset()).format("%H:%M").to_string()
            })?;
        }
        Command::List { user, status } => {
            let session = session_for(repos.as_ref(), &user).await?;
            let reservations = match status {
                Some(status) => {
                    service
                        .list_for_user_by_status(&session, status, &cancel)
                        .await?
                }
                None => service.list_for_user(&session, &cancel).await?,
            };
            let offset = service.slot_generator().offset();
            print_list(cli.json, &reservations, |r| {
                format!(
                    "{:>9}  {}  {:<24} party of {:<2}  {}",
                    r.id,
                    r.at.with_timezone(&offset).format("%Y-%m-%d %H:%M"),
                    r.restaurant_name,
                    r.party_size,
                    r.status
                )
            })?;
        }
        Command::Book {
            user,
            restaurant,
            at,
            party,
        } => {
            let session = session_for(repos.as_ref(), &user).await?;
            let at = service
                .slot_generator()
                .at(at.date(), at.time())
                .ok_or_else(|| {
                    DomainError::ValidationFailed(vec![format!("No such local time: {}", at)])
                })?;
            let created = service
                .create(&session, restaurant, at, party, &cancel)
                .await?;
            println!(
                "Booked #{} at {} for {} ({})",
                created.id, created.restaurant_name, created.party_size, created.status
            );
        }
        Command::Cancel { user, id } => {
            let session = session_for(repos.as_ref(), &user).await?;
            service.delete(&session, id, &cancel).await?;
            println!("Reservation #{} deleted", id);
        }
    }

    Ok(())
}

/// Sign in by username. There is no password prompt here.
async fn session_for(repos: &dyn RepositoryProvider, username: &str) -> Result<Session, AppError> {
    let user = repos
        .users()
        .find_by_username(username)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            entity: "User",
            field: "username",
            value: username.to_string(),
        })?;
    Ok(Session::new(user.id, user.username))
}

fn print_list<T: Serialize>(
    json: bool,
    items: &[T],
    line: impl Fn(&T) -> String,
) -> Result<(), AppError> {
    if json {
        let out = serde_json::to_string_pretty(items).map_err(InfraError::from)?;
        println!("{}", out);
        return Ok(());
    }
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("{}", line(item));
    }
    Ok(())
}
