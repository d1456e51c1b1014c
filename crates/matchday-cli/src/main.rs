use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use matchday_api::NotificationCenter;
use matchday_core::NotificationQuery;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Parser)]
#[command(name = "matchday")]
#[command(about = "Soccer match notification catalog CLI")]
struct Cli {
    /// Seed for the generated catalog; omit for a fresh random catalog.
    #[arg(long)]
    seed: Option<u64>,

    /// Schedule reference time as an RFC3339 UTC timestamp; defaults to now.
    #[arg(long)]
    now: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Matches {
        #[command(subcommand)]
        command: MatchCommand,
    },
    Notifications {
        #[command(subcommand)]
        command: NotificationCommand,
    },
}

#[derive(Debug, Subcommand)]
enum MatchCommand {
    List,
    Get(GetArgs),
    Notifications(MatchNotificationsArgs),
}

#[derive(Debug, Subcommand)]
enum NotificationCommand {
    List(ListNotificationsArgs),
    Get(GetArgs),
    Important(ImportantArgs),
}

#[derive(Debug, Args)]
struct GetArgs {
    #[arg(long)]
    id: String,
}

#[derive(Debug, Args)]
struct MatchNotificationsArgs {
    #[arg(long)]
    id: String,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    priority: Option<String>,
}

#[derive(Debug, Args)]
struct ListNotificationsArgs {
    #[arg(long)]
    match_id: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    limit: Option<i64>,
}

#[derive(Debug, Args)]
struct ImportantArgs {
    #[arg(long)]
    limit: Option<i64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let now = parse_optional_rfc3339(cli.now.as_deref())?;
    let center = NotificationCenter::with_sample_data(cli.seed, now);

    match cli.command {
        Command::Matches { command } => match command {
            MatchCommand::List => print_json(&center.list_matches()),
            MatchCommand::Get(args) => print_json(&center.get_match(&args.id)?),
            MatchCommand::Notifications(args) => print_json(&center.list_match_notifications(
                &args.id,
                args.kind.as_deref(),
                args.priority.as_deref(),
            )?),
        },
        Command::Notifications { command } => match command {
            NotificationCommand::List(args) => {
                print_json(&center.list_notifications(&NotificationQuery {
                    match_id: args.match_id,
                    kind: args.kind,
                    priority: args.priority,
                    limit: args.limit,
                }))
            }
            NotificationCommand::Get(args) => print_json(&center.get_notification(&args.id)?),
            NotificationCommand::Important(args) => {
                print_json(&center.list_important_notifications(args.limit))
            }
        },
    }
}

fn print_json<T>(value: &T) -> Result<()>
where
    T: Serialize,
{
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_optional_rfc3339(value: Option<&str>) -> Result<OffsetDateTime> {
    match value {
        Some(raw) => OffsetDateTime::parse(raw, &time::format_description::well_known::Rfc3339)
            .with_context(|| format!("invalid RFC3339 UTC timestamp: {raw}")),
        None => Ok(OffsetDateTime::now_utc()),
    }
}
