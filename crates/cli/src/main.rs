//! Cadence CLI - habit tracking and progress analytics.

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tokio::sync::RwLock;

use cadence_analytics::{goal_rate, monthly_stats, overall_rate, weekly_stats};
use cadence_core::{
    month_bounds, Clock, Goal, GoalId, GoalInput, PairStatus, SystemClock, Weekday,
};
use cadence_ledger::{GoalDirectory, MoodLedger, ProgressLedger};
use cadence_schedule::due_goals;
use cadence_storage::{JsonStorage, MemoryStorage, Storage};

#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Recurring goals, daily moods, progress analytics", long_about = None)]
struct Cli {
    /// Data directory
    #[arg(long, default_value = ".cadence")]
    data_dir: std::path::PathBuf,

    /// Keep data in memory for this run instead of writing files
    #[arg(long)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage goals
    #[command(subcommand)]
    Goal(GoalCommands),
    /// Show goals due today with their status
    Today {
        /// Case-insensitive title filter
        #[arg(long)]
        filter: Option<String>,
    },
    /// Toggle a goal's completion for a date
    Done {
        /// Goal ID
        id: String,
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Mark a goal missed for a date
    Miss {
        /// Goal ID
        id: String,
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Why the goal was missed
        #[arg(long)]
        reason: Option<String>,
        /// Plan to succeed next time
        #[arg(long)]
        plan: Option<String>,
    },
    /// Clear a recorded miss
    Unmiss {
        /// Goal ID
        id: String,
        /// Date (YYYY-MM-DD), default today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Record or show today's mood
    Mood {
        /// Score 1-10; omit to show today's entry
        score: Option<u8>,
    },
    /// Completion and mood statistics
    Stats {
        /// Month to report (YYYY-MM), default current
        #[arg(long)]
        month: Option<String>,
        /// Trailing months for the monthly rollup
        #[arg(long, default_value = "3")]
        months_back: u32,
    },
}

#[derive(Subcommand)]
enum GoalCommands {
    /// Add a new goal
    Add {
        /// Goal title
        title: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Display color
        #[arg(long, default_value = "#4F46E5")]
        color: String,
        /// Weekdays, comma-separated (e.g. monday,wednesday)
        #[arg(long, value_delimiter = ',', required = true)]
        on: Vec<String>,
        /// First active date (YYYY-MM-DD), default today
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last active date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Display start time
        #[arg(long, default_value = "09:00")]
        from: String,
        /// Display end time
        #[arg(long, default_value = "17:00")]
        to: String,
    },
    /// List goals
    List,
    /// Edit an existing goal
    Edit {
        /// Goal ID
        id: String,
        #[command(flatten)]
        edits: GoalEdits,
    },
    /// Remove a goal
    Rm {
        /// Goal ID
        id: String,
    },
}

/// Field changes for `goal edit`; omitted fields keep their value.
#[derive(Args)]
struct GoalEdits {
    /// New title
    #[arg(long)]
    title: Option<String>,

    /// New description
    #[arg(long)]
    description: Option<String>,

    /// New display color
    #[arg(long)]
    color: Option<String>,

    /// New weekdays, comma-separated
    #[arg(long, value_delimiter = ',')]
    on: Option<Vec<String>>,

    /// New first active date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// New last active date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Make the goal open-ended
    #[arg(long, conflicts_with = "end")]
    clear_end: bool,

    /// New display start time
    #[arg(long)]
    from: Option<String>,

    /// New display end time
    #[arg(long)]
    to: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if cli.ephemeral {
        tracing::debug!("using in-memory storage");
        let storage = Arc::new(RwLock::new(MemoryStorage::new()));
        run(storage, cli.command, clock).await
    } else {
        tracing::debug!("using data dir {}", cli.data_dir.display());
        let storage = Arc::new(RwLock::new(JsonStorage::new(&cli.data_dir).await?));
        run(storage, cli.command, clock).await
    }
}

async fn run<S: Storage>(
    storage: Arc<RwLock<S>>,
    command: Commands,
    clock: Arc<dyn Clock>,
) -> Result<()> {
    let mut goals = GoalDirectory::new(storage.clone(), clock.clone());
    let mut progress = ProgressLedger::new(storage.clone());
    let mut moods = MoodLedger::new(storage.clone(), clock.clone());

    match command {
        Commands::Goal(command) => match command {
            GoalCommands::Add {
                title,
                description,
                color,
                on,
                start,
                end,
                from,
                to,
            } => {
                let frequency = on
                    .iter()
                    .map(|day| parse_weekday(day))
                    .collect::<Result<Vec<_>>>()?;
                let input = GoalInput {
                    title,
                    description,
                    color,
                    frequency,
                    start_date: start.unwrap_or_else(|| clock.today()),
                    end_date: end,
                    start_time: from,
                    end_time: to,
                };
                let goal = goals.create(input).await?;
                println!("Added goal: {} - {}", goal.id, goal.title);
            }
            GoalCommands::List => {
                let all = goals.list().await?;
                println!("Goals ({})", all.len());
                for goal in all {
                    let days: Vec<&str> =
                        goal.frequency.iter().map(|d| d.as_str()).collect();
                    let range = match goal.end_date {
                        Some(end) => format!("{} .. {}", goal.start_date, end),
                        None => format!("{} ..", goal.start_date),
                    };
                    println!("  {} | {} | {} | {}", goal.id, goal.title, days.join(","), range);
                }
            }
            GoalCommands::Edit { id, edits } => {
                let id = parse_goal_id(&id)?;
                let goal = goals
                    .get(id)
                    .await?
                    .ok_or_else(|| anyhow!("Unknown goal: {id}"))?;
                let edited = apply_edits(goal, &edits)?;
                let updated = goals.update(edited).await?;
                println!("Updated goal: {} - {}", updated.id, updated.title);
            }
            GoalCommands::Rm { id } => {
                let id = parse_goal_id(&id)?;
                goals.delete(id).await?;
                println!("Removed goal {}", id);
            }
        },
        Commands::Today { filter } => {
            let today = clock.today();
            let (start, end) = month_bounds(today.year(), today.month());
            progress.load_window(start, end).await?;

            let all = goals.list().await?;
            let due = due_goals(&all, today, filter.as_deref());
            if due.is_empty() {
                println!("No goals due today.");
            } else {
                println!("Goals due {} ({})", today, Weekday::of(today));
                for goal in due {
                    let marker = match progress.status(goal.id, today) {
                        PairStatus::Completed => "x",
                        PairStatus::Missed => "!",
                        PairStatus::Pending => " ",
                    };
                    println!("  [{}] {} - {}", marker, goal.id, goal.title);
                }
            }
        }
        Commands::Done { id, date } => {
            let id = parse_goal_id(&id)?;
            let date = date.unwrap_or_else(|| clock.today());
            let status = progress.toggle_completion(id, date).await?;
            match status {
                PairStatus::Completed => println!("Completed {} on {}", id, date),
                _ => println!("Reverted {} to pending on {}", id, date),
            }
        }
        Commands::Miss {
            id,
            date,
            reason,
            plan,
        } => {
            let id = parse_goal_id(&id)?;
            let date = date.unwrap_or_else(|| clock.today());
            progress
                .mark_missed(id, date, reason, plan, clock.now())
                .await?;
            println!("Marked {} missed on {}", id, date);
        }
        Commands::Unmiss { id, date } => {
            let id = parse_goal_id(&id)?;
            let date = date.unwrap_or_else(|| clock.today());
            progress.clear_miss(id, date).await?;
            println!("Cleared miss for {} on {}", id, date);
        }
        Commands::Mood { score } => match score {
            Some(score) => {
                let entry = moods.set_todays_mood(score).await?;
                println!("Mood for {}: {}/10", entry.date, entry.score);
            }
            None => match moods.todays_mood().await? {
                Some(entry) => println!("Mood for {}: {}/10", entry.date, entry.score),
                None => println!("No mood recorded today."),
            },
        },
        Commands::Stats { month, months_back } => {
            let today = clock.today();
            let (year, month) = match month {
                Some(spec) => parse_month(&spec)?,
                None => (today.year(), today.month()),
            };
            let (start, end) = month_bounds(year, month);

            let all = goals.list().await?;
            progress.load_window(start, end).await?;
            let month_moods = moods.month_moods(start, end).await?;

            println!("Stats for {}", start.format("%B %Y"));
            println!(
                "Overall completion: {:.0}%",
                overall_rate(&all, progress.completions(), start, end)
            );
            for goal in &all {
                println!(
                    "  {:>3.0}% {}",
                    goal_rate(goal, progress.completions(), start, end),
                    goal.title
                );
            }

            let weekly = weekly_stats(&all, progress.completions(), &month_moods, year, month);
            println!("\nBy weekday (mood / completion):");
            for day in Weekday::ALL {
                let mood = match weekly.mood_averages[day.index()] {
                    Some(avg) => format!("{:.1}", avg),
                    None => "no data".to_string(),
                };
                println!(
                    "  {:<9} {:>7}  {:>5.1}%",
                    day,
                    mood,
                    weekly.completion_rates[day.index()]
                );
            }

            // The monthly rollup needs records across the whole trailing
            // window, not just the selected month.
            let months = cadence_core::trailing_months(today, months_back);
            let span_start = months[0];
            let (_, span_end) = cadence_core::month_of(today);
            progress.load_window(span_start, span_end).await?;

            println!("\nMonthly progress:");
            for stat in monthly_stats(&all, progress.completions(), months_back, today) {
                println!("  {:<9} {:>5.0}%", stat.label, stat.rate);
            }
        }
    }

    Ok(())
}

/// Apply field edits to a goal and re-check the model's integrity rules.
fn apply_edits(mut goal: Goal, edits: &GoalEdits) -> Result<Goal> {
    if let Some(title) = &edits.title {
        goal.title = title.clone();
    }
    if let Some(description) = &edits.description {
        goal.description = description.clone();
    }
    if let Some(color) = &edits.color {
        goal.color = color.clone();
    }
    if let Some(on) = &edits.on {
        goal.frequency = on
            .iter()
            .map(|day| parse_weekday(day))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(start) = edits.start {
        goal.start_date = start;
    }
    if edits.clear_end {
        goal.end_date = None;
    } else if let Some(end) = edits.end {
        goal.end_date = Some(end);
    }
    if let Some(from) = &edits.from {
        goal.start_time = from.clone();
    }
    if let Some(to) = &edits.to {
        goal.end_time = to.clone();
    }

    let input = GoalInput {
        title: goal.title.clone(),
        description: goal.description.clone(),
        color: goal.color.clone(),
        frequency: goal.frequency.clone(),
        start_date: goal.start_date,
        end_date: goal.end_date,
        start_time: goal.start_time.clone(),
        end_time: goal.end_time.clone(),
    };
    input.validate()?;
    Ok(goal)
}

fn parse_goal_id(s: &str) -> Result<GoalId> {
    s.parse().map_err(|_| anyhow!("Invalid goal ID: {s}"))
}

fn parse_weekday(s: &str) -> Result<Weekday> {
    let trimmed = s.trim();
    let mut chars = trimmed.chars();
    let normalized = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    };
    normalized
        .parse()
        .map_err(|_| anyhow!("Unknown weekday: {trimmed}"))
}

fn parse_month(spec: &str) -> Result<(i32, u32)> {
    let (year, month) = spec
        .split_once('-')
        .ok_or_else(|| anyhow!("Expected YYYY-MM, got {spec}"))?;
    let year: i32 = year.parse().context("invalid year")?;
    let month: u32 = month.parse().context("invalid month")?;
    if !(1..=12).contains(&month) {
        return Err(anyhow!("Month out of range: {month}"));
    }
    Ok((year, month))
}
