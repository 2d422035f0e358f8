// ============================================================================
// tandem — CLI shell for the Tandem accountability matching core
// ============================================================================
// Usage:
//   tandem habits                        List the selectable habit catalog
//   tandem directory [--habit H]         Show the candidate directory
//   tandem polish --text TEXT            Rewrite a pitch via the Gemini API
//   tandem run                           Interactive onboarding + focus feed
// ============================================================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use tandem_core::{
    catalog, overlap_percent, AppConfig, AppView, FocusFeed, HabitCategory, OnboardingFlow,
    OnboardingStep, OwnProfile, PitchPolisher, Session, UserProfile, SCHEDULE_DAYS,
};

/// Tandem habit-accountability matching, terminal edition
#[derive(Parser)]
#[command(name = "tandem", version, about = "Find an accountability partner for the habit you are building")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the selectable habit catalog
    Habits,

    /// Show the candidate directory
    Directory {
        /// Filter by habit: running, reading, meditation, hiking, writing, lifting
        #[arg(long)]
        habit: Option<String>,

        /// Emit pretty JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a pitch with the configured text provider
    Polish {
        /// The pitch text to rewrite
        #[arg(long)]
        text: String,

        /// Habit context for the rewrite
        #[arg(long, default_value = "Running")]
        habit: String,
    },

    /// Walk through onboarding, then browse the focus feed
    Run,
}

fn parse_habit(s: &str) -> Result<HabitCategory> {
    s.parse::<HabitCategory>().map_err(|_| {
        anyhow::anyhow!(
            "Unknown habit '{}'. Valid values: running, reading, meditation, coding, hiking, writing, lifting, yoga",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the key may come from the real environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tandem_core=warn".parse().unwrap())
                .add_directive("tandem=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Habits => cmd_habits(),
        Commands::Directory { habit, json } => cmd_directory(habit.as_deref(), json),
        Commands::Polish { text, habit } => cmd_polish(&text, &habit).await,
        Commands::Run => cmd_run().await,
    }
}

fn cmd_habits() -> Result<()> {
    let choices = catalog::habits();

    println!("{:<12}  {}", "HABIT", "ICON TOKEN");
    println!("{}", "-".repeat(26));
    for choice in choices {
        println!("{:<12}  {}", choice.label, choice.icon);
    }

    println!("\nTotal: {} habits", choices.len());
    Ok(())
}

fn cmd_directory(habit: Option<&str>, json: bool) -> Result<()> {
    let filter = habit.map(parse_habit).transpose()?;
    let profiles: Vec<&UserProfile> = catalog::candidates()
        .iter()
        .filter(|p| filter.map_or(true, |h| p.habit == h))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No candidates found.");
        return Ok(());
    }

    println!(
        "{:<8}  {:<4}  {:<12}  {:<7}  {:<6}  {}",
        "NAME", "AGE", "HABIT", "STREAK", "GHOST", "LOCATION"
    );
    println!("{}", "-".repeat(64));

    for profile in &profiles {
        println!(
            "{:<8}  {:<4}  {:<12}  {:<7}  {:<6}  {}",
            profile.name,
            profile.age,
            profile.habit.label(),
            profile.streak,
            format!("{}%", profile.ghost_score),
            profile.location
        );
    }

    println!("\nTotal: {} candidates", profiles.len());
    Ok(())
}

async fn cmd_polish(text: &str, habit: &str) -> Result<()> {
    let habit = parse_habit(habit)?;
    let polisher = PitchPolisher::from_config(&AppConfig::default());

    if !polisher.is_enabled() {
        println!("(GEMINI_API_KEY not set; the pitch is returned unchanged)");
    }

    println!("{}", polisher.polish(text, habit.label()).await);
    Ok(())
}

const RUN_HELP: &str = "\
Onboarding: pick N | day N | bio TEXT | connect ID | polish | next
Feed:       next | open | close
Anywhere:   help | quit";

async fn cmd_run() -> Result<()> {
    let polisher = PitchPolisher::from_config(&AppConfig::default());
    let mut session = Session::new();

    println!("Welcome to Tandem. Type 'help' for commands.");
    render(&session);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{}", RUN_HELP);
                continue;
            }
            _ => {}
        }

        if let Err(e) = dispatch(&mut session, &polisher, input).await {
            println!("! {}", e);
        }
        render(&session);
    }

    Ok(())
}

async fn dispatch(session: &mut Session, polisher: &PitchPolisher, input: &str) -> Result<()> {
    let (command, rest) = input.split_once(' ').unwrap_or((input, ""));
    let argument = rest.trim();

    match command {
        "pick" => {
            anyhow::ensure!(!argument.is_empty(), "usage: pick N (or pick running)");
            let habit = parse_habit_choice(argument)?;
            session
                .onboarding_mut()
                .context("'pick' only works during onboarding")?
                .select_habit(habit);
        }
        "day" => {
            let day: usize = argument.parse().context("usage: day N (1-7)")?;
            anyhow::ensure!((1..=7).contains(&day), "day must be between 1 and 7");
            session
                .onboarding_mut()
                .context("'day' only works during onboarding")?
                .toggle_day(day - 1)?;
        }
        "bio" => {
            anyhow::ensure!(!argument.is_empty(), "usage: bio TEXT");
            session
                .onboarding_mut()
                .context("'bio' only works during onboarding")?
                .set_bio(argument);
        }
        "connect" => {
            anyhow::ensure!(!argument.is_empty(), "usage: connect ID (e.g. strava)");
            let connected = session
                .onboarding_mut()
                .context("'connect' only works during onboarding")?
                .toggle_integration(argument);
            println!(
                "{} {}",
                argument,
                if connected { "connected" } else { "disconnected" }
            );
        }
        "polish" => {
            let request = session
                .onboarding_mut()
                .context("'polish' only works during onboarding")?
                .begin_polish()?;
            println!("polishing...");
            let polished = polisher.polish(&request.text, &request.habit_label).await;
            if let Some(flow) = session.onboarding_mut() {
                flow.finish_polish(polished);
            }
        }
        "next" => {
            if session.onboarding().is_some() {
                let step = session.advance_onboarding()?;
                if step == OnboardingStep::Complete {
                    println!("Profile created. Entering the focus feed.");
                }
            } else if let Some(feed) = session.feed_mut() {
                feed.advance();
            }
        }
        "open" => {
            let feed = session.feed_mut().context("'open' only works in the feed")?;
            feed.open_detail();
            let candidate_bio = feed.current().bio.clone();
            if let Some(own) = session.own_profile() {
                let verdict = polisher.compatibility(&own.pitch, &candidate_bio).await;
                println!("compatibility: {}", verdict);
            }
        }
        "close" => {
            session
                .feed_mut()
                .context("'close' only works in the feed")?
                .close_detail();
        }
        _ => anyhow::bail!("unknown command '{}' (type 'help')", command),
    }

    Ok(())
}

fn parse_habit_choice(argument: &str) -> Result<HabitCategory> {
    let choices = catalog::habits();
    if let Ok(index) = argument.parse::<usize>() {
        anyhow::ensure!(
            (1..=choices.len()).contains(&index),
            "pick a number between 1 and {}",
            choices.len()
        );
        return Ok(choices[index - 1].habit);
    }
    parse_habit(argument)
}

fn render(session: &Session) {
    match session.view() {
        AppView::Onboarding(flow) => render_onboarding(flow),
        AppView::Feed(feed) => render_feed(feed, session.own_profile()),
    }
}

fn render_onboarding(flow: &OnboardingFlow) {
    let step = flow.step();
    println!("\n=== Step {}/3: {} ===", step.number(), step.title());

    match step {
        OnboardingStep::Habit => {
            for (i, choice) in catalog::habits().iter().enumerate() {
                let marker = if flow.draft().habit == Some(choice.habit) {
                    "*"
                } else {
                    " "
                };
                println!(" {} {}) {}", marker, i + 1, choice.label);
            }
            println!("pick N to choose, next to continue");
        }
        OnboardingStep::Schedule => {
            println!(" {}", schedule_row(&flow.draft().availability));
            println!("day N to toggle (1 = Monday), next to continue");
        }
        OnboardingStep::Pitch => {
            let bio = &flow.draft().bio;
            println!(" pitch: {}", if bio.is_empty() { "(empty)" } else { bio });
            if flow.polish_pending() {
                println!(" polish in flight");
            }
            println!(" integrations:");
            for option in catalog::integration_options() {
                let marker = if flow.draft().integrations.contains(option.id) {
                    "x"
                } else {
                    " "
                };
                println!("  [{}] {} {:<12} {}", marker, option.icon, option.id, option.subtitle);
            }
            println!("bio TEXT, connect ID, polish, next to finish");
        }
        // The session swaps to the feed before Complete ever renders
        OnboardingStep::Complete => {}
    }
}

fn render_feed(feed: &FocusFeed, own: Option<&OwnProfile>) {
    let profile = feed.current();

    println!("\n=== Focus Feed ({}/{}) ===", feed.position() + 1, feed.len());
    println!("{} PARTNER", profile.habit.label().to_uppercase());
    println!("{}, {} - {}", profile.name, profile.age, profile.location);
    println!("\"{}\"", profile.bio);
    println!(
        "{} day streak | {}% reliability",
        profile.streak, profile.ghost_score
    );

    if feed.detail_open() {
        println!("--- detail ---");
        println!("schedule: {}", schedule_row(&profile.schedule));
        if let Some(own) = own {
            println!(
                "overlap: {}% of their days match yours",
                overlap_percent(&own.availability, &profile.schedule)
            );
        }
        for integration in &profile.integrations {
            let preview = if integration.connected {
                integration.data_preview.as_str()
            } else {
                "not connected"
            };
            println!("{} {}: {}", integration.icon, integration.name, preview);
        }
        println!("close to dismiss");
    } else {
        println!("next to keep browsing, open for details");
    }
}

fn schedule_row(schedule: &[bool; SCHEDULE_DAYS]) -> String {
    catalog::WEEKDAYS
        .iter()
        .zip(schedule.iter())
        .map(|(label, on)| {
            if *on {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        })
        .collect()
}
