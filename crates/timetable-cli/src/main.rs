//! `timetable` CLI: inspect and edit a weekly class timetable stored as JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Start a state file with the seed catalogs and an empty schedule
//! timetable init
//!
//! # Fill the schedule from the offline fixture generator
//! timetable generate
//!
//! # List double-booked instructors and rooms
//! timetable conflicts
//!
//! # Check a placement without saving it (end time derived from the course)
//! timetable validate --course C101 --instructor I001 --room R1 --day Monday --start 09:00
//!
//! # Move a class; rejected moves leave the file untouched
//! timetable move C101 --day Wednesday --start 10:00
//!
//! # Import a generator response ({"schedule": [...]})
//! timetable accept proposal.json
//!
//! # Column layout for the grid, as JSON
//! timetable layout --day Tuesday
//!
//! # Each room's classes, Monday first
//! timetable assignments --by room
//! ```
//!
//! The state file defaults to `timetable.json` and can be set with `--state`
//! or `TIMETABLE_STATE`. Logging goes to stderr; set `RUST_LOG` or pass `-v`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use timetable_engine::{
    end_time_for, ClockTime, Day, FixtureGenerator, GenerationResponse, LayoutConfig,
    ScheduleEntry, Timetable,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "timetable",
    version,
    about = "Weekly class timetable: conflict scan, validation, and layout"
)]
struct Cli {
    /// Timetable state file (courses, instructors, rooms, schedule)
    #[arg(
        long,
        global = true,
        env = "TIMETABLE_STATE",
        default_value = "timetable.json"
    )]
    state: PathBuf,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a state file with the seed catalogs and an empty schedule
    Init {
        /// Overwrite an existing state file
        #[arg(long)]
        force: bool,
    },
    /// List every instructor and room conflict in the schedule
    Conflicts {
        /// Print conflicts as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a placement against the current schedule without saving it
    Validate(EntryArgs),
    /// Create or replace a course's entry after validating it
    Save(EntryArgs),
    /// Move a scheduled course to another day and start time
    Move {
        /// Course id
        course: String,
        #[arg(long)]
        day: Day,
        /// New start time (HH:MM)
        #[arg(long)]
        start: ClockTime,
    },
    /// Remove a course from the schedule
    Remove {
        /// Course id
        course: String,
    },
    /// List courses that have no entry yet
    Unassigned,
    /// Print the grid column layout as JSON
    Layout {
        /// Only lay out this day
        #[arg(long)]
        day: Option<Day>,
    },
    /// List entries per instructor or per room, in week order
    Assignments {
        /// Group by instructor or by room
        #[arg(long, value_enum, default_value_t = Grouping::Instructor)]
        by: Grouping,
    },
    /// Report every constraint the schedule breaks
    Audit,
    /// Replace the schedule with a generator response, if it is conflict-free
    Accept {
        /// JSON file holding {"schedule": [...]} or {"error": "..."}
        proposal: PathBuf,
    },
    /// Replace the schedule with the offline fixture generator's proposal
    Generate,
}

#[derive(Clone, Copy, ValueEnum)]
enum Grouping {
    Instructor,
    Room,
}

#[derive(Args)]
struct EntryArgs {
    #[arg(long)]
    course: String,
    #[arg(long)]
    instructor: String,
    #[arg(long)]
    room: String,
    #[arg(long)]
    day: Day,
    /// Start time (HH:MM)
    #[arg(long)]
    start: ClockTime,
    /// End time (HH:MM); derived from the course duration when omitted
    #[arg(long)]
    end: Option<ClockTime>,
}

impl EntryArgs {
    fn to_entry(&self, timetable: &Timetable) -> Result<ScheduleEntry> {
        let end_time = match (self.end, timetable.index().course(&self.course)) {
            (Some(end), _) => end,
            (None, Some(course)) => end_time_for(self.start, course.duration)
                .context("Class would run past midnight")?,
            // Unknown course: validation reports it, the end time never matters.
            (None, None) => self.start,
        };
        Ok(ScheduleEntry {
            course_id: self.course.clone(),
            instructor_id: self.instructor.clone(),
            room_id: self.room.clone(),
            day: self.day,
            start_time: self.start,
            end_time,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let state = cli.state.as_path();
    match cli.command {
        Commands::Init { force } => {
            if state.exists() && !force {
                bail!(
                    "State file already exists: {} (use --force to overwrite)",
                    state.display()
                );
            }
            store(state, &Timetable::seeded())?;
            println!("Initialized {}", state.display());
        }
        Commands::Conflicts { json } => {
            let timetable = load(state)?;
            let conflicts = timetable.conflicts();
            if json {
                println!("{}", serde_json::to_string_pretty(&conflicts)?);
            } else if conflicts.is_empty() {
                println!("No conflicts.");
            } else {
                for conflict in &conflicts {
                    println!("{}", conflict);
                }
                println!("{} conflict(s)", conflicts.len());
            }
        }
        Commands::Validate(args) => {
            let timetable = load(state)?;
            let candidate = args.to_entry(&timetable)?;
            if let Some(violation) = timetable.check(&candidate) {
                bail!(violation);
            }
            println!(
                "OK: {} on {} {}-{}",
                candidate.course_id,
                candidate.day,
                candidate.start_time.to_12_hour(),
                candidate.end_time.to_12_hour()
            );
        }
        Commands::Save(args) => {
            let mut timetable = load(state)?;
            let entry = args.to_entry(&timetable)?;
            let course_id = entry.course_id.clone();
            timetable.save_entry(entry)?;
            store(state, &timetable)?;
            println!("Saved {}", course_id);
        }
        Commands::Move { course, day, start } => {
            let mut timetable = load(state)?;
            let moved = timetable.move_entry(&course, day, start)?;
            store(state, &timetable)?;
            println!(
                "Moved {} to {} {}-{}",
                moved.course_id,
                moved.day,
                moved.start_time.to_12_hour(),
                moved.end_time.to_12_hour()
            );
        }
        Commands::Remove { course } => {
            let mut timetable = load(state)?;
            timetable.delete_entry(&course)?;
            store(state, &timetable)?;
            println!("Removed {}", course);
        }
        Commands::Unassigned => {
            let timetable = load(state)?;
            for course in timetable.unassigned_courses() {
                println!("{}\t{}", course.id, course.name);
            }
        }
        Commands::Layout { day } => {
            let timetable = load(state)?;
            let config = LayoutConfig::default();
            let layout = match day {
                Some(day) => timetable_engine::layout_day(&timetable.schedule, day, &config),
                None => timetable.layout(&config),
            };
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        Commands::Assignments { by } => {
            let timetable = load(state)?;
            let index = timetable.index();
            let groups = match by {
                Grouping::Instructor => timetable_engine::by_instructor(&timetable.schedule),
                Grouping::Room => timetable_engine::by_room(&timetable.schedule),
            };
            for (id, entries) in &groups {
                let name = match by {
                    Grouping::Instructor => index.instructor(id).map(|i| i.name.as_str()),
                    Grouping::Room => index.room(id).map(|r| r.name.as_str()),
                };
                println!("{} ({})", name.unwrap_or(*id), id);
                for entry in entries {
                    let other = match by {
                        Grouping::Instructor => &entry.room_id,
                        Grouping::Room => &entry.instructor_id,
                    };
                    println!(
                        "  {} {}-{}\t{}\t{}\t{}",
                        entry.day,
                        entry.start_time.to_12_hour(),
                        entry.end_time.to_12_hour(),
                        entry.course_id,
                        index.course_name(&entry.course_id),
                        other
                    );
                }
            }
        }
        Commands::Audit => {
            let timetable = load(state)?;
            let issues = timetable.audit();
            if issues.is_empty() {
                println!("No issues.");
            } else {
                for issue in &issues {
                    println!("{}", issue);
                }
                bail!("{} issue(s) found", issues.len());
            }
        }
        Commands::Accept { proposal } => {
            let mut timetable = load(state)?;
            let body = fs::read_to_string(&proposal)
                .with_context(|| format!("Failed to read file: {}", proposal.display()))?;
            let response =
                GenerationResponse::from_json(&body).context("Error generating schedule")?;
            timetable
                .accept_generated(response.schedule)
                .context("Error generating schedule")?;
            store(state, &timetable)?;
            println!("Accepted {} entries", timetable.schedule.len());
        }
        Commands::Generate => {
            let mut timetable = load(state)?;
            let count = timetable
                .generate_with(&FixtureGenerator)
                .context("Error generating schedule")?;
            store(state, &timetable)?;
            println!("Generated {} entries", count);
        }
    }

    Ok(())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Result<Timetable> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read state file: {}", path.display()))?;
    let timetable = Timetable::from_json(&json)
        .with_context(|| format!("Invalid state file: {}", path.display()))?;
    debug!(
        path = %path.display(),
        entries = timetable.schedule.len(),
        "loaded state"
    );
    Ok(timetable)
}

fn store(path: &Path, timetable: &Timetable) -> Result<()> {
    let json = timetable.to_json()?;
    fs::write(path, json).with_context(|| format!("Failed to write file: {}", path.display()))?;
    debug!(path = %path.display(), "saved state");
    Ok(())
}
