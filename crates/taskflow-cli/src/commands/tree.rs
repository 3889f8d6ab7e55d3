use clap::Subcommand;
use serde::Serialize;
use taskflow_core::{Config, Database, Event, GrowthTracker, StageProgress, StageRow};

use crate::display::format_stage_row;

#[derive(Subcommand)]
pub enum TreeAction {
    /// Show the stage table for an in-progress session count
    Status {
        /// Sessions completed in the current cycle
        #[arg(long, default_value = "0")]
        sessions: u64,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Feed completed sessions into a fresh tree, printing each event
    Grow {
        #[arg(long, default_value = "1")]
        sessions: u64,
    },
    /// List the configured growth stages
    Stages,
    /// Set the completed-cycles tally back to zero
    ResetCycles,
}

#[derive(Serialize)]
struct TreeStatus {
    completed_cycles: u64,
    session_count: u64,
    progress: Option<StageProgress>,
    stages: Vec<StageRow>,
}

pub fn run(action: TreeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let plan = config.stage_plan();

    match action {
        TreeAction::Status { sessions, json } => {
            let tree = GrowthTracker::new(plan, Database::open()?)?;
            let status = TreeStatus {
                completed_cycles: tree.completed_cycles(),
                session_count: sessions,
                progress: tree.plan().progress(sessions),
                stages: tree.plan().table(sessions),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                println!("🏆 {} completed cycles", status.completed_cycles);
                for row in &status.stages {
                    println!("{}", format_stage_row(row));
                }
            }
        }
        TreeAction::Grow { sessions } => {
            let mut tree = GrowthTracker::new(plan, Database::open()?)?;
            for _ in 0..sessions {
                let event = tree.increment_session()?;
                if let Event::TreeBloomed { completed_cycles, .. } = event {
                    eprintln!("Congratulations! Tree bloomed ({completed_cycles} total).");
                }
                println!("{}", serde_json::to_string(&event)?);
            }
            if let Some(snapshot) = tree.snapshot() {
                println!("{}", serde_json::to_string(&snapshot)?);
            }
        }
        TreeAction::Stages => {
            println!("{}", serde_json::to_string_pretty(&plan.stages)?);
        }
        TreeAction::ResetCycles => {
            let mut tree = GrowthTracker::new(plan, Database::open()?)?;
            tree.reset_completed_cycles()?;
            println!("completed cycles reset");
        }
    }
    Ok(())
}
