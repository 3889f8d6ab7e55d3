use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use taskflow_core::{
    duration_for, Config, Database, Event, GrowthTracker, Mode, TimerEngine,
};
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::display::format_clock;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run the focus cycle, printing every event as a JSON line
    Run {
        /// Stop after this many completed focus sessions
        #[arg(long, default_value = "1")]
        focus_sessions: u64,
        /// Feed ticks back to back instead of once per second
        #[arg(long)]
        instant: bool,
        /// Mode to start in (focus, short_break, long_break)
        #[arg(long, default_value = "focus")]
        mode: Mode,
    },
    /// Print the configured duration of every mode
    Durations,
    /// Print the initial timer state as JSON
    Status,
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    match action {
        TimerAction::Run {
            focus_sessions,
            instant,
            mode,
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            runtime.block_on(run_cycle(&config, focus_sessions, instant, mode))?;
        }
        TimerAction::Durations => {
            for mode in Mode::ALL {
                println!(
                    "{:<12} {}",
                    mode.label(),
                    format_clock(duration_for(mode, &config.timer))
                );
            }
        }
        TimerAction::Status => {
            let engine = TimerEngine::new(config.timer.clone());
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        }
    }
    Ok(())
}

/// Drive the engine from a one-second interval. Each finished focus
/// interval also grows the tree.
async fn run_cycle(
    config: &Config,
    focus_sessions: u64,
    instant: bool,
    mode: Mode,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = TimerEngine::new(config.timer.clone());
    if mode != Mode::Focus {
        print_event(&engine.switch_mode(mode))?;
    }
    let mut tree = GrowthTracker::new(config.stage_plan(), Database::open()?)?;

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // Late ticks are not replayed; a stalled process simply loses that time.
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval.tick().await;

    print_event(&engine.toggle_start_pause())?;
    let mut focus_done = 0u64;

    while focus_done < focus_sessions {
        if !instant {
            interval.tick().await;
        }

        let Some(event) = engine.tick() else {
            if !instant {
                eprint!("\r{} {}  ", engine.mode().label(), format_clock(engine.seconds_remaining()));
                std::io::stderr().flush()?;
            }
            continue;
        };

        if !instant {
            eprintln!();
        }
        print_event(&event)?;

        if let Event::IntervalCompleted {
            completed: Mode::Focus,
            ..
        } = event
        {
            focus_done += 1;
            let grown = tree.increment_session()?;
            if matches!(grown, Event::TreeBloomed { .. }) {
                eprintln!("Congratulations! Your tree bloomed.");
            }
            print_event(&grown)?;
        }

        // Nobody is at the keyboard to press start again.
        if !engine.is_active() && focus_done < focus_sessions {
            debug!("auto-start disabled, resuming timer");
            print_event(&engine.toggle_start_pause())?;
        }
    }

    print_event(&engine.snapshot())?;
    Ok(())
}
