use clap::Subcommand;
use taskflow_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Get a config value
    Get {
        /// Dot-separated key (e.g. "timer.focus_duration_min", "growth.stages")
        key: String,
    },
    /// Set a config value; rejected if the result would not validate
    Set {
        /// Dot-separated key
        key: String,
        /// New value (JSON for "growth.stages")
        value: String,
    },
    /// Show timer settings and the effective growth stages
    List,
    /// Restore default durations and the default garden
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| format!("unknown key: {key}"))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            let stored = config.get(&key).unwrap_or(value);
            println!("{key} = {stored}");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config.effective_json()?)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
