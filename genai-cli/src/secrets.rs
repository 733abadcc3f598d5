use clap::Subcommand;
use console::style;
use genai_core::config::{mask, UserSecrets, KNOWN_KEYS};

use crate::demos::DemoResult;

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Store a value
    Set { key: String, value: String },
    /// Print a stored value
    Get { key: String },
    /// List stored keys with masked values
    List,
    /// Delete a stored value
    Remove { key: String },
    /// Print the location of the secrets file
    Path,
}

pub fn run(command: SecretsCommand) -> DemoResult {
    let mut secrets = UserSecrets::load()?;

    match command {
        SecretsCommand::Set { key, value } => {
            if !KNOWN_KEYS.contains(&key.as_str()) {
                eprintln!("{} {} is not read by any demo", style("warning:").yellow(), key);
            }
            secrets.set(key.as_str(), value);
            let path = secrets.save()?;
            println!("✅ Saved {} to {}", key, path.display());
        }
        SecretsCommand::Get { key } => match secrets.get(&key) {
            Some(value) => println!("{}", value),
            None => println!("❌ {} is not set", key),
        },
        SecretsCommand::List => {
            if secrets.is_empty() {
                println!("No secrets stored.");
            }
            for key in secrets.keys() {
                let value = secrets.get(key).map(mask).unwrap_or_default();
                println!("{} = {}", style(key).bold(), value);
            }
        }
        SecretsCommand::Remove { key } => match secrets.remove(&key) {
            Some(_) => {
                secrets.save()?;
                println!("🗑️ Removed {}", key);
            }
            None => println!("❌ {} is not set", key),
        },
        SecretsCommand::Path => println!("{}", UserSecrets::default_path()?.display()),
    }
    Ok(())
}
