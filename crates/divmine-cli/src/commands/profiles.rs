//! Profiles command - list the configured document types.

use clap::Args;
use console::style;

use super::load_config;

/// Arguments for the profiles command.
#[derive(Args)]
pub struct ProfilesArgs {
    /// Print the full profiles as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ProfilesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config.profiles)?);
        return Ok(());
    }

    for profile in &config.profiles {
        println!(
            "{}  {}",
            style(&profile.id).bold(),
            profile.description
        );
        println!("    marker:   {}", profile.marker);
        for field in &profile.offset_fields {
            println!("    +{:<3}     {} ({:?})", field.offset, field.name, field.kind);
        }
        for field in &profile.keyword_fields {
            println!("    label:    {} <- \"{}\"", field.name, field.label);
        }
    }

    Ok(())
}
