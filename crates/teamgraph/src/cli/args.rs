//! CLI argument structs for all commands.

use clap::Parser;

use crate::config::MAX_SUGGESTION_LIMIT;

/// Arguments for the `init` command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Fill the new people file with the built-in demo team
    #[arg(long)]
    pub demo: bool,

    /// Suppress output messages
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the `seed` command
#[derive(Parser, Debug, Clone)]
pub struct SeedArgs {
    /// Replace people that are already in the file
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `people` command
#[derive(Parser, Debug, Clone)]
pub struct PeopleArgs {
    /// Only people holding exactly this role
    #[arg(short, long)]
    pub role: Option<String>,

    /// Only people whose name contains this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for commands that take a single person
#[derive(Parser, Debug, Clone)]
pub struct PersonArgs {
    /// Person id, or exact display name
    #[arg(value_parser = validate_person_ref)]
    pub person: String,
}

/// Arguments for commands that take two people
#[derive(Parser, Debug, Clone)]
pub struct PairArgs {
    /// First person (id or exact name)
    #[arg(value_parser = validate_person_ref)]
    pub from: String,

    /// Second person (id or exact name)
    #[arg(value_parser = validate_person_ref)]
    pub to: String,
}

/// Arguments for the `suggest` command
#[derive(Parser, Debug, Clone)]
pub struct SuggestArgs {
    /// Person id, or exact display name
    #[arg(value_parser = validate_person_ref)]
    pub person: String,

    /// Maximum number of suggestions (defaults to the configured limit)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..=MAX_SUGGESTION_LIMIT as u64))]
    pub limit: Option<u64>,
}

/// Arguments for the `add` command
#[derive(Parser, Debug, Clone)]
pub struct AddArgs {
    /// Display name
    #[arg(value_parser = validate_name)]
    pub name: String,

    /// Contact address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Role label
    #[arg(short, long)]
    pub role: Option<String>,
}

/// Reject blank person references.
pub fn validate_person_ref(s: &str) -> Result<String, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err("Person cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Reject blank names. Purely numeric names are refused because they could
/// not be told apart from ids on the command line.
pub fn validate_name(s: &str) -> Result<String, String> {
    let trimmed = validate_person_ref(s)?;
    if trimmed.parse::<u64>().is_ok() {
        return Err("Name cannot be a number".to_string());
    }
    Ok(trimmed)
}
