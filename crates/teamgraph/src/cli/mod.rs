//! CLI argument parsing and command dispatch.
//!
//! # Commands
//!
//! - `init`, `seed`: set up a repository and load demo data
//! - `people`, `show`: browse the directory
//! - `path`, `degrees`, `suggest`: per-person graph queries
//! - `ranking`, `roles`, `isolated`, `stats`, `graph`: whole-graph aggregates
//! - `add`, `link`, `unlink`, `remove`: edit people and relations
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! teamgraph init --demo
//! teamgraph path "Iris Johnson" "Frank Lopez"
//! teamgraph --json suggest 1 --limit 3
//! teamgraph link 6 9
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{
    validate_name, validate_person_ref, AddArgs, InitArgs, PairArgs, PeopleArgs, PersonArgs,
    SeedArgs, SuggestArgs,
};

/// Teamgraph - team relationship analytics
///
/// Keeps a graph of people and who works with whom in
/// `.teamgraph/people.jsonl`, and answers questions over it: shortest paths,
/// degrees of separation, teammate suggestions and connection rankings.
#[derive(Parser, Debug)]
#[command(name = "teamgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a new teamgraph repository
    ///
    /// Creates the `.teamgraph/` directory with configuration and an empty
    /// people file, or the demo team with `--demo`.
    Init(InitArgs),

    /// Load the demo team into the people file
    ///
    /// Does nothing if people already exist, unless `--force` is given.
    Seed(SeedArgs),

    /// List people, optionally filtered by role or name
    People(PeopleArgs),

    /// Show a person and their teammates
    Show(PersonArgs),

    /// Show a shortest chain of teammates between two people
    Path(PairArgs),

    /// Show how many hops separate two people
    ///
    /// Prints -1 in JSON output when they are not connected.
    Degrees(PairArgs),

    /// Suggest people to work with, ranked by mutual teammates
    Suggest(SuggestArgs),

    /// Rank everyone by number of teammates
    Ranking,

    /// Count people per role
    Roles,

    /// List people without teammates
    Isolated,

    /// Show summary statistics
    Stats,

    /// Export all people and relations
    Graph,

    /// Add a person
    Add(AddArgs),

    /// Record that two people work together
    Link(PairArgs),

    /// Remove the relation between two people
    Unlink(PairArgs),

    /// Remove a person and all their relations
    Remove(PersonArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened, a referenced
    /// person does not exist, or reading or writing the people file fails.
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Seed(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_seed(&app, args, output_mode).await
            }
            Some(Commands::People(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_people(&app, args, output_mode).await
            }
            Some(Commands::Show(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_show(&app, args, output_mode).await
            }
            Some(Commands::Path(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_path(&app, args, output_mode).await
            }
            Some(Commands::Degrees(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_degrees(&app, args, output_mode).await
            }
            Some(Commands::Suggest(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_suggest(&app, args, output_mode).await
            }
            Some(Commands::Ranking) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_ranking(&app, output_mode).await
            }
            Some(Commands::Roles) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_roles(&app, output_mode).await
            }
            Some(Commands::Isolated) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_isolated(&app, output_mode).await
            }
            Some(Commands::Stats) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_stats(&app, output_mode).await
            }
            Some(Commands::Graph) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_graph(&app, output_mode).await
            }
            Some(Commands::Add(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_add(&app, args, output_mode).await
            }
            Some(Commands::Link(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_link(&app, args, output_mode).await
            }
            Some(Commands::Unlink(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_unlink(&app, args, output_mode).await
            }
            Some(Commands::Remove(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_remove(&app, args, output_mode).await
            }
            None => {
                println!("Teamgraph team relationship analytics");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
