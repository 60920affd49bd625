//! Command execution logic.
//!
//! Query commands take one fresh snapshot, build a [`TeamGraph`] over it and
//! print the answer. Mutating commands stage changes in a
//! [`SnapshotBuilder`] and save the result atomically.

use anyhow::{Context, Result};

use super::args::{AddArgs, InitArgs, PairArgs, PeopleArgs, PersonArgs, SeedArgs, SuggestArgs};
use crate::app::App;
use crate::domain::{NewPerson, Person, PersonId};
use crate::graph::TeamGraph;
use crate::output::{self, OutputMode};
use crate::snapshot::{Snapshot, SnapshotBuilder};

/// Resolve a command-line person reference.
///
/// Numbers are taken as ids without checking them, so unknown ids reach the
/// graph queries and come back as empty results. Anything else must match a
/// display name exactly.
pub(crate) fn resolve_person(snapshot: &Snapshot, reference: &str) -> Result<PersonId> {
    if let Ok(raw) = reference.parse::<u64>() {
        return Ok(PersonId(raw));
    }
    snapshot
        .find_by_name(reference)
        .map(|person| person.id)
        .with_context(|| format!("No person named '{reference}'"))
}

/// Resolve a reference that must name an existing person.
fn existing_person<'a>(snapshot: &'a Snapshot, reference: &str) -> Result<&'a Person> {
    let id = resolve_person(snapshot, reference)?;
    snapshot
        .person(id)
        .with_context(|| format!("Person not found: {id}"))
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!(
            "Initializing teamgraph repository{}...",
            if args.demo { " with demo data" } else { "" }
        );
    }

    let result = init::init(&current_dir, args.demo).await?;

    if !args.quiet {
        println!("Initialized teamgraph in {}", result.teamgraph_dir.display());
        println!("  Config: {}", result.config_file.display());
        println!("  People: {} ({} people)", result.people_file.display(), result.people);
    }

    Ok(())
}

/// Execute the seed command
pub async fn execute_seed(app: &App, args: &SeedArgs, output_mode: OutputMode) -> Result<()> {
    use crate::commands::seed::{seed, SeedOutcome};

    let outcome = seed(app.provider(), args.force).await?;

    match output_mode {
        OutputMode::Json => {
            let value = match outcome {
                SeedOutcome::Seeded(people) => serde_json::json!({ "seeded": true, "people": people }),
                SeedOutcome::Skipped { existing } => {
                    serde_json::json!({ "seeded": false, "people": existing })
                }
            };
            output::print_json(&value)?;
        }
        OutputMode::Text => match outcome {
            SeedOutcome::Seeded(people) => println!("Seeded {people} demo people"),
            SeedOutcome::Skipped { existing } => println!(
                "People file already holds {existing} people; use --force to replace them"
            ),
        },
    }

    Ok(())
}

/// Execute the people command
pub async fn execute_people(app: &App, args: &PeopleArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;

    let mut people: Vec<&Person> = match &args.search {
        Some(term) => snapshot.search(term),
        None => snapshot.people().iter().collect(),
    };
    if let Some(role) = &args.role {
        people.retain(|person| person.role.as_deref() == Some(role.as_str()));
    }

    output::print_people(&people, output_mode)?;
    Ok(())
}

/// Execute the show command
pub async fn execute_show(app: &App, args: &PersonArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let person = existing_person(&snapshot, &args.person)?;

    output::print_person_details(person, &snapshot.teammates(person.id), output_mode)?;
    Ok(())
}

/// Execute the path command
pub async fn execute_path(app: &App, args: &PairArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let from = resolve_person(&snapshot, &args.from)?;
    let to = resolve_person(&snapshot, &args.to)?;

    let path = TeamGraph::new(&snapshot).shortest_path(from, to);

    output::print_path(&args.from, &args.to, &path, output_mode)?;
    Ok(())
}

/// Execute the degrees command
pub async fn execute_degrees(app: &App, args: &PairArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let from = resolve_person(&snapshot, &args.from)?;
    let to = resolve_person(&snapshot, &args.to)?;

    let degrees = TeamGraph::new(&snapshot).degrees_of_separation(from, to);

    output::print_degrees(&args.from, &args.to, degrees, output_mode)?;
    Ok(())
}

/// Execute the suggest command
pub async fn execute_suggest(app: &App, args: &SuggestArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let person = existing_person(&snapshot, &args.person)?;
    let limit = args
        .limit
        .and_then(|limit| usize::try_from(limit).ok())
        .unwrap_or_else(|| app.suggestion_limit());

    let suggestions = TeamGraph::new(&snapshot).suggest(person.id, limit);

    output::print_suggestions(person, &suggestions, output_mode)?;
    Ok(())
}

/// Execute the ranking command
pub async fn execute_ranking(app: &App, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    output::print_ranking(&TeamGraph::new(&snapshot).connection_ranking(), output_mode)?;
    Ok(())
}

/// Execute the roles command
pub async fn execute_roles(app: &App, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    output::print_roles(&TeamGraph::new(&snapshot).role_distribution(), output_mode)?;
    Ok(())
}

/// Execute the isolated command
pub async fn execute_isolated(app: &App, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    output::print_people(&TeamGraph::new(&snapshot).isolated_people(), output_mode)?;
    Ok(())
}

/// Execute the stats command
pub async fn execute_stats(app: &App, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    output::print_stats(&TeamGraph::new(&snapshot).stats(), output_mode)?;
    Ok(())
}

/// Execute the graph command
pub async fn execute_graph(app: &App, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    output::print_graph(&TeamGraph::new(&snapshot).graph_view(), output_mode)?;
    Ok(())
}

/// Execute the add command
pub async fn execute_add(app: &App, args: &AddArgs, output_mode: OutputMode) -> Result<()> {
    let mut builder = SnapshotBuilder::from_snapshot(&app.snapshot().await?);
    let id = builder.add_person(NewPerson {
        name: args.name.clone(),
        email: args.email.clone(),
        role: args.role.clone(),
    });
    let snapshot = builder.build();
    app.save(&snapshot).await?;

    let person = snapshot
        .person(id)
        .with_context(|| format!("Person not found: {id}"))?;
    match output_mode {
        OutputMode::Json => output::print_json(person)?,
        OutputMode::Text => println!("Added {} as #{}", person.name, id),
    }
    Ok(())
}

/// Execute the link command
pub async fn execute_link(app: &App, args: &PairArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let a = resolve_person(&snapshot, &args.from)?;
    let b = resolve_person(&snapshot, &args.to)?;

    let mut builder = SnapshotBuilder::from_snapshot(&snapshot);
    builder.add_teammate(a, b)?;
    app.save(&builder.build()).await?;

    print_pair_change("linked", a, b, output_mode)
}

/// Execute the unlink command
pub async fn execute_unlink(app: &App, args: &PairArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let a = resolve_person(&snapshot, &args.from)?;
    let b = resolve_person(&snapshot, &args.to)?;

    let mut builder = SnapshotBuilder::from_snapshot(&snapshot);
    builder.remove_teammate(a, b)?;
    app.save(&builder.build()).await?;

    print_pair_change("unlinked", a, b, output_mode)
}

/// Execute the remove command
pub async fn execute_remove(app: &App, args: &PersonArgs, output_mode: OutputMode) -> Result<()> {
    let snapshot = app.snapshot().await?;
    let id = resolve_person(&snapshot, &args.person)?;

    let mut builder = SnapshotBuilder::from_snapshot(&snapshot);
    let removed = builder.remove_person(id)?;
    app.save(&builder.build()).await?;

    match output_mode {
        OutputMode::Json => output::print_json(&removed)?,
        OutputMode::Text => println!("Removed {} (#{})", removed.name, removed.id),
    }
    Ok(())
}

fn print_pair_change(action: &str, a: PersonId, b: PersonId, output_mode: OutputMode) -> Result<()> {
    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({ action: [a, b] }))?,
        OutputMode::Text => output::print_message(&format!("{} #{a} and #{b}", capitalize(action)))?,
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}
