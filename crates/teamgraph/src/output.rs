//! Output formatting for CLI commands.
//!
//! Every printer takes an [`OutputMode`]: colored, human-readable text for a
//! terminal, or pretty-printed JSON for scripts. Text rendering writes to any
//! `Write` so it can be checked in tests.

use crate::domain::{ConnectionCount, GraphStats, GraphView, Person, RoleCount, Suggestion};
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Print `value` as JSON, or run `text` against stdout.
fn emit<T, F>(value: &T, mode: OutputMode, text: F) -> io::Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&mut io::StdoutLock<'static>) -> io::Result<()>,
{
    match mode {
        OutputMode::Json => print_json(value),
        OutputMode::Text => text(&mut io::stdout().lock()),
    }
}

/// Print a list of people
pub fn print_people(people: &[&Person], mode: OutputMode) -> io::Result<()> {
    emit(people, mode, |w| write_people(w, people))
}

/// Print one person with their teammates
pub fn print_person_details(person: &Person, teammates: &[&Person], mode: OutputMode) -> io::Result<()> {
    let value = serde_json::json!({
        "person": person,
        "teammates": teammates,
    });
    emit(&value, mode, |w| write_person_details(w, person, teammates))
}

/// Print a shortest path
pub fn print_path(from: &str, to: &str, path: &[&Person], mode: OutputMode) -> io::Result<()> {
    let value = serde_json::json!({
        "path": path,
        "degrees": degrees_json(path.len().checked_sub(1)),
    });
    emit(&value, mode, |w| write_path(w, from, to, path))
}

/// Print degrees of separation; `None` means no path
pub fn print_degrees(from: &str, to: &str, degrees: Option<usize>, mode: OutputMode) -> io::Result<()> {
    let value = serde_json::json!({
        "from": from,
        "to": to,
        "degrees": degrees_json(degrees),
    });
    emit(&value, mode, |w| match degrees {
        Some(hops) => writeln!(w, "{} and {} are {} apart", from.bold(), to.bold(), hops_label(hops).cyan()),
        None => writeln!(w, "{} and {} are not connected", from.bold(), to.bold()),
    })
}

/// Print suggestions for a person
pub fn print_suggestions(person: &Person, suggestions: &[Suggestion], mode: OutputMode) -> io::Result<()> {
    emit(suggestions, mode, |w| write_suggestions(w, person, suggestions))
}

/// Print the connection ranking
pub fn print_ranking(ranking: &[ConnectionCount], mode: OutputMode) -> io::Result<()> {
    emit(ranking, mode, |w| write_ranking(w, ranking))
}

/// Print the role distribution
pub fn print_roles(roles: &[RoleCount], mode: OutputMode) -> io::Result<()> {
    emit(roles, mode, |w| write_roles(w, roles))
}

/// Print dashboard statistics
pub fn print_stats(stats: &GraphStats, mode: OutputMode) -> io::Result<()> {
    emit(stats, mode, |w| write_stats(w, stats))
}

/// Print the node/edge export
pub fn print_graph(view: &GraphView, mode: OutputMode) -> io::Result<()> {
    emit(view, mode, |w| write_graph(w, view))
}

/// Degrees as a JSON number, -1 when there is no path.
fn degrees_json(degrees: Option<usize>) -> serde_json::Value {
    degrees.map_or_else(|| serde_json::Value::from(-1), serde_json::Value::from)
}

fn hops_label(hops: usize) -> String {
    if hops == 1 {
        "1 hop".to_string()
    } else {
        format!("{hops} hops")
    }
}

// ============================================================================
// Text Formatting
// ============================================================================

fn person_line(person: &Person) -> String {
    let id = format!("#{}", person.id).cyan();
    match person.role_label() {
        Some(role) => format!("{id} {} {}", person.name, format!("[{role}]").magenta()),
        None => format!("{id} {}", person.name),
    }
}

fn write_people<W: Write>(w: &mut W, people: &[&Person]) -> io::Result<()> {
    if people.is_empty() {
        return writeln!(w, "No people found.");
    }

    writeln!(w, "Found {} person(s):", people.len())?;
    writeln!(w)?;
    for person in people {
        writeln!(w, "  {}", person_line(person))?;
    }
    Ok(())
}

fn write_person_details<W: Write>(w: &mut W, person: &Person, teammates: &[&Person]) -> io::Result<()> {
    writeln!(w, "{}", person_line(person))?;
    if let Some(email) = &person.email {
        writeln!(w, "  {} {}", "Email:".dimmed(), email)?;
    }
    if teammates.is_empty() {
        writeln!(w, "  {} none", "Teammates:".dimmed())?;
    } else {
        writeln!(w, "  {} {}", "Teammates:".dimmed(), teammates.len())?;
        for teammate in teammates {
            writeln!(w, "    {}", person_line(teammate))?;
        }
    }
    Ok(())
}

fn write_path<W: Write>(w: &mut W, from: &str, to: &str, path: &[&Person]) -> io::Result<()> {
    if path.is_empty() {
        return writeln!(w, "No path between {} and {}.", from.bold(), to.bold());
    }

    let arrow = format!(" {} ", "->".dimmed());
    let names: Vec<String> = path.iter().map(|person| person.name.bold().to_string()).collect();
    writeln!(w, "{}", names.join(arrow.as_str()))?;
    writeln!(w, "{}", hops_label(path.len() - 1).cyan())
}

fn write_suggestions<W: Write>(w: &mut W, person: &Person, suggestions: &[Suggestion]) -> io::Result<()> {
    if suggestions.is_empty() {
        return writeln!(w, "No suggestions for {}.", person.name.bold());
    }

    writeln!(w, "People {} may want to work with:", person.name.bold())?;
    writeln!(w)?;
    for suggestion in suggestions {
        writeln!(
            w,
            "  {} {} ({} mutual)",
            format!("#{}", suggestion.id).cyan(),
            suggestion.name,
            suggestion.mutual_connections.to_string().green()
        )?;
    }
    Ok(())
}

fn write_ranking<W: Write>(w: &mut W, ranking: &[ConnectionCount]) -> io::Result<()> {
    if ranking.is_empty() {
        return writeln!(w, "No people found.");
    }

    for (rank, entry) in ranking.iter().enumerate() {
        let count = entry.connections.to_string();
        let count = if entry.connections == 0 {
            count.dimmed()
        } else {
            count.green()
        };
        writeln!(w, "{:>3}. {:<24} {}", rank + 1, entry.name, count)?;
    }
    Ok(())
}

fn write_roles<W: Write>(w: &mut W, roles: &[RoleCount]) -> io::Result<()> {
    if roles.is_empty() {
        return writeln!(w, "No roles assigned.");
    }

    for entry in roles {
        writeln!(w, "  {:<16} {}", entry.role.magenta(), entry.count)?;
    }
    Ok(())
}

fn write_stats<W: Write>(w: &mut W, stats: &GraphStats) -> io::Result<()> {
    writeln!(w, "Team Graph Statistics")?;
    writeln!(w, "=====================")?;
    writeln!(w)?;
    writeln!(w, "People:        {}", stats.people)?;
    writeln!(w, "Relationships: {}", stats.relationships)?;
    writeln!(w, "Isolated:      {}", stats.isolated)?;
    writeln!(w, "Components:    {}", stats.components)?;

    if !stats.top_connections.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", "Most connected:".bold())?;
        write_ranking(w, &stats.top_connections)?;
    }
    if !stats.roles.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", "Roles:".bold())?;
        write_roles(w, &stats.roles)?;
    }
    Ok(())
}

fn write_graph<W: Write>(w: &mut W, view: &GraphView) -> io::Result<()> {
    writeln!(w, "{} people, {} relationships", view.nodes.len(), view.edges.len())?;
    for edge in &view.edges {
        writeln!(w, "  {} -- {}", edge.from.to_string().cyan(), edge.to.to_string().cyan())?;
    }
    Ok(())
}
