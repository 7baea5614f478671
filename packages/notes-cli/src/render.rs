//! Terminal rendering of store snapshots

use console::{style, StyledObject};
use notes_store::{ColorCatalog, Note, NotesSnapshot};

const CARD_WIDTH: usize = 44;

pub const NO_NOTES: &str = "No momento não há notas para serem mostradas.";
pub const NO_SEARCH_RESULTS: &str = "Nenhuma nota similar a sua pesquisa foi encontrada.";

/// Render the home view: favorites, then everything else.
pub fn home(snapshot: &NotesSnapshot, catalog: &ColorCatalog) -> String {
    let mut out = String::new();

    if snapshot.is_loading {
        out.push_str(&format!("{}\n", style("Carregando notas...").dim()));
        return out;
    }

    if snapshot.is_search_active {
        out.push_str(&format!(
            "{} {}\n\n",
            style("Pesquisa:").dim(),
            style(&snapshot.query).cyan()
        ));
    }

    let favorites = snapshot.favorites();
    let others = snapshot.others();

    if favorites.is_empty() && others.is_empty() {
        if !snapshot.is_search_active {
            out.push_str(&format!("{}\n", style(NO_NOTES).yellow()));
        }
    } else {
        section(&mut out, "Favoritas", &favorites, catalog);
        section(&mut out, "Outras", &others, catalog);
    }

    if snapshot.no_search_results() {
        out.push_str(&format!("{}\n", style(NO_SEARCH_RESULTS).yellow()));
    }

    out
}

fn section(out: &mut String, heading: &str, notes: &[&Note], catalog: &ColorCatalog) {
    if notes.is_empty() {
        return;
    }
    out.push_str(&format!("{}\n", style(heading).bold()));
    for note in notes {
        out.push_str(&card(note, catalog));
    }
    out.push('\n');
}

/// A single note as a bordered card.
pub fn card(note: &Note, catalog: &ColorCatalog) -> String {
    let light = catalog.is_light(&note.color);
    let border = |s: String| -> StyledObject<String> {
        if light {
            style(s).white()
        } else {
            style(s).dim()
        }
    };

    let star = if note.is_favorite { "★" } else { "☆" };
    let color_name = catalog
        .by_hex(&note.color)
        .map(|entry| entry.localized_name)
        .unwrap_or(note.color.as_str());

    let mut out = String::new();
    out.push_str(&format!("{}\n", border(format!("┌{}┐", "─".repeat(CARD_WIDTH)))));
    out.push_str(&format!(
        "{} {} {}  {}\n",
        border("│".to_string()),
        style(star).yellow(),
        style(&note.title).bold(),
        style(format!("#{}", note.id)).dim()
    ));
    out.push_str(&format!("{}\n", border(format!("├{}┤", "─".repeat(CARD_WIDTH)))));
    for line in note.description.lines() {
        out.push_str(&format!("{} {}\n", border("│".to_string()), line));
    }
    out.push_str(&format!(
        "{} {}\n",
        border("│".to_string()),
        style(format!(
            "{} · {}",
            color_name,
            note.updated_at.format("%d/%m/%Y %H:%M")
        ))
        .dim()
    ));
    out.push_str(&format!("{}\n", border(format!("└{}┘", "─".repeat(CARD_WIDTH)))));
    out
}

/// One line per catalog entry.
pub fn palette(catalog: &ColorCatalog) -> String {
    catalog
        .entries()
        .iter()
        .map(|entry| {
            format!(
                "{:<8} {:<14} {}{}\n",
                entry.hex_code,
                entry.name,
                entry.localized_name,
                if entry.is_light { " (light)" } else { "" }
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notes_store::{LoadStatus, NoteId};

    fn note(id: &str, title: &str, favorite: bool) -> Note {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Note {
            id: NoteId::from(id),
            title: title.to_string(),
            description: "Descrição".to_string(),
            color: "#BAE2FF".to_string(),
            is_favorite: favorite,
            created_at: at,
            updated_at: at,
        }
    }

    fn snapshot(canonical: Vec<Note>, filtered: Vec<Note>, query: &str) -> NotesSnapshot {
        NotesSnapshot {
            canonical,
            filtered,
            is_loading: false,
            is_search_active: query.chars().count() >= 2,
            query: query.to_string(),
            status: LoadStatus::Ready,
        }
    }

    #[test]
    fn empty_store_shows_no_notes_message() {
        let out = home(&snapshot(vec![], vec![], ""), &ColorCatalog::builtin());
        assert!(out.contains(NO_NOTES));
        assert!(!out.contains(NO_SEARCH_RESULTS));
    }

    #[test]
    fn favorites_come_first() {
        let notes = vec![note("1", "Plain", false), note("2", "Starred", true)];
        let out = home(&snapshot(notes, vec![], ""), &ColorCatalog::builtin());

        let favorites = out.find("Favoritas").unwrap();
        let others = out.find("Outras").unwrap();
        assert!(favorites < others);
        assert!(out.find("Starred").unwrap() < others);
        assert!(out.find("Plain").unwrap() > others);
    }

    #[test]
    fn empty_search_shows_no_results_message() {
        let notes = vec![note("1", "Milk", false)];
        let out = home(&snapshot(notes, vec![], "zz"), &ColorCatalog::builtin());

        assert!(out.contains(NO_SEARCH_RESULTS));
        assert!(!out.contains("Milk"));
    }

    #[test]
    fn card_uses_localized_color_name() {
        let out = card(&note("1", "Milk", false), &ColorCatalog::builtin());
        assert!(out.contains("Milk"));
        assert!(out.contains("#1"));
        assert!(out.contains("Azul Claro"));
    }
}
