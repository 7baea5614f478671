//! One-shot subcommands

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use notes_store::{ColorCatalog, NoteDraft, NoteId, NoteStore};

use crate::render;

/// Resolve a color given by hex code, name or localized name.
pub fn resolve_color(catalog: &ColorCatalog, input: &str) -> Result<&'static str> {
    catalog
        .resolve(input)
        .map(|entry| entry.hex_code)
        .ok_or_else(|| anyhow!("Unknown color '{}'. Run `notes colors` for the list.", input))
}

pub fn list(store: &NoteStore) {
    print!("{}", render::home(&store.snapshot(), store.catalog()));
}

pub fn search(store: &NoteStore, query: &str) {
    store.set_search_query(query);
    print!("{}", render::home(&store.snapshot(), store.catalog()));
}

pub async fn add(
    store: &NoteStore,
    title: String,
    description: String,
    color: Option<String>,
    favorite: bool,
) -> Result<()> {
    let mut draft = NoteDraft::new(title, description).favorite(favorite);
    if let Some(color) = color {
        draft = draft.with_color(resolve_color(store.catalog(), &color)?);
    }

    let note = store
        .add_note(draft)
        .await
        .context("Não foi possível criar a nota")?;

    println!("{} {}", "✓ Nota criada:".green(), note.title.bold());
    print!("{}", render::card(&note, store.catalog()));
    Ok(())
}

pub async fn edit(
    store: &NoteStore,
    id: &NoteId,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    if title.is_none() && description.is_none() {
        bail!("Nothing to update: pass --title and/or --description");
    }

    let current = store
        .note(id)
        .ok_or_else(|| anyhow!("Note {} not found", id))?;

    let title = title.unwrap_or_else(|| current.title.clone());
    let description = description.unwrap_or_else(|| current.description.clone());
    if title == current.title && description == current.description {
        println!("{}", "Nenhuma alteração.".dimmed());
        return Ok(());
    }

    let note = store
        .edit_note(id, title, description)
        .await
        .with_context(|| {
            format!(
                "Não foi possível atualizar a nota {}",
                current.title.to_uppercase()
            )
        })?;

    println!("{} {}", "✓ Nota atualizada:".green(), note.title.bold());
    Ok(())
}

pub async fn favorite(store: &NoteStore, id: &NoteId) -> Result<()> {
    let title = title_of(store, id);
    let note = store
        .toggle_favorite(id)
        .await
        .with_context(|| format!("Não foi possível favoritar a nota {}", title.to_uppercase()))?;

    let label = if note.is_favorite {
        "★ Favoritada:"
    } else {
        "☆ Removida das favoritas:"
    };
    println!("{} {}", label.yellow(), note.title.bold());
    Ok(())
}

pub async fn color(store: &NoteStore, id: &NoteId, color: &str) -> Result<()> {
    let hex_code = resolve_color(store.catalog(), color)?;
    let title = title_of(store, id);
    let note = store
        .recolor(id, hex_code)
        .await
        .with_context(|| format!("Não foi possível atualizar a nota {}", title.to_uppercase()))?;

    print!("{}", render::card(&note, store.catalog()));
    Ok(())
}

pub async fn delete(store: &NoteStore, id: &NoteId, yes: bool) -> Result<()> {
    let title = title_of(store, id);

    if !yes && !confirm_delete(&title)? {
        println!("{}", "Cancelado.".dimmed());
        return Ok(());
    }

    store
        .delete_note(id)
        .await
        .with_context(|| format!("Não foi possível deletar a nota {}", title.to_uppercase()))?;

    println!(
        "{}",
        format!("A nota {} foi deletada com sucesso.", title).green()
    );
    Ok(())
}

pub fn colors(catalog: &ColorCatalog) {
    print!("{}", render::palette(catalog));
}

pub fn confirm_delete(title: &str) -> Result<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!(
            "Tem certeza que deseja deletar a nota {}?",
            title.to_uppercase()
        ))
        .default(false)
        .interact()
        .context("Failed to read confirmation")
}

fn title_of(store: &NoteStore, id: &NoteId) -> String {
    store
        .note(id)
        .map(|note| note.title)
        .unwrap_or_else(|| id.to_string())
}
