//! Interactive notes menu

use anyhow::{Context, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use notes_store::{LoadStatus, Note, NoteDraft, NoteStore, NotesSnapshot, Subscription};

use crate::commands;
use crate::render;

enum MenuAction {
    Refresh,
    Search,
    ClearSearch,
    New,
    Edit,
    Favorite,
    Recolor,
    Delete,
    Quit,
}

impl MenuAction {
    fn all(searching: bool) -> Vec<Self> {
        let mut actions = vec![Self::Refresh, Self::Search];
        if searching {
            actions.push(Self::ClearSearch);
        }
        actions.extend([
            Self::New,
            Self::Edit,
            Self::Favorite,
            Self::Recolor,
            Self::Delete,
            Self::Quit,
        ]);
        actions
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Refresh => "📋 Ver notas",
            Self::Search => "🔍 Pesquisar notas",
            Self::ClearSearch => "✖  Limpar pesquisa",
            Self::New => "📝 Criar nota",
            Self::Edit => "✏️  Editar nota",
            Self::Favorite => "⭐ Favoritar / desfavoritar",
            Self::Recolor => "🎨 Mudar cor",
            Self::Delete => "🗑  Deletar nota",
            Self::Quit => "🚪 Sair",
        }
    }
}

/// Run the menu loop until the user quits.
pub async fn run(store: &NoteStore, mut subscription: Subscription) -> Result<()> {
    let term = Term::stdout();
    let theme = ColorfulTheme::default();

    print_banner(&term)?;

    if !wait_until_ready(store, &mut subscription, &theme).await? {
        return Ok(());
    }

    loop {
        let snapshot = subscription.current();
        println!();
        print!("{}", render::home(&snapshot, store.catalog()));

        let actions = MenuAction::all(snapshot.is_search_active);
        let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();
        let selection = Select::with_theme(&theme)
            .with_prompt("O que você gostaria de fazer?")
            .items(&labels)
            .default(0)
            .interact_on(&term)?;

        let result = match actions[selection] {
            MenuAction::Refresh => Ok(()),
            MenuAction::Search => search(store, &theme),
            MenuAction::ClearSearch => {
                store.set_search_query("");
                Ok(())
            }
            MenuAction::New => create(store, &theme).await,
            MenuAction::Edit => edit(store, &snapshot, &theme).await,
            MenuAction::Favorite => favorite(store, &snapshot, &theme).await,
            MenuAction::Recolor => recolor(store, &snapshot, &theme).await,
            MenuAction::Delete => delete(store, &snapshot, &theme).await,
            MenuAction::Quit => {
                println!("{}", "👋 Até logo!".bright_blue());
                break;
            }
        };

        // Failed operations leave the store untouched; report and keep going.
        if let Err(e) = result {
            eprintln!("{} {:#}", "✗".red(), e);
        }
    }

    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!("{}", "╔════════════════════════════════════╗".bright_cyan());
    println!("{}", "║              Notes                 ║".bright_cyan());
    println!("{}", "╚════════════════════════════════════╝".bright_cyan());
    Ok(())
}

/// Block until the initial load completes. Returns `false` if the user gives up.
async fn wait_until_ready(
    store: &NoteStore,
    subscription: &mut Subscription,
    theme: &ColorfulTheme,
) -> Result<bool> {
    let mut snapshot = subscription.current();
    loop {
        match &snapshot.status {
            LoadStatus::Ready => return Ok(true),
            LoadStatus::Initializing => {
                println!("{}", "Carregando notas...".dimmed());
            }
            LoadStatus::LoadFailed { error } => {
                eprintln!("{} {}", "✗ Erro ao buscar notas:".red(), error);
                let retry = Confirm::with_theme(theme)
                    .with_prompt("Tentar novamente?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Ok(false);
                }
                // The outcome is published; the subscription below picks it up.
                let _ = store.load().await;
                snapshot = subscription.current();
                continue;
            }
        }

        snapshot = match subscription.changed().await {
            Some(next) => next,
            None => return Ok(false),
        };
    }
}

fn search(store: &NoteStore, theme: &ColorfulTheme) -> Result<()> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Pesquisar notas")
        .allow_empty(true)
        .interact_text()?;
    store.set_search_query(query);
    Ok(())
}

async fn create(store: &NoteStore, theme: &ColorfulTheme) -> Result<()> {
    let title: String = Input::with_theme(theme)
        .with_prompt("Título")
        .interact_text()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Criar nota...")
        .allow_empty(true)
        .interact_text()?;
    let color = pick_color(store, theme, None)?;
    let favorite = Confirm::with_theme(theme)
        .with_prompt("Favoritar?")
        .default(false)
        .interact()?;

    let draft = NoteDraft::new(title, description)
        .with_color(color)
        .favorite(favorite);
    store
        .add_note(draft)
        .await
        .context("Não foi possível criar a nota")?;
    Ok(())
}

async fn edit(store: &NoteStore, snapshot: &NotesSnapshot, theme: &ColorfulTheme) -> Result<()> {
    let Some(note) = pick_note(snapshot, theme)? else {
        return Ok(());
    };

    let title: String = Input::with_theme(theme)
        .with_prompt("Título")
        .with_initial_text(note.title.clone())
        .interact_text()?;
    let description: String = Input::with_theme(theme)
        .with_prompt("Descrição")
        .with_initial_text(note.description.clone())
        .allow_empty(true)
        .interact_text()?;

    store
        .edit_note(&note.id, title, description)
        .await
        .with_context(|| {
            format!(
                "Não foi possível atualizar a nota {}",
                note.title.to_uppercase()
            )
        })?;
    Ok(())
}

async fn favorite(
    store: &NoteStore,
    snapshot: &NotesSnapshot,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(note) = pick_note(snapshot, theme)? else {
        return Ok(());
    };
    commands::favorite(store, &note.id).await
}

async fn recolor(
    store: &NoteStore,
    snapshot: &NotesSnapshot,
    theme: &ColorfulTheme,
) -> Result<()> {
    let Some(note) = pick_note(snapshot, theme)? else {
        return Ok(());
    };
    let color = pick_color(store, theme, Some(&note.color))?;
    commands::color(store, &note.id, color).await
}

async fn delete(store: &NoteStore, snapshot: &NotesSnapshot, theme: &ColorfulTheme) -> Result<()> {
    let Some(note) = pick_note(snapshot, theme)? else {
        return Ok(());
    };
    commands::delete(store, &note.id, false).await
}

/// Choose one of the visible notes. `None` when there is nothing to pick or the user backs out.
fn pick_note(snapshot: &NotesSnapshot, theme: &ColorfulTheme) -> Result<Option<Note>> {
    let notes = snapshot.visible();
    if notes.is_empty() {
        println!("{}", render::NO_NOTES.yellow());
        return Ok(None);
    }

    let labels: Vec<String> = notes
        .iter()
        .map(|n| {
            let star = if n.is_favorite { "★" } else { " " };
            format!("{} {} ({})", star, n.title, n.id)
        })
        .collect();

    let selection = Select::with_theme(theme)
        .with_prompt("Nota")
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(selection.map(|i| notes[i].clone()))
}

/// Choose a palette color, leaving out the note's current one.
fn pick_color(
    store: &NoteStore,
    theme: &ColorfulTheme,
    current: Option<&str>,
) -> Result<&'static str> {
    let entries: Vec<_> = store
        .catalog()
        .entries()
        .iter()
        .filter(|e| current.map_or(true, |c| !e.hex_code.eq_ignore_ascii_case(c)))
        .collect();
    let labels: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({})", e.localized_name, e.hex_code))
        .collect();

    let selection = Select::with_theme(theme)
        .with_prompt("Cor")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(entries[selection].hex_code)
}
