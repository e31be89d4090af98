// Example: Basic usage of the smartnotes-core library
use std::fs;

use smartnotes_core::{Controller, DirectoryEmitter, Intent, Settings, SortMode, SqliteStore};

fn main() -> anyhow::Result<()> {
    let db_path = "basic_usage_smartnotes.db";
    fs::remove_file(db_path).ok(); // Clean up previous run

    println!("--- Basic Usage of smartnotes-core ---");

    let store = SqliteStore::open(db_path)?;
    println!("   ✓ Database created with schema version {}", store.schema_version()?);

    let emitter = DirectoryEmitter::new("basic_usage_exports");
    let mut app = Controller::open(Box::new(store), Box::new(emitter), Settings::default())?;

    // ========== Create Notes ==========
    println!("\n1. Creating notes...");
    for (title, content) in [
        ("Q1 Plan", "project kickoff **meeting**, great start"),
        ("Server", "# Outage\nurgent bug in the login flow"),
        ("Someday", "a concept for a reading app"),
    ] {
        app.handle(Intent::OpenCreate)?;
        app.editor_mut().title = title.to_string();
        app.editor_mut().content = content.to_string();
        if let Some(notice) = app.handle(Intent::Submit)? {
            println!("   ✓ {} ({})", notice, title);
        }
    }

    for note in app.notes() {
        println!(
            "   • {} | tags: {} | mood: {} {} | summary: {}",
            note.title,
            note.tags_joined(),
            note.mood,
            note.mood.emoji(),
            note.summary
        );
    }

    // ========== Pin and Sort ==========
    println!("\n2. Pinning the oldest note...");
    let oldest = app.notes()[0].id;
    app.handle(Intent::TogglePin(oldest))?;
    app.handle(Intent::Sort(SortMode::Newest))?;
    for card in app.view().cards() {
        println!("   {} {}", if card.pinned { "📌" } else { "  " }, card.title);
    }

    // ========== Search ==========
    println!("\n3. Searching for 'bug'...");
    app.handle(Intent::Search("bug".to_string()))?;
    println!("{}", app.view().to_html());
    app.handle(Intent::Search(String::new()))?;

    // ========== Theme ==========
    println!("\n4. Toggling theme...");
    if let Some(notice) = app.handle(Intent::ToggleTheme)? {
        println!("   ✓ {}", notice);
    }

    // ========== Export ==========
    println!("\n5. Exporting...");
    for format in ["txt", "json", "pdf"] {
        if let Some(notice) = app.handle(Intent::Export { format: Some(format.to_string()) })? {
            println!("   • {}: {}", format, notice);
        }
    }

    println!("\n✅ Example completed successfully!");
    println!("\nDatabase file: {}", db_path);
    println!("You can inspect the database with: sqlite3 {}", db_path);

    Ok(())
}
