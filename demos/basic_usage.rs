// Example: Basic usage of the scribble-core library
use std::fs;
use std::path::Path;

use scribble_core::export::export_markdown;
use scribble_core::storage::{Database, SqliteStore};
use scribble_core::{BackendConfig, Session};

fn main() -> anyhow::Result<()> {
    let db_path = "basic_usage_scribble.db";
    fs::remove_file(db_path).ok(); // Clean up previous run

    println!("--- Basic Usage of scribble-core ---");

    let db = Database::new(db_path);
    let conn = db.create()?;
    println!("   ✓ Store created with schema version {}", db.get_schema_version(&conn)?);

    let mut session = Session::open(SqliteStore::from_connection(conn), BackendConfig::default());
    println!("   • Mode: {}", session.mode().label());

    println!("\n1. Creating notes...");
    session.create_note();
    session.update_selected("Project Planning", "## Q4\n- launch the **new** feature");
    let ideas = session.create_note();
    session.update_selected("Ideas", "A note-taking app for the terminal");
    println!("   ✓ Created {} notes", session.notes().len());

    println!("\n2. Searching...");
    session.set_search_query("feature");
    for note in session.visible_notes() {
        println!("   - {}: {}", note.display_title(), note.preview(40));
    }
    session.set_search_query("");

    println!("\n3. Deleting the selected note...");
    session.delete_note(&ideas.id);
    if let Some(note) = session.selected_note() {
        println!("   ✓ Selection moved to '{}'", note.display_title());
    }

    println!("\n4. Toggling theme...");
    println!("   ✓ Theme is now {}", session.toggle_theme().as_str());

    println!("\n5. Exporting markdown...");
    let written = export_markdown(session.notes(), Path::new("basic_usage_export"))?;
    println!("   ✓ Wrote {} file(s)", written.len());

    println!("\n✅ Example completed successfully!");
    Ok(())
}
