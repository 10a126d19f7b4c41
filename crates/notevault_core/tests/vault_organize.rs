use notevault_core::{Classifier, FsNoteStore, RuleHierarchy};
use std::path::Path;

const VAULT_RULES: &str = r#"
fallback: 9_Miscellaneous
categories:
  characters: 1_People
  locations: 2_Locations
  lore: 6_Lore
hierarchy:
  2_Locations:
    - settlements:
        - cities
        - towns
    - ruins
    - nations
  6_Lore:
    - history
    - conflicts
synonyms:
  wars: conflicts
infobox:
  character: characters
"#;

fn note(tags: &[&str], body: &str) -> String {
    let mut content = String::from("---\ntags:\n");
    for tag in tags {
        content.push_str(&format!("  - {tag}\n"));
    }
    content.push_str(&format!("---\n\n{body}\n"));
    content
}

fn write_vault_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("fixture dirs should be created");
    }
    std::fs::write(path, content).expect("fixture file should be written");
}

#[test]
fn organize_moves_retags_and_indexes_a_vault() {
    let vault = tempfile::tempdir().expect("temp vault should be created");
    let root = vault.path();

    write_vault_file(root, "ruins_note.md", &note(&["ruins", "nations"], "# Ruins"));
    write_vault_file(root, "city_note.md", &note(&["Cities"], "# City"));
    write_vault_file(root, "basic_note.md", &note(&["lore"], "# Lore"));
    write_vault_file(root, "wars_note.md", &note(&["wars"], "# War"));
    write_vault_file(root, "Template_character.md", "# Template");
    write_vault_file(root, "old_name.md", "1.  REDIRECT [[New Name]]");
    write_vault_file(
        root,
        "hero.md",
        "---\ninfobox: Character\ntags: []\n---\n\n# Hero\n",
    );
    write_vault_file(root, "_indexes/stale.md", "# Index for `stale`\n");

    let rules = RuleHierarchy::load_from_str(VAULT_RULES)
        .expect("vault rules should parse")
        .compile();
    let organizer = notevault_core::Organizer::new(
        Classifier::new(&rules),
        FsNoteStore::new(root.to_path_buf()),
    );
    let report = organizer.organize().expect("organization should succeed");

    // declaration order: ruins beats nations at equal depth
    assert!(root.join("2_Locations/Ruins/ruins_note.md").exists());
    // depth: cities lands three levels deep
    assert!(root
        .join("2_Locations/Settlements/Cities/city_note.md")
        .exists());
    // root-only label keeps the category folder alone
    assert!(root.join("6_Lore/basic_note.md").exists());
    // synonym feeds the conflicts subcategory
    assert!(root.join("6_Lore/Conflicts/wars_note.md").exists());
    // infobox marker maps to the characters category
    assert!(root.join("1_People/hero.md").exists());

    assert!(!root.join("Template_character.md").exists());
    assert!(!root.join("old_name.md").exists());

    // retagging writes inferred ancestors back into frontmatter
    let city = std::fs::read_to_string(root.join("2_Locations/Settlements/Cities/city_note.md"))
        .expect("moved note should be readable");
    assert!(city.contains("settlements"));
    assert!(city.contains("locations"));
    assert!(city.ends_with("# City\n"));

    // indexes reflect post-move paths and stale ones are removed
    let cities_index = std::fs::read_to_string(root.join("_indexes/cities.md"))
        .expect("cities index should exist");
    assert!(cities_index.contains("[[2_Locations/Settlements/Cities/city_note.md|city_note]]"));
    assert!(!root.join("_indexes/stale.md").exists());

    assert_eq!(report.scanned, 7);
    assert_eq!(report.moved, 5);
    assert_eq!(report.deleted_templates, 1);
    assert_eq!(report.deleted_redirects, 1);
    assert_eq!(report.indexes_removed, 1);
    assert!(report.indexes_written >= 5);
    assert!(report.retagged >= 2);
}

#[test]
fn organize_leaves_placed_notes_alone_and_renames_conflicts() {
    let vault = tempfile::tempdir().expect("temp vault should be created");
    let root = vault.path();

    // already inside a category folder: never re-scanned
    write_vault_file(root, "6_Lore/placed.md", &note(&["ruins"], "# Stays"));
    // two loose notes racing for the same destination file name
    write_vault_file(root, "chronicle.md", &note(&["lore"], "# First"));
    write_vault_file(root, "drafts/chronicle.md", &note(&["lore"], "# Second"));

    let rules = RuleHierarchy::load_from_str(VAULT_RULES)
        .expect("vault rules should parse")
        .compile();
    let organizer = notevault_core::Organizer::new(
        Classifier::new(&rules),
        FsNoteStore::new(root.to_path_buf()),
    );
    let report = organizer.organize().expect("organization should succeed");

    assert!(root.join("6_Lore/placed.md").exists());
    assert!(root.join("6_Lore/chronicle.md").exists());
    assert!(root.join("6_Lore/chronicle_1.md").exists());
    assert_eq!(report.scanned, 2);
    assert_eq!(report.moved, 2);
}

#[test]
fn organize_sends_unmatched_notes_to_fallback() {
    let vault = tempfile::tempdir().expect("temp vault should be created");
    let root = vault.path();

    write_vault_file(root, "mystery.md", &note(&["unknown"], "# Mystery"));
    write_vault_file(root, "untagged.md", "# No frontmatter at all\n");

    let rules = RuleHierarchy::load_from_str(VAULT_RULES)
        .expect("vault rules should parse")
        .compile();
    let organizer = notevault_core::Organizer::new(
        Classifier::new(&rules),
        FsNoteStore::new(root.to_path_buf()),
    );
    organizer.organize().expect("organization should succeed");

    assert!(root.join("9_Miscellaneous/mystery.md").exists());
    assert!(root.join("9_Miscellaneous/untagged.md").exists());

    let mystery = std::fs::read_to_string(root.join("9_Miscellaneous/mystery.md"))
        .expect("fallback note should be readable");
    assert!(mystery.contains("unknown"), "label set must be unchanged");
}
