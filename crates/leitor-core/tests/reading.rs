use std::fs;

use leitor_core::{
    dictionary::{Definition, DictionaryEntry},
    popup::{LookupReply, LookupState, Popup, PopupGeometry, Viewport},
    prefs::{FileStore, Settings, Theme},
    source::{DirSource, ResourceSource},
    viewer::Viewer,
};

fn library() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/1.txt"), "I run. You walk.").unwrap();
    fs::write(dir.path().join("data/2.txt"), "The cat and the dog.").unwrap();
    fs::write(
        dir.path().join("dictionary.json"),
        r#"{
            "run": {"translation": "correr", "meaning": "to move fast", "usage": "I run every day."},
            "cat": "gato",
            "dog": "cachorro"
        }"#,
    )
    .unwrap();
    dir
}

fn resolve(popup: &mut Popup, source: &dyn ResourceSource, token_word: &str) {
    let viewport = Viewport {
        width: 1024,
        height: 768,
    };
    let request = popup.open(token_word, 40, 40, viewport);
    let outcome = leitor_core::lookup(source, &request.word);
    popup.complete(LookupReply {
        token: request.token,
        outcome,
    });
}

#[test]
fn clicking_punctuated_word_finds_structured_entry() {
    let dir = library();
    let source = DirSource::new(dir.path());
    let mut viewer = Viewer::new();
    let request = viewer.go_to(1).unwrap();
    viewer.complete(request.fetch(&source));

    let tokens = viewer.tokens();
    let run = tokens.iter().find(|t| t.text == "run.").unwrap();
    let mut popup = Popup::new(PopupGeometry::DEFAULT);
    resolve(&mut popup, &source, &run.text);

    assert_eq!(
        popup.lookup_state(),
        &LookupState::Found(DictionaryEntry::Detailed(Definition {
            translation: "correr".into(),
            meaning: "to move fast".into(),
            usage: "I run every day.".into(),
        }))
    );
    assert_eq!(popup.word(), Some("run."));
}

#[test]
fn unknown_word_is_not_found_and_missing_dictionary_fails() {
    let dir = library();
    let source = DirSource::new(dir.path());
    let mut popup = Popup::default();
    resolve(&mut popup, &source, "walk.");
    assert_eq!(popup.lookup_state(), &LookupState::NotFound);

    fs::remove_file(dir.path().join("dictionary.json")).unwrap();
    resolve(&mut popup, &source, "cat");
    assert!(matches!(popup.lookup_state(), LookupState::Failed(_)));
}

#[test]
fn reopening_before_lookup_lands_shows_newest_word() {
    let dir = library();
    let source = DirSource::new(dir.path());
    let viewport = Viewport {
        width: 1024,
        height: 768,
    };
    let mut popup = Popup::default();
    let cat = popup.open("cat", 10, 10, viewport);
    let dog = popup.open("dog", 30, 10, viewport);

    let dog_outcome = leitor_core::lookup(&source, &dog.word);
    let cat_outcome = leitor_core::lookup(&source, &cat.word);
    popup.complete(LookupReply {
        token: dog.token,
        outcome: dog_outcome,
    });
    popup.complete(LookupReply {
        token: cat.token,
        outcome: cat_outcome,
    });
    assert_eq!(
        popup.lookup_state(),
        &LookupState::Found(DictionaryEntry::Gloss("cachorro".into()))
    );
}

#[test]
fn paging_through_the_library() {
    let dir = library();
    let source = DirSource::new(dir.path());
    let mut viewer = Viewer::new();
    let request = viewer.go_to(1).unwrap();
    viewer.complete(request.fetch(&source));
    let request = viewer.next().unwrap();
    viewer.complete(request.fetch(&source));
    assert_eq!(viewer.current_text(), "The cat and the dog.");
    let request = viewer.next().unwrap();
    viewer.complete(request.fetch(&source));
    assert_eq!(viewer.current_text(), "");
    assert_eq!(viewer.current_page_number(), 3);
}

#[test]
fn dark_theme_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("preferences.json");
    let mut settings = Settings::load(FileStore::new(&path));
    settings.toggle_theme();
    drop(settings);
    assert_eq!(Settings::load(FileStore::new(&path)).theme(), Theme::Dark);
}
