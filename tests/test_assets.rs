//! Tests for the shipped config, prompt and language-table assets.

use std::fs;
use std::path::Path;

use aragil_bot::lang::TranslitTables;

#[test]
fn default_config_parses() {
    let cfg = aragil_bot::config::load_from(Path::new("config/default.toml"), None).unwrap();
    assert_eq!(cfg.bot_name, "aragil");
    assert_eq!(cfg.llm.provider, "dummy");
    assert!(cfg.language.tables_path.is_some());
}

#[test]
fn prompt_files_exist() {
    for file in ["system_hy.txt", "system_ru.txt", "system_en.txt"] {
        let path = Path::new("config/prompts").join(file);
        assert!(path.is_file(), "{file} prompt file missing");
        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.trim().is_empty(), "{file} is empty");
    }
}

#[test]
fn table_file_parses_and_matches_embedded_defaults() {
    let text = fs::read_to_string("data/translit_map.json").unwrap();
    let from_file = TranslitTables::from_json(&text).unwrap();
    let embedded = TranslitTables::load(None);
    assert_eq!(from_file.word("barev"), embedded.word("barev"));
    assert_eq!(from_file.keywords().len(), embedded.keywords().len());
}

#[test]
fn table_file_carries_core_vocabulary() {
    let text = fs::read_to_string("data/translit_map.json").unwrap();
    let t = TranslitTables::from_json(&text).unwrap();
    assert_eq!(t.word("barev"), Some("բարև"));
    assert_eq!(t.word("vonc"), Some("ո՞նց"));
    assert_eq!(t.letter("kh"), Some("խ"));
    assert_eq!(t.letter("sh"), Some("շ"));
    assert_eq!(t.max_letter_key_len(), 2);
}

#[test]
fn table_file_duplicates_are_reported_not_fatal() {
    // The data file deliberately repeats keys ("vagh", "tak", "ch" …);
    // last definition wins and the loader reports them.
    let text = fs::read_to_string("data/translit_map.json").unwrap();
    let t = TranslitTables::from_json(&text).unwrap();
    assert!(!t.duplicate_keys().is_empty());
    assert!(t.duplicate_keys().iter().any(|k| k == "vagh"));
    // Last definition of "vagh" in the data is "վաղը".
    assert_eq!(t.word("vagh"), Some("վաղը"));
}
