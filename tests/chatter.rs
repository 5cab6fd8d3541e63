use chatter_core::{Chatter, ChatterConfig};
use std::fs;

fn config_in(dir: &std::path::Path) -> ChatterConfig {
    ChatterConfig {
        brain_file: dir.join("brain.bin"),
        nickname: "brigand".to_string(),
        ..ChatterConfig::default()
    }
}

#[test]
fn brain_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut chatter = Chatter::open(config_in(dir.path())).unwrap();
    assert_eq!(chatter.stats().symbols, 0);
    chatter.hear("the cat sat on the mat.").unwrap();
    chatter.hear("the dog sat on the log.").unwrap();
    let stats = chatter.stats();
    chatter.save().unwrap();

    let mut reopened = Chatter::open(config_in(dir.path())).unwrap();
    assert_eq!(reopened.stats(), stats);

    let reply = reopened.hear("Brigand: the cat").unwrap().unwrap();
    assert!(reply.ends_with('.'), "{reply}");
}

#[test]
fn train_reads_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.txt");
    fs::write(&corpus, "one two three\nfour five six\n\nseven\n").unwrap();

    let mut chatter = Chatter::open(config_in(dir.path())).unwrap();
    assert_eq!(chatter.train(&corpus).unwrap(), 4);
    assert_eq!(chatter.stats().tuples, 4);
}

#[test]
fn config_file_drives_chatter() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("chatter.json");
    let brain = dir.path().join("brain.bin");
    fs::write(
        &config_path,
        format!(
            r#"{{ "brain_file": {:?}, "nickname": "bot", "attention_chars": ">" }}"#,
            brain.to_str().unwrap()
        ),
    )
    .unwrap();

    let config = ChatterConfig::load(&config_path).unwrap();
    assert_eq!(config.brain_file, brain);

    let mut chatter = Chatter::open(config).unwrap();
    chatter.hear("the cat sat.").unwrap();
    assert!(chatter.hear("bot: the").unwrap().is_none());
    assert!(chatter.hear("bot> the").unwrap().is_some());
}
