#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use bracketsmith::{invariants, Bracket, BracketGenerator, BracketStyle, GeneratorConfig};

fn snapshot_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
}

pub fn assert_snapshot(name: &str, actual: &str) {
    let path = snapshot_root().join(name);
    if std::env::var("BRACKETSMITH_UPDATE_SNAPSHOTS").is_ok() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create snapshot directory");
        }
        fs::write(&path, actual).expect("write snapshot");
        return;
    }

    let expected =
        fs::read_to_string(&path).unwrap_or_else(|_| panic!("snapshot {:?} not found", path));
    if normalize(&expected) != normalize(actual) {
        panic!(
            "Snapshot mismatch for {:?}. Set BRACKETSMITH_UPDATE_SNAPSHOTS=1 to regenerate.\nExpected:\n{}\nActual:\n{}",
            path,
            expected,
            actual
        );
    }
}

fn normalize(input: &str) -> String {
    input.replace("\r\n", "\n")
}

/// Generate with verification forced on, regardless of build profile
pub fn generate(style: BracketStyle, players: u32) -> Bracket {
    let config = GeneratorConfig::default()
        .with_style(style)
        .with_verification(true);
    BracketGenerator::new(config)
        .generate(players)
        .unwrap_or_else(|err| panic!("{} bracket for {} players: {}", style, players, err))
}

/// Structural checks shared by every style
pub fn assert_well_formed(bracket: &Bracket) {
    let nodes = bracket.nodes();
    invariants::check_links(nodes).expect("links are symmetric");
    invariants::check_no_phantoms(nodes, bracket.num_players()).expect("no phantom seeds");
    invariants::check_final_ranks(nodes).expect("ranks 1 and 2 awarded once");
}
