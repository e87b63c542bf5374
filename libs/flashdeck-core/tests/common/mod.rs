//! Shared fixtures for flashdeck-core integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Card file content with a title and `count` cards.
pub fn sample_content(title: &str, count: usize) -> String {
    let mut content = format!("{title}\n");
    for i in 0..count {
        content.push_str(&format!(
            "Q: What is term number {i}?\nA: Definition of term number {i}\n"
        ));
    }
    content
}

/// A small realistic deck with noise lines mixed in.
pub fn biology_content() -> &'static str {
    "Cell Biology\n\
     \n\
     Q: What is the powerhouse of the cell?\n\
     A: The mitochondria\n\
     Q: What organelle holds the genetic material?\n\
     A: The nucleus\n\
     # stray note that should be skipped\n\
     Q: Which structure makes proteins?\n\
     A: Ribosomes assemble proteins from amino acids\n\
     Q: What does the cell membrane do?\n\
     A: Controls what enters and leaves the cell\n\
     Q: Where does photosynthesis happen?\n\
     A: In the chloroplasts of plant cells\n\
     Q: What is \"osmosis\"?\n\
     A: Diffusion of water across a membrane, from low to high solute concentration\n\
     Q: Orphaned question with no answer\n\
     Q: What fills the inside of the cell?\n\
     A: Cytoplasm\n"
}

/// Write `content` to `name` inside a fresh temp dir.
pub fn write_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    (dir, path)
}
