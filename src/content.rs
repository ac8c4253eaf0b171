use crate::difficulty::Difficulty;
use include_dir::{include_dir, Dir};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

static WORD_DIR: Dir = include_dir!("src/words");

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Supplies the text a freshly spawned balloon carries.
pub trait ContentSource {
    fn generate(&mut self, mode: Difficulty) -> String;
}

#[derive(Deserialize, Clone, Debug)]
pub struct WordList {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl WordList {
    fn load(file_name: &str) -> Self {
        let file = WORD_DIR.get_file(file_name).expect("word list not found");

        let file_as_str = file
            .contents_utf8()
            .expect("unable to interpret word list as a string");

        serde_json::from_str(file_as_str).expect("unable to deserialize word list json")
    }
}

/// Production content source backed by the embedded word lists.
///
/// Easy draws a single letter, Medium draws from the short list, Hard draws
/// from the union of the longer and hardest lists.
#[derive(Debug)]
pub struct WordBank {
    short: Vec<String>,
    long: Vec<String>,
}

impl WordBank {
    pub fn new() -> Self {
        let short = WordList::load("short.json").words;
        let mut long = WordList::load("longer.json").words;
        long.extend(WordList::load("hardest.json").words);
        Self { short, long }
    }

    fn pick(words: &[String]) -> String {
        words
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| "A".to_string())
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSource for WordBank {
    fn generate(&mut self, mode: Difficulty) -> String {
        match mode {
            Difficulty::Easy => {
                let idx = rand::thread_rng().gen_range(0..LETTERS.len());
                (LETTERS[idx] as char).to_string()
            }
            Difficulty::Medium => Self::pick(&self.short),
            Difficulty::Hard => Self::pick(&self.long),
        }
    }
}
