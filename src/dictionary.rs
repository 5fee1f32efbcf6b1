//! The in-memory, read-only word list used by `crack`.

use std::sync::Arc;

use log::info;

use crate::errors::Error;

/// Words longer than this are dropped at load time: the hash primitive
/// ignores bytes past the eighth, so longer words would only duplicate
/// the work of their 8-byte prefix.
const MAX_WORD_LEN: usize = 8;

/// Immutable, shared dictionary. Cheap to clone (bumps an `Arc`); never
/// mutated after `load` returns.
#[derive(Debug, Clone)]
pub struct Dictionary {
    words: Arc<[Box<str>]>,
}

impl Dictionary {
    /// Load and filter a word list from `path`.
    ///
    /// Retains only words of length 1..=8, in file order, duplicates and
    /// all. Fails if the file can't be opened or no word survives the
    /// filter.
    pub fn load(path: &str) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)
            .map_err(|_| Error::DictionaryOpen(path.to_string()))?;

        let words: Vec<Box<str>> = contents
            .lines()
            .filter(|line| !line.is_empty() && line.len() <= MAX_WORD_LEN)
            .map(|line| line.to_string().into_boxed_str())
            .collect();

        if words.is_empty() {
            return Err(Error::DictionaryEmpty);
        }

        info!(
            "loaded {} word(s) from dictionary \"{}\"",
            words.len(),
            path
        );

        Ok(Dictionary {
            words: words.into(),
        })
    }

    /// Total word count `M`.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Borrow the full word list.
    pub fn words(&self) -> &[Box<str>] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> std::path::PathBuf {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!(
            "crackserver-dict-test-{}-{}",
            std::process::id(),
            id
        ));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn filters_words_over_eight_bytes() {
        let path = write_temp("hello\nworld\nsupercalifragilistic\nabc\n");
        let dict = Dictionary::load(path.to_str().unwrap()).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.words().iter().all(|w| w.len() <= 8));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn keeps_duplicates() {
        let path = write_temp("abc\nabc\n");
        let dict = Dictionary::load(path.to_str().unwrap()).unwrap();
        assert_eq!(dict.len(), 2);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn fails_on_missing_file() {
        let result = Dictionary::load("/nonexistent/path/to/dict");
        assert!(matches!(result, Err(Error::DictionaryOpen(_))));
    }

    #[test]
    fn fails_when_all_words_filtered_out() {
        let path = write_temp("supercalifragilisticexpialidocious\n");
        let result = Dictionary::load(path.to_str().unwrap());
        assert!(matches!(result, Err(Error::DictionaryEmpty)));
        std::fs::remove_file(path).ok();
    }
}
