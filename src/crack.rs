//! Crack coordinator and worker (spec.md §4.6, §4.7): partitions the
//! dictionary across `n` workers, races them against a target ciphertext,
//! and joins all of them before replying.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info};

use crate::dictionary::Dictionary;
use crate::hash;

/// Run one `crack` job to completion and return the winning plaintext, or
/// `None` if no dictionary word hashes to `target` under `salt`.
///
/// Always joins every worker, even after an early match — a worker may be
/// mid-evaluation of `H` when the stop flag flips, and the coordinator must
/// not return (dropping the job's state) while a peer still touches it.
pub async fn crack(target: &str, salt: &str, n: usize, dictionary: &Dictionary) -> Option<String> {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let word_count = dictionary.len();
    let chunk = word_count / n;

    let mut handles = Vec::with_capacity(n);
    for worker_id in 0..n {
        let start = worker_id * chunk;
        let end = if worker_id == n - 1 {
            word_count
        } else {
            (worker_id + 1) * chunk
        };

        let dictionary = dictionary.clone();
        let target = target.to_string();
        let salt = salt.to_string();
        let stop_flag = stop_flag.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            worker_scan(worker_id, &target, &salt, &dictionary, start, end, &stop_flag)
        }));
    }

    debug!("crack job: {} worker(s) fanned out over {} word(s)", n, word_count);

    // Joined in worker-id order; the first `Some` we see is the lowest-id
    // winner by construction, so no separate scan/compare step is needed.
    let mut winner = None;
    for handle in handles {
        // A panicking worker counts as "found nothing" rather than taking
        // down the whole connection.
        if let Ok(Some(word)) = handle.await {
            if winner.is_none() {
                winner = Some(word);
            }
        }
    }

    match &winner {
        Some(word) => info!("crack job: match found ({} bytes)", word.len()),
        None => info!("crack job: dictionary exhausted, no match"),
    }

    winner
}

/// One worker's scan over its slice `[start, end)` of the dictionary,
/// ascending, polling `stop_flag` between words.
fn worker_scan(
    worker_id: usize,
    target: &str,
    salt: &str,
    dictionary: &Dictionary,
    start: usize,
    end: usize,
    stop_flag: &AtomicBool,
) -> Option<String> {
    for word in &dictionary.words()[start..end] {
        if stop_flag.load(Ordering::Acquire) {
            return None;
        }
        let ciphertext = hash::hash(word, salt);
        if ciphertext == target {
            stop_flag.store(true, Ordering::Release);
            debug!("worker {} matched at index", worker_id);
            return Some(word.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> Dictionary {
        use std::sync::atomic::{AtomicUsize, Ordering};
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let id = COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("crackserver-crack-test-{}-{}", std::process::id(), id));
        std::fs::write(&path, words.join("\n")).unwrap();
        let d = Dictionary::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();
        d
    }

    #[tokio::test]
    async fn finds_a_known_word() {
        let dictionary = dict(&["hello", "world", "secret", "abc"]);
        let target = hash::hash("world", "ab");
        let result = crack(&target, "ab", 4, &dictionary).await;
        assert_eq!(result.as_deref(), Some("world"));
    }

    #[tokio::test]
    async fn reports_none_when_absent() {
        let dictionary = dict(&["hello", "world"]);
        let target = hash::hash("nowhere", "ab");
        let result = crack(&target, "ab", 4, &dictionary).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn single_worker_scans_whole_dictionary() {
        let dictionary = dict(&["hello", "world", "secret", "abc"]);
        let target = hash::hash("secret", "zz");
        let result = crack(&target, "zz", 1, &dictionary).await;
        assert_eq!(result.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn more_workers_than_words_is_fine() {
        let dictionary = dict(&["hello", "world"]);
        let target = hash::hash("world", "ab");
        let result = crack(&target, "ab", 10, &dictionary).await;
        assert_eq!(result.as_deref(), Some("world"));
    }

    #[tokio::test]
    async fn deterministic_across_runs() {
        let dictionary = dict(&["hello", "world", "secret", "abc"]);
        let target = hash::hash("hello", "ab");
        for _ in 0..5 {
            let result = crack(&target, "ab", 4, &dictionary).await;
            assert_eq!(result.as_deref(), Some("hello"));
        }
    }
}
