//! Collision-free name allocation for decomposition entries
//!
//! Names are lowercase base-26 strings advancing like an odometer: `a`, `b`,
//! ..., `z`, `aa`, `ab`, ... Candidates found in the exclusion set are
//! skipped, which makes the allocation sequence deterministic for a fixed
//! exclusion set and call count.

use rustc_hash::FxHashSet;

/// Allocator state: the current base-26 counter and the set of taken names.
///
/// One instance is scoped to a single decomposition run; names are consumed
/// monotonically and never reused.
#[derive(Debug)]
pub struct NameAllocator {
    current: Vec<u8>,
    taken: FxHashSet<String>,
}

impl NameAllocator {
    /// Create an allocator that will never return a name in `excluded`
    pub fn new<I, S>(excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NameAllocator {
            current: Vec::new(),
            taken: excluded.into_iter().map(Into::into).collect(),
        }
    }

    /// Return the next free name and commit it
    pub fn next(&mut self) -> String {
        loop {
            self.advance();
            let candidate: String = self.current.iter().map(|&b| b as char).collect();
            if !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
        }
    }

    /// Odometer increment: bump the last character, carrying `z` → `a`
    /// leftward, extending by one character when the carry falls off the front
    fn advance(&mut self) {
        if self.current.is_empty() {
            self.current.push(b'a');
            return;
        }
        let mut i = self.current.len();
        loop {
            if i == 0 {
                self.current.insert(0, b'a');
                return;
            }
            i -= 1;
            if self.current[i] == b'z' {
                self.current[i] = b'a';
            } else {
                self.current[i] += 1;
                return;
            }
        }
    }
}
