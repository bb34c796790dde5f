// src/crawl/sink.rs
// =============================================================================
// Where matched document URLs go.
//
// The crawler only ever appends to a sink; it never reads it back and never
// deduplicates against it. Running the tool twice with the same output file
// therefore appends the second run's results after the first.
// =============================================================================

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// An append-only destination for matched document URLs
pub trait MatchSink {
    fn record(&mut self, url: &str) -> io::Result<()>;
}

/// Appends one URL per line to a text file
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    // Opens (or creates) the file in append mode
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl MatchSink for FileSink {
    fn record(&mut self, url: &str) -> io::Result<()> {
        writeln!(self.file, "{}", url)?;
        // Flush every line so results survive a Ctrl-C halfway through a crawl
        self.file.flush()
    }
}

// In-memory sink used by the crawl tests
#[cfg(test)]
impl MatchSink for Vec<String> {
    fn record(&mut self, url: &str) -> io::Result<()> {
        self.push(url.to_string());
        Ok(())
    }
}

// Lets a test keep ownership of its sink while the crawler borrows it
#[cfg(test)]
impl<T: MatchSink + ?Sized> MatchSink for &mut T {
    fn record(&mut self, url: &str) -> io::Result<()> {
        (**self).record(url)
    }
}
