/// What `put` did with an offered record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    Inserted,
    Replaced,
    /// Stored revision is the same or newer; nothing written.
    Skipped,
}

/// Per-run counters. Every entry of every page lands in exactly one of
/// `inserted`, `replaced`, `skipped`, `filtered`, `malformed` or `deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HarvestStats {
    pub pages: usize,
    pub entries: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub skipped: usize,
    /// Normalized but outside the subject allow-list.
    pub filtered: usize,
    pub malformed: usize,
    pub deleted: usize,
}

impl HarvestStats {
    pub fn record_put(&mut self, outcome: PutOutcome) {
        match outcome {
            PutOutcome::Inserted => self.inserted += 1,
            PutOutcome::Replaced => self.replaced += 1,
            PutOutcome::Skipped => self.skipped += 1,
        }
    }

    pub fn stored(&self) -> usize {
        self.inserted + self.replaced
    }
}
