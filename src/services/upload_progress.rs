// ============================================================================
// UPLOAD PROGRESS - Byte counters -> monotonic percentages
// ============================================================================

/// `round(loaded / total * 100)`, clamped to `0..=100`. An unknown total
/// reads as 0%.
pub fn percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = loaded as f64 / total as f64 * 100.0;
    ratio.round().clamp(0.0, 100.0) as u8
}

/// Filters raw progress into the strictly increasing sequence handed to
/// `on_progress`.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: Option<u8>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the percentage to emit, or `None` if it would not advance.
    pub fn observe(&mut self, loaded: u64, total: u64) -> Option<u8> {
        let value = percent(loaded, total);
        match self.last {
            Some(last) if value <= last => None,
            _ => {
                self.last = Some(value);
                Some(value)
            }
        }
    }

    /// The closing 100 for a successful upload, unless already emitted.
    pub fn finish(&mut self) -> Option<u8> {
        if self.last == Some(100) {
            None
        } else {
            self.last = Some(100);
            Some(100)
        }
    }
}
