// src/progress.rs
/// Progress hooks for a scrape cycle. Callers that want per-job feedback
/// implement this; everything defaults to a no-op.
pub trait Progress {
    /// Number of detail pages about to be visited.
    fn begin(&mut self, _total: usize) {}

    /// One detail page has been handled (successfully or as a placeholder).
    fn item_done(&mut self, _link: &str) {}

    /// Called once at the end of the cycle.
    fn finish(&mut self) {}
}
