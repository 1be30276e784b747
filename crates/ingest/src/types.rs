/// Position of a task in submission order, starting at 1.
pub type Ticket = u64;

/// Outcome of waiting for queued work to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStatus {
    /// Every task submitted before the wait began has completed.
    Drained,
    /// The timeout elapsed with `pending` of those tasks still outstanding.
    TimedOut { pending: u64 },
}

impl DrainStatus {
    pub fn is_drained(&self) -> bool {
        matches!(self, DrainStatus::Drained)
    }
}
