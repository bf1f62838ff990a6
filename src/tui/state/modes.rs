#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the scan to finish.
    Idle,
    Reviewing,
    Confirming,
    Executing,
    Done,
}

/// Operator intent, decoupled from the keys that produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Toggle,
    Confirm,
    SelectAll,
    FilterHigh,
    FilterMedium,
    FilterLow,
    FilterAll,
    Quit,
}
