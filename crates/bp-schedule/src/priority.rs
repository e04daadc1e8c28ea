use std::fmt;

/// Tie-break tier for events that share a tick.  Lower sorts first.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum Priority {
    /// Settles state other same-tick events depend on (handling finished,
    /// re-plan after rejection).
    First,
    #[default]
    Normal,
    /// Runs after all other activity at this tick (port departure).
    Last,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::First => "first",
            Priority::Normal => "normal",
            Priority::Last => "last",
        };
        f.write_str(s)
    }
}
