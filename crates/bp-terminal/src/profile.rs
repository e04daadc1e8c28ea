//! Waiting profiles: how long a barge may wait at a terminal as a function
//! of when it arrives.
//!
//! # Construction
//!
//! For a book of `n` appointments (sorted by LST) and a barge needing `h`
//! ticks of handling, requested at `now`:
//!
//! ```text
//! interval i ∈ 0..=n
//!   start = now                 if i == 0
//!         = book[i-1].edt       otherwise
//!   end   = book[i].lst - h     if i < n
//!         = ∞                   if i == n
//!   keep if now <= start <= end
//! ```
//!
//! A start interval is a window in which handling can begin without pushing
//! any booked barge past its LST.  The open tail interval is clamped up to
//! `now` so that a profile always has at least one interval.  When that
//! clamped tail is the only survivor every booked barge is already overdue;
//! the profile is then `overrun` and answers a bare zero with no slack.
//!
//! The step profile then pairs each interval end (and `now`) with the gap to
//! the next interval start:
//!
//! ```text
//! entries[0]   = (now,            intervals[0].start - now)
//! entries[k]   = (intervals[k-1].end, intervals[k].start - intervals[k-1].end)
//! ```

use bp_core::{MaxWait, SlackPolicy, Tick};

use crate::AppointmentBook;

/// A window `[start, end]` in which handling may start.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StartInterval {
    pub start: Tick,
    pub end:   Tick,
}

impl StartInterval {
    #[inline]
    pub fn contains(&self, t: Tick) -> bool {
        self.start <= t && t <= self.end
    }
}

/// From `time` onwards the barge may wait up to `max_wait + time - t`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProfileEntry {
    pub time:     Tick,
    pub max_wait: u64,
}

/// Step function `arrival → maximum tolerable wait` for one
/// (terminal, barge, request time) triple.
#[derive(Clone, Debug, PartialEq)]
pub enum WaitingProfile {
    /// The port entrance/exit.  Never any waiting, never any slack.
    Boundary,
    Book {
        intervals: Vec<StartInterval>,
        entries:   Vec<ProfileEntry>,
        slack:     SlackPolicy,
        /// Book size when the profile was built; read by factor slack.
        book_len:  usize,
        /// Only the clamped tail survived.
        overrun:   bool,
    },
}

impl WaitingProfile {
    /// Build the profile of `book` for a barge needing `handling` ticks,
    /// as seen at `now`.
    pub fn build(book: &AppointmentBook, handling: u64, now: Tick, slack: SlackPolicy) -> Self {
        let appts = book.as_slice();
        let n = appts.len();

        let mut intervals: Vec<StartInterval> = Vec::with_capacity(n + 1);
        let mut clamped = false;
        for i in 0..=n {
            let start = if i == 0 { now } else { appts[i - 1].edt };
            let (start, end) = if i == n {
                clamped = start < now;
                (start.max(now), Tick::INFINITY)
            } else {
                // An LST earlier than the handling time leaves no room at all.
                match appts[i].lst.checked_rewind(handling) {
                    Some(end) => (start, end),
                    None => continue,
                }
            };
            if start <= end && start >= now {
                intervals.push(StartInterval { start, end });
            }
        }
        assert!(!intervals.is_empty(), "waiting profile without a feasible start interval");

        for i in 1..intervals.len() {
            let next_start = intervals[i].start;
            let prev = &mut intervals[i - 1];
            if prev.end > next_start {
                prev.end = next_start;
            }
        }

        let mut entries = Vec::with_capacity(intervals.len());
        entries.push(ProfileEntry { time: now, max_wait: intervals[0].start.saturating_since(now) });
        for pair in intervals.windows(2) {
            entries.push(ProfileEntry {
                time:     pair[0].end,
                max_wait: pair[1].start.saturating_since(pair[0].end),
            });
        }

        let overrun = clamped && intervals.len() == 1;
        WaitingProfile::Book { intervals, entries, slack, book_len: n, overrun }
    }

    /// Maximum waiting time before slack.
    pub fn raw_waiting_time(&self, t: Tick) -> u64 {
        let WaitingProfile::Book { entries, .. } = self else {
            return 0;
        };
        for (idx, entry) in entries.iter().enumerate().rev() {
            if entry.time <= t {
                if idx > 0 && t == entry.time {
                    return 0;
                }
                return entry.time.offset(entry.max_wait).saturating_since(t);
            }
        }
        // Asked about a moment before the profile was built.
        0
    }

    pub fn intervals(&self) -> &[StartInterval] {
        match self {
            WaitingProfile::Boundary => &[],
            WaitingProfile::Book { intervals, .. } => intervals,
        }
    }

    pub fn entries(&self) -> &[ProfileEntry] {
        match self {
            WaitingProfile::Boundary => &[],
            WaitingProfile::Book { entries, .. } => entries,
        }
    }

    pub fn book_len(&self) -> usize {
        match self {
            WaitingProfile::Boundary => 0,
            WaitingProfile::Book { book_len, .. } => *book_len,
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self, WaitingProfile::Boundary)
    }

    pub fn is_overrun(&self) -> bool {
        matches!(self, WaitingProfile::Book { overrun: true, .. })
    }
}

impl MaxWait for WaitingProfile {
    fn max_waiting_time(&self, arrival: Tick) -> u64 {
        match self {
            WaitingProfile::Boundary | WaitingProfile::Book { overrun: true, .. } => 0,
            WaitingProfile::Book { slack, book_len, .. } => {
                slack.apply(self.raw_waiting_time(arrival), *book_len)
            }
        }
    }
}
