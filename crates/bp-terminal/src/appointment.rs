//! Appointments and the per-terminal appointment book.

use bp_core::{BargeId, Tick};

/// One agreed visit of a barge at a terminal.
///
/// `pst` always equals `lst` (barges are planned as late as allowed) and
/// `edt = pst + processing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appointment {
    pub barge:      BargeId,
    /// Latest arrival time.
    pub lat:        Tick,
    /// Latest start time.
    pub lst:        Tick,
    /// Planned start time.
    pub pst:        Tick,
    pub processing: u64,
    /// Expected departure time.
    pub edt:        Tick,
}

impl Appointment {
    pub fn new(barge: BargeId, lat: Tick, lst: Tick, processing: u64) -> Self {
        Self { barge, lat, lst, pst: lst, processing, edt: lst + processing }
    }
}

/// Accepted appointments of one terminal, ascending by LST.
///
/// A new appointment goes in front of the first existing entry whose LST is
/// greater than or equal to its own, so among equal LSTs the most recently
/// registered one comes first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentBook {
    entries: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert and return the position the appointment landed at.
    pub fn insert(&mut self, appt: Appointment) -> usize {
        debug_assert!(
            self.position(appt.barge).is_none(),
            "{} already holds an appointment here",
            appt.barge
        );
        let pos = self.entries.partition_point(|a| a.lst < appt.lst);
        self.entries.insert(pos, appt);
        debug_assert!(self.is_sorted());
        pos
    }

    /// Remove the appointment of `barge`, if any.
    pub fn remove(&mut self, barge: BargeId) -> Option<Appointment> {
        let pos = self.position(barge)?;
        let removed = self.entries.remove(pos);
        debug_assert!(self.is_sorted());
        Some(removed)
    }

    pub fn get(&self, barge: BargeId) -> Option<&Appointment> {
        self.entries.iter().find(|a| a.barge == barge)
    }

    pub fn position(&self, barge: BargeId) -> Option<usize> {
        self.entries.iter().position(|a| a.barge == barge)
    }

    /// Entry with the smallest LST.
    pub fn head(&self) -> Option<&Appointment> {
        self.entries.first()
    }

    pub fn second(&self) -> Option<&Appointment> {
        self.entries.get(1)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Appointment> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Appointment] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].lst <= w[1].lst)
    }
}

impl<'a> IntoIterator for &'a AppointmentBook {
    type Item = &'a Appointment;
    type IntoIter = std::slice::Iter<'a, Appointment>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
