//! Dense square sailing-time matrix.

use std::fmt;

use bp_core::TerminalId;

use crate::{NetworkError, NetworkResult};

/// Travel time in ticks between every ordered pair of stops.
///
/// Stored row-major in a single `Vec` so one lookup is one multiply-add.
/// The matrix is read-only once built; asymmetric costs are allowed.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SailingMatrix {
    size:  usize,
    cells: Vec<u64>,
}

impl SailingMatrix {
    /// Build from nested rows.  Every row must have exactly `rows.len()`
    /// columns.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> NetworkResult<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(NetworkError::NotSquare { row, got: values.len(), expected: size });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    /// Number of stops (rows) including the port boundary.
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Cost by raw index.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn cost_at(&self, from: usize, to: usize) -> u64 {
        assert!(from < self.size && to < self.size, "matrix index ({from}, {to}) out of range");
        self.cells[from * self.size + to]
    }

    /// Sailing time from `from` to `to`.
    ///
    /// # Panics
    /// Panics if either terminal is outside the matrix.
    #[inline]
    pub fn cost(&self, from: TerminalId, to: TerminalId) -> u64 {
        self.cost_at(from.index(), to.index())
    }

    /// Like [`cost`](Self::cost) but returns `None` for unknown terminals.
    pub fn get(&self, from: TerminalId, to: TerminalId) -> Option<u64> {
        let (f, t) = (from.index(), to.index());
        (f < self.size && t < self.size).then(|| self.cells[f * self.size + t])
    }

    /// Sub-matrix over `stops`, in the given order.  Local index `i` of the
    /// result refers to `stops[i]`.
    pub fn restrict(&self, stops: &[TerminalId]) -> NetworkResult<SailingMatrix> {
        if let Some(&bad) = stops.iter().find(|t| t.index() >= self.size) {
            return Err(NetworkError::UnknownTerminal(bad));
        }
        let size = stops.len();
        let mut cells = Vec::with_capacity(size * size);
        for &from in stops {
            for &to in stops {
                cells.push(self.cells[from.index() * self.size + to.index()]);
            }
        }
        Ok(Self { size, cells })
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        // `chunks(0)` panics, and an empty matrix has no rows anyway.
        self.cells.chunks(self.size.max(1))
    }
}

impl fmt::Debug for SailingMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}
