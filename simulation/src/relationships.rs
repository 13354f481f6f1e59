//! Directional affinity between every pair of cavemen ever issued.
//!
//! Entry `(i, j)` is how much caveman `i` likes caveman `j`. The matrix is
//! indexed by identity, grows by one row and column per new caveman and is
//! never shrunk; rows of the dead simply stop being read.

use serde::{Deserialize, Serialize};

use crate::components::CavemanId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipMatrix {
    rows: Vec<Vec<f64>>,
}

impl RelationshipMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroed `size x size` matrix.
    pub fn with_size(size: usize) -> Self {
        Self {
            rows: vec![vec![0.0; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Pad with one zeroed row and column.
    pub fn grow(&mut self) {
        for row in &mut self.rows {
            row.push(0.0);
        }
        let size = self.rows.len() + 1;
        self.rows.push(vec![0.0; size]);
    }

    /// Affinity of `from` toward `to`. Out-of-range identities read as zero.
    pub fn get(&self, from: CavemanId, to: CavemanId) -> f64 {
        self.rows
            .get(from.index())
            .and_then(|row| row.get(to.index()))
            .copied()
            .unwrap_or(0.0)
    }

    /// Overwrite an entry. Out-of-range identities are ignored.
    pub fn set(&mut self, from: CavemanId, to: CavemanId, value: f64) {
        if let Some(cell) = self.cell_mut(from, to) {
            *cell = value;
        }
    }

    /// Add `delta` to an entry and return the new value.
    pub fn add(&mut self, from: CavemanId, to: CavemanId, delta: f64) -> f64 {
        match self.cell_mut(from, to) {
            Some(cell) => {
                *cell += delta;
                *cell
            }
            None => 0.0,
        }
    }

    /// `candidates` ordered by `from`'s affinity, most liked first.
    ///
    /// `from` itself is excluded. Ties keep the order of `candidates`.
    pub fn ranked(&self, from: CavemanId, candidates: &[CavemanId]) -> Vec<(CavemanId, f64)> {
        let mut ranked: Vec<(CavemanId, f64)> = candidates
            .iter()
            .filter(|&&id| id != from)
            .map(|&id| (id, self.get(from, id)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    fn cell_mut(&mut self, from: CavemanId, to: CavemanId) -> Option<&mut f64> {
        self.rows
            .get_mut(from.index())
            .and_then(|row| row.get_mut(to.index()))
    }
}
