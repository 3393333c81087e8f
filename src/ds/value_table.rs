#![allow(clippy::len_without_is_empty)]
use std::{collections::HashMap, hash::Hash};

use crate::{Error, Result};

/// A lazily populated table of action values, one fixed-width row per state
///
/// Rows are created on first access through [`get_or_insert`](ValueTable::get_or_insert),
/// filled with the table's initial value. `0.0` gives the usual zero initialization,
/// a large positive value gives optimistic initialization.
///
/// Every present row has exactly [`width`](ValueTable::width) entries; states that
/// were never looked up are absent.
#[derive(Debug, Clone)]
pub struct ValueTable<S> {
    rows: HashMap<S, Box<[f32]>>,
    width: usize,
    init: f32,
}

impl<S: Eq + Hash> ValueTable<S> {
    /// **Errors** if `width` is zero
    pub fn new(width: usize, init: f32) -> Result<Self> {
        if width == 0 {
            return Err(Error::invalid("value table needs at least one action"));
        }
        Ok(Self {
            rows: HashMap::new(),
            width,
            init,
        })
    }

    /// Number of values per row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Value assigned to every entry of a freshly created row
    pub fn init(&self) -> f32 {
        self.init
    }

    /// Number of materialized rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Read-only lookup that never creates a row
    pub fn get(&self, state: &S) -> Option<&[f32]> {
        self.rows.get(state).map(|row| &**row)
    }

    /// Get the row for `state`, creating it with the initial value if absent
    pub fn get_or_insert(&mut self, state: S) -> &mut [f32] {
        let (width, init) = (self.width, self.init);
        self.rows
            .entry(state)
            .or_insert_with(|| vec![init; width].into_boxed_slice())
    }

    /// Iterate over materialized rows in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &[f32])> {
        self.rows.iter().map(|(s, row)| (s, &**row))
    }

    /// Owned copy of every materialized row, for display or inspection
    pub fn snapshot(&self) -> HashMap<S, Vec<f32>>
    where
        S: Clone,
    {
        self.iter().map(|(s, row)| (s.clone(), row.to_vec())).collect()
    }

    /// Drop every row
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
