use finopt_core::{Goal, Observer};

use crate::traits::{HasIteration, HasObjective};

/// One recorded solver event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Record {
    pub iteration: usize,
    pub objective: f64,
}

/// An observer that records `(iteration, objective)` for every event.
///
/// Pass `&mut History` to a solver to keep the records after the solve
/// returns. `History` never requests an action.
///
/// # Example
///
/// ```ignore
/// let mut history = History::new();
/// penalty::optimize(goal, &f, &constraints, &x0, &config, &mut history)?;
/// println!("{} iterations, best {:?}", history.len(), history.best(goal));
/// ```
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<Record>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn record(&mut self, iteration: usize, objective: f64) {
        self.records.push(Record {
            iteration,
            objective,
        });
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the most recent record.
    #[must_use]
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Returns the record with the best objective for `goal`.
    ///
    /// NaN objectives are never best. Ties keep the earliest record.
    #[must_use]
    pub fn best(&self, goal: Goal) -> Option<&Record> {
        self.records
            .iter()
            .filter(|r| !r.objective.is_nan())
            .fold(None, |best: Option<&Record>, r| match best {
                Some(b) if !goal.is_better(r.objective, b.objective) => Some(b),
                _ => Some(r),
            })
    }

    /// Returns the recorded objectives in order.
    pub fn objectives(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.objective)
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasIteration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.iteration(), event.objective());
        None
    }
}

/// Allows `&mut History` to be passed to solvers that take an observer by
/// value.
impl<E, A> Observer<E, A> for &mut History
where
    E: HasIteration + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
