//! Staged query pipelines with a single terminal materialization.
//!
//! A pipeline wraps a lazy, fallible row stream. Stages compose by
//! consuming the previous pipeline and returning a new one; nothing runs
//! until [`Pipeline::materialize`] pulls the stream. Stages that need
//! their whole input (joins, grouping, sorting) buffer at first pull,
//! never earlier. Pipelines hold no cache: rebuilding one over the same
//! store recomputes from scratch and observes nothing from earlier runs.

use std::cmp::Ordering;
use std::hash::Hash;

use tracing::debug;

use crate::error::Result;
use crate::query::aggregate::{self, Group};
use crate::query::join;
use crate::query::predicate::Predicate;

/// A declared sequence of query stages over rows of type `T`.
pub struct Pipeline<'a, T> {
    stream: Box<dyn Iterator<Item = Result<T>> + 'a>,
    stages: Vec<String>,
}

impl<T> std::fmt::Debug for Pipeline<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages)
            .finish_non_exhaustive()
    }
}

impl<'a, T: 'a> Pipeline<'a, T> {
    /// Starts a pipeline from an already-materialized sequence.
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self::from_source("rows".to_owned(), rows)
    }

    pub(crate) fn from_source(label: String, rows: Vec<T>) -> Self {
        Self {
            stream: Box::new(rows.into_iter().map(Ok)),
            stages: vec![label],
        }
    }

    /// Keeps rows for which the predicate evaluates to true.
    ///
    /// Three-valued evaluation collapses unknown to false here, so rows
    /// with nulls in the tested fields are dropped, not errored.
    pub fn filter(mut self, predicate: Predicate<T>) -> Self {
        self.stages.push("filter".to_owned());
        Self {
            stream: Box::new(self.stream.filter(move |item| match item {
                Ok(row) => predicate.evaluate(row),
                Err(_) => true,
            })),
            stages: self.stages,
        }
    }

    /// Equi-joins this pipeline (left) against another (right).
    ///
    /// Inner-join semantics: pairs are emitted in left order, then right
    /// order among matches; unmatched left rows are dropped. Both inputs
    /// buffer on first pull.
    pub fn equi_join<R, K, KL, KR>(
        mut self,
        right: Pipeline<'a, R>,
        left_key: KL,
        right_key: KR,
    ) -> Pipeline<'a, (T, R)>
    where
        T: Clone,
        R: Clone + 'a,
        K: Eq + Hash,
        KL: Fn(&T) -> K + 'a,
        KR: Fn(&R) -> K + 'a,
    {
        self.stages.push(format!("equi_join[{}]", right.explain()));
        let left_stream = self.stream;
        let right_stream = right.stream;
        Pipeline {
            stream: Box::new(Deferred::new(move || {
                let left: Vec<T> = left_stream.collect::<Result<_>>()?;
                let right: Vec<R> = right_stream.collect::<Result<_>>()?;
                Ok(join::equi_join(&left, &right, left_key, right_key))
            })),
            stages: self.stages,
        }
    }

    /// Range-joins this pipeline (left) against another (right) with a
    /// per-pair predicate; every satisfying pair is emitted.
    pub fn range_join<R, P>(mut self, right: Pipeline<'a, R>, pred: P) -> Pipeline<'a, (T, R)>
    where
        T: Clone,
        R: Clone + 'a,
        P: Fn(&T, &R) -> bool + 'a,
    {
        self.stages.push(format!("range_join[{}]", right.explain()));
        let left_stream = self.stream;
        let right_stream = right.stream;
        Pipeline {
            stream: Box::new(Deferred::new(move || {
                let left: Vec<T> = left_stream.collect::<Result<_>>()?;
                let right: Vec<R> = right_stream.collect::<Result<_>>()?;
                Ok(join::range_join(&left, &right, pred))
            })),
            stages: self.stages,
        }
    }

    /// Groups rows by extracted key, in first-encounter key order.
    pub fn group_by<K, F>(mut self, key: F) -> Pipeline<'a, Group<K, T>>
    where
        K: Eq + Hash + Clone + 'a,
        F: Fn(&T) -> K + 'a,
    {
        self.stages.push("group_by".to_owned());
        let stream = self.stream;
        Pipeline {
            stream: Box::new(Deferred::new(move || {
                let rows: Vec<T> = stream.collect::<Result<_>>()?;
                Ok(aggregate::group_by(rows, key))
            })),
            stages: self.stages,
        }
    }

    /// Projects each row into a new shape, typically a named result struct
    /// declared at the call site.
    pub fn project<U, F>(mut self, f: F) -> Pipeline<'a, U>
    where
        U: 'a,
        F: Fn(T) -> U + 'a,
    {
        self.stages.push("project".to_owned());
        Pipeline {
            stream: Box::new(self.stream.map(move |item| item.map(&f))),
            stages: self.stages,
        }
    }

    /// Fallible projection; stage errors (such as an aggregate over an
    /// empty group) surface at materialization.
    pub fn try_project<U, F>(mut self, f: F) -> Pipeline<'a, U>
    where
        U: 'a,
        F: Fn(T) -> Result<U> + 'a,
    {
        self.stages.push("try_project".to_owned());
        Pipeline {
            stream: Box::new(self.stream.map(move |item| item.and_then(&f))),
            stages: self.stages,
        }
    }

    /// Stable sort by comparator; buffers on first pull.
    pub fn sort_by<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'a,
    {
        self.stages.push("sort".to_owned());
        let stream = self.stream;
        Self {
            stream: Box::new(Deferred::new(move || {
                let mut rows: Vec<T> = stream.collect::<Result<_>>()?;
                rows.sort_by(cmp);
                Ok(rows)
            })),
            stages: self.stages,
        }
    }

    /// Stable sort by extracted key; buffers on first pull.
    pub fn sort_by_key<K, F>(self, key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'a,
    {
        self.sort_by(move |a, b| key(a).cmp(&key(b)))
    }

    /// The declared stage sequence, e.g. `scan(emp) -> filter -> sort`.
    pub fn explain(&self) -> String {
        self.stages.join(" -> ")
    }

    /// Terminal: pulls the whole stream into a vector.
    ///
    /// This is the only point of evaluation; it fails fast on the first
    /// stage error and reports nothing twice.
    pub fn materialize(self) -> Result<Vec<T>> {
        let pipeline = self.stages.join(" -> ");
        let result: Result<Vec<T>> = self.stream.collect();
        match &result {
            Ok(rows) => debug!(pipeline = %pipeline, rows = rows.len(), "pipeline materialized"),
            Err(err) => debug!(pipeline = %pipeline, error = %err, "pipeline failed"),
        }
        result
    }
}

/// Iterator that runs a buffering stage on first pull and then yields the
/// buffered rows. A build failure is yielded once and ends the stream.
struct Deferred<T, F> {
    build: Option<F>,
    items: std::vec::IntoIter<T>,
}

impl<T, F> Deferred<T, F>
where
    F: FnOnce() -> Result<Vec<T>>,
{
    fn new(build: F) -> Self {
        Self {
            build: Some(build),
            items: Vec::new().into_iter(),
        }
    }
}

impl<T, F> Iterator for Deferred<T, F>
where
    F: FnOnce() -> Result<Vec<T>>,
{
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(build) = self.build.take() {
            match build() {
                Ok(rows) => self.items = rows.into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
        self.items.next().map(Ok)
    }
}
