//! Atomic, undoable mutations over an externally owned state container.
//!
//! The manager only sees the container through an injected getter and setter.
//! A mutation either commits (setter called, history pushed) or fails with its
//! own error and leaves both state and history untouched.
//!
//! `execute` borrows the manager mutably for the whole mutation, including
//! across `.await`, so overlapping transactions on one manager cannot be
//! issued: callers are serialized by the borrow checker.

use std::future::Future;

use tracing::{debug, trace};

/// One committed mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction<S> {
    pub name: String,
    pub previous_state: S,
    pub applied_state: S,
}

pub struct TransactionManager<S, G, W>
where
    G: Fn() -> S,
    W: FnMut(S),
{
    get_state: G,
    set_state: W,
    history: Vec<Transaction<S>>,
}

impl<S, G, W> TransactionManager<S, G, W>
where
    S: Clone,
    G: Fn() -> S,
    W: FnMut(S),
{
    #[must_use]
    pub fn new(get_state: G, set_state: W) -> Self {
        Self {
            get_state,
            set_state,
            history: Vec::new(),
        }
    }

    /// Runs an asynchronous mutation atomically.
    ///
    /// `mutate` receives a snapshot of the current state and returns the next
    /// state. On `Err` the error is returned unchanged, the setter is not
    /// called and nothing is recorded.
    pub async fn execute<F, Fut, E>(&mut self, name: impl Into<String>, mutate: F) -> Result<(), E>
    where
        F: FnOnce(S) -> Fut,
        Fut: Future<Output = Result<S, E>>,
    {
        let name = name.into();
        let previous_state = (self.get_state)();
        trace!(transaction = %name, "executing transaction");

        match mutate(previous_state.clone()).await {
            Ok(applied_state) => {
                self.commit(name, previous_state, applied_state);
                Ok(())
            }
            Err(err) => {
                debug!(transaction = %name, "transaction failed, discarded");
                Err(err)
            }
        }
    }

    /// Synchronous counterpart of [`execute`](Self::execute).
    pub fn execute_sync<F, E>(&mut self, name: impl Into<String>, mutate: F) -> Result<(), E>
    where
        F: FnOnce(S) -> Result<S, E>,
    {
        let name = name.into();
        let previous_state = (self.get_state)();
        trace!(transaction = %name, "executing transaction");

        match mutate(previous_state.clone()) {
            Ok(applied_state) => {
                self.commit(name, previous_state, applied_state);
                Ok(())
            }
            Err(err) => {
                debug!(transaction = %name, "transaction failed, discarded");
                Err(err)
            }
        }
    }

    /// Restores the state captured before the most recent transaction.
    ///
    /// Returns the undone transaction, or `None` (a no-op) when history is empty.
    /// Undo is not itself recorded, so repeated calls walk strictly backward.
    pub fn undo(&mut self) -> Option<Transaction<S>> {
        let transaction = self.history.pop()?;
        (self.set_state)(transaction.previous_state.clone());
        debug!(
            transaction = %transaction.name,
            remaining = self.history.len(),
            "transaction undone"
        );
        Some(transaction)
    }

    /// Committed transactions, oldest first.
    #[must_use]
    pub fn log(&self) -> &[Transaction<S>] {
        &self.history
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drops undo history without touching the current state.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn commit(&mut self, name: String, previous_state: S, applied_state: S) {
        (self.set_state)(applied_state.clone());
        debug!(
            transaction = %name,
            depth = self.history.len() + 1,
            "transaction committed"
        );
        self.history.push(Transaction {
            name,
            previous_state,
            applied_state,
        });
    }
}

impl<S, G, W> std::fmt::Debug for TransactionManager<S, G, W>
where
    G: Fn() -> S,
    W: FnMut(S),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionManager")
            .field("depth", &self.history.len())
            .finish_non_exhaustive()
    }
}
