//! Animation transactions.
//!
//! While a transaction is open on the current thread, every
//! [`Animated::set`](super::Animated::set) starts a transition that begins at
//! the transaction's start time and runs for its duration. Outside of a
//! transaction, writes apply immediately.
//!
//! Transactions nest; the innermost one wins.

use std::cell::RefCell;
use std::time::Duration;

use super::easing::Easing;

/// Timing shared by all value changes made inside one animation block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    /// Loop time the transitions start at.
    pub start: Duration,
    /// Length of every transition started in the block.
    pub duration: Duration,
    /// Easing applied to those transitions.
    pub easing: Easing,
}

impl Transaction {
    /// Create a transaction.
    pub fn new(start: Duration, duration: Duration, easing: Easing) -> Self {
        Self {
            start,
            duration,
            easing,
        }
    }

    /// Whether writes inside this transaction animate at all.
    #[inline]
    pub fn is_animated(&self) -> bool {
        !self.duration.is_zero()
    }
}

thread_local! {
    static STACK: RefCell<Vec<Transaction>> = const { RefCell::new(Vec::new()) };
}

/// Pops the transaction even if the block panics.
struct Scope;

impl Drop for Scope {
    fn drop(&mut self) {
        STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Run `block` with `transaction` open.
pub fn with_transaction<R>(transaction: Transaction, block: impl FnOnce() -> R) -> R {
    STACK.with(|stack| stack.borrow_mut().push(transaction));
    let _scope = Scope;
    block()
}

/// The innermost open transaction, if any.
pub fn current() -> Option<Transaction> {
    STACK.with(|stack| stack.borrow().last().copied())
}
