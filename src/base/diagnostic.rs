use std::{
    cell::{Cell, RefCell},
    fmt::Display,
};

/// Represents a trait responsible for handling diagnostics emitted by the lexer.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive<E: Into<T>>(&self, error: E);
}

/// A handler that prints every received error to stderr.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one error has been printed.
    #[must_use]
    pub fn has_printed(&self) -> bool {
        self.printed.get()
    }
}

impl<T: Display> Handler<T> for PrintHandler {
    fn receive<E: Into<T>>(&self, error: E) {
        eprintln!("{}", error.into());
        self.printed.set(true);
    }
}

/// A handler that records every received error without printing it.
#[derive(Debug)]
pub struct SilentHandler<T> {
    received: RefCell<Vec<T>>,
}

impl<T> Default for SilentHandler<T> {
    fn default() -> Self {
        Self {
            received: RefCell::new(Vec::new()),
        }
    }
}

impl<T> SilentHandler<T> {
    /// Creates a new [`SilentHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors received so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.received.borrow().len()
    }

    /// Consumes the handler and returns the received errors in order.
    #[must_use]
    pub fn into_received(self) -> Vec<T> {
        self.received.into_inner()
    }
}

impl<T> Handler<T> for SilentHandler<T> {
    fn receive<E: Into<T>>(&self, error: E) {
        self.received.borrow_mut().push(error.into());
    }
}

/// A handler that discards every received error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive<E: Into<T>>(&self, _error: E) {}
}
