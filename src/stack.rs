//! LIFO bookkeeping for the locator
//!
//! The locator keeps two of these: one of in-progress commands (one per
//! substitution level) and one of the delimiters that opened each level.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("empty stack")]
    EmptyStack,
    #[error("stack holds fewer than two entries")]
    InsufficientDepth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Stack { items: Vec::new() }
    }
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::EmptyStack)
    }

    pub fn top(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::EmptyStack)
    }

    /// The two most recent entries as `(below, top)`, without removing them.
    pub fn top2(&self) -> Result<(&T, &T), StackError> {
        match self.items.as_slice() {
            [.., below, top] => Ok((below, top)),
            _ => Err(StackError::InsufficientDepth),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
