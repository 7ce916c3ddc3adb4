//! Scope chain shared by the validator and the generator
//!
//! A stack of name → value frames. The root frame is the function scope;
//! every conditional arm or loop body pushes a child frame. Lookup walks
//! from the innermost frame outwards, and inserting into a frame that
//! already holds the name simply rebinds it for later lookups.
//!
//! The validator stores type information per name, the generator stores
//! local slot ids, so the chain is generic over its value type.

use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Environment<V> {
    frames: Vec<HashMap<String, V>>,
}

impl<V> Environment<V> {
    /// Create an environment holding only the root frame
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    /// Enter a child scope
    pub fn push_scope(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Leave the current child scope; the root frame is never popped
    pub fn pop_scope(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Bind `name` in the current frame, shadowing any outer or earlier binding
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.into(), value);
        }
    }

    /// Look up `name`, innermost frame first
    pub fn lookup(&self, name: &str) -> Option<&V> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Number of frames, including the root
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl<V> Default for Environment<V> {
    fn default() -> Self {
        Self::new()
    }
}
