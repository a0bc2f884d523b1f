//! Controllers: named, ordered groups of actions.

use crate::action::Action;

/// A named group of [`Action`]s, tried in registration order.
#[derive(Debug)]
pub struct Controller {
    name: String,
    actions: Vec<Action>,
}

impl Controller {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), actions: Vec::new() }
    }

    /// Appends an action. Returns `self` for chaining.
    pub fn action(mut self, action: Action) -> Self {
        self.register_action(action);
        self
    }

    pub fn register_action(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn actions(&self) -> &[Action] { &self.actions }
}
