//! The set of registered controllers.

use tracing::warn;

use crate::controller::Controller;
use crate::error::DispatchError;

/// Registered controllers in registration order.
///
/// Lookup is a linear scan and the first controller with a given name wins.
/// Registering a second controller under a taken name is allowed but the
/// newcomer is shadowed, which is logged.
#[derive(Debug, Default)]
pub struct Registry {
    controllers: Vec<Controller>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, controller: Controller) {
        if self.controllers.iter().any(|c| c.name() == controller.name()) {
            warn!(controller = controller.name(), "controller name already registered; the new one is shadowed");
        }
        self.controllers.push(controller);
    }

    /// First controller named exactly `name`.
    pub fn get(&self, name: &str) -> Result<&Controller, DispatchError> {
        self.controllers.iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| DispatchError::ControllerNotFound(name.to_owned()))
    }

    pub fn controllers(&self) -> &[Controller] { &self.controllers }

    pub fn len(&self) -> usize { self.controllers.len() }

    pub fn is_empty(&self) -> bool { self.controllers.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::request::Request;
    use http::Method;

    async fn noop(_req: Request) -> &'static str { "" }

    #[test]
    fn test_get_is_exact() {
        let mut registry = Registry::new();
        registry.register(Controller::new("users"));

        assert_eq!(registry.get("users").map(Controller::name), Ok("users"));
        assert_eq!(
            registry.get("Users").map(Controller::name),
            Err(DispatchError::ControllerNotFound("Users".into())),
        );
    }

    #[test]
    fn test_first_registered_wins() {
        let mut registry = Registry::new();
        registry.register(
            Controller::new("users").action(Action::new("first", Method::GET, &["{/}"], noop)),
        );
        registry.register(
            Controller::new("users").action(Action::new("second", Method::GET, &["{/}"], noop)),
        );

        assert_eq!(registry.len(), 2);
        let found = registry.get("users").map(|c| c.actions()[0].name());
        assert_eq!(found, Ok("first"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.get("anything").is_err());
    }
}
