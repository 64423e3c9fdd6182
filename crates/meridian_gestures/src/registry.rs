//! Ordered handler registry with allow-lists

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::handler::SharedHandler;

/// Names a handler may stay active alongside
pub type AllowList = SmallVec<[String; 2]>;

/// A registered handler
pub struct RegisteredHandler {
    pub name: String,
    pub handler: SharedHandler,
    pub allowed: AllowList,
}

impl RegisteredHandler {
    /// Whether another active handler forbids this one from running
    ///
    /// `active` holds the names accumulated so far in the current pass.
    pub fn is_blocked_by<'a>(&self, active: impl IntoIterator<Item = &'a str>) -> bool {
        active
            .into_iter()
            .filter(|name| *name != self.name)
            .any(|name| !self.allowed.iter().any(|allowed| allowed == name))
    }
}

/// Handlers in registration order
///
/// Registration order is the only priority: a handler can be blocked by
/// those registered before it, never by later ones.
#[derive(Default)]
pub struct HandlerRegistry {
    entries: Vec<RegisteredHandler>,
    by_name: FxHashMap<String, usize>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under a unique `name`
    pub fn add<I, S>(&mut self, name: impl Into<String>, handler: SharedHandler, allowed: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        debug_assert!(
            !self.by_name.contains_key(&name),
            "handler {name:?} registered twice"
        );
        self.by_name.insert(name.clone(), self.entries.len());
        self.entries.push(RegisteredHandler {
            name,
            handler,
            allowed: allowed.into_iter().map(Into::into).collect(),
        });
    }

    pub fn get(&self, name: &str) -> Option<&SharedHandler> {
        self.by_name.get(name).map(|&i| &self.entries[i].handler)
    }

    /// Whether the named handler is mid-gesture; unknown names are inactive
    pub fn is_handler_active(&self, name: &str) -> bool {
        self.get(name).map_or(false, |h| h.borrow().is_active())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegisteredHandler> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
