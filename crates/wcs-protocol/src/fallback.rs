//! Ordered fallback chain: try each level in turn, first hit wins.
//!
//! Both the format and the CRS resolvers follow the same
//! "layer level, else service level, else log and omit" rule; this type is
//! that rule, parameterized by the lookup run at each level.

use tracing::debug;

type Lookup<'a, T> = Box<dyn FnOnce() -> Option<T> + 'a>;

pub struct FallbackChain<'a, T> {
    subject: &'a str,
    steps: Vec<(&'static str, Lookup<'a, T>)>,
}

impl<'a, T> FallbackChain<'a, T> {
    /// Start a chain resolving `subject` (used in diagnostics only).
    pub fn new(subject: &'a str) -> Self {
        Self {
            subject,
            steps: Vec::new(),
        }
    }

    /// Append a level. Levels are tried in insertion order.
    pub fn then(mut self, level: &'static str, lookup: impl FnOnce() -> Option<T> + 'a) -> Self {
        self.steps.push((level, Box::new(lookup)));
        self
    }

    /// Run the levels until one yields a value.
    pub fn resolve(self) -> Option<T> {
        let subject = self.subject;
        for (level, lookup) in self.steps {
            if let Some(value) = lookup() {
                debug!(subject = %subject, level = level, "Resolved");
                return Some(value);
            }
        }
        debug!(subject = %subject, "Missing required information, nothing resolved at any level");
        None
    }
}
