//! Session handle shared by all page objects.
//!
//! One logical browser session drives a test: every component receives the
//! same [`Session`] explicitly (no ambient globals) and all calls are
//! sequential. Locator resolution happens here, lazily, against the live
//! surface.

use std::cell::RefCell;
use std::rc::Rc;

use crate::locator::Locator;
use crate::result::{VerdadError, VerdadResult};
use crate::step::StepScope;
use crate::surface::{NodeId, NodeSnapshot, Surface};
use crate::wait::{WaitOptions, Waiter};

/// Handle to the single logical session of one test
#[derive(Clone)]
pub struct Session {
    surface: Rc<RefCell<dyn Surface>>,
    options: WaitOptions,
    scope: StepScope,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("recorded_steps", &self.scope.len())
            .finish()
    }
}

impl Session {
    /// Create a session over a surface
    pub fn new(surface: impl Surface + 'static) -> Self {
        Self {
            surface: Rc::new(RefCell::new(surface)),
            options: WaitOptions::default(),
            scope: StepScope::new(),
        }
    }

    /// Replace the wait options (timeouts apply to every observing call)
    #[must_use]
    pub fn with_wait_options(mut self, options: WaitOptions) -> Self {
        self.options = options;
        self
    }

    /// The step scope all components of this session record into
    #[must_use]
    pub fn scope(&self) -> &StepScope {
        &self.scope
    }

    /// Run `body` as a named, nestable step
    pub fn step<T>(&self, label: &str, body: impl FnOnce() -> VerdadResult<T>) -> VerdadResult<T> {
        self.scope.run(label, body)
    }

    fn waiter(&self, locator: &Locator) -> Waiter {
        let opts = WaitOptions::new()
            .with_timeout(locator.options().timeout.as_millis() as u64)
            .with_poll_interval(locator.options().poll_interval.as_millis() as u64);
        Waiter::with_options(opts)
    }

    /// Resolve a locator to exactly one element of the current render.
    ///
    /// Polls until at least one match appears; with strict options (the
    /// default), more than one match is an immediate lookup error, and a
    /// lookup that never matches inside the wait budget reports zero
    /// matches rather than a bare timeout.
    pub fn resolve(&self, locator: &Locator) -> VerdadResult<NodeSnapshot> {
        self.resolve_in(None, locator)
    }

    /// Resolve a locator among the descendants of `scope`
    pub fn resolve_within(&self, scope: NodeId, locator: &Locator) -> VerdadResult<NodeSnapshot> {
        self.resolve_in(Some(scope), locator)
    }

    fn resolve_in(&self, scope: Option<NodeId>, locator: &Locator) -> VerdadResult<NodeSnapshot> {
        let strict = locator.options().strict;
        let selector = locator.selector();
        let outcome = self.waiter(locator).wait_for(&selector.describe(), || {
            let surface = self.surface.borrow();
            let matches = match scope {
                Some(id) => surface.query_within(id, selector),
                None => surface.query(selector),
            };
            match matches.len() {
                0 => None,
                1 => Some(Ok(matches.into_iter().next().unwrap())),
                n if strict => Some(Err(VerdadError::Lookup {
                    selector: selector.describe(),
                    matches: n,
                })),
                _ => Some(Ok(matches.into_iter().next().unwrap())),
            }
        });
        match outcome {
            Ok(result) => result,
            // zero matches for the whole budget is a lookup failure, not a
            // stability timeout
            Err(VerdadError::Timeout { .. }) => Err(VerdadError::Lookup {
                selector: selector.describe(),
                matches: 0,
            }),
            Err(other) => Err(other),
        }
    }

    /// All current matches in DOM order, without waiting.
    ///
    /// Read-only and restartable; used by scans that classify every row of
    /// the current render.
    #[must_use]
    pub fn query_all(&self, locator: &Locator) -> Vec<NodeSnapshot> {
        self.surface.borrow().query(locator.selector())
    }

    /// Current matches among the descendants of `scope`, without waiting
    #[must_use]
    pub fn query_all_within(&self, scope: NodeId, locator: &Locator) -> Vec<NodeSnapshot> {
        self.surface.borrow().query_within(scope, locator.selector())
    }

    /// Resolve and click
    pub fn click(&self, locator: &Locator) -> VerdadResult<()> {
        let node = self.resolve(locator)?;
        tracing::debug!(selector = %locator.selector(), "click");
        self.surface.borrow_mut().click(node.id)
    }

    /// Resolve within `scope` and click
    pub fn click_within(&self, scope: NodeId, locator: &Locator) -> VerdadResult<()> {
        let node = self.resolve_within(scope, locator)?;
        tracing::debug!(selector = %locator.selector(), "click");
        self.surface.borrow_mut().click(node.id)
    }

    /// Resolve and fill with text
    pub fn fill(&self, locator: &Locator, text: &str) -> VerdadResult<()> {
        let node = self.resolve(locator)?;
        tracing::debug!(selector = %locator.selector(), text, "fill");
        self.surface.borrow_mut().fill(node.id, text)
    }

    /// Rendered text of the resolved element
    pub fn text_of(&self, locator: &Locator) -> VerdadResult<String> {
        Ok(self.resolve(locator)?.text)
    }

    /// Wait until `condition` observes the expected render, bounded by the
    /// session's wait options.
    pub fn wait_until(
        &self,
        waiting_for: &str,
        condition: impl FnMut() -> bool,
    ) -> VerdadResult<()> {
        Waiter::with_options(self.options.clone()).wait_until(waiting_for, condition)
    }
}
