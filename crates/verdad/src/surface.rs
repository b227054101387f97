//! The rendered-surface contract.
//!
//! The application under test is the exclusive collaborator behind
//! [`Surface`]: a DOM-like tree of elements addressable by stable semantic
//! identifiers, with text-based rendering of currency and counts. The
//! verification core only ever reads snapshots and issues clicks/fills
//! through this trait; it never sees the application's own state.

use crate::locator::Selector;
use crate::result::VerdadResult;

/// Opaque handle to one element in the current render.
///
/// Ids are only stable within a single render; the session re-queries on
/// every interaction, so callers never hold one across a re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// Structural kind of a rendered element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// One entity instance in a list (a row/region)
    ListItem,
    /// An action control
    Button,
    /// A form input
    Input,
    /// Plain rendered text (badges, totals, headings)
    Text,
}

/// Snapshot of one rendered element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSnapshot {
    /// Handle for interactions within the same render
    pub id: NodeId,
    /// Structural kind
    pub kind: NodeKind,
    /// Stable semantic identifier, if the element carries one
    pub test_id: Option<String>,
    /// Rendered text; for rows, the concatenated text of the whole region
    pub text: String,
    /// Whether the element accepts interaction
    pub enabled: bool,
}

impl NodeSnapshot {
    /// Does this element match the selector?
    #[must_use]
    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::TestId(id) => self.test_id.as_deref() == Some(id),
            Selector::TestIdPrefix(prefix) => self
                .test_id
                .as_deref()
                .is_some_and(|t| t.starts_with(prefix.as_str())),
            Selector::Rows => self.kind == NodeKind::ListItem,
            Selector::RowWithText(text) => {
                self.kind == NodeKind::ListItem && self.text.contains(text.as_str())
            }
            Selector::Buttons => self.kind == NodeKind::Button,
            Selector::ButtonWithLabel(label) => {
                self.kind == NodeKind::Button && self.text == *label
            }
        }
    }
}

/// The rendered surface of the application under test.
///
/// `query` enumerates matches in on-screen (DOM) order. Interactions go
/// through handles returned by the most recent query; the surface may
/// re-render on every interaction.
pub trait Surface {
    /// All elements of the current render matching the selector, in DOM order
    fn query(&self, selector: &Selector) -> Vec<NodeSnapshot>;

    /// Matching descendants of `scope`, in DOM order
    fn query_within(&self, scope: NodeId, selector: &Selector) -> Vec<NodeSnapshot>;

    /// Click an element.
    ///
    /// # Errors
    ///
    /// Returns an interaction error if the handle is stale or the element
    /// is disabled.
    fn click(&mut self, node: NodeId) -> VerdadResult<()>;

    /// Type text into a form input, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an interaction error if the handle is stale or the element
    /// is not an input.
    fn fill(&mut self, node: NodeId, text: &str) -> VerdadResult<()>;
}
