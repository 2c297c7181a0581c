//! Selector resolver.
//!
//! Turns an ordered chain of component references into a descendant query over
//! the marker attribute. Only the registry is consulted; nothing here looks at
//! source code or rendered output.

use std::fmt;

use crate::error::SelectError;
use crate::registry::{ComponentRef, IdentityRegistry};
use crate::tree::{find_chain, RenderedNode};

/// Descendant query built from a component chain.
///
/// Rendered as `[attr~="M1"] [attr~="M2"]`: each step is a word match on the
/// marker attribute, separated by the descendant combinator. Word matching lets
/// an element carry more than one marker when a composed wrapper adds its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    attribute: String,
    markers: Vec<String>,
}

impl Selector {
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    pub fn to_query(&self) -> String {
        self.to_string()
    }

    /// Nodes under `root` matched by this selector.
    pub fn find_all<N: RenderedNode>(&self, root: &N) -> Vec<N> {
        find_chain(root, &self.attribute, &self.markers)
    }

    pub fn count<N: RenderedNode>(&self, root: &N) -> usize {
        self.find_all(root).len()
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, marker) in self.markers.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "[{}~=\"{}\"]", self.attribute, marker)?;
        }
        Ok(())
    }
}

/// Builds the selector for `chain`, outermost component first.
///
/// Fails on the first reference with no registered marker, naming it and its
/// position in the chain.
pub fn select<'c, I>(registry: &IdentityRegistry, chain: I) -> Result<Selector, SelectError>
where
    I: IntoIterator<Item = &'c ComponentRef>,
{
    let mut markers = Vec::new();
    for (position, component) in chain.into_iter().enumerate() {
        match registry.lookup(component) {
            Some(marker) => markers.push(marker.to_string()),
            None => {
                tracing::debug!(component = %component, position, "unresolved component in selector chain");
                return Err(SelectError::Unresolved {
                    component: component.clone(),
                    position,
                });
            }
        }
    }

    if markers.is_empty() {
        return Err(SelectError::EmptyChain);
    }

    Ok(Selector {
        attribute: registry.attribute_name().to_string(),
        markers,
    })
}

/// One piece of a tagged-template style selector call.
#[derive(Debug, Clone, Copy)]
pub enum TemplatePart<'c> {
    Text(&'c str),
    Component(&'c ComponentRef),
}

/// Template form of [`select`]. Literal text between interpolations is ignored;
/// positions in errors count components only.
pub fn select_template(
    registry: &IdentityRegistry,
    parts: &[TemplatePart<'_>],
) -> Result<Selector, SelectError> {
    select(
        registry,
        parts.iter().filter_map(|part| match part {
            TemplatePart::Component(component) => Some(*component),
            TemplatePart::Text(_) => None,
        }),
    )
}

/// `select!(registry; A, B, C)` builds the selector for the chain `A B C`.
/// Accepts `ComponentRef` values or references to them.
#[macro_export]
macro_rules! select {
    ($registry:expr; $($component:expr),+ $(,)?) => {
        $crate::select(
            &$registry,
            [$(::std::borrow::Borrow::<$crate::ComponentRef>::borrow(&$component)),+],
        )
    };
}
