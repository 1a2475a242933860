use core::slice;

use crate::attributes::AttributeValue;
use crate::error::DomError;
use crate::node::Node;

/// Lazy pre-order search over a node's descendants.
///
/// Created by [`Node::filter`]. Each item is a matching node, or a single
/// [`DomError::DepthExceeded`] after which the iterator is exhausted.
#[derive(Debug)]
pub struct Filter<'a, P> {
    /// One child iterator per open level, paired with that level's depth.
    levels: Vec<(slice::Iter<'a, Node>, usize)>,
    predicate: P,
    recursive: bool,
    max_depth: usize,
}

impl<'a, P> Iterator for Filter<'a, P>
where
    P: FnMut(&Node) -> bool,
{
    type Item = Result<&'a Node, DomError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (children, depth) = self.levels.last_mut()?;
            let depth = *depth;
            if depth > self.max_depth {
                self.levels.clear();
                return Some(Err(DomError::DepthExceeded {
                    operation: "filter",
                    limit: self.max_depth,
                }));
            }
            let Some(child) = children.next() else {
                let _ = self.levels.pop();
                continue;
            };
            if self.recursive {
                self.levels.push((child.children().iter(), depth + 1));
            }
            if (self.predicate)(child) {
                return Some(Ok(child));
            }
        }
    }
}

impl Node {
    /// Children matching `predicate`, and with `recursive` their
    /// descendants too, in pre-order.
    ///
    /// A level deeper than `max_depth` yields [`DomError::DepthExceeded`]
    /// when the iteration reaches it.
    pub fn filter<P>(&self, predicate: P, recursive: bool, max_depth: usize) -> Filter<'_, P>
    where
        P: FnMut(&Self) -> bool,
    {
        Filter {
            levels: vec![(self.children().iter(), 0)],
            predicate,
            recursive,
            max_depth,
        }
    }

    /// The first node, this one included, whose attribute `name` equals
    /// `value`, searching depth-first.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::DepthExceeded`] if the search descends past
    /// `max_depth` before finding a match.
    pub fn find_by_attribute(
        &self,
        name: &str,
        value: &AttributeValue,
        max_depth: usize,
    ) -> Result<Option<&Self>, DomError> {
        find_in(self, name, value, 0, max_depth)
    }
}

fn find_in<'a>(
    node: &'a Node,
    name: &str,
    value: &AttributeValue,
    depth: usize,
    max_depth: usize,
) -> Result<Option<&'a Node>, DomError> {
    if depth > max_depth {
        return Err(DomError::DepthExceeded {
            operation: "find_by_attribute",
            limit: max_depth,
        });
    }
    if node.get_attribute(name) == Some(value) {
        return Ok(Some(node));
    }
    for child in node.children() {
        if let Some(found) = find_in(child, name, value, depth + 1, max_depth)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}
