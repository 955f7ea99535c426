//! Types representing nodes within a JSON object
use std::slice::Iter;

use serde::Serialize;
use serde_json::Value;

use crate::path::NormalizedPath;

/// A list of nodes resulting from a JSONPath query
///
/// Each node within the list is a borrowed reference to the node in the original
/// [`serde_json::Value`] that was queried.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Clone)]
pub struct NodeList<'a>(pub(crate) Vec<&'a Value>);

impl<'a> NodeList<'a> {
    /// Extract _at most_ one node from a [`NodeList`]
    ///
    /// This is intended for queries that are expected to optionally yield a single node.
    ///
    /// # Usage
    /// ```rust
    /// # use serde_json::json;
    /// # use jsonpath_rfc9535::JsonPath;
    /// # use jsonpath_rfc9535::AtMostOneError;
    /// # fn main() -> Result<(), jsonpath_rfc9535::ParseError> {
    /// let value = json!({"foo": ["bar", "baz"]});
    /// # {
    /// let path = JsonPath::parse("$.foo[0]")?;
    /// let node = path.query(&value).at_most_one().unwrap();
    /// assert_eq!(node, Some(&json!("bar")));
    /// # }
    /// # {
    /// let path = JsonPath::parse("$.foo.*")?;
    /// let error = path.query(&value).at_most_one().unwrap_err();
    /// assert!(matches!(error, AtMostOneError(2)));
    /// # }
    /// # Ok(())
    /// # }
    /// ```
    pub fn at_most_one(&self) -> Result<Option<&'a Value>, AtMostOneError> {
        if self.0.is_empty() {
            Ok(None)
        } else if self.0.len() > 1 {
            Err(AtMostOneError(self.0.len()))
        } else {
            Ok(self.0.first().copied())
        }
    }

    /// Extract _exactly_ one node from a [`NodeList`]
    ///
    /// This is intended for queries that are expected to yield exactly one node.
    pub fn exactly_one(&self) -> Result<&'a Value, ExactlyOneError> {
        if self.0.is_empty() {
            Err(ExactlyOneError::Empty)
        } else if self.0.len() > 1 {
            Err(ExactlyOneError::MoreThanOne(self.0.len()))
        } else {
            Ok(self.0.first().unwrap())
        }
    }

    /// Extract all nodes yielded by the query.
    ///
    /// This is intended for queries that are expected to yield zero or more nodes.
    pub fn all(self) -> Vec<&'a Value> {
        self.0
    }

    /// Get the length of a [`NodeList`]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if a [NodeList] is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator over a [`NodeList`]
    ///
    /// Note that [`NodeList`] also implements [`IntoIterator`].
    pub fn iter(&self) -> Iter<'_, &Value> {
        self.0.iter()
    }

    /// Returns the first node in the [`NodeList`], or `None` if it is empty
    pub fn first(&self) -> Option<&'a Value> {
        self.0.first().copied()
    }

    /// Returns the last node in the [`NodeList`], or `None` if it is empty
    pub fn last(&self) -> Option<&'a Value> {
        self.0.last().copied()
    }

    /// Returns the node at the given index in the [`NodeList`], or `None` if the given index is
    /// out of bounds.
    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.0.get(index).copied()
    }
}

/// Error produced when expecting no more than one node from a query
#[derive(Debug, thiserror::Error)]
#[error("nodelist expected to contain at most one entry, but instead contains {0} entries")]
pub struct AtMostOneError(pub usize);

/// Error produced when expecting exactly one node from a query
#[derive(Debug, thiserror::Error)]
pub enum ExactlyOneError {
    /// The query resulted in an empty [`NodeList`]
    #[error("nodelist expected to contain one entry, but is empty")]
    Empty,
    /// The query resulted in a [`NodeList`] containing more than one node
    #[error("nodelist expected to contain one entry, but instead contains {0} entries")]
    MoreThanOne(usize),
}

impl ExactlyOneError {
    /// Check that it is the `Empty` variant
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Check that it is the `MoreThanOne` variant
    pub fn is_more_than_one(&self) -> bool {
        self.as_more_than_one().is_some()
    }

    /// Extract the number of nodes, if it was more than one, or `None` otherwise
    pub fn as_more_than_one(&self) -> Option<usize> {
        match self {
            ExactlyOneError::Empty => None,
            ExactlyOneError::MoreThanOne(u) => Some(*u),
        }
    }
}

impl<'a> From<Vec<&'a Value>> for NodeList<'a> {
    fn from(nodes: Vec<&'a Value>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for NodeList<'a> {
    type Item = &'a Value;

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A single node produced by a [location-tracking query][crate::spec::query::Queryable::query_located],
/// pairing the node itself with the [`NormalizedPath`] of the location it was found at.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct LocatedNode<'a> {
    pub(crate) loc: NormalizedPath<'a>,
    pub(crate) node: &'a Value,
}

impl<'a> LocatedNode<'a> {
    /// The location of this node, as a [`NormalizedPath`]
    pub fn location(&self) -> &NormalizedPath<'a> {
        &self.loc
    }

    /// Take ownership of this node's [`NormalizedPath`]
    pub fn to_location(&self) -> NormalizedPath<'a> {
        self.loc.clone()
    }

    /// The node itself
    pub fn node(&self) -> &'a Value {
        self.node
    }
}

/// A list of [`LocatedNode`]s resulting from a location-tracking JSONPath query
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct LocatedNodeList<'a>(pub(crate) Vec<LocatedNode<'a>>);

impl<'a> LocatedNodeList<'a> {
    /// Extract _at most_ one [`LocatedNode`] from this list
    pub fn at_most_one(&self) -> Result<Option<&LocatedNode<'a>>, AtMostOneError> {
        if self.0.is_empty() {
            Ok(None)
        } else if self.0.len() > 1 {
            Err(AtMostOneError(self.0.len()))
        } else {
            Ok(self.0.first())
        }
    }

    /// Extract _exactly_ one [`LocatedNode`] from this list
    pub fn exactly_one(&self) -> Result<&LocatedNode<'a>, ExactlyOneError> {
        if self.0.is_empty() {
            Err(ExactlyOneError::Empty)
        } else if self.0.len() > 1 {
            Err(ExactlyOneError::MoreThanOne(self.0.len()))
        } else {
            Ok(self.0.first().unwrap())
        }
    }

    /// Extract all [`LocatedNode`]s yielded by the query
    pub fn all(self) -> Vec<LocatedNode<'a>> {
        self.0
    }

    /// Get the length of this list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if this list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get an iterator over the [`LocatedNode`]s in this list
    pub fn iter(&self) -> Iter<'_, LocatedNode<'a>> {
        self.0.iter()
    }

    /// Returns the first [`LocatedNode`] in the list, or `None` if it is empty
    pub fn first(&self) -> Option<&LocatedNode<'a>> {
        self.0.first()
    }

    /// Returns the last [`LocatedNode`] in the list, or `None` if it is empty
    pub fn last(&self) -> Option<&LocatedNode<'a>> {
        self.0.last()
    }

    /// Returns the [`LocatedNode`] at the given index, or `None` if the index is out of bounds
    pub fn get(&self, index: usize) -> Option<&LocatedNode<'a>> {
        self.0.get(index)
    }

    /// Project this list down to just the nodes, discarding their locations
    pub fn nodes(&self) -> Nodes<'a> {
        Nodes(self.0.iter().map(|ln| ln.node).collect())
    }

    /// Project this list down to just the locations, discarding the nodes
    pub fn locations(&self) -> Locations<'a> {
        Locations(self.0.iter().map(|ln| ln.loc.clone()).collect())
    }

    /// Remove entries that are equal, both in location and in node value, to an entry earlier in
    /// the list, preserving the relative order of the remaining entries.
    pub fn dedup(mut self) -> Self {
        let mut seen: Vec<&LocatedNode<'a>> = Vec::with_capacity(self.0.len());
        self.0.retain(|ln| {
            if seen.iter().any(|s| s.loc == ln.loc && s.node == ln.node) {
                false
            } else {
                seen.push(ln);
                true
            }
        });
        self
    }

    /// Remove entries that share a location with an entry earlier in the list, preserving the
    /// relative order of the remaining entries.
    ///
    /// This is a cheaper alternative to [`dedup`][Self::dedup] for queries where distinct
    /// locations are known to always carry distinct nodes.
    pub fn dedup_by_index(mut self) -> Self {
        let mut seen: Vec<&NormalizedPath<'a>> = Vec::with_capacity(self.0.len());
        self.0.retain(|ln| {
            if seen.iter().any(|s| **s == ln.loc) {
                false
            } else {
                seen.push(&ln.loc);
                true
            }
        });
        self
    }
}

impl<'a> IntoIterator for LocatedNodeList<'a> {
    type Item = LocatedNode<'a>;

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> From<Vec<LocatedNode<'a>>> for LocatedNodeList<'a> {
    fn from(nodes: Vec<LocatedNode<'a>>) -> Self {
        Self(nodes)
    }
}

impl<'a> Serialize for LocatedNodeList<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for ln in &self.0 {
            seq.serialize_element(ln.node)?;
        }
        seq.end()
    }
}

/// The nodes projected out of a [`LocatedNodeList`], discarding their locations
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Nodes<'a>(Vec<&'a Value>);

impl<'a> Nodes<'a> {
    /// Get an iterator over the nodes
    pub fn iter(&self) -> Iter<'_, &Value> {
        self.0.iter()
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no nodes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for Nodes<'a> {
    type Item = &'a Value;

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// The locations projected out of a [`LocatedNodeList`], discarding their nodes
#[derive(Debug, Default, Eq, PartialEq, Clone)]
pub struct Locations<'a>(Vec<NormalizedPath<'a>>);

impl<'a> Locations<'a> {
    /// Get an iterator over the locations
    pub fn iter(&self) -> Iter<'_, NormalizedPath<'a>> {
        self.0.iter()
    }

    /// Get the number of locations
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no locations
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for Locations<'a> {
    type Item = NormalizedPath<'a>;

    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{LocatedNode, LocatedNodeList, NodeList};
    use crate::path::{NormalizedPath, PathElement};

    #[test]
    fn test_send() {
        fn assert_send<T: Send>() {}
        assert_send::<NodeList>();
        assert_send::<LocatedNodeList>();
    }

    #[test]
    fn test_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<NodeList>();
        assert_sync::<LocatedNodeList>();
    }

    #[test]
    fn located_node_list_dedup_by_index() {
        let v = serde_json::json!(1);
        let mut path = NormalizedPath::default();
        path.push(PathElement::from(0usize));
        let list = LocatedNodeList(vec![
            LocatedNode {
                loc: path.clone(),
                node: &v,
            },
            LocatedNode {
                loc: path,
                node: &v,
            },
        ]);
        assert_eq!(list.dedup_by_index().len(), 1);
    }
}
