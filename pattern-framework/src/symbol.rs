use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::BTreeMap;

/// A node of a [`SymbolTable`].
#[derive(Debug, Default)]
pub(crate) struct TrieNode {
    pub(crate) children: BTreeMap<char, usize>,
    pub(crate) value: Option<Value>,
}

/// Trie of string keys to values, resolved by longest match.
#[derive(Debug)]
pub struct SymbolTable {
    nodes: Vec<TrieNode>,
}

impl SymbolTable {
    /// Index of the root node.
    pub(crate) const ROOT: usize = 0;

    /// Builds a table from `(key, value)` pairs. A repeated key keeps its
    /// last value; the empty key is rejected.
    pub fn new<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut table = Self {
            nodes: vec![TrieNode::default()],
        };
        for (key, value) in entries {
            table.insert(key.as_ref(), value.into())?;
        }
        Ok(table)
    }

    fn insert(&mut self, key: &str, value: Value) -> Result<()> {
        if key.is_empty() {
            return Err(Error::EmptySymbol);
        }
        let mut node = Self::ROOT;
        for ch in key.chars() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[node].value = Some(value);
        Ok(())
    }

    pub(crate) fn node(&self, index: usize) -> &TrieNode {
        &self.nodes[index]
    }

    /// Follows the edge labelled `ch` from `node`.
    pub(crate) fn step(&self, node: usize, ch: char) -> Option<usize> {
        self.nodes[node].children.get(&ch).copied()
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_rejects_empty_key() {
        let err = SymbolTable::new([("", 1)]).unwrap_err();
        assert_eq!(err, Error::EmptySymbol);
    }

    #[test]
    fn test_symbol_table_last_value_wins() {
        let table = SymbolTable::new([("ab", 1), ("ab", 2)]).unwrap();
        assert_eq!(table.len(), 1);
        let a = table.step(SymbolTable::ROOT, 'a').unwrap();
        let b = table.step(a, 'b').unwrap();
        assert_eq!(table.node(b).value, Some(Value::Int(2)));
        assert!(table.node(a).value.is_none());
    }
}
