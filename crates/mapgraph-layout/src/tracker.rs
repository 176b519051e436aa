use mapgraph_core::VisualNode;
use rustc_hash::FxHashSet;

/// Ids of nodes already positioned by an earlier layout pass in the current map session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaidOutSet {
    ids: FxHashSet<String>,
}

impl LaidOutSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.extend(ids.into_iter().map(Into::into));
    }

    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids.clear();
        self.add(ids);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Tracked ids present in `nodes`: the anchors of a `new-only` pass.
    pub fn anchors_in(&self, nodes: &[VisualNode]) -> FxHashSet<String> {
        nodes
            .iter()
            .filter(|n| self.contains(&n.id))
            .map(|n| n.id.clone())
            .collect()
    }
}
