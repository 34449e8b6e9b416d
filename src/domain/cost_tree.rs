use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostNode {
    pub label: String,
    /// Empty for roots.
    pub parent: String,
    pub value: f64,
}

impl CostNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostTree {
    pub nodes: Vec<CostNode>,
}

impl CostTree {
    pub fn roots(&self) -> impl Iterator<Item = &CostNode> {
        self.nodes.iter().filter(|node| node.is_root())
    }

    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a CostNode> {
        self.nodes.iter().filter(move |node| node.parent == parent)
    }
}
