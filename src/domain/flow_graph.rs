use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: f64,
}

/// Directed cost flows between labeled nodes, addressed by index into `nodes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    pub nodes: Vec<String>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    pub fn total_flow(&self) -> f64 {
        self.links.iter().map(|link| link.value).sum()
    }

    pub fn inflow(&self, node: usize) -> f64 {
        self.links
            .iter()
            .filter(|link| link.target == node)
            .map(|link| link.value)
            .sum()
    }

    pub fn outflow(&self, node: usize) -> f64 {
        self.links
            .iter()
            .filter(|link| link.source == node)
            .map(|link| link.value)
            .sum()
    }
}
