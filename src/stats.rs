//! Introspection over the tree's internal structure: how many nodes of each
//! variant exist, how densely populated they are, and how deep the tree is.
//! This is what capacity-transition tests observe, and it is useful when
//! sizing an index for a workload.

use std::collections::HashMap;

use crate::node::{Content, Node};

#[derive(Debug, Default)]
pub struct NodeStats {
    /// Child capacity of this node variant.
    pub width: usize,
    pub total_nodes: usize,
    pub total_children: usize,
    /// Mean occupancy: `total_children / (width * total_nodes)`.
    pub density: f64,
}

#[derive(Debug, Default)]
pub struct TreeStats {
    /// Per-variant stats, keyed by variant name ("Node4" .. "Node256").
    pub node_stats: HashMap<&'static str, NodeStats>,
    /// Number of stored entries, including terminal leaves held by inner
    /// nodes.
    pub num_values: usize,
    pub num_inner_nodes: usize,
    pub max_height: usize,
    pub total_density: f64,
}

pub(crate) fn update_tree_stats<V>(stats: &mut TreeStats, node: &Node<V>, height: usize) {
    stats.max_height = stats.max_height.max(height);

    let (node_type_name, capacity) = match &node.content {
        Content::Node4(_) => ("Node4", 4),
        Content::Node16(_) => ("Node16", 16),
        Content::Node48(_) => ("Node48", 48),
        Content::Node256(_) => ("Node256", 256),
        Content::Leaf(_) => {
            stats.num_values += 1;
            return;
        }
    };

    stats.num_inner_nodes += 1;
    if node.terminal.is_some() {
        stats.num_values += 1;
    }

    let entry = stats.node_stats.entry(node_type_name).or_insert(NodeStats {
        width: capacity,
        ..Default::default()
    });
    entry.total_nodes += 1;
    entry.total_children += node.num_children();

    for (_, child) in node.iter() {
        update_tree_stats(stats, child, height + 1);
    }
}

pub(crate) fn finalize_tree_stats(stats: &mut TreeStats) {
    let mut total_children = 0;
    let mut total_width = 0;
    for ns in stats.node_stats.values_mut() {
        total_children += ns.total_children;
        total_width += ns.width * ns.total_nodes;
        ns.density = ns.total_children as f64 / (ns.width * ns.total_nodes) as f64;
    }
    if total_width > 0 {
        stats.total_density = total_children as f64 / total_width as f64;
    }
}
