use std::collections::HashSet;

use petgraph::graph::NodeIndex;
use tracing::*;

use crate::{Label, MolecularGraph};

/// Plain adjacency over the atoms of one fragment, with the atoms that may
/// never extend the principal chain marked as ignored.
///
/// Neighbor lists follow bond creation order, which makes chain selection
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    neighbors: Vec<Vec<NodeIndex>>,
    ignored: HashSet<NodeIndex>,
    carboxyls: Vec<NodeIndex>,
}

impl Adjacency {
    pub fn from_graph(graph: &MolecularGraph) -> Self {
        let mut neighbors = vec![Vec::new(); graph.atom_count()];
        for (a, b) in graph.bonds() {
            neighbors[a.index()].push(b);
            neighbors[b.index()].push(a);
        }
        let ignored = graph
            .atom_ids()
            .filter(|&id| !graph.atom(id).label().is_carbon_rooted())
            .collect();
        let carboxyls = graph
            .atom_ids()
            .filter(|&id| graph.atom(id).label() == &Label::Carboxyl)
            .collect();
        Self {
            neighbors,
            ignored,
            carboxyls,
        }
    }

    pub fn neighbors(&self, node: NodeIndex) -> &[NodeIndex] {
        self.neighbors
            .get(node.index())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_ignored(&self, node: NodeIndex) -> bool {
        self.ignored.contains(&node)
    }

    /// Atoms that may sit on the principal chain, in id order.
    pub fn carbons(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (0..self.neighbors.len())
            .map(NodeIndex::new)
            .filter(|id| !self.ignored.contains(id))
    }

    pub fn carboxyls(&self) -> &[NodeIndex] {
        &self.carboxyls
    }
}

/// Longest simple path starting at `start` that never enters an ignored atom.
///
/// This enumerates simple paths depth-first with backtracking, so an atom may
/// be revisited along a different branch. Among equally long paths the first
/// one reached in neighbor order wins. The frontier is an explicit stack, so
/// memory is bounded by the number of atoms, but the running time is
/// exponential in the branching factor in the worst case.
pub fn longest_path_from(adjacency: &Adjacency, start: NodeIndex) -> Vec<NodeIndex> {
    let mut best = vec![start];
    let mut path = vec![start];
    let mut on_path = HashSet::from([start]);
    // Next neighbor to try for each atom on `path`.
    let mut cursors = vec![0usize];

    loop {
        let Some(&node) = path.last() else { break };
        let Some(cursor) = cursors.last_mut() else { break };
        let next = adjacency.neighbors(node).get(*cursor).copied();
        *cursor += 1;

        match next {
            Some(neighbor) => {
                if on_path.contains(&neighbor) || adjacency.is_ignored(neighbor) {
                    continue;
                }
                path.push(neighbor);
                on_path.insert(neighbor);
                cursors.push(0);
                if path.len() > best.len() {
                    best = path.clone();
                }
            }
            None => {
                path.pop();
                cursors.pop();
                on_path.remove(&node);
            }
        }
    }

    best
}

/// Double sweep: the far end of the longest path from `start` is one end of
/// the principal chain, and the longest path from there is the chain itself.
///
/// Exact on trees; only a heuristic once a cycle exists.
pub fn find_longest_chain(adjacency: &Adjacency, start: NodeIndex) -> Vec<NodeIndex> {
    let first = longest_path_from(adjacency, start);
    let far_end = first.last().copied().unwrap_or(start);
    longest_path_from(adjacency, far_end)
}

/// The longest path leaving any carboxyl group, with the carboxyl first.
pub fn find_carboxyl_chain(adjacency: &Adjacency, carboxyls: &[NodeIndex]) -> Vec<NodeIndex> {
    let mut longest: Vec<NodeIndex> = Vec::new();
    for &carboxyl in carboxyls {
        let path = longest_path_from(adjacency, carboxyl);
        if path.len() > longest.len() {
            longest = path;
        }
    }
    longest
}

/// The chain a fragment is named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalChain {
    pub atoms: Vec<NodeIndex>,
    /// Set when the chain starts at a carboxyl group, which fixes its numbering.
    pub anchored: bool,
}

/// Picks the principal chain: anchored at a carboxyl group when one exists,
/// otherwise the longest carbon path. `None` when there is no carbon at all.
pub fn principal_chain(adjacency: &Adjacency) -> Option<PrincipalChain> {
    if !adjacency.carboxyls().is_empty() {
        let atoms = find_carboxyl_chain(adjacency, adjacency.carboxyls());
        debug!("Carboxyl-anchored chain: {:?}", atoms);
        return Some(PrincipalChain {
            atoms,
            anchored: true,
        });
    }

    let start = adjacency.carbons().next()?;
    let atoms = find_longest_chain(adjacency, start);
    debug!("Longest carbon chain from {:?}: {:?}", start, atoms);
    Some(PrincipalChain {
        atoms,
        anchored: false,
    })
}
