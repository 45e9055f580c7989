use std::collections::{BTreeMap, HashSet};

use petgraph::graph::NodeIndex;
use tracing::*;

use crate::{format_branch_name, Adjacency, Halogen, Label, MolecularGraph};

/// A substituent hanging off one chain atom.
///
/// `carbons == 0` marks a halogen-only entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub carbons: usize,
    pub halogen: Option<Halogen>,
}

impl Branch {
    pub fn alkyl(carbons: usize) -> Self {
        Self { carbons, halogen: None }
    }

    pub fn halogen(halogen: Halogen) -> Self {
        Self { carbons: 0, halogen: Some(halogen) }
    }

    /// Halogen kind code: 0 for none, otherwise 1..=4.
    pub fn halogen_code(&self) -> u8 {
        self.halogen.map_or(0, |h| h.code())
    }

    pub fn name(&self) -> &'static str {
        format_branch_name(self.carbons, self.halogen_code())
    }
}

/// Branches per chain atom. Atoms without branches have no entry.
pub type BranchRecords = BTreeMap<NodeIndex, Vec<Branch>>;

/// Records every substituent of every atom on `chain`, in chain order.
///
/// A halogen bonded directly to a chain atom gives one halogen-only entry;
/// each non-chain, non-ignored neighbor gives one entry of its own.
pub fn classify_branches(
    graph: &MolecularGraph,
    adjacency: &Adjacency,
    chain: &[NodeIndex],
) -> BranchRecords {
    let on_chain: HashSet<NodeIndex> = chain.iter().copied().collect();
    let mut records = BranchRecords::new();

    for &atom in chain {
        let node = graph.atom(atom);
        if node.halogen_bonds() > 0 {
            let halogen = node.principal_halogen().unwrap_or(Halogen::Chlorine);
            records.entry(atom).or_default().push(Branch::halogen(halogen));
        }

        for &neighbor in adjacency.neighbors(atom) {
            if on_chain.contains(&neighbor) || adjacency.is_ignored(neighbor) {
                continue;
            }
            let branch = count_branch_carbons(graph, adjacency, neighbor, &on_chain);
            records.entry(atom).or_default().push(branch);
        }
    }

    for (atom, branches) in &records {
        debug!("Branches on {}: {:?}", graph.tag(*atom), branches);
    }
    records
}

/// Walks the subtree rooted at `start` without crossing the chain, counting
/// plain carbons and remembering the first halogen atom met.
pub fn count_branch_carbons(
    graph: &MolecularGraph,
    adjacency: &Adjacency,
    start: NodeIndex,
    chain: &HashSet<NodeIndex>,
) -> Branch {
    let mut visited = HashSet::from([start]);
    let mut stack = vec![start];
    let mut branch = Branch::alkyl(0);

    while let Some(node) = stack.pop() {
        let label = graph.atom(node).label();
        match label {
            Label::Carbon => branch.carbons += 1,
            _ => {
                if branch.halogen.is_none() {
                    branch.halogen = label.halogen();
                }
            }
        }
        trace!("Visited {} in branch: {:?}", graph.tag(node), branch);

        for &neighbor in adjacency.neighbors(node) {
            if !chain.contains(&neighbor) && visited.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    branch
}
