use petgraph::graph::NodeIndex;
use tracing::*;

use crate::BranchRecords;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberingOrder {
    Original,
    Reversed,
}

/// 1-based positions of the branched chain atoms, counted in `order`.
/// The result is ascending.
pub fn branch_locants(
    chain: &[NodeIndex],
    records: &BranchRecords,
    order: NumberingOrder,
) -> Vec<usize> {
    let has_branch = |atom: &NodeIndex| records.get(atom).is_some_and(|b| !b.is_empty());
    let numbered: Box<dyn Iterator<Item = &NodeIndex>> = match order {
        NumberingOrder::Original => Box::new(chain.iter()),
        NumberingOrder::Reversed => Box::new(chain.iter().rev()),
    };
    numbered
        .enumerate()
        .filter(|(_, atom)| has_branch(*atom))
        .map(|(i, _)| i + 1)
        .collect()
}

/// Lowest-locants rule at the "any substituent" level: keep the chain as is
/// unless numbering from the other end gives a lexicographically smaller
/// locant list.
pub fn choose_numbering(chain: &[NodeIndex], records: &BranchRecords) -> NumberingOrder {
    let forward = branch_locants(chain, records, NumberingOrder::Original);
    let backward = branch_locants(chain, records, NumberingOrder::Reversed);
    trace!("Locants forward {:?}, backward {:?}", forward, backward);
    if forward <= backward {
        NumberingOrder::Original
    } else {
        NumberingOrder::Reversed
    }
}

/// Returns the chain in the direction it should be numbered.
pub fn orient_chain(chain: &[NodeIndex], records: &BranchRecords) -> Vec<NodeIndex> {
    match choose_numbering(chain, records) {
        NumberingOrder::Original => chain.to_vec(),
        NumberingOrder::Reversed => chain.iter().rev().copied().collect(),
    }
}
