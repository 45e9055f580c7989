use petgraph::graph::NodeIndex;
use thiserror::Error;

use crate::{BranchRecords, Halogen};

/// Why a fragment got no name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NamingError {
    #[error("ring detected, the fragment is not named")]
    RingDetected,
    #[error("no carbon atoms found")]
    NoCarbon,
    #[error("formula is {len} characters long, the limit is {max}")]
    FormulaTooLong { len: usize, max: usize },
}

/// Ending appended to the chain stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    /// Plain alkane: `Butane`.
    Ane,
    /// Acid stem, completed by `oic acid`: `Butan`.
    An,
    /// Substituent form used for ether sides: `Butyl`.
    Yl,
}

impl Suffix {
    pub fn text(&self) -> &'static str {
        match self {
            Suffix::Ane => "ane",
            Suffix::An => "an",
            Suffix::Yl => "yl",
        }
    }
}

/// Stem for a chain of `length` carbons. Chains outside the table have no
/// stem yet and get an empty one, like long alkyl branches.
pub fn stem(length: usize) -> &'static str {
    match length {
        1 => "Meth",
        2 => "Eth",
        3 => "Prop",
        4 => "But",
        5 => "Pent",
        6 => "Hex",
        7 => "Hept",
        8 => "Oct",
        9 => "Non",
        10 => "Dec",
        _ => "",
    }
}

pub fn parent_name(length: usize, suffix: Suffix) -> String {
    format!("{}{}", stem(length), suffix.text())
}

/// Name of one branch. A halogen wins over the carbon count; unknown halogen
/// codes give `halo`. Alkyl branches longer than four carbons have no name
/// yet and format as an empty string.
pub fn format_branch_name(carbons: usize, halogen: u8) -> &'static str {
    if halogen > 0 {
        return Halogen::from_code(halogen).map_or("halo", |h| h.prefix());
    }
    match carbons {
        1 => "methyl",
        2 => "ethyl",
        3 => "propyl",
        4 => "butyl",
        _ => "",
    }
}

/// Prefix for `count` identical branches.
pub fn multiplier(count: usize) -> String {
    match count {
        0 | 1 => String::new(),
        2 => "di".to_string(),
        3 => "tri".to_string(),
        n => format!("{n}-"),
    }
}

/// `locant-name` tokens for every branch, sorted as plain strings.
///
/// The string sort puts locant `10` before `2`; chains long enough to hit
/// that are rare enough that the order is left as is.
pub fn substituent_tokens(chain: &[NodeIndex], records: &BranchRecords) -> Vec<String> {
    let mut tokens: Vec<String> = chain
        .iter()
        .enumerate()
        .flat_map(|(i, atom)| {
            records
                .get(atom)
                .into_iter()
                .flatten()
                .map(move |branch| format!("{}-{}", i + 1, branch.name()))
        })
        .collect();
    tokens.sort();
    tokens
}

/// Merges runs of consecutive tokens naming the same branch, e.g.
/// `2-methyl`, `3-methyl` into `(2,3)-dimethyl`.
pub fn combine_substituents(tokens: &[String]) -> Vec<String> {
    let split = |token: &str| -> (String, String) {
        match token.split_once('-') {
            Some((locant, name)) => (locant.to_string(), name.to_string()),
            None => (token.to_string(), String::new()),
        }
    };

    let mut combined = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let (locant, name) = split(&tokens[i]);
        let mut locants = vec![locant];
        while let Some(next) = tokens.get(i + 1) {
            let (next_locant, next_name) = split(next);
            if next_name != name {
                break;
            }
            locants.push(next_locant);
            i += 1;
        }

        if locants.len() > 1 {
            combined.push(format!(
                "({})-{}{}",
                locants.join(","),
                multiplier(locants.len()),
                name
            ));
        } else {
            combined.push(format!("{}-{}", locants[0], name));
        }
        i += 1;
    }
    combined
}

/// Builds the name of an oriented chain: the combined branch tokens joined by
/// `-`, followed directly by the stem and suffix.
pub fn synthesize_name(chain: &[NodeIndex], records: &BranchRecords, suffix: Suffix) -> String {
    let parent = parent_name(chain.len(), suffix);
    let tokens = substituent_tokens(chain, records);
    let prefix = combine_substituents(&tokens).join("-");
    format!("{}{}", prefix, parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Branch;

    fn chain(n: usize) -> Vec<NodeIndex> {
        (0..n).map(NodeIndex::new).collect()
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_parent_names() {
        let expected = [
            "Methane", "Ethane", "Propane", "Butane", "Pentane", "Hexane", "Heptane", "Octane",
            "Nonane", "Decane",
        ];
        for (i, name) in expected.iter().enumerate() {
            assert_eq!(parent_name(i + 1, Suffix::Ane), *name);
        }
        assert_eq!(parent_name(3, Suffix::An), "Propan");
        assert_eq!(parent_name(2, Suffix::Yl), "Ethyl");
        // No stem past ten carbons, only the suffix.
        assert_eq!(stem(11), "");
        assert_eq!(parent_name(11, Suffix::Ane), "ane");
        assert_eq!(parent_name(12, Suffix::An), "an");
        assert_eq!(parent_name(0, Suffix::Ane), "ane");
    }

    #[test]
    fn test_branch_names() {
        assert_eq!(format_branch_name(0, 1), "chloro");
        assert_eq!(format_branch_name(0, 2), "bromo");
        assert_eq!(format_branch_name(0, 3), "fluoro");
        assert_eq!(format_branch_name(0, 4), "iodo");
        assert_eq!(format_branch_name(0, 7), "halo");
        assert_eq!(format_branch_name(2, 3), "fluoro");
        assert_eq!(format_branch_name(1, 0), "methyl");
        assert_eq!(format_branch_name(4, 0), "butyl");
        assert_eq!(format_branch_name(5, 0), "");
    }

    #[test]
    fn test_combine_substituents() {
        assert_eq!(
            combine_substituents(&strings(&["2-methyl", "3-methyl"])),
            strings(&["(2,3)-dimethyl"])
        );
        assert_eq!(
            combine_substituents(&strings(&["2-chloro", "2-methyl", "3-methyl", "4-methyl"])),
            strings(&["2-chloro", "(2,3,4)-trimethyl"])
        );
        assert_eq!(
            combine_substituents(&strings(&["2-ethyl", "3-methyl", "4-methyl", "5-methyl", "6-methyl"])),
            strings(&["2-ethyl", "(3,4,5,6)-4-methyl"])
        );
        // Only consecutive tokens are merged.
        assert_eq!(
            combine_substituents(&strings(&["2-methyl", "3-chloro", "4-methyl"])),
            strings(&["2-methyl", "3-chloro", "4-methyl"])
        );
        assert!(combine_substituents(&[]).is_empty());
    }

    #[test]
    fn test_tokens_sort_as_strings() {
        let chain = chain(10);
        let records: BranchRecords = [
            (NodeIndex::new(1), vec![Branch::alkyl(1)]),
            (NodeIndex::new(9), vec![Branch::alkyl(1)]),
        ]
        .into_iter()
        .collect();
        assert_eq!(substituent_tokens(&chain, &records), strings(&["10-methyl", "2-methyl"]));
    }

    #[test]
    fn test_synthesize_name() {
        let chain = chain(4);
        assert_eq!(synthesize_name(&chain, &BranchRecords::new(), Suffix::Ane), "Butane");

        let records: BranchRecords = [
            (NodeIndex::new(1), vec![Branch::alkyl(1)]),
            (NodeIndex::new(2), vec![Branch::alkyl(1)]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            synthesize_name(&chain, &records, Suffix::Ane),
            "(2,3)-dimethylButane"
        );

        let records: BranchRecords = [
            (NodeIndex::new(0), vec![Branch::halogen(Halogen::Bromine)]),
            (NodeIndex::new(2), vec![Branch::alkyl(2), Branch::alkyl(1)]),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            synthesize_name(&chain, &records, Suffix::Yl),
            "1-bromo-3-ethyl-3-methylButyl"
        );
    }

    #[test]
    fn test_long_chain_keeps_branches() {
        let chain = chain(12);
        let records: BranchRecords = [(NodeIndex::new(2), vec![Branch::alkyl(1)])].into_iter().collect();
        assert_eq!(synthesize_name(&chain, &records, Suffix::Ane), "3-methylane");
    }

    #[test]
    fn test_unnamed_long_branch() {
        let chain = chain(9);
        let records: BranchRecords = [(NodeIndex::new(4), vec![Branch::alkyl(5)])].into_iter().collect();
        assert_eq!(synthesize_name(&chain, &records, Suffix::Ane), "5-Nonane");
    }
}
