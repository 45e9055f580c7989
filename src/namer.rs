use tracing::*;

use crate::{
    classify_branches, orient_chain, parse_formula, principal_chain, synthesize_name, Adjacency,
    MolecularGraph, NamingError, Suffix,
};

/// Marks the two fragments of an ether in a formula.
pub const ETHER_DELIMITER: &str = "-O-";

/// Knobs for [`name_formula`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingOptions {
    /// Longest formula accepted, in bytes. `None` accepts anything.
    pub max_formula_len: Option<usize>,
    /// Treat `-O-` as an ether link between two fragments.
    pub split_ethers: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            max_formula_len: Some(512),
            split_ethers: true,
        }
    }
}

impl NamingOptions {
    pub fn with_max_formula_len(mut self, max: Option<usize>) -> Self {
        self.max_formula_len = max;
        self
    }

    pub fn with_ether_splitting(mut self, split_ethers: bool) -> Self {
        self.split_ethers = split_ethers;
        self
    }
}

/// How a fragment's name will be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentRole {
    /// The whole molecule: `Butane`, `Propanoic acid`.
    Standalone,
    /// One side of an ether: `Butyl`.
    EtherSide,
}

/// Names one parsed fragment.
///
/// The graph is taken by value because the ring heuristic may add a bond to it.
pub fn name_graph(mut graph: MolecularGraph, role: FragmentRole) -> Result<String, NamingError> {
    graph.log_atoms();
    graph.log_bonds();

    if graph.detect_ring() || graph.has_cycle() {
        info!("Ring detected, not naming {:?}", graph);
        return Err(NamingError::RingDetected);
    }

    let adjacency = Adjacency::from_graph(&graph);
    let chain = principal_chain(&adjacency).ok_or(NamingError::NoCarbon)?;
    let records = classify_branches(&graph, &adjacency, &chain.atoms);

    // A carboxyl chain is already numbered from the acid group.
    let atoms = if chain.anchored {
        chain.atoms
    } else {
        orient_chain(&chain.atoms, &records)
    };
    debug!(
        "Numbered chain: {}",
        atoms.iter().map(|&id| graph.tag(id)).collect::<Vec<_>>().join("-")
    );

    let has_carboxyl = !adjacency.carboxyls().is_empty();
    let suffix = match role {
        FragmentRole::EtherSide => Suffix::Yl,
        FragmentRole::Standalone if has_carboxyl => Suffix::An,
        FragmentRole::Standalone => Suffix::Ane,
    };

    let mut name = synthesize_name(&atoms, &records, suffix);
    if has_carboxyl {
        name.push_str("oic acid");
    }
    Ok(name)
}

pub fn name_fragment(fragment: &str, role: FragmentRole) -> Result<String, NamingError> {
    debug!("Naming fragment {:?} as {:?}", fragment, role);
    name_graph(parse_formula(fragment), role)
}

/// Splits a formula at its first ether link.
pub fn split_ether(formula: &str) -> Option<(&str, &str)> {
    formula.split_once(ETHER_DELIMITER)
}

/// `"<first> <second> ether"`, ordered by plain byte comparison, so upper
/// case sorts before lower case.
pub fn compose_ether_name(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{} {} ether", first, second)
}

/// Names a whole formula, which may be two fragments joined by `-O-`.
pub fn name_formula(formula: &str, options: &NamingOptions) -> Result<String, NamingError> {
    if let Some(max) = options.max_formula_len {
        if formula.len() > max {
            return Err(NamingError::FormulaTooLong {
                len: formula.len(),
                max,
            });
        }
    }

    let name = match split_ether(formula).filter(|_| options.split_ethers) {
        Some((left, right)) => {
            let left = name_fragment(left, FragmentRole::EtherSide)?;
            let right = name_fragment(right, FragmentRole::EtherSide)?;
            compose_ether_name(&left, &right)
        }
        None => name_fragment(formula, FragmentRole::Standalone)?,
    };
    info!("{} => {}", formula, name);
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_formula() {
        let options = NamingOptions::default();
        let cases = [
            ("CCCC", "Butane"),
            ("CH4", "Methane"),
            ("CH3CH3", "Ethane"),
            ("CH3CH2Cl", "1-chloroEthane"),
            ("CH3CH2CH(CH3)CH3", "2-methylButane"),
            ("CH3CH(CH3)CH2CH3", "2-methylButane"),
            ("CH3CH(CH3)CH(CH3)CH3", "(2,3)-dimethylButane"),
            ("CH3CH2CH(Cl)CH3", "2-chloroButane"),
            ("CH3CH(Br)CH2CH2CH3", "2-bromoPentane"),
            ("COOHCH2CH3", "Propanoic acid"),
            ("CH3CH2COOH", "Propanoic acid"),
            ("CH3CH2-O-CH3", "Ethyl Methyl ether"),
            ("CH3CH2CH2-O-CH2CH3", "Ethyl Propyl ether"),
            // A bare oxygen stops the chain but does not abort naming.
            ("CH3CH2OCH2CH3", "Ethane"),
            // Past ten carbons the stem is left empty.
            ("CH3CH2CH2CH2CH2CH2CH2CH2CH2CH2CH3", "ane"),
            ("CH3CH2CH(CH2CH2CH2CH2CH3)CH2CH2CH2CH2CH2CH3", "6-ethylane"),
        ];
        for (formula, expected) in cases {
            assert_eq!(
                name_formula(formula, &options).as_deref(),
                Ok(expected),
                "formula {formula}"
            );
        }
    }

    #[test]
    fn test_naming_errors() {
        let options = NamingOptions::default();
        let cases = [
            ("CC(C)C(C)C", NamingError::RingDetected),
            ("OH", NamingError::NoCarbon),
            ("", NamingError::NoCarbon),
            // Either failing side fails the ether.
            ("CH3-O-OH", NamingError::NoCarbon),
        ];
        for (formula, expected) in cases {
            assert_eq!(name_formula(formula, &options), Err(expected), "formula {formula}");
        }
    }

    #[test]
    fn test_formula_length_limit() {
        let formula = "C".repeat(600);
        assert_eq!(
            name_formula(&formula, &NamingOptions::default()),
            Err(NamingError::FormulaTooLong { len: 600, max: 512 })
        );
        // Without a limit it is named, stem or not.
        let options = NamingOptions::default().with_max_formula_len(None);
        assert_eq!(name_formula(&formula, &options).as_deref(), Ok("ane"));
    }

    #[test]
    fn test_ether_splitting_disabled() {
        let options = NamingOptions::default().with_ether_splitting(false);
        // The oxygen becomes a plain atom inside one fragment.
        assert_eq!(name_formula("CH3CH2-O-CH3", &options).as_deref(), Ok("Ethane"));
        assert_eq!(name_formula("CCC", &options).as_deref(), Ok("Propane"));
    }

    #[test]
    fn test_compose_ether_name() {
        assert_eq!(compose_ether_name("Methyl", "Ethyl"), "Ethyl Methyl ether");
        assert_eq!(compose_ether_name("Ethyl", "Methyl"), "Ethyl Methyl ether");
        assert_eq!(compose_ether_name("Methyl", "Methyl"), "Methyl Methyl ether");
        // Byte order: upper case before lower case.
        assert_eq!(compose_ether_name("ethyl", "Methyl"), "Methyl ethyl ether");
    }

    #[test]
    fn test_split_ether() {
        assert_eq!(split_ether("CH3-O-CH3"), Some(("CH3", "CH3")));
        assert_eq!(split_ether("C-O-C-O-C"), Some(("C", "C-O-C")));
        assert_eq!(split_ether("CH3OCH3"), None);
    }

    #[test]
    fn test_fragment_roles() {
        assert_eq!(name_fragment("CH3CH2CH2", FragmentRole::EtherSide).as_deref(), Ok("Propyl"));
        assert_eq!(name_fragment("CH3", FragmentRole::EtherSide).as_deref(), Ok("Methyl"));
        assert_eq!(
            name_fragment("CH3CH(CH3)CH3", FragmentRole::EtherSide).as_deref(),
            Ok("2-methylPropyl")
        );
        assert_eq!(
            name_fragment("CH3COOH", FragmentRole::EtherSide).as_deref(),
            Ok("Ethyloic acid")
        );
    }

    #[test]
    fn test_carboxyl_keeps_numbering() {
        // Reversing would give the methyl a lower locant, but the acid group
        // stays at position 1.
        assert_eq!(
            name_formula("COOHCH2CH2CH(CH3)CH3", &NamingOptions::default()).as_deref(),
            Ok("4-methylPentanoic acid")
        );
    }
}
