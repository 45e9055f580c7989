use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use tracing::*;

use super::*;

/// What an atom node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    /// A chain carbon, written `C` in a formula.
    Carbon,
    /// A carboxylic acid group, written `COOH`.
    Carboxyl,
    /// Any other token the parser could not interpret, kept verbatim.
    Symbol(String),
}

impl Label {
    pub fn text(&self) -> &str {
        match self {
            Label::Carbon => "C",
            Label::Carboxyl => "COOH",
            Label::Symbol(symbol) => symbol,
        }
    }

    /// Labels whose text starts with `C` may take part in the principal chain.
    pub fn is_carbon_rooted(&self) -> bool {
        self.text().starts_with('C')
    }

    /// A halogen written as its own node (only possible for graphs built by hand).
    pub fn halogen(&self) -> Option<Halogen> {
        match self {
            Label::Symbol(symbol) => Halogen::from_symbol(symbol),
            _ => None,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.text())
    }
}

/// An atom node with its bond bookkeeping.
#[derive(Clone, PartialEq, Eq)]
pub struct Atom {
    label: Label,
    carbon_bonds: usize,
    hydrogens: Option<u32>,
    halogens: Vec<Halogen>,
}

impl Atom {
    pub fn new(label: Label) -> Self {
        Self {
            label,
            carbon_bonds: 0,
            hydrogens: None,
            halogens: Vec::new(),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn carbon_bonds(&self) -> usize {
        self.carbon_bonds
    }

    /// The hydrogen count written in the formula, if any.
    pub fn hydrogens(&self) -> Option<u32> {
        self.hydrogens
    }

    /// Overwrites the hydrogen count; formula digits are never summed.
    pub fn set_hydrogens(&mut self, count: u32) {
        self.hydrogens = Some(count);
    }

    pub fn halogen_bonds(&self) -> usize {
        self.halogens.len()
    }

    pub fn attach_halogen(&mut self, halogen: Halogen) {
        self.halogens.push(halogen);
    }

    /// The attached halogen that names this atom's substituent, picked in
    /// `Cl`, `Br`, `F`, `I` order.
    pub fn principal_halogen(&self) -> Option<Halogen> {
        Halogen::PRIORITY
            .into_iter()
            .find(|h| self.halogens.contains(h))
    }

    /// C-C + C-H + C-X. Only a heuristic signal, never checked against valence.
    pub fn total_bonds(&self) -> usize {
        self.carbon_bonds + self.hydrogens.unwrap_or(0) as usize + self.halogens.len()
    }

    /// Condensed formula of the atom, e.g. `CH2Cl`.
    pub fn condensed(&self) -> String {
        let mut text = self.label.text().to_string();
        match self.hydrogens {
            Some(1) => text.push('H'),
            Some(n) => text.push_str(&format!("H{n}")),
            None => {}
        }
        for halogen in &self.halogens {
            text.push_str(halogen.symbol());
        }
        text
    }
}

impl Debug for Atom {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(
            f,
            "{}: C-C={}, C-H={}, C-X={}",
            self.label,
            self.carbon_bonds,
            self.hydrogens.unwrap_or(0),
            self.halogens.len()
        )
    }
}

/// The atom graph of one formula fragment.
///
/// Atom ids are the `NodeIndex` handed out on creation; atoms are never
/// removed, so ids are never reused. Bonds are kept in creation order and
/// duplicates are allowed.
#[derive(Clone, Default)]
pub struct MolecularGraph {
    graph: UnGraph<Atom, ()>,
}

impl MolecularGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_atom(&mut self, label: Label) -> NodeIndex {
        self.graph.add_node(Atom::new(label))
    }

    /// Bond two atoms. Both C-C counters move whatever the labels are; a
    /// fallback atom is bookkept like any chain atom.
    pub fn add_bond(&mut self, a: NodeIndex, b: NodeIndex) {
        self.graph[a].carbon_bonds += 1;
        self.graph[b].carbon_bonds += 1;
        self.graph.add_edge(a, b, ());
    }

    pub fn atom(&self, id: NodeIndex) -> &Atom {
        &self.graph[id]
    }

    pub fn atom_mut(&mut self, id: NodeIndex) -> &mut Atom {
        &mut self.graph[id]
    }

    pub fn atom_ids(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Bonds in the order they were created.
    pub fn bonds(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.graph.edge_references().map(|e| (e.source(), e.target()))
    }

    /// Label plus id, e.g. `C3` or `COOH0`.
    pub fn tag(&self, id: NodeIndex) -> String {
        format!("{}{}", self.graph[id].label, id.index())
    }

    /// Ring-closure heuristic: if at least two atoms have a total bond count
    /// of exactly 3, bond the first two (in id order) and report a ring.
    pub fn detect_ring(&mut self) -> bool {
        let candidates: Vec<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|&id| self.graph[id].total_bonds() == 3)
            .take(2)
            .collect();
        if let [first, second] = candidates[..] {
            self.add_bond(first, second);
            info!(
                "Added cyclic edge between {} and {}",
                self.tag(first),
                self.tag(second)
            );
            true
        } else {
            false
        }
    }

    /// True when the bonds themselves close a cycle.
    pub fn has_cycle(&self) -> bool {
        petgraph::algo::is_cyclic_undirected(&self.graph)
    }

    pub fn log_atoms(&self) {
        for id in self.graph.node_indices() {
            debug!("{}{}: {:?}", self.graph[id].label, id.index(), self.graph[id]);
        }
    }

    pub fn log_bonds(&self) {
        for (a, b) in self.bonds() {
            debug!("{}-{}", self.tag(a), self.tag(b));
        }
    }
}

impl Debug for MolecularGraph {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let bonds: Vec<String> = self
            .bonds()
            .map(|(a, b)| format!("{}-{}", self.tag(a), self.tag(b)))
            .collect();
        write!(f, "MolecularGraph {{ bonds: [{}] }}", bonds.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_formula;

    #[test]
    fn test_bond_counters() {
        let mut graph = MolecularGraph::new();
        let a = graph.add_atom(Label::Carbon);
        let b = graph.add_atom(Label::Carboxyl);
        let o = graph.add_atom(Label::Symbol("O".to_string()));
        graph.add_bond(a, b);
        graph.add_bond(a, o);
        graph.add_bond(a, b);

        assert_eq!(graph.atom(a).carbon_bonds(), 3);
        assert_eq!(graph.atom(b).carbon_bonds(), 2);
        // Fallback atoms count their bonds too.
        assert_eq!(graph.atom(o).carbon_bonds(), 1);
        // Duplicates are kept.
        assert_eq!(graph.bond_count(), 3);
        assert_eq!(graph.bonds().next(), Some((a, b)));
    }

    #[test]
    fn test_total_bonds() {
        let mut graph = MolecularGraph::new();
        let a = graph.add_atom(Label::Carbon);
        assert_eq!(graph.atom(a).total_bonds(), 0);
        graph.atom_mut(a).set_hydrogens(2);
        graph.atom_mut(a).set_hydrogens(3);
        graph.atom_mut(a).attach_halogen(Halogen::Bromine);
        assert_eq!(graph.atom(a).hydrogens(), Some(3));
        assert_eq!(graph.atom(a).total_bonds(), 4);
        assert_eq!(graph.atom(a).condensed(), "CH3Br");
    }

    #[test]
    fn test_principal_halogen() {
        let mut atom = Atom::new(Label::Carbon);
        assert_eq!(atom.principal_halogen(), None);
        atom.attach_halogen(Halogen::Iodine);
        atom.attach_halogen(Halogen::Bromine);
        assert_eq!(atom.principal_halogen(), Some(Halogen::Bromine));
        assert_eq!(atom.halogen_bonds(), 2);
    }

    #[test]
    fn test_detect_ring() {
        // Two branch points without hydrogens each have three C-C bonds.
        let mut graph = MolecularGraph::new();
        let ids: Vec<_> = (0..6).map(|_| graph.add_atom(Label::Carbon)).collect();
        graph.add_bond(ids[0], ids[1]);
        graph.add_bond(ids[1], ids[2]);
        graph.add_bond(ids[1], ids[3]);
        graph.add_bond(ids[3], ids[4]);
        graph.add_bond(ids[3], ids[5]);
        assert!(!graph.has_cycle());

        assert!(graph.detect_ring());
        assert_eq!(graph.bond_count(), 6);
        assert_eq!(graph.atom(ids[1]).carbon_bonds(), 4);
        assert!(graph.has_cycle());
    }

    #[test]
    fn test_inline_oxygen_is_no_ring() {
        let mut graph = parse_formula("CH3CH2OCH2CH3");
        let totals: Vec<usize> = graph.atom_ids().map(|id| graph.atom(id).total_bonds()).collect();
        assert_eq!(totals, vec![4, 4, 2, 4, 4]);
        assert!(!graph.detect_ring());
    }

    #[test]
    fn test_no_ring_with_single_candidate() {
        let mut graph = MolecularGraph::new();
        let a = graph.add_atom(Label::Carbon);
        graph.atom_mut(a).set_hydrogens(3);
        assert!(!graph.detect_ring());
        assert_eq!(graph.bond_count(), 0);
    }

    #[test]
    fn test_labels() {
        assert!(Label::Carbon.is_carbon_rooted());
        assert!(Label::Carboxyl.is_carbon_rooted());
        assert!(!Label::Symbol("O".into()).is_carbon_rooted());
        assert_eq!(Label::Symbol("Br".into()).halogen(), Some(Halogen::Bromine));
        assert_eq!(Label::Carbon.halogen(), None);

        let mut graph = MolecularGraph::new();
        graph.add_atom(Label::Carbon);
        let acid = graph.add_atom(Label::Carboxyl);
        assert_eq!(graph.tag(acid), "COOH1");
    }
}
