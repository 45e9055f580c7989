use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{anychar, char, satisfy},
    combinator::{map, opt, recognize, value},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};
use petgraph::graph::NodeIndex;
use tracing::*;

use crate::{Halogen, Label, MolecularGraph};

/// One lexical unit of a condensed formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `COOH`
    Carboxyl,
    /// `C`, optionally followed by `H<digit>` and one halogen.
    Carbon {
        hydrogens: Option<u32>,
        halogen: Option<Halogen>,
    },
    /// A halogen written after a branch opening or another atom.
    Halogen(Halogen),
    Open,
    Close,
    /// Any other one- or two-letter symbol.
    Symbol(String),
    /// Characters with no meaning here: stray digits, whitespace, punctuation.
    Skip(char),
}

fn carboxyl(input: &str) -> IResult<&str, Token> {
    value(Token::Carboxyl, tag("COOH"))(input)
}

fn halogen(input: &str) -> IResult<&str, Halogen> {
    alt((
        value(Halogen::Chlorine, tag("Cl")),
        value(Halogen::Bromine, tag("Br")),
        value(Halogen::Fluorine, char('F')),
        value(Halogen::Iodine, char('I')),
    ))(input)
}

/// `H` with an optional single digit; a bare `H` means one hydrogen.
fn hydrogen_count(input: &str) -> IResult<&str, u32> {
    preceded(
        char('H'),
        map(opt(satisfy(|c| c.is_ascii_digit())), |digit| {
            digit.and_then(|d| d.to_digit(10)).unwrap_or(1)
        }),
    )(input)
}

fn carbon(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('C')(input)?;
    let (input, hydrogens) = opt(hydrogen_count)(input)?;
    let (input, halogen) = opt(halogen)(input)?;
    Ok((input, Token::Carbon { hydrogens, halogen }))
}

fn symbol(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic()),
            opt(satisfy(|c| c.is_ascii_lowercase())),
        )),
        |s: &str| Token::Symbol(s.to_string()),
    )(input)
}

fn token(input: &str) -> IResult<&str, Token> {
    alt((
        carboxyl,
        // A standalone `Cl` must win over a bare `C`.
        map(halogen, Token::Halogen),
        carbon,
        value(Token::Open, char('(')),
        value(Token::Close, char(')')),
        symbol,
        map(anychar, Token::Skip),
    ))(input)
}

/// Split a formula into tokens. Every character ends up in some token, so
/// this never fails.
pub fn tokenize(formula: &str) -> Vec<Token> {
    many0(token)(formula)
        .map(|(_, tokens)| tokens)
        .unwrap_or_default()
}

/// Parses a condensed formula such as `CH3CH2CH(CH3)CH3` into a [`MolecularGraph`].
///
/// Each new atom is bonded to the previous atom; `(` remembers the previous
/// atom and `)` returns to it. Malformed input is never an error: unknown
/// characters are skipped, unmatched `)` is ignored, and unknown letters
/// become fallback atoms carrying their literal symbol.
pub fn parse_formula(formula: &str) -> MolecularGraph {
    let mut graph = MolecularGraph::new();
    let mut previous: Option<NodeIndex> = None;
    let mut branch_stack: Vec<Option<NodeIndex>> = Vec::new();

    for token in tokenize(formula) {
        match token {
            Token::Carboxyl => {
                let atom = graph.add_atom(Label::Carboxyl);
                bond_to_previous(&mut graph, previous, atom);
                previous = Some(atom);
            }
            Token::Carbon { hydrogens, halogen } => {
                let atom = graph.add_atom(Label::Carbon);
                if let Some(count) = hydrogens {
                    graph.atom_mut(atom).set_hydrogens(count);
                }
                if let Some(halogen) = halogen {
                    graph.atom_mut(atom).attach_halogen(halogen);
                }
                bond_to_previous(&mut graph, previous, atom);
                previous = Some(atom);
            }
            Token::Halogen(halogen) => match previous {
                Some(atom) => graph.atom_mut(atom).attach_halogen(halogen),
                None => trace!("Dropping {} with no atom to attach to", halogen),
            },
            Token::Open => branch_stack.push(previous),
            Token::Close => match branch_stack.pop() {
                Some(branch_point) => previous = branch_point,
                None => trace!("Ignoring ')' without a matching '('"),
            },
            Token::Symbol(symbol) => {
                trace!("Unrecognized symbol {:?}, adding it as a fallback atom", symbol);
                let atom = graph.add_atom(Label::Symbol(symbol));
                bond_to_previous(&mut graph, previous, atom);
                previous = Some(atom);
            }
            Token::Skip(c) => trace!("Skipping {:?}", c),
        }
    }

    graph
}

fn bond_to_previous(graph: &mut MolecularGraph, previous: Option<NodeIndex>, atom: NodeIndex) {
    if let Some(previous) = previous {
        graph.add_bond(previous, atom);
    }
}
