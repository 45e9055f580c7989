use std::fmt::Write as FmtWrite;
use std::io::Write;

use anyhow::{bail, Context, Result};
use tracing::*;

use crate::{parse_formula, split_ether, Label, MolecularGraph};

/// Writes a fragment as Graphviz DOT and optionally renders it to PNG with
/// the `dot` binary, which must be on the `PATH`.
pub fn visualize_graph(
    graph: &MolecularGraph,
    output_dot: &str,
    output_image: Option<&str>,
) -> Result<()> {
    write_dot_file(&to_dot(graph, "fragment"), output_dot, output_image)
}

/// Same as [`visualize_graph`] for a whole formula: one DOT graph per ether
/// fragment, concatenated into a single file.
pub fn visualize_formula(
    formula: &str,
    split_ethers: bool,
    output_dot: &str,
    output_image: Option<&str>,
) -> Result<()> {
    write_dot_file(&formula_to_dot(formula, split_ethers), output_dot, output_image)
}

fn write_dot_file(dot: &str, output_dot: &str, output_image: Option<&str>) -> Result<()> {
    let mut file = std::fs::File::create(output_dot)
        .with_context(|| format!("Failed to create DOT file {}", output_dot))?;
    file.write_all(dot.as_bytes())
        .with_context(|| format!("Failed to write DOT file {}", output_dot))?;
    info!("DOT file saved to {}", output_dot);

    if let Some(image_path) = output_image {
        let status = std::process::Command::new("dot")
            .args(["-Tpng", output_dot, "-o", image_path])
            .status()
            .context("Failed to execute Graphviz 'dot' command")?;
        if !status.success() {
            bail!("Graphviz 'dot' command failed with status: {}", status);
        }
        info!("Image rendered to {}", image_path);
    }
    Ok(())
}

/// DOT for every fragment of `formula`, named `fragment0`, `fragment1`.
pub fn formula_to_dot(formula: &str, split_ethers: bool) -> String {
    let fragments = match split_ether(formula).filter(|_| split_ethers) {
        Some((left, right)) => vec![left, right],
        None => vec![formula],
    };
    fragments
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| to_dot(&parse_formula(fragment), &format!("fragment{i}")))
        .collect()
}

/// DOT text of one fragment. Nodes are labelled with their condensed formula.
pub fn to_dot(graph: &MolecularGraph, name: &str) -> String {
    let mut dot = String::new();
    // Formatting into a String cannot fail.
    let _ = write_dot(&mut dot, graph, name);
    dot
}

fn write_dot(dot: &mut String, graph: &MolecularGraph, name: &str) -> std::fmt::Result {
    writeln!(dot, "graph {} {{", name)?;
    writeln!(dot, "    layout=neato;")?;
    for id in graph.atom_ids() {
        let atom = graph.atom(id);
        writeln!(
            dot,
            "    {} [label=\"{}\", fontcolor=white, shape=circle, style=filled, fillcolor={}];",
            id.index(),
            atom.condensed(),
            label_color(atom.label())
        )?;
    }
    for (a, b) in graph.bonds() {
        writeln!(dot, "    {} -- {};", a.index(), b.index())?;
    }
    writeln!(dot, "}}")
}

fn label_color(label: &Label) -> &'static str {
    match label {
        Label::Carbon => "black",
        Label::Carboxyl => "red",
        Label::Symbol(_) if label.halogen().is_some() => "darkgreen",
        Label::Symbol(_) => "gray",
    }
}
