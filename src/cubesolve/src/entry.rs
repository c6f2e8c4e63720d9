//! Reading a cube described sticker by sticker, from a TOML state file or
//! interactively.
//!
//! A state file maps every position, written as its key's colour letters, to
//! the colours found at that position axis by axis:
//!
//! ```toml
//! [pieces]
//! WGO = "WGO"
//! WO = "OW"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    io::{BufRead, Write},
    path::Path,
};

use color_eyre::eyre::{Result, WrapErr, eyre};
use itertools::Itertools;
use layercube::{
    CubeState, Face,
    geometry::{CORNERS, EDGES},
};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StateFile {
    pieces: BTreeMap<String, String>,
}

pub fn read_state_file(path: &Path) -> Result<CubeState> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read state file {}", path.display()))?;
    parse_state(&text).wrap_err_with(|| format!("Invalid state file {}", path.display()))
}

fn parse_state(text: &str) -> Result<CubeState> {
    let StateFile { mut pieces } = toml::from_str(text)?;

    let mut corners = CORNERS;
    for corner in &mut corners {
        *corner = occupant(&mut pieces, *corner)?;
    }
    let mut edges = EDGES;
    for edge in &mut edges {
        *edge = occupant(&mut pieces, *edge)?;
    }
    if !pieces.is_empty() {
        return Err(eyre!(
            "Unknown positions {}; positions are written in key order, e.g. WGO or WO",
            pieces.keys().join(", ")
        ));
    }

    Ok(CubeState::from_pieces(edges, corners)?)
}

fn occupant<const N: usize>(
    pieces: &mut BTreeMap<String, String>,
    position: [Face; N],
) -> Result<[Face; N]> {
    let name = position.iter().join("");
    let colours = pieces
        .remove(&name)
        .ok_or_else(|| eyre!("No colours given for position {name}"))?;
    let faces = colours
        .chars()
        .map(|colour| colour.to_string().parse::<Face>())
        .collect::<Result<Vec<_>, _>>()?;
    <[Face; N]>::try_from(faces)
        .map_err(|_| eyre!("Position {name} needs {N} colours but got `{colours}`"))
}

/// Ask for the colour at every axis of every position, corners first.
/// Invalid answers are asked again.
pub fn prompt_state(input: &mut impl BufRead, output: &mut impl Write) -> Result<CubeState> {
    writeln!(
        output,
        "Describe the cube one sticker at a time, using the letters {}.",
        Face::ALL.iter().join(" ")
    )?;

    let mut corners = CORNERS;
    for corner in &mut corners {
        *corner = ask(input, output, *corner)?;
    }
    let mut edges = EDGES;
    for edge in &mut edges {
        *edge = ask(input, output, *edge)?;
    }

    Ok(CubeState::from_pieces(edges, corners)?)
}

fn ask<const N: usize>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    position: [Face; N],
) -> Result<[Face; N]> {
    let name = position.iter().join("");
    let mut answer = position;
    for (axis, colour) in position.iter().zip(&mut answer) {
        *colour = loop {
            write!(output, "Colour on the {} side of {name}: ", axis.name())?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Err(eyre!("Input ended before the cube was fully described"));
            }
            match line.trim().parse::<Face>() {
                Ok(face) => break face,
                Err(error) => writeln!(output, "{error}")?,
            }
        };
    }
    Ok(answer)
}
