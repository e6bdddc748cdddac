use crate::{Graph, GraphError, Result};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace0, space0, space1},
    combinator::{all_consuming, map_res, opt, recognize},
    multi::{many0, many1, separated_list1},
    sequence::{pair, preceded, terminated},
    IResult,
};
use std::io::{self, Write};
use std::path::Path;

/// Parse line ending (handles both \n and \r\n)
fn line_ending(input: &str) -> IResult<&str, &str> {
    alt((tag("\n"), tag("\r\n")))(input)
}

/// Parse a single unsigned integer
fn parse_usize(input: &str) -> IResult<&str, usize> {
    map_res(digit1, |s: &str| s.parse::<usize>())(input)
}

/// Parse a single signed weight
fn parse_weight(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

/// Parse a row of space-separated weights
fn parse_row(input: &str) -> IResult<&str, Vec<i32>> {
    preceded(space0, terminated(separated_list1(space1, parse_weight), space0))(input)
}

/// Parse a complete adjacency matrix (n rows of n elements each)
fn parse_adjacency_matrix(input: &str, n: usize) -> IResult<&str, Vec<Vec<i32>>> {
    // n comes from untrusted text; rows grow only as they parse
    let mut rows = Vec::new();
    let mut remaining = input;

    for _ in 0..n {
        let (rest, row) = terminated(parse_row, opt(line_ending))(remaining)?;

        if row.len() != n {
            return Err(nom::Err::Failure(nom::error::Error::new(
                remaining,
                nom::error::ErrorKind::LengthValue,
            )));
        }

        rows.push(row);
        remaining = rest;
    }

    Ok((remaining, rows))
}

/// Parse a single matrix: vertex count followed by its rows
fn parse_matrix(input: &str) -> IResult<&str, Vec<Vec<i32>>> {
    let (input, n) = terminated(preceded(space0, parse_usize), pair(space0, line_ending))(input)?;
    parse_adjacency_matrix(input, n)
}

/// Parse matrices separated by blank lines
fn parse_matrices(input: &str) -> IResult<&str, Vec<Vec<Vec<i32>>>> {
    let (input, _) = many0(line_ending)(input)?;
    let (input, matrices) = separated_list1(many1(line_ending), parse_matrix)(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, matrices))
}

fn to_parse_error(err: nom::Err<nom::error::Error<&str>>) -> GraphError {
    GraphError::Parse(err.to_string())
}

/// Parses every graph in `input`, validating each through [`Graph::from_matrix`].
pub fn parse_graphs(input: &str) -> Result<Vec<Graph>> {
    let (_, matrices) = all_consuming(parse_matrices)(input).map_err(to_parse_error)?;
    matrices.into_iter().map(Graph::from_matrix).collect()
}

/// Parses exactly one graph.
pub fn parse_graph(input: &str) -> Result<Graph> {
    let mut graphs = parse_graphs(input)?;
    if graphs.len() != 1 {
        return Err(GraphError::Parse(format!(
            "expected one graph, found {}",
            graphs.len()
        )));
    }
    Ok(graphs.remove(0))
}

/// Reads all graphs from a file.
pub fn parse_graph_file(path: &Path) -> std::result::Result<Vec<Graph>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_graphs(&content)?)
}

/// Write a graph in the format `parse_graphs` reads
pub fn write_graph<W: Write>(writer: &mut W, graph: &Graph) -> io::Result<()> {
    writeln!(writer, "{}", graph.num_vertices())?;
    for row in graph.matrix() {
        for (i, val) in row.iter().enumerate() {
            if i > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{}", val)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
