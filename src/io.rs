use crate::error::Error;
use crate::graph::CsrGraph;
use fnv::FnvHashMap;
use std::io::BufRead;
use std::time::Instant;

/// Edge-list input: a `n m` header, then `m` whitespace-separated `u v`
/// pairs. Labels are arbitrary integers and are interned in encounter order;
/// self-loops and duplicate edges are silently dropped.
pub struct EdgeListReader<T: BufRead> {
    reader: T,
    name: String,
}

impl<T: BufRead> EdgeListReader<T> {
    pub fn new(reader: T, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
        }
    }
}

/// Adjacency-list input: a `n m` header, then one line per vertex holding
/// its neighbor list with 1-based labels. Trailing lines may be missing or
/// empty for neighbor-less vertices.
pub struct AdjacencyListReader<T: BufRead> {
    reader: T,
    name: String,
}

impl<T: BufRead> AdjacencyListReader<T> {
    pub fn new(reader: T, name: impl Into<String>) -> Self {
        Self {
            reader,
            name: name.into(),
        }
    }
}

impl<T: BufRead> TryFrom<EdgeListReader<T>> for CsrGraph {
    type Error = Error;

    fn try_from(source: EdgeListReader<T>) -> Result<Self, Self::Error> {
        let start = Instant::now();
        let mut reader = source.reader;
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        let mut tokens = input.split_whitespace();

        let n = parse_count(tokens.next(), "vertex count")?;
        let m = parse_count(tokens.next(), "edge count")?;
        if n == 0 || m == 0 {
            return Err(Error::MalformedInput(format!(
                "header declares an empty graph ({} {})",
                n, m
            )));
        }

        let mut name_map: FnvHashMap<usize, usize> = FnvHashMap::default();
        let mut alias = vec![0usize; n];
        let mut adjacency = vec![Vec::new(); n];
        let mut next_index = 0usize;
        for e in 0..m {
            let u = parse_endpoint(tokens.next(), e, m)?;
            let v = parse_endpoint(tokens.next(), e, m)?;
            let u = intern(u, n, &mut name_map, &mut alias, &mut next_index)?;
            let v = intern(v, n, &mut name_map, &mut alias, &mut next_index)?;
            if u != v {
                adjacency[u].push(v);
                adjacency[v].push(u);
            }
        }

        Ok(CsrGraph::new(source.name, adjacency, alias, start.elapsed()))
    }
}

impl<T: BufRead> TryFrom<AdjacencyListReader<T>> for CsrGraph {
    type Error = Error;

    fn try_from(source: AdjacencyListReader<T>) -> Result<Self, Self::Error> {
        let start = Instant::now();
        let mut lines = source.reader.lines();
        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(Error::MalformedInput("missing header line".into())),
        };
        let mut parts = header.split_whitespace();
        let n = parse_count(parts.next(), "vertex count")?;
        let m = parse_count(parts.next(), "edge count")?;
        if n == 0 || m == 0 {
            return Err(Error::MalformedInput(format!(
                "header declares an empty graph ({} {})",
                n, m
            )));
        }

        let mut adjacency = vec![Vec::new(); n];
        let mut row = 0usize;
        for line in lines {
            let line = line?;
            if row >= n {
                if line.trim().is_empty() {
                    continue;
                }
                return Err(Error::MalformedInput(format!(
                    "more than {} adjacency lines",
                    n
                )));
            }
            for token in line.split_whitespace() {
                let label: usize = token.parse().map_err(|_| {
                    Error::MalformedInput(format!("invalid vertex label '{}'", token))
                })?;
                if label == 0 || label > n {
                    return Err(Error::MalformedInput(format!(
                        "vertex label {} outside 1..={}",
                        label, n
                    )));
                }
                adjacency[row].push(label - 1);
            }
            row += 1;
        }

        let alias = (1..=n).collect();
        Ok(CsrGraph::new(source.name, adjacency, alias, start.elapsed()))
    }
}

fn parse_count(token: Option<&str>, what: &str) -> Result<usize, Error> {
    token
        .ok_or_else(|| Error::MalformedInput(format!("missing {} in header", what)))?
        .parse()
        .map_err(|_| Error::MalformedInput(format!("invalid {} in header", what)))
}

fn parse_endpoint(token: Option<&str>, edge: usize, m: usize) -> Result<usize, Error> {
    let token = token.ok_or_else(|| {
        Error::MalformedInput(format!("expected {} edges, input ended at edge {}", m, edge))
    })?;
    token
        .parse()
        .map_err(|_| Error::MalformedInput(format!("invalid vertex label '{}'", token)))
}

fn intern(
    label: usize,
    n: usize,
    name_map: &mut FnvHashMap<usize, usize>,
    alias: &mut [usize],
    next_index: &mut usize,
) -> Result<usize, Error> {
    if let Some(&index) = name_map.get(&label) {
        return Ok(index);
    }
    if *next_index == n {
        return Err(Error::MalformedInput(format!(
            "more than {} distinct vertex labels",
            n
        )));
    }
    let index = *next_index;
    name_map.insert(label, index);
    alias[index] = label;
    *next_index += 1;
    Ok(index)
}
