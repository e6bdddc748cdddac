//! Classical algorithms over [`Graph`].
//!
//! Every function reads the graph through its public queries only and
//! never mutates it. Edges are followed in their stored direction and
//! neighbors are visited in ascending index order, which decides ties.

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use tracing::{info, instrument};

use crate::{Graph, Result};

/// Marks every vertex reachable from `start` over directed edges.
///
/// # Panics
///
/// Panics if `start` is not a vertex of the graph.
pub fn reachable_from(g: &Graph, start: usize) -> Vec<bool> {
    let n = g.num_vertices();
    let mut visited = vec![false; n];
    let mut stack = vec![start];
    visited[start] = true;

    while let Some(u) = stack.pop() {
        for v in g.neighbors(u) {
            if !visited[v] {
                visited[v] = true;
                stack.push(v);
            }
        }
    }
    visited
}

/// True when a traversal from every vertex reaches all vertices.
///
/// An empty graph is connected.
#[instrument(skip(g), fields(vertices = g.num_vertices()))]
pub fn is_connected(g: &Graph) -> bool {
    (0..g.num_vertices()).all(|u| reachable_from(g, u).into_iter().all(|seen| seen))
}

/// Fewest-edges path from `start` to `end`, found by breadth-first search.
///
/// A path is only recorded when `end` is discovered as a neighbor, so
/// `start == end` yields `None` because `start` is visited up front.
pub fn find_shortest_path(g: &Graph, start: usize, end: usize) -> Result<Option<Vec<usize>>> {
    g.check_vertex(start)?;
    g.check_vertex(end)?;

    let n = g.num_vertices();
    let mut visited = vec![false; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let mut queue = VecDeque::from([start]);
    visited[start] = true;

    while let Some(current) = queue.pop_front() {
        for neighbor in g.neighbors(current) {
            if visited[neighbor] {
                continue;
            }
            visited[neighbor] = true;
            parent[neighbor] = Some(current);
            queue.push_back(neighbor);

            if neighbor == end {
                let mut path = vec![end];
                let mut node = end;
                while let Some(prev) = parent[node] {
                    path.push(prev);
                    node = prev;
                }
                path.reverse();
                return Ok(Some(path));
            }
        }
    }
    Ok(None)
}

/// Shortest path rendered as `"0->1->2"`, or `"-1"` when `end` is unreached.
pub fn shortest_path(g: &Graph, start: usize, end: usize) -> Result<String> {
    let rendered = match find_shortest_path(g, start, end)? {
        Some(path) => path.iter().join("->"),
        None => "-1".to_string(),
    };
    Ok(rendered)
}

/// Depth-first search for a cycle using parent pointers.
///
/// Reaching an already visited vertex other than the current vertex's
/// parent counts as a cycle. The witness starts and ends at that repeated
/// vertex. If the repeated vertex is not an ancestor of the current one the
/// witness is just the closing edge.
pub fn find_cycle(g: &Graph) -> Option<Vec<usize>> {
    let n = g.num_vertices();
    let mut visited = vec![false; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        // Each frame holds a vertex and the next neighbor index to scan.
        let mut stack = vec![(root, 0usize)];

        while let Some(frame) = stack.last_mut() {
            let (v, from) = *frame;
            let Some(u) = (from..n).find(|&u| g.has_edge(v, u)) else {
                stack.pop();
                continue;
            };
            frame.1 = u + 1;

            if !visited[u] {
                visited[u] = true;
                parent[u] = Some(v);
                stack.push((u, 0));
            } else if parent[v] != Some(u) {
                return Some(cycle_witness(&parent, v, u));
            }
        }
    }
    None
}

fn cycle_witness(parent: &[Option<usize>], v: usize, u: usize) -> Vec<usize> {
    let mut chain = vec![v];
    let mut x = v;
    while x != u {
        match parent[x] {
            Some(p) => {
                chain.push(p);
                x = p;
            }
            None => return vec![v, u],
        }
    }
    // chain runs v .. u upwards; the witness runs u .. v, u
    chain.reverse();
    chain.push(u);
    chain
}

/// True when [`find_cycle`] finds a cycle; the cycle is logged.
#[instrument(skip(g), fields(vertices = g.num_vertices()))]
pub fn contains_cycle(g: &Graph) -> bool {
    match find_cycle(g) {
        Some(cycle) => {
            info!("Cycle found: {}", cycle.iter().join(" "));
            true
        }
        None => false,
    }
}

/// Two-coloring of the vertices.
///
/// `a` holds the vertices colored from vertex 0's side; `b` holds the rest,
/// including any vertex the coloring never reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bipartition {
    pub a: Vec<usize>,
    pub b: Vec<usize>,
}

impl fmt::Display for Bipartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The graph is bipartite: A={{{}}}, B={{{}}}",
            self.a.iter().join(", "),
            self.b.iter().join(", ")
        )
    }
}

/// Colors vertices by BFS from vertex 0 only.
///
/// Components not reachable from vertex 0 are never inspected, so their
/// vertices land in `b` and an odd cycle there goes unnoticed.
pub fn bipartition(g: &Graph) -> Option<Bipartition> {
    let n = g.num_vertices();
    if n == 0 {
        return Some(Bipartition {
            a: Vec::new(),
            b: Vec::new(),
        });
    }

    let mut color: Vec<Option<bool>> = vec![None; n];
    color[0] = Some(true);
    let mut queue = VecDeque::from([0]);

    while let Some(u) = queue.pop_front() {
        for v in g.neighbors(u) {
            match color[v] {
                None => {
                    color[v] = color[u].map(|c| !c);
                    queue.push_back(v);
                }
                Some(c) if color[u] == Some(c) => return None,
                Some(_) => {}
            }
        }
    }

    let (a, b): (Vec<usize>, Vec<usize>) = (0..n).partition(|&v| color[v] == Some(true));
    Some(Bipartition { a, b })
}

/// Partition description, or `"0"` when a same-colored edge exists.
pub fn is_bipartite(g: &Graph) -> String {
    match bipartition(g) {
        Some(parts) => parts.to_string(),
        None => "0".to_string(),
    }
}

/// New distance for `v` if the edge `u -> v` improves it.
fn relax(g: &Graph, dist: &[Option<i64>], u: usize, v: usize) -> Option<i64> {
    let candidate = dist[u]? + i64::from(g.weight(u, v));
    match dist[v] {
        Some(current) if current <= candidate => None,
        _ => Some(candidate),
    }
}

/// Bellman-Ford from vertex 0.
///
/// Runs `n - 1` relaxation rounds over the directed edges and reports a
/// negative cycle if one more pass still relaxes an edge. Cycles not
/// reachable from vertex 0 are not detected.
#[instrument(skip(g), fields(vertices = g.num_vertices()))]
pub fn negative_cycle(g: &Graph) -> bool {
    let n = g.num_vertices();
    if n == 0 {
        info!("No negative cycle found.");
        return false;
    }

    let mut dist: Vec<Option<i64>> = vec![None; n];
    dist[0] = Some(0);

    for _ in 1..n {
        for u in 0..n {
            for v in g.neighbors(u) {
                if let Some(d) = relax(g, &dist, u, v) {
                    dist[v] = Some(d);
                }
            }
        }
    }

    let found = (0..n).any(|u| {
        g.neighbors(u)
            .into_iter()
            .any(|v| relax(g, &dist, u, v).is_some())
    });
    if found {
        info!("Negative cycle found!");
    } else {
        info!("No negative cycle found.");
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GraphError;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Runs `f` under a fmt subscriber and returns its result with the log text.
    fn with_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        let text = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (result, text)
    }

    fn graph(adj: Vec<Vec<i32>>) -> Graph {
        Graph::from_matrix(adj).unwrap()
    }

    #[test]
    fn test_is_connected() {
        assert!(is_connected(&graph(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]])));
        assert!(!is_connected(&graph(vec![
            vec![0, 1, 0, 0, 0],
            vec![1, 0, 1, 0, 0],
            vec![0, 1, 0, 0, 0],
            vec![0, 0, 0, 0, 1],
            vec![0, 0, 0, 1, 0],
        ])));
        assert!(is_connected(&Graph::new()));
        assert!(is_connected(&graph(vec![vec![0]])));
    }

    #[test]
    fn test_is_connected_follows_direction() {
        // 0 -> 1 -> 2 with no way back
        assert!(!is_connected(&graph(vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]])));
        assert!(is_connected(&graph(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]])));
    }

    #[test]
    fn test_reachable_from() {
        let g = graph(vec![vec![0, 1, 0], vec![0, 0, 0], vec![1, 0, 0]]);
        assert_eq!(reachable_from(&g, 0), vec![true, true, false]);
        assert_eq!(reachable_from(&g, 2), vec![true, true, true]);
    }

    #[test]
    fn test_shortest_path() {
        let g = graph(vec![vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]]);
        assert_eq!(shortest_path(&g, 0, 2).unwrap(), "0->1->2");
        assert_eq!(shortest_path(&g, 2, 0).unwrap(), "-1");
        assert_eq!(shortest_path(&g, 0, 1).unwrap(), "0->1");
    }

    #[test]
    fn test_shortest_path_prefers_fewest_edges_and_lowest_index() {
        let g = graph(vec![
            vec![0, 9, 1, 0],
            vec![0, 0, 0, 9],
            vec![0, 0, 0, 1],
            vec![0, 0, 0, 0],
        ]);
        assert_eq!(find_shortest_path(&g, 0, 3).unwrap(), Some(vec![0, 1, 3]));
    }

    #[test]
    fn test_shortest_path_to_self_is_unreached() {
        let g = graph(vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(shortest_path(&g, 0, 0).unwrap(), "-1");
    }

    #[test]
    fn test_shortest_path_out_of_range() {
        let g = graph(vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(
            shortest_path(&g, 0, 2).unwrap_err(),
            GraphError::VertexOutOfRange {
                vertex: 2,
                num_vertices: 2
            }
        );
        assert!(find_shortest_path(&Graph::new(), 0, 0).is_err());
    }

    #[test]
    fn test_directed_triangle_has_cycle() {
        let g = graph(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]]);
        assert!(contains_cycle(&g));
        assert_eq!(find_cycle(&g), Some(vec![0, 1, 2, 0]));
    }

    #[test]
    fn test_undirected_tree_has_no_cycle() {
        let g = graph(vec![vec![0, 1, 1], vec![1, 0, 0], vec![1, 0, 0]]);
        assert!(!contains_cycle(&g));
        assert!(!contains_cycle(&Graph::new()));
    }

    #[test]
    fn test_undirected_square_has_cycle() {
        let g = graph(vec![
            vec![0, 1, 0, 1],
            vec![1, 0, 1, 0],
            vec![0, 1, 0, 1],
            vec![1, 0, 1, 0],
        ]);
        assert_eq!(find_cycle(&g), Some(vec![0, 1, 2, 3, 0]));
    }

    #[test]
    fn test_cross_edge_counts_as_cycle() {
        // 0 -> 1, 0 -> 2, 2 -> 1: vertex 1 is revisited from 2
        let g = graph(vec![vec![0, 1, 1], vec![0, 0, 0], vec![0, 1, 0]]);
        assert_eq!(find_cycle(&g), Some(vec![2, 1]));
    }

    #[test]
    fn test_bipartite() {
        let g = graph(vec![vec![0, 1], vec![1, 0]]);
        assert_eq!(is_bipartite(&g), "The graph is bipartite: A={0}, B={1}");

        let path = graph(vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]]);
        assert_eq!(is_bipartite(&path), "The graph is bipartite: A={0, 2}, B={1}");

        let triangle = graph(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]);
        assert_eq!(is_bipartite(&triangle), "0");
    }

    #[test]
    fn test_bipartite_only_colors_from_vertex_zero() {
        // Vertices 2, 3, 4 form a triangle unreachable from vertex 0.
        let g = graph(vec![
            vec![0, 1, 0, 0, 0],
            vec![1, 0, 0, 0, 0],
            vec![0, 0, 0, 1, 1],
            vec![0, 0, 1, 0, 1],
            vec![0, 0, 1, 1, 0],
        ]);
        assert_eq!(
            is_bipartite(&g),
            "The graph is bipartite: A={0}, B={1, 2, 3, 4}"
        );
    }

    #[test]
    fn test_bipartite_edge_cases() {
        assert_eq!(is_bipartite(&Graph::new()), "The graph is bipartite: A={}, B={}");
        assert_eq!(is_bipartite(&graph(vec![vec![0]])), "The graph is bipartite: A={0}, B={}");
    }

    #[test]
    fn test_negative_cycle() {
        let g = graph(vec![vec![0, 1, 0], vec![0, 0, -3], vec![1, 0, 0]]);
        assert!(negative_cycle(&g));

        let g = graph(vec![vec![0, 1, 0], vec![0, 0, 3], vec![1, 0, 0]]);
        assert!(!negative_cycle(&g));

        assert!(!negative_cycle(&Graph::new()));
    }

    #[test]
    fn test_negative_cycle_unreachable_from_zero() {
        let g = graph(vec![vec![0, 0, 0], vec![0, 0, -2], vec![0, -2, 0]]);
        assert!(!negative_cycle(&g));
    }

    #[test]
    fn test_contains_cycle_logs_witness() {
        let g = graph(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]]);
        let (found, logs) = with_logs(|| contains_cycle(&g));
        assert!(found);
        assert!(logs.contains("Cycle found: 0 1 2 0"), "logs: {logs}");

        let tree = graph(vec![vec![0, 1], vec![1, 0]]);
        let (found, logs) = with_logs(|| contains_cycle(&tree));
        assert!(!found);
        assert!(!logs.contains("Cycle found"), "logs: {logs}");
    }

    #[test]
    fn test_negative_cycle_logs_outcome() {
        let negative = graph(vec![vec![0, 1, 0], vec![0, 0, -3], vec![1, 0, 0]]);
        let (found, logs) = with_logs(|| negative_cycle(&negative));
        assert!(found);
        assert!(logs.contains("Negative cycle found!"), "logs: {logs}");

        let positive = graph(vec![vec![0, 1, 0], vec![0, 0, 3], vec![1, 0, 0]]);
        let (found, logs) = with_logs(|| negative_cycle(&positive));
        assert!(!found);
        assert!(logs.contains("No negative cycle found."), "logs: {logs}");
    }
}
