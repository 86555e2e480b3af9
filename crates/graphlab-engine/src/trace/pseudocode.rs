//! Canonical pseudocode listings.
//!
//! `Step::pseudocode_line` indexes into these tables.

use graphlab_common::Algorithm;

pub(crate) const DFS: &[&str] = &[
    "DFS(G, start):",
    "  visit(start)",
    "  procedure visit(u):",
    "    mark u visited",
    "    for each neighbor v of u in adjacency order:",
    "      if v is not visited: visit(v)",
    "    backtrack from u",
];

pub(crate) const BFS: &[&str] = &[
    "BFS(G, start):",
    "  mark start visited; enqueue start",
    "  while the queue is not empty:",
    "    u <- dequeue()",
    "    for each neighbor v of u in adjacency order:",
    "      if v is not visited: mark v visited; enqueue v",
    "  done",
];

pub(crate) const DIJKSTRA: &[&str] = &[
    "Dijkstra(G, start):",
    "  dist[start] <- 0; dist[v] <- inf for every other v; push (0, start)",
    "  while the priority queue is not empty:",
    "    (d, u) <- pop minimum; skip if d > dist[u]",
    "    mark u settled",
    "    for each edge (u, v, w) with v not settled:",
    "      if dist[u] + w < dist[v]: dist[v] <- dist[u] + w; push (dist[v], v)",
    "  return dist",
];

pub(crate) const ASTAR: &[&str] = &[
    "A*(G, start, goal):",
    "  g[start] <- 0; f[start] <- h(start); push start",
    "  while the open set is not empty:",
    "    u <- pop lowest f (then lowest h)",
    "    if u = goal: return path to u",
    "    close u",
    "    for each edge (u, v, w) with v not closed:",
    "      if g[u] + w < g[v]: g[v] <- g[u] + w; f[v] <- g[v] + h(v); push v",
    "  return failure",
];

pub(crate) const KRUSKAL: &[&str] = &[
    "Kruskal(G):",
    "  sort edges by weight (ties: insertion order)",
    "  make-set(v) for every node v",
    "  for each edge (u, v) in sorted order:",
    "    if find(u) != find(v):",
    "      add (u, v) to the tree; union(u, v)",
    "    else: skip (would form a cycle)",
    "  return the tree",
];

pub(crate) const PRIM: &[&str] = &[
    "Prim(G, start):",
    "  add start to the tree; push its edges",
    "  while the priority queue is not empty:",
    "    (w, u, v) <- pop lightest edge (ties: lower target index)",
    "    if v is in the tree: skip",
    "    add v and (u, v) to the tree",
    "    push edges (v, x) for every x not in the tree",
    "  return the tree",
];

pub(crate) const FORD_FULKERSON: &[&str] = &[
    "FordFulkerson(G, s, t):",
    "  flow(e) <- 0 for every edge; build the residual graph",
    "  while depth-first search finds a path p from s to t in the residual graph:",
    "    b <- min residual capacity along p",
    "    for each (u, v) in p: flow(u, v) += b; flow(v, u) -= b",
    "  return total flow out of s",
];

pub(crate) const EDMONDS_KARP: &[&str] = &[
    "EdmondsKarp(G, s, t):",
    "  flow(e) <- 0 for every edge; build the residual graph",
    "  while breadth-first search finds a shortest path p from s to t in the residual graph:",
    "    b <- min residual capacity along p",
    "    for each (u, v) in p: flow(u, v) += b; flow(v, u) -= b",
    "  return total flow out of s",
];

/// Returns the canonical pseudocode of an algorithm, one line per entry.
#[must_use]
pub fn pseudocode(algorithm: Algorithm) -> &'static [&'static str] {
    match algorithm {
        Algorithm::Dfs => DFS,
        Algorithm::Bfs => BFS,
        Algorithm::Dijkstra => DIJKSTRA,
        Algorithm::AStar => ASTAR,
        Algorithm::Kruskal => KRUSKAL,
        Algorithm::Prim => PRIM,
        Algorithm::FordFulkerson => FORD_FULKERSON,
        Algorithm::EdmondsKarp => EDMONDS_KARP,
    }
}
