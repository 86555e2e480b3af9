//! Per-variant move rules.
//!
//! Each rule owns its own canonical stepping state from
//! [`crate::canonical`], so grading follows the tracer's tie-breaks
//! exactly. A rejected move must leave the state untouched.

use graphlab_common::Algorithm;

use crate::canonical::{
    AugmentStrategy, BestFirst, BfsState, DfsState, GraphView, KruskalState, PrimState,
    ResidualNetwork,
};
use crate::moves::Move;
use crate::trace::{Endpoints, fmt_cost};

/// An accepted move.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Accepted {
    /// What the move confirmed, in move notation.
    pub confirmed: String,
    /// Explanation shown to the learner.
    pub reason: String,
}

pub(crate) type RuleResult = std::result::Result<Accepted, String>;

/// Grading contract shared by every variant.
pub(crate) trait MoveRule: Send {
    /// Candidates the learner may currently choose from.
    fn frontier(&self, view: &GraphView) -> Vec<String>;

    /// Grades a move, advancing the state only when it is accepted.
    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult;

    /// Returns true once the variant's termination condition holds.
    fn is_complete(&self) -> bool;
}

/// Builds the rule for a variant.
pub(crate) fn rule_for(
    algorithm: Algorithm,
    view: &GraphView,
    endpoints: Endpoints,
) -> Box<dyn MoveRule> {
    let start = endpoints.start;
    let goal = endpoints.goal.unwrap_or(start);
    match algorithm {
        Algorithm::Dfs => Box::new(DfsRule(DfsState::new(view, start))),
        Algorithm::Bfs => Box::new(BfsRule(BfsState::new(view, start))),
        Algorithm::Dijkstra => Box::new(BestFirstRule {
            search: BestFirst::dijkstra(view, start),
            astar: false,
        }),
        Algorithm::AStar => Box::new(BestFirstRule {
            search: BestFirst::astar(view, start, goal),
            astar: true,
        }),
        Algorithm::Kruskal => Box::new(KruskalRule::new(view)),
        Algorithm::Prim => Box::new(PrimRule(PrimState::new(view, start))),
        Algorithm::FordFulkerson => Box::new(FlowRule::new(
            view,
            start,
            goal,
            AugmentStrategy::DepthFirst,
        )),
        Algorithm::EdmondsKarp => Box::new(FlowRule::new(
            view,
            start,
            goal,
            AugmentStrategy::BreadthFirst,
        )),
    }
}

fn expect_node(view: &GraphView, mv: &Move) -> Result<usize, String> {
    match mv {
        Move::Node(id) => view
            .index()
            .index_of(id)
            .ok_or_else(|| format!("{id} is not a node in this graph")),
        other => Err(format!("expected a node, got {} {other}", other.kind())),
    }
}

fn expect_edge(view: &GraphView, mv: &Move) -> Result<(usize, usize), String> {
    let Move::Edge { source, target } = mv else {
        return Err(format!("expected an edge, got {} {mv}", mv.kind()));
    };
    let resolve = |id: &str| {
        view.index()
            .index_of(id)
            .ok_or_else(|| format!("{id} is not a node in this graph"))
    };
    Ok((resolve(source)?, resolve(target)?))
}

fn same_pair(a: (usize, usize), b: (usize, usize)) -> bool {
    a == b || a == (b.1, b.0)
}

struct BfsRule(BfsState);

impl MoveRule for BfsRule {
    fn frontier(&self, view: &GraphView) -> Vec<String> {
        view.ids(self.0.queue())
    }

    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult {
        let node = expect_node(view, mv)?;
        if self.0.head() != Some(node) {
            return Err(if self.0.is_queued(node) {
                format!("{} is queued, but not at the head of the queue", view.id(node))
            } else if self.0.is_visited(node) {
                format!("{} has already been dequeued", view.id(node))
            } else {
                format!("{} has not been discovered yet", view.id(node))
            });
        }
        let (_, enqueued) = self.0.advance(view).unwrap_or((node, Vec::new()));
        let reason = if enqueued.is_empty() {
            format!("Dequeued {}", view.id(node))
        } else {
            format!(
                "Dequeued {}; enqueued {}",
                view.id(node),
                view.ids(enqueued).join(", ")
            )
        };
        Ok(Accepted {
            confirmed: view.id(node).to_string(),
            reason,
        })
    }

    fn is_complete(&self) -> bool {
        self.0.is_finished()
    }
}

struct DfsRule(DfsState);

impl MoveRule for DfsRule {
    fn frontier(&self, view: &GraphView) -> Vec<String> {
        view.ids(self.0.eligible(view))
    }

    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult {
        let node = expect_node(view, mv)?;
        if !self.0.eligible(view).contains(&node) {
            return Err(if self.0.is_visited(node) {
                format!("{} has already been visited", view.id(node))
            } else {
                match self.0.current() {
                    Some(current) => format!(
                        "{} is not an unvisited neighbor of {}",
                        view.id(node),
                        view.id(current)
                    ),
                    None => format!("the search must begin at its start node, not {}", view.id(node)),
                }
            });
        }
        let backtracked = self.0.visit(view, node);
        let reason = if backtracked.is_empty() {
            format!("Visited {}", view.id(node))
        } else {
            format!(
                "Visited {}; backtracked from {}",
                view.id(node),
                view.ids(backtracked).join(", ")
            )
        };
        Ok(Accepted {
            confirmed: view.id(node).to_string(),
            reason,
        })
    }

    fn is_complete(&self) -> bool {
        self.0.is_finished()
    }
}

struct BestFirstRule {
    search: BestFirst,
    astar: bool,
}

impl MoveRule for BestFirstRule {
    fn frontier(&self, view: &GraphView) -> Vec<String> {
        view.ids(self.search.frontier())
    }

    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult {
        let node = expect_node(view, mv)?;
        if self.search.is_settled(node) {
            return Err(format!("{} is already settled", view.id(node)));
        }
        if self.search.distance(node).is_infinite() {
            return Err(format!("{} has not been reached yet", view.id(node)));
        }
        let expected = self.search.peek().map(|e| e.node);
        if expected != Some(node) {
            return Err(if self.astar {
                format!("{} does not have the lowest f in the open set", view.id(node))
            } else {
                format!("{} is not the closest unsettled node", view.id(node))
            });
        }
        let Some(entry) = self.search.settle() else {
            return Err("the frontier is empty".to_string());
        };
        let reason = if self.search.goal_reached() {
            format!("Reached the goal {} at cost {}", view.id(node), fmt_cost(entry.g))
        } else {
            let relaxed = self.search.relax(view, node);
            format!(
                "Settled {} at distance {}; {} neighbor(s) improved",
                view.id(node),
                fmt_cost(entry.g),
                relaxed.len()
            )
        };
        Ok(Accepted {
            confirmed: view.id(node).to_string(),
            reason,
        })
    }

    fn is_complete(&self) -> bool {
        self.search.is_finished()
    }
}

struct KruskalRule(KruskalState);

impl KruskalRule {
    fn new(view: &GraphView) -> Self {
        let mut state = KruskalState::new(view);
        state.skip_rejected(view);
        Self(state)
    }
}

impl MoveRule for KruskalRule {
    fn frontier(&self, view: &GraphView) -> Vec<String> {
        self.0
            .remaining()
            .iter()
            .filter(|&&e| {
                let (a, b) = view.endpoints(e);
                !self.0.connected(a, b)
            })
            .map(|&e| view.edge_id(e))
            .collect()
    }

    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult {
        let pair = expect_edge(view, mv)?;
        if pair.0 != pair.1 && self.0.connected(pair.0, pair.1) {
            return Err(format!("{mv} would close a cycle"));
        }
        let Some(expected) = self.0.peek() else {
            return Err("no edges remain".to_string());
        };
        if !same_pair(pair, view.endpoints(expected)) {
            return Err(format!("{mv} is not the lightest edge joining two components"));
        }
        self.0.consider(view);
        self.0.skip_rejected(view);
        Ok(Accepted {
            confirmed: view.edge_id(expected),
            reason: format!(
                "Added {mv} (weight {})",
                fmt_cost(view.weight(expected))
            ),
        })
    }

    fn is_complete(&self) -> bool {
        self.0.is_finished()
    }
}

struct PrimRule(PrimState);

impl MoveRule for PrimRule {
    fn frontier(&self, view: &GraphView) -> Vec<String> {
        self.0
            .candidates()
            .iter()
            .map(|e| view.edge_id(e.edge))
            .collect()
    }

    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult {
        let Some(expected) = self.0.peek() else {
            return Err("no edge leaves the tree".to_string());
        };
        let matches = match mv {
            Move::Node(_) => {
                let node = expect_node(view, mv)?;
                if self.0.in_tree(node) {
                    return Err(format!("{} is already in the tree", view.id(node)));
                }
                node == expected.target
            }
            _ => {
                let pair = expect_edge(view, mv)?;
                if self.0.in_tree(pair.0) == self.0.in_tree(pair.1) {
                    return Err(format!("{mv} does not cross the tree boundary"));
                }
                same_pair(pair, (expected.source, expected.target))
            }
        };
        if !matches {
            return Err(format!("{mv} is not the lightest edge leaving the tree"));
        }
        self.0.admit(view);
        Ok(Accepted {
            confirmed: view.edge_id(expected.edge),
            reason: format!(
                "Added {} -> {} (weight {})",
                view.id(expected.source),
                view.id(expected.target),
                fmt_cost(expected.weight)
            ),
        })
    }

    fn is_complete(&self) -> bool {
        self.0.is_finished()
    }
}

struct FlowRule {
    network: ResidualNetwork,
    source: usize,
    sink: usize,
    strategy: AugmentStrategy,
}

impl FlowRule {
    fn new(view: &GraphView, source: usize, sink: usize, strategy: AugmentStrategy) -> Self {
        Self {
            network: ResidualNetwork::new(view),
            source,
            sink,
            strategy,
        }
    }

    fn resolve_path(&self, view: &GraphView, mv: &Move) -> Result<Vec<usize>, String> {
        let Some(ids) = mv.as_path() else {
            return Err(format!("expected a path, got {} {mv}", mv.kind()));
        };
        if ids.len() < 2 {
            return Err("a path needs at least two nodes".to_string());
        }
        let mut nodes = Vec::with_capacity(ids.len());
        for id in ids {
            let node = view
                .index()
                .index_of(id)
                .ok_or_else(|| format!("{id} is not a node in this graph"))?;
            if nodes.contains(&node) {
                return Err(format!("the path visits {id} twice"));
            }
            nodes.push(node);
        }
        if nodes.first() != Some(&self.source) {
            return Err(format!("the path must start at the source {}", view.id(self.source)));
        }
        if nodes.last() != Some(&self.sink) {
            return Err(format!("the path must end at the sink {}", view.id(self.sink)));
        }
        Ok(nodes)
    }
}

impl MoveRule for FlowRule {
    fn frontier(&self, view: &GraphView) -> Vec<String> {
        self.network
            .find_path(self.strategy, self.source, self.sink)
            .map(|path| view.ids(self.network.path_nodes(&path)))
            .unwrap_or_default()
    }

    fn submit(&mut self, view: &GraphView, mv: &Move) -> RuleResult {
        let nodes = self.resolve_path(view, mv)?;
        let arcs = self.network.arcs_for_nodes(&nodes).map_err(|(u, v)| {
            format!(
                "{} -> {} has no residual capacity",
                view.id(u),
                view.id(v)
            )
        })?;
        if self.strategy == AugmentStrategy::BreadthFirst {
            let shortest = self.network.shortest_path_len(self.source, self.sink);
            if shortest.is_some_and(|len| arcs.len() > len) {
                return Err(format!("{mv} is not a shortest augmenting path"));
            }
        }
        let amount = self.network.bottleneck(&arcs);
        self.network.augment(&arcs, amount);
        Ok(Accepted {
            confirmed: mv.to_string(),
            reason: format!(
                "Augmented by {}; total flow is now {}",
                fmt_cost(amount),
                fmt_cost(self.network.flow_value(self.source))
            ),
        })
    }

    fn is_complete(&self) -> bool {
        self.network
            .find_path(AugmentStrategy::BreadthFirst, self.source, self.sink)
            .is_none()
    }
}
