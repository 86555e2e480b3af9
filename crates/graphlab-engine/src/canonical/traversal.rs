//! Breadth-first and depth-first traversal state.

use std::collections::VecDeque;

use super::GraphView;

/// Queue-based traversal. Nodes are marked visited when enqueued.
#[derive(Debug, Clone)]
pub struct BfsState {
    queue: VecDeque<usize>,
    visited: Vec<bool>,
}

impl BfsState {
    /// Starts a traversal with `start` already enqueued.
    #[must_use]
    pub fn new(view: &GraphView, start: usize) -> Self {
        let mut visited = vec![false; view.node_count()];
        visited[start] = true;
        Self {
            queue: VecDeque::from([start]),
            visited,
        }
    }

    /// The node that must be dequeued next.
    #[must_use]
    pub fn head(&self) -> Option<usize> {
        self.queue.front().copied()
    }

    /// Returns true if the node is queued or already dequeued.
    #[must_use]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited[node]
    }

    /// Returns true if the node is currently queued.
    #[must_use]
    pub fn is_queued(&self, node: usize) -> bool {
        self.queue.contains(&node)
    }

    /// Dequeues the head and enqueues its unvisited neighbors in
    /// adjacency order. Returns the dequeued node and the new arrivals.
    pub fn advance(&mut self, view: &GraphView) -> Option<(usize, Vec<usize>)> {
        let u = self.queue.pop_front()?;
        let mut enqueued = Vec::new();
        for v in view.index().neighbors(u) {
            if !self.visited[v] {
                self.visited[v] = true;
                self.queue.push_back(v);
                enqueued.push(v);
            }
        }
        Some((u, enqueued))
    }

    /// Queue contents, front first.
    #[must_use]
    pub fn queue(&self) -> Vec<usize> {
        self.queue.iter().copied().collect()
    }

    /// Returns true once the queue is empty.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Recursive-order depth-first traversal over an explicit stack.
///
/// After every visit the stack is unwound past nodes with no unvisited
/// neighbors left, so the top of the stack is always the node whose
/// unvisited neighbors form the open frontier.
#[derive(Debug, Clone)]
pub struct DfsState {
    start: usize,
    started: bool,
    stack: Vec<usize>,
    visited: Vec<bool>,
}

impl DfsState {
    /// Creates a traversal that has not visited `start` yet.
    #[must_use]
    pub fn new(view: &GraphView, start: usize) -> Self {
        Self {
            start,
            started: false,
            stack: Vec::new(),
            visited: vec![false; view.node_count()],
        }
    }

    /// Nodes that may legally be visited next.
    ///
    /// Before the first visit this is the start node; afterwards it is
    /// the unvisited neighbors of the current node in adjacency order.
    /// The first entry is the canonical choice.
    #[must_use]
    pub fn eligible(&self, view: &GraphView) -> Vec<usize> {
        if !self.started {
            return vec![self.start];
        }
        let Some(&top) = self.stack.last() else {
            return Vec::new();
        };
        let mut open = Vec::new();
        for v in view.index().neighbors(top) {
            if !self.visited[v] && !open.contains(&v) {
                open.push(v);
            }
        }
        open
    }

    /// The node whose neighbors are being explored.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.stack.last().copied()
    }

    /// Returns true if the node has been visited.
    #[must_use]
    pub fn is_visited(&self, node: usize) -> bool {
        self.visited[node]
    }

    /// Visits `node` and returns the nodes backtracked from afterwards,
    /// innermost first. The caller must pick `node` from
    /// [`eligible`](Self::eligible).
    pub fn visit(&mut self, view: &GraphView, node: usize) -> Vec<usize> {
        self.started = true;
        self.visited[node] = true;
        self.stack.push(node);

        let mut finished = Vec::new();
        while let Some(&top) = self.stack.last() {
            if view.index().neighbors(top).any(|v| !self.visited[v]) {
                break;
            }
            finished.push(top);
            self.stack.pop();
        }
        finished
    }

    /// Recursion stack, root first.
    #[must_use]
    pub fn stack(&self) -> &[usize] {
        &self.stack
    }

    /// Returns true once the start has been visited and fully unwound.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.started && self.stack.is_empty()
    }
}
