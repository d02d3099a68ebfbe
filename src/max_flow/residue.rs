//! Residual network related definitions
//! - SearchState
//! - ResidualNetwork
//!
//! The residual network mirrors the vertex set of the primal graph.
//! It owns the augmenting path search, the bottleneck computation and
//! the propagation of pushed flow back into the primal graph.
//!
use super::base::{Capacity, PrimalGraph, ResidueEdge, ResidueGraph};
use itertools::Itertools; // for join
use log::{debug, trace};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef; // for EdgeReference.id()
use std::collections::VecDeque;

/// Search status of a vertex
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Visit {
    #[default]
    Undiscovered,
    /// pushed to the frontier
    Discovered,
    /// popped from the frontier
    Visited,
}

///
/// Side table of the transient search state, indexed by vertex.
///
/// Exactly one search's worth of results is alive at a time,
/// `clear` must run before the next search.
///
#[derive(Debug, Clone)]
pub struct SearchState {
    status: Vec<Visit>,
    previous: Vec<Option<EdgeIndex>>,
}

impl SearchState {
    pub fn new(vertex_count: usize) -> SearchState {
        SearchState {
            status: vec![Visit::Undiscovered; vertex_count],
            previous: vec![None; vertex_count],
        }
    }
    pub fn status(&self, v: NodeIndex) -> Visit {
        self.status[v.index()]
    }
    /// the residual edge used to reach `v` in the current search
    pub fn previous(&self, v: NodeIndex) -> Option<EdgeIndex> {
        self.previous[v.index()]
    }
    fn discover(&mut self, v: NodeIndex, via: EdgeIndex) {
        self.status[v.index()] = Visit::Discovered;
        self.previous[v.index()] = Some(via);
    }
    fn visit(&mut self, v: NodeIndex) {
        self.status[v.index()] = Visit::Visited;
    }
    pub fn is_clear(&self) -> bool {
        self.status.iter().all(|&s| s == Visit::Undiscovered)
            && self.previous.iter().all(|p| p.is_none())
    }
    pub fn clear(&mut self) {
        self.status.fill(Visit::Undiscovered);
        self.previous.fill(None);
    }
}

/// Residual network paired with a primal graph
#[derive(Debug, Clone)]
pub struct ResidualNetwork {
    graph: ResidueGraph,
    source: NodeIndex,
    sink: NodeIndex,
    search: SearchState,
    /// discovered augmenting path, from sink back to source
    path: Vec<EdgeIndex>,
    path_available: bool,
}

impl ResidualNetwork {
    ///
    /// Create a residual network with `vertex_count` vertices and no edges.
    /// `source` and `sink` are the endpoints of every augmenting path.
    ///
    pub fn new(vertex_count: usize, source: NodeIndex, sink: NodeIndex) -> ResidualNetwork {
        let mut graph = ResidueGraph::with_capacity(vertex_count, 0);
        for _ in 0..vertex_count {
            graph.add_node(());
        }
        ResidualNetwork {
            graph,
            source,
            sink,
            search: SearchState::new(vertex_count),
            path: Vec::new(),
            path_available: false,
        }
    }
    pub fn graph(&self) -> &ResidueGraph {
        &self.graph
    }
    pub fn search_state(&self) -> &SearchState {
        &self.search
    }
    pub fn path(&self) -> &[EdgeIndex] {
        &self.path
    }
    /// whether the last search reached the sink
    pub fn is_path_available(&self) -> bool {
        self.path_available
    }
    pub fn add_edge(&mut self, tail: NodeIndex, head: NodeIndex, edge: ResidueEdge) -> EdgeIndex {
        self.graph.add_edge(tail, head, edge)
    }
    pub fn edge_mut(&mut self, e: EdgeIndex) -> &mut ResidueEdge {
        &mut self.graph[e]
    }

    ///
    /// Outgoing residual edges of `v` in insertion order.
    ///
    /// petgraph keeps adjacency newest-first, so it is reversed here.
    ///
    fn outgoing(&self, v: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<_> = self.graph.edges(v).map(|e| (e.id(), e.target())).collect();
        edges.reverse();
        edges
    }

    fn tail(&self, e: EdgeIndex) -> NodeIndex {
        match self.graph.edge_endpoints(e) {
            Some((tail, _)) => tail,
            None => panic!("residual edge e{} does not exist", e.index()),
        }
    }

    ///
    /// Search an augmenting path from the source to the sink.
    ///
    /// The frontier is a deque used as a stack (LIFO), so the most recently
    /// discovered vertex is expanded first. An edge is followed only if its
    /// residual is positive and its head is undiscovered. The search stops as
    /// soon as the sink is discovered.
    ///
    pub fn find_path(&mut self) {
        let mut frontier: VecDeque<NodeIndex> = VecDeque::new();
        frontier.push_back(self.source);

        while let Some(u) = frontier.pop_back() {
            self.search.visit(u);
            if u == self.sink || self.path_available {
                break;
            }
            for (e, v) in self.outgoing(u) {
                if self.search.status(v) == Visit::Undiscovered && self.graph[e].residual > 0 {
                    trace!("discover v{} from v{} via {}", v.index(), u.index(), self.graph[e]);
                    self.search.discover(v, e);
                    frontier.push_back(v);
                    if v == self.sink {
                        self.path_available = true;
                        break;
                    }
                }
            }
        }
    }

    ///
    /// Collect the discovered path (sink to source order) and
    /// return its bottleneck, the minimum residual along the path.
    ///
    /// Panics if a vertex on the way back has no predecessor edge,
    /// which means the reachability flag disagrees with the search result.
    ///
    pub fn back_track(&mut self) -> Capacity {
        assert!(
            self.path_available,
            "back_track called without an augmenting path"
        );
        self.path.clear();

        let mut bottleneck = Capacity::MAX;
        let mut v = self.sink;
        while v != self.source {
            let e = match self.search.previous(v) {
                Some(e) => e,
                None => panic!(
                    "v{} was reached without a predecessor edge before the source v{}",
                    v.index(),
                    self.source.index()
                ),
            };
            bottleneck = bottleneck.min(self.graph[e].residual);
            self.path.push(e);
            v = self.tail(e);
        }
        bottleneck
    }

    ///
    /// Push `amount` along the discovered path.
    ///
    /// For each residual edge on the path
    /// * its residual decreases by `amount`
    /// * its paired edge (if any) increases by `amount`
    /// * the primal edge gains (Up) or loses (Down) `amount` of flow
    ///
    pub fn update_flow(&mut self, primal: &mut PrimalGraph, amount: Capacity) {
        debug!(
            "push {} along [{}]",
            amount,
            self.path.iter().rev().map(|&e| self.graph[e]).join(",")
        );
        for &e in self.path.iter() {
            let edge = self.graph[e];
            self.graph[e].residual -= amount;
            primal[edge.origin].augment(amount, edge.direction);
            if let Some(pair) = edge.pair {
                self.graph[pair].residual += amount;
            }
        }
    }

    /// Clear the search state and the reachability flag for the next search.
    pub fn reset_state(&mut self) {
        self.search.clear();
        self.path.clear();
        self.path_available = false;
    }
}

#[cfg(test)]
mod tests {
    use super::super::base::{FlowEdge, ResidueDirection};
    use super::*;

    fn ni(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    /// a -> b -> c with forward residual edges only
    fn chain(capacities: &[Capacity]) -> (PrimalGraph, ResidualNetwork) {
        let n = capacities.len() + 1;
        let mut primal = PrimalGraph::new();
        for _ in 0..n {
            primal.add_node(());
        }
        let mut rn = ResidualNetwork::new(n, ni(0), ni(n - 1));
        for (i, &c) in capacities.iter().enumerate() {
            let e = primal.add_edge(ni(i), ni(i + 1), FlowEdge::new(c));
            let r = rn.add_edge(ni(i), ni(i + 1), ResidueEdge::new(c, e, ResidueDirection::Up));
            primal[e].link_residue(r);
        }
        (primal, rn)
    }

    #[test]
    fn search_and_back_track_on_chain() {
        let (mut primal, mut rn) = chain(&[3, 1, 2]);
        rn.find_path();
        assert!(rn.is_path_available());
        assert_eq!(rn.search_state().status(ni(3)), Visit::Visited);
        assert!(rn.search_state().previous(ni(3)).is_some());
        let bottleneck = rn.back_track();
        assert_eq!(bottleneck, 1);
        assert_eq!(rn.path().len(), 3);
        // sink to source order
        assert_eq!(rn.path()[0].index(), 2);
        assert_eq!(rn.path()[2].index(), 0);

        rn.update_flow(&mut primal, bottleneck);
        let flows: Vec<_> = primal.edge_weights().map(|e| e.flow).collect();
        assert_eq!(flows, vec![1, 1, 1]);
        let residuals: Vec<_> = rn.graph().edge_weights().map(|e| e.residual).collect();
        assert_eq!(residuals, vec![2, 0, 1]);

        rn.reset_state();
        assert!(rn.search_state().is_clear());
        assert!(!rn.is_path_available());

        // the middle edge is exhausted
        rn.find_path();
        assert!(!rn.is_path_available());
    }

    #[test]
    fn zero_residual_is_not_followed() {
        let (_, mut rn) = chain(&[0]);
        rn.find_path();
        assert!(!rn.is_path_available());
        assert_eq!(rn.search_state().status(ni(0)), Visit::Visited);
        assert_eq!(rn.search_state().previous(ni(1)), None);
    }

    #[test]
    fn backward_edge_is_increased() {
        let mut primal = PrimalGraph::new();
        let a = primal.add_node(());
        let b = primal.add_node(());
        let e = primal.add_edge(a, b, FlowEdge::new(4));
        let mut rn = ResidualNetwork::new(2, a, b);
        let front = rn.add_edge(a, b, ResidueEdge::new(4, e, ResidueDirection::Up));
        let behind = rn.add_edge(b, a, ResidueEdge::new(0, e, ResidueDirection::Down));
        rn.edge_mut(front).link_pair(behind);
        rn.edge_mut(behind).link_pair(front);

        rn.find_path();
        let bottleneck = rn.back_track();
        assert_eq!(bottleneck, 4);
        rn.update_flow(&mut primal, bottleneck);
        assert_eq!(primal[e].flow, 4);
        assert_eq!(rn.graph()[front].residual, 0);
        assert_eq!(rn.graph()[behind].residual, 4);
    }

    #[test]
    fn lifo_order_expands_latest_vertex_first() {
        // s -> a -> t and s -> b -> t
        // edges of s are scanned in insertion order (a then b),
        // b is pushed last, so the path goes through b.
        let mut primal = PrimalGraph::new();
        for _ in 0..4 {
            primal.add_node(());
        }
        let (s, a, b, t) = (ni(0), ni(1), ni(2), ni(3));
        let mut rn = ResidualNetwork::new(4, s, t);
        for &(u, v) in &[(s, a), (s, b), (a, t), (b, t)] {
            let e = primal.add_edge(u, v, FlowEdge::new(1));
            rn.add_edge(u, v, ResidueEdge::new(1, e, ResidueDirection::Up));
        }
        rn.find_path();
        assert!(rn.is_path_available());
        rn.back_track();
        let origins: Vec<_> = rn
            .path()
            .iter()
            .map(|&e| rn.graph()[e].origin.index())
            .collect();
        assert_eq!(origins, vec![3, 1]);
    }

    #[test]
    #[should_panic]
    fn back_track_without_path_panics() {
        let (_, mut rn) = chain(&[0]);
        rn.find_path();
        rn.back_track();
    }
}
