//! Flow graph definitions
//! - FlowGraph: the primal network and its paired residual network
//! - Flow: snapshot of the flow sent along each primal edge
//! - Certificate: feasibility check of a finished flow
//!
use super::base::{Capacity, FlowEdge, PrimalGraph, ResidueDirection, ResidueEdge};
use super::reduction::Terminal;
use super::residue::ResidualNetwork;
use log::debug;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef; // for EdgeReference.id()
use petgraph::Direction;
use std::collections::HashMap;

/// Flow definitions
///
/// Flow f is a mapping of f(e) to each edge e
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Flow(HashMap<EdgeIndex, Capacity>);

impl Flow {
    pub fn empty() -> Flow {
        Flow(HashMap::new())
    }
    pub fn zero(graph: &PrimalGraph) -> Flow {
        Flow(graph.edge_indices().map(|e| (e, 0)).collect())
    }
    pub fn from_vec(vec: &[(EdgeIndex, Capacity)]) -> Flow {
        Flow(vec.iter().copied().collect())
    }
    pub fn get(&self, e: EdgeIndex) -> Option<Capacity> {
        self.0.get(&e).copied()
    }
    pub fn set(&mut self, e: EdgeIndex, v: Capacity) {
        self.0.insert(e, v);
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

///
/// Check if the flow is valid, i.e. it satisfies
/// - flows of all edges are defined
/// - capacity constraint
/// - flow constraint on every vertex except `excluded`
///
pub fn is_valid_flow(flow: &Flow, graph: &PrimalGraph, excluded: &[NodeIndex]) -> bool {
    is_defined_for_all_edges(flow, graph)
        && is_in_capacity(flow, graph)
        && is_satisfying_flow_constraint(flow, graph, excluded)
}

///
/// Check if the flow contains all edges
///
pub fn is_defined_for_all_edges(flow: &Flow, graph: &PrimalGraph) -> bool {
    graph.edge_indices().all(|e| flow.get(e).is_some())
}

///
/// For each edge, the flow must satisfy `0 <= flow <= capacity`.
///
pub fn is_in_capacity(flow: &Flow, graph: &PrimalGraph) -> bool {
    graph.edge_indices().all(|e| match flow.get(e) {
        Some(f) => f <= graph[e].capacity,
        None => false,
    })
}

///
/// For each node other than `excluded`,
/// (the sum of out-going flows) should be equal to (the sum of in-coming flows).
///
pub fn is_satisfying_flow_constraint(
    flow: &Flow,
    graph: &PrimalGraph,
    excluded: &[NodeIndex],
) -> bool {
    let sum = |v: NodeIndex, direction: Direction| -> Capacity {
        graph
            .edges_directed(v, direction)
            .map(|er| flow.get(er.id()).unwrap_or(0))
            .sum()
    };
    graph
        .node_indices()
        .filter(|v| !excluded.contains(v))
        .all(|v| sum(v, Direction::Incoming) == sum(v, Direction::Outgoing))
}

///
/// Feasibility certificate of a finished flow.
///
/// * `outgoing`: total flow leaving the supersource
/// * `incoming`: total flow entering the supersink
/// * `saturation`: total capacity of the supersource edges (the sum of lower bounds)
///
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Certificate {
    pub outgoing: Capacity,
    pub incoming: Capacity,
    pub saturation: Capacity,
}

impl Certificate {
    /// every lower bound is met iff the supersource edges are all saturated
    pub fn is_feasible(&self) -> bool {
        self.outgoing == self.incoming && self.outgoing == self.saturation
    }
}

///
/// Primal flow network with a supersource and a supersink.
///
/// The last two vertices are reserved for the supersource and the supersink.
///
#[derive(Debug, Clone)]
pub struct FlowGraph {
    graph: PrimalGraph,
    residual: ResidualNetwork,
    sources: Vec<Terminal>,
    sinks: Vec<Terminal>,
    super_source: NodeIndex,
    super_sink: NodeIndex,
    edges_to_super_sink: Vec<EdgeIndex>,
}

impl FlowGraph {
    ///
    /// Create a flow graph of `vertex_count + 2` vertices without edges.
    ///
    pub fn new(sources: Vec<Terminal>, sinks: Vec<Terminal>, vertex_count: usize) -> FlowGraph {
        let mut graph = PrimalGraph::with_capacity(vertex_count + 2, 0);
        for _ in 0..vertex_count + 2 {
            graph.add_node(());
        }
        let super_source = NodeIndex::new(vertex_count);
        let super_sink = NodeIndex::new(vertex_count + 1);
        FlowGraph {
            graph,
            residual: ResidualNetwork::new(vertex_count + 2, super_source, super_sink),
            sources,
            sinks,
            super_source,
            super_sink,
            edges_to_super_sink: Vec::new(),
        }
    }
    pub fn graph(&self) -> &PrimalGraph {
        &self.graph
    }
    pub fn residual(&self) -> &ResidualNetwork {
        &self.residual
    }
    pub fn residual_mut(&mut self) -> &mut ResidualNetwork {
        &mut self.residual
    }
    pub fn super_source_node(&self) -> NodeIndex {
        self.super_source
    }
    pub fn super_sink_node(&self) -> NodeIndex {
        self.super_sink
    }
    pub fn edges_to_super_sink(&self) -> &[EdgeIndex] {
        &self.edges_to_super_sink
    }

    ///
    /// Create a primal edge `tail -> head` with its forward residual edge,
    /// and if `reversible`, its backward residual edge.
    ///
    /// ```text
    /// primal    tail --(0/c)--> head
    /// forward   tail --(c)----> head
    /// backward  tail <--(0)---- head
    /// ```
    ///
    pub fn form_edge(
        &mut self,
        tail: usize,
        head: usize,
        capacity: Capacity,
        reversible: bool,
    ) -> EdgeIndex {
        let (v, w) = (NodeIndex::new(tail), NodeIndex::new(head));
        let origin = self.graph.add_edge(v, w, FlowEdge::new(capacity));
        let front = self.residual.add_edge(
            v,
            w,
            ResidueEdge::new(capacity, origin, ResidueDirection::Up),
        );
        self.graph[origin].link_residue(front);

        if reversible {
            let mut behind = ResidueEdge::new(0, origin, ResidueDirection::Down);
            behind.link_pair(front);
            let behind = self.residual.add_edge(w, v, behind);
            self.residual.edge_mut(front).link_pair(behind);
        }
        origin
    }

    ///
    /// Wire the supersource to every source terminal.
    ///
    /// Lower-bound terminals are connected first and the designated terminal
    /// (`sources[0]`) last. Supersource edges are irreversible.
    ///
    pub fn super_source(&mut self) {
        let s = self.super_source.index();
        let order: Vec<Terminal> = self
            .sources
            .iter()
            .skip(1)
            .chain(self.sources.iter().take(1))
            .copied()
            .collect();
        for t in order {
            self.form_edge(s, t.vertex, t.demand, false);
        }
    }

    ///
    /// Wire every sink terminal to the supersink, in the same order as `super_source`.
    /// Each edge entering the supersink is recorded for the certificate.
    ///
    pub fn super_sink(&mut self) {
        let t = self.super_sink.index();
        let order: Vec<Terminal> = self
            .sinks
            .iter()
            .skip(1)
            .chain(self.sinks.iter().take(1))
            .copied()
            .collect();
        for terminal in order {
            let e = self.form_edge(terminal.vertex, t, terminal.demand, false);
            self.edges_to_super_sink.push(e);
        }
    }

    ///
    /// Push `amount` along the path found by the last search of the residual network.
    ///
    pub fn push_along_path(&mut self, amount: Capacity) {
        self.residual.update_flow(&mut self.graph, amount);
    }

    ///
    /// Compute the feasibility certificate of the current flow.
    ///
    pub fn certificate(&self) -> Certificate {
        let supersource_edges: Vec<FlowEdge> = self
            .graph
            .edges(self.super_source)
            .map(|er| *er.weight())
            .collect();
        let certificate = Certificate {
            outgoing: supersource_edges.iter().map(|ew| ew.flow).sum(),
            incoming: self
                .edges_to_super_sink
                .iter()
                .map(|&e| self.graph[e].flow)
                .sum(),
            saturation: supersource_edges.iter().map(|ew| ew.capacity).sum(),
        };
        debug!("certificate {:?}", certificate);
        certificate
    }

    ///
    /// Snapshot of the flow sent along each primal edge
    ///
    pub fn flow(&self) -> Flow {
        let mut flow = Flow::empty();
        for e in self.graph.edge_indices() {
            flow.set(e, self.graph[e].flow);
        }
        flow
    }

    ///
    /// Reset every flow to zero and restore residuals to their initial values
    /// (capacity on forward edges, zero on backward edges).
    ///
    pub fn reset_flow(&mut self) {
        for ew in self.graph.edge_weights_mut() {
            ew.flow = 0;
        }
        self.residual.reset_state();
        let residues: Vec<EdgeIndex> = self.residual.graph().edge_indices().collect();
        for e in residues {
            let origin = self.residual.graph()[e].origin;
            let capacity = self.graph[origin].capacity;
            let re = self.residual.edge_mut(e);
            re.residual = match re.direction {
                ResidueDirection::Up => capacity,
                ResidueDirection::Down => 0,
            };
        }
    }

    ///
    /// Group entities by the bucket their saturated unit edge terminates at.
    ///
    /// For each entity vertex (in the given order), every edge carrying
    /// exactly one unit of flow is mapped to a bucket by `bucket_of`.
    /// Edges whose head is not part of any bucket are ignored.
    ///
    pub fn desired_destination<I, B>(
        &self,
        entities: I,
        buckets: usize,
        bucket_of: B,
    ) -> Vec<Vec<usize>>
    where
        I: IntoIterator<Item = usize>,
        B: Fn(usize) -> Option<usize>,
    {
        let mut target: Vec<Vec<usize>> = vec![Vec::new(); buckets];
        for entity in entities {
            for er in self.graph.edges(NodeIndex::new(entity)) {
                if er.weight().flow != 1 {
                    continue;
                }
                if let Some(bucket) = bucket_of(er.target().index()) {
                    target[bucket].push(entity);
                }
            }
        }
        target
    }
}
