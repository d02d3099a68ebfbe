//! # Graph primitives
//!
//! Both graphs are `petgraph::DiGraph` arenas, so a vertex is a `NodeIndex` and
//! every link between edges is an `EdgeIndex` into one of the two arenas.
//!
//! - `FlowEdge`: edge of the primal graph, it has `capacity` and `flow` (flow sent)
//! - `ResidueEdge`: edge of the residual network, it has `residual` (remaining movable amount)
//! - `ResidueDirection`: Up (mirrors the primal edge) or Down (cancels it)
//!
//! For every primal edge `e`, `e.flow == e.capacity - forward(e).residual`.
//!
use petgraph::graph::{DiGraph, EdgeIndex};

/// Flow amount and capacity of an edge
pub type Capacity = usize;

/// Edge attributes used in the primal graph.
///
/// `0 <= flow <= capacity` holds after every update.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlowEdge {
    /// capacity (upper limit of flow) of the edge u(e)
    pub capacity: Capacity,
    /// flow currently sent along the edge f(e)
    pub flow: Capacity,
    /// forward residual edge mirroring this edge
    pub residue: Option<EdgeIndex>,
}

impl FlowEdge {
    pub fn new(capacity: Capacity) -> FlowEdge {
        FlowEdge {
            capacity,
            flow: 0,
            residue: None,
        }
    }
    /// link this primal edge to its forward residual edge
    pub fn link_residue(&mut self, residue: EdgeIndex) {
        self.residue = Some(residue);
    }
    /// Add (Up) or subtract (Down) `amount` to the flow sent.
    ///
    /// No bounds are re-checked here, the amount is a bottleneck
    /// that was already computed on the residual network.
    pub fn augment(&mut self, amount: Capacity, direction: ResidueDirection) {
        match direction {
            ResidueDirection::Up => self.flow += amount,
            ResidueDirection::Down => self.flow -= amount,
        }
    }
    pub fn is_saturated(&self) -> bool {
        self.flow == self.capacity
    }
}

impl std::fmt::Display for FlowEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.flow, self.capacity)
    }
}

/// Residue direction enum
/// residue edge has two types
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ResidueDirection {
    /// Up edge: it can increase(+1) flow of the primal edge
    #[default]
    Up,
    /// Down edge: it can decrease(-1) flow of the primal edge
    Down,
}

impl std::fmt::Display for ResidueDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ResidueDirection::Up => write!(f, "+"),
            ResidueDirection::Down => write!(f, "-"),
        }
    }
}

impl std::str::FromStr for ResidueDirection {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(ResidueDirection::Up),
            "-" => Ok(ResidueDirection::Down),
            _ => Err(()),
        }
    }
}

/// Edge attributes used in the residual network
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ResidueEdge {
    /// The movable amount of the flow
    pub residual: Capacity,
    /// Original edge index of the primal graph
    pub origin: EdgeIndex,
    /// Up (forward) or Down (backward)
    pub direction: ResidueDirection,
    /// The paired residual edge of the opposite direction.
    /// Irreversible edges have a forward edge only.
    pub pair: Option<EdgeIndex>,
}

impl ResidueEdge {
    pub fn new(residual: Capacity, origin: EdgeIndex, direction: ResidueDirection) -> ResidueEdge {
        ResidueEdge {
            residual,
            origin,
            direction,
            pair: None,
        }
    }
    /// link this residual edge to the residual edge of the opposite direction
    pub fn link_pair(&mut self, pair: EdgeIndex) {
        self.pair = Some(pair);
    }
    pub fn is_cancellable(&self) -> bool {
        self.pair.is_some()
    }
}

impl std::fmt::Display for ResidueEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "e{}{} ({})",
            self.origin.index(),
            self.direction,
            self.residual
        )
    }
}

/// Primal graph definition
pub type PrimalGraph = DiGraph<(), FlowEdge>;

/// ResidueGraph definition
pub type ResidueGraph = DiGraph<(), ResidueEdge>;
