//!
//! Lower-bound elimination
//!
//! A lower-bounded circulation is a set of arcs `v -> w` whose flow must lie
//! in `[l, u]`. It is reduced into plain arcs of capacity `u - l` plus a list of
//! terminals that the flow graph connects to the supersource and the supersink.
//!
//! ```text
//! v --[l,u]--> w
//! ```
//!
//! into
//!
//! ```text
//! v --(u-l)--> w
//! S --(l)--> w        (w receives l units of forced inflow)
//! v --(l)--> T        (v sends l units of forced outflow)
//! ```
//!
use super::base::Capacity;
use super::error::AllocationError;
use super::flow::Flow;
use petgraph::graph::EdgeIndex;

/// Plain arc `(tail, head, capacity)` of a reduced network
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Arc {
    pub tail: usize,
    pub head: usize,
    pub capacity: Capacity,
}

impl Arc {
    pub fn new(tail: usize, head: usize, capacity: Capacity) -> Arc {
        Arc {
            tail,
            head,
            capacity,
        }
    }
}

/// Vertex connected to the supersource (or the supersink) with `demand` capacity
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub vertex: usize,
    pub demand: Capacity,
}

impl Terminal {
    pub fn new(vertex: usize, demand: Capacity) -> Terminal {
        Terminal { vertex, demand }
    }
}

///
/// Result of the lower-bound elimination.
///
/// `sources[0]` and `sinks[0]` are the designated terminals carrying the
/// aggregate supply, the rest carry a single lower bound each.
/// `lower_bounds[i]` is the lower bound removed from `arcs[i]`.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub arcs: Vec<Arc>,
    pub lower_bounds: Vec<Capacity>,
    pub sources: Vec<Terminal>,
    pub sinks: Vec<Terminal>,
    pub vertex_count: usize,
}

impl Reduction {
    ///
    /// The flow value every supersource arc saturates to in a feasible circulation,
    /// i.e. the sum of all the lower bounds.
    ///
    pub fn saturation(&self) -> Capacity {
        self.sources.iter().map(|t| t.demand).sum()
    }

    ///
    /// Convert the flow on the reduced arcs back to the flow on the original
    /// lower-bounded arcs, by adding the removed lower bounds.
    ///
    /// `EdgeIndex::new(i)` must be the primal edge of `arcs[i]`,
    /// which holds when arcs are formed in order before any supersource/supersink edge.
    ///
    pub fn restore_circulation(&self, flow: &Flow) -> Vec<Capacity> {
        self.lower_bounds
            .iter()
            .enumerate()
            .map(|(i, &lower)| flow.get(EdgeIndex::new(i)).unwrap_or(0) + lower)
            .collect()
    }
}

/// Builder of `Reduction` from lower-bounded arcs
#[derive(Debug, Clone)]
pub struct CirculationBuilder {
    vertex_count: usize,
    arcs: Vec<Arc>,
    lower_bounds: Vec<Capacity>,
    supply: Option<(Terminal, Terminal)>,
    sources: Vec<Terminal>,
    sinks: Vec<Terminal>,
}

impl CirculationBuilder {
    pub fn new(vertex_count: usize) -> CirculationBuilder {
        CirculationBuilder {
            vertex_count,
            arcs: Vec::new(),
            lower_bounds: Vec::new(),
            supply: None,
            sources: Vec::new(),
            sinks: Vec::new(),
        }
    }

    fn check(
        &self,
        tail: usize,
        head: usize,
        lower: Capacity,
        upper: Capacity,
    ) -> Result<(), AllocationError> {
        for &vertex in &[tail, head] {
            if vertex >= self.vertex_count {
                return Err(AllocationError::VertexOutOfRange {
                    vertex,
                    vertices: self.vertex_count,
                });
            }
        }
        if lower > upper {
            return Err(AllocationError::InvalidBounds {
                tail,
                head,
                lower,
                upper,
            });
        }
        Ok(())
    }

    ///
    /// Add an arc `tail -> head` whose flow must be in `[lower, upper]`.
    ///
    pub fn add_arc(
        &mut self,
        tail: usize,
        head: usize,
        lower: Capacity,
        upper: Capacity,
    ) -> Result<&mut Self, AllocationError> {
        self.check(tail, head, lower, upper)?;
        self.arcs.push(Arc::new(tail, head, upper - lower));
        self.lower_bounds.push(lower);
        if lower > 0 {
            self.sources.push(Terminal::new(head, lower));
            self.sinks.push(Terminal::new(tail, lower));
        }
        Ok(self)
    }

    ///
    /// Close the circulation with the arc `sink -> source` carrying the aggregate
    /// supply `[demand, ceiling]`.
    ///
    /// `source` and `sink` become the designated terminals with `demand` capacity,
    /// and the arc keeps `ceiling - demand` as slack.
    ///
    pub fn close(
        &mut self,
        sink: usize,
        source: usize,
        demand: Capacity,
        ceiling: Capacity,
    ) -> Result<&mut Self, AllocationError> {
        self.check(sink, source, demand, ceiling)?;
        self.arcs.push(Arc::new(sink, source, ceiling - demand));
        self.lower_bounds.push(demand);
        self.supply = Some((Terminal::new(source, demand), Terminal::new(sink, demand)));
        Ok(self)
    }

    pub fn build(self) -> Reduction {
        let (mut sources, mut sinks) = match self.supply {
            Some((source, sink)) => (vec![source], vec![sink]),
            None => (Vec::new(), Vec::new()),
        };
        sources.extend(self.sources);
        sinks.extend(self.sinks);
        Reduction {
            arcs: self.arcs,
            lower_bounds: self.lower_bounds,
            sources,
            sinks,
            vertex_count: self.vertex_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_bound_is_split_off() {
        let mut b = CirculationBuilder::new(3);
        b.add_arc(0, 1, 2, 5).unwrap().add_arc(1, 2, 0, 4).unwrap();
        b.close(2, 0, 3, 7).unwrap();
        let r = b.build();

        assert_eq!(
            r.arcs,
            vec![Arc::new(0, 1, 3), Arc::new(1, 2, 4), Arc::new(2, 0, 4)]
        );
        assert_eq!(r.lower_bounds, vec![2, 0, 3]);
        // designated terminals first
        assert_eq!(r.sources, vec![Terminal::new(0, 3), Terminal::new(1, 2)]);
        assert_eq!(r.sinks, vec![Terminal::new(2, 3), Terminal::new(0, 2)]);
        assert_eq!(r.saturation(), 5);
        assert_eq!(r.vertex_count, 3);
    }

    #[test]
    fn restore_adds_lower_bounds() {
        let mut b = CirculationBuilder::new(2);
        b.add_arc(0, 1, 1, 3).unwrap();
        b.close(1, 0, 1, 3).unwrap();
        let r = b.build();
        let flow = Flow::from_vec(&[(EdgeIndex::new(0), 2), (EdgeIndex::new(1), 2)]);
        assert_eq!(r.restore_circulation(&flow), vec![3, 3]);
    }

    #[test]
    fn malformed_arcs_are_rejected() {
        let mut b = CirculationBuilder::new(2);
        assert_eq!(
            b.add_arc(0, 2, 0, 1).err(),
            Some(AllocationError::VertexOutOfRange {
                vertex: 2,
                vertices: 2
            })
        );
        assert_eq!(
            b.add_arc(0, 1, 3, 2).err(),
            Some(AllocationError::InvalidBounds {
                tail: 0,
                head: 1,
                lower: 3,
                upper: 2
            })
        );
        assert!(b.build().arcs.is_empty());
    }
}
