pub mod base;
pub mod config;
pub mod error;
pub mod flow;
pub mod getaway;
pub mod mocks;
pub mod reduction;
pub mod residue;

pub use base::Capacity;
pub use config::AllocationRules;
pub use error::AllocationError;
pub use flow::{Certificate, Flow, FlowGraph};
pub use reduction::{Arc, CirculationBuilder, Reduction, Terminal};

use log::{debug, info};

/// Summary of an augmenting loop
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SolveStats {
    /// number of augmenting paths
    pub iterations: usize,
    /// total flow pushed from the supersource
    pub flow_value: Capacity,
}

//
// public functions
//

///
/// Build the flow graph of a reduced network, with its supersource and supersink wired.
///
/// Primal edge `i` is `reduction.arcs[i]`.
///
pub fn build_flow_graph(reduction: &Reduction) -> FlowGraph {
    let mut graph = FlowGraph::new(
        reduction.sources.clone(),
        reduction.sinks.clone(),
        reduction.vertex_count,
    );
    for arc in reduction.arcs.iter() {
        graph.form_edge(arc.tail, arc.head, arc.capacity, true);
    }
    graph.super_source();
    graph.super_sink();
    graph
}

///
/// Build the flow graph of a reduced network and run the augmenting loop to exhaustion.
///
pub fn ford_fulkerson(reduction: &Reduction) -> FlowGraph {
    let mut graph = build_flow_graph(reduction);
    let stats = max_flow(&mut graph);
    info!(
        "max flow {} after {} augmenting paths (saturation {})",
        stats.flow_value,
        stats.iterations,
        reduction.saturation()
    );
    graph
}

///
/// Repeat (search, back track, push, reset) until no augmenting path remains.
///
/// Every iteration pushes at least one unit, so the number of iterations
/// is bounded by the final flow value.
///
pub fn max_flow(graph: &mut FlowGraph) -> SolveStats {
    let mut stats = SolveStats::default();
    graph.residual_mut().find_path();
    while graph.residual().is_path_available() {
        let bottleneck = graph.residual_mut().back_track();
        graph.push_along_path(bottleneck);
        graph.residual_mut().reset_state();
        stats.iterations += 1;
        stats.flow_value += bottleneck;
        debug!("iteration {}: flow {}", stats.iterations, stats.flow_value);
        graph.residual_mut().find_path();
    }
    graph.residual_mut().reset_state();
    stats
}

///
/// Allocate entities to buckets with the default rules
/// (buckets of 5, at least 2 eligible entities each).
///
/// * `preferences[i]`: buckets acceptable for entity `i`
/// * `eligible`: entities with the eligibility attribute
///
/// Returns `Ok(None)` if no allocation satisfies every constraint.
///
pub fn allocate(
    preferences: &[Vec<usize>],
    eligible: &[usize],
) -> Result<Option<Vec<Vec<usize>>>, AllocationError> {
    allocate_with(preferences, eligible, &AllocationRules::default())
}

///
/// Allocate entities to `ceil(n / bucket_size)` buckets under `rules`.
///
pub fn allocate_with(
    preferences: &[Vec<usize>],
    eligible: &[usize],
    rules: &AllocationRules,
) -> Result<Option<Vec<Vec<usize>>>, AllocationError> {
    let (reduction, layout) = getaway::build_reduction(preferences, eligible, rules)?;
    let graph = ford_fulkerson(&reduction);

    let certificate = graph.certificate();
    if !certificate.is_feasible() {
        info!(
            "infeasible: {} of {} units saturated",
            certificate.outgoing, certificate.saturation
        );
        return Ok(None);
    }

    Ok(Some(graph.desired_destination(
        0..layout.entities(),
        layout.buckets(),
        |v| layout.bucket_of(v),
    )))
}
