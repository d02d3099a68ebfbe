//!
//! mock network generation functions
//!
use super::reduction::{CirculationBuilder, Reduction};

/// capacity used as "unbounded"
pub const INF: usize = 100000;

/// mock network cited from Genome-scale algorithm design p48
///
/// * returns the reduction with the circulation `t -> s` forced to `demand`
/// * `demand = 17` is feasible, `demand = 25` is not
pub fn mock_flow_network2(demand: usize) -> Reduction {
    let (s, a, b, c, d, e, f, t) = (0, 1, 2, 3, 4, 5, 6, 7);
    let mut builder = CirculationBuilder::new(8);
    let arcs = [
        (s, a, 0, INF),
        (a, b, 2, 4),
        (a, d, 9, 13),
        (b, c, 2, 3),
        (d, c, 0, 6),
        (c, t, 4, 8),
        (d, f, 0, 10),
        (s, e, 0, 6),
        (e, f, 0, 5),
        (f, t, 7, 13),
    ];
    for &(v, w, l, u) in arcs.iter() {
        builder
            .add_arc(v, w, l, u)
            .expect("mock arcs are well-formed");
    }
    builder
        .close(t, s, demand, demand)
        .expect("mock circulation is well-formed");
    builder.build()
}

/// plain max-flow network (no lower bound) whose maximum flow is 5
///
/// ```text
///   /-(3)-> a -(2)-\
/// s        |(1)     t
///   \-(3)-> b -(3)-/
/// ```
pub fn mock_flow_network3() -> Reduction {
    let (s, a, b, t) = (0, 1, 2, 3);
    let mut builder = CirculationBuilder::new(4);
    for &(v, w, u) in [(s, a, 3), (s, b, 3), (a, b, 1), (a, t, 2), (b, t, 3)].iter() {
        builder.add_arc(v, w, 0, u).expect("mock arcs are well-formed");
    }
    builder.close(t, s, 0, 0).expect("mock circulation is well-formed");
    let mut reduction = builder.build();
    // feed s and drain t directly, with more than the network can carry
    reduction.sources[0].demand = INF;
    reduction.sinks[0].demand = INF;
    reduction
}

/// network where the first augmenting path has to be cancelled
///
/// ```text
/// s ---> a ---> d ---> t
/// |      |             ^
/// |      v             |
/// \-> c -> b ----------/
/// ```
/// LIFO search first takes `s -> a -> b -> t`, and the second path
/// `s -> c -> b -> a -> d -> t` cancels the flow on `a -> b`.
pub fn mock_cancel_network() -> Reduction {
    let (s, a, b, c, d, t) = (0, 1, 2, 3, 4, 5);
    let mut builder = CirculationBuilder::new(6);
    for &(v, w) in [(s, c), (s, a), (c, b), (a, d), (a, b), (b, t), (d, t)].iter() {
        builder.add_arc(v, w, 0, 1).expect("mock arcs are well-formed");
    }
    builder.close(t, s, 2, 2).expect("mock circulation is well-formed");
    builder.build()
}
