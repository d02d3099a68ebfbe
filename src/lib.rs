//!
//! circulation decides feasibility of a [circulation with demands](https://en.wikipedia.org/wiki/Circulation_problem)
//! (integer lower bounds and capacities on arcs) by reducing it to a maximum flow problem
//! with a supersource and a supersink, and extracts the allocation from the resulting flow.
//!
pub mod max_flow;
