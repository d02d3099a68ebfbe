//! # Weekend getaway allocation
//!
//! People (entities) are allocated to cars (buckets). Each person lists the
//! cars they accept, and some people hold a driving licence (eligible).
//! Every car takes at most `bucket_size` people, at least `min_eligible` of
//! them licence holders, and every person has to ride in some car.
//!
//! The problem is a lower-bounded circulation
//!
//! ```text
//!            [0,1]              [0,1]                [l,u]
//! origin --------> person --------> eligible slot j ------> destination j
//!                         \-------> ineligible slot j ----> destination j --[0,u]--> terminal
//!                                                 [0,u-l]
//! terminal --[n, k*u]--> origin
//! ```
//!
//! with `u = bucket_size`, `l = min_eligible`, `n` people and `k` cars.
//!
use super::base::Capacity;
use super::config::AllocationRules;
use super::error::AllocationError;
use super::reduction::{CirculationBuilder, Reduction};

///
/// Vertex ids of the getaway network.
///
/// * people `0..n`
/// * eligible slot of bucket `j`: `n + 2j`
/// * ineligible slot of bucket `j`: `n + 2j + 1`
/// * destination of bucket `j`: `n + 2k + j`
/// * origin `n + 3k`, terminal `n + 3k + 1`
///
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    entities: usize,
    buckets: usize,
}

impl VertexLayout {
    pub fn new(entities: usize, buckets: usize) -> VertexLayout {
        VertexLayout { entities, buckets }
    }
    pub fn entities(&self) -> usize {
        self.entities
    }
    pub fn buckets(&self) -> usize {
        self.buckets
    }
    pub fn eligible_slot(&self, bucket: usize) -> usize {
        self.entities + 2 * bucket
    }
    pub fn ineligible_slot(&self, bucket: usize) -> usize {
        self.entities + 2 * bucket + 1
    }
    pub fn destination(&self, bucket: usize) -> usize {
        self.entities + 2 * self.buckets + bucket
    }
    pub fn origin(&self) -> usize {
        self.entities + 3 * self.buckets
    }
    pub fn terminal(&self) -> usize {
        self.origin() + 1
    }
    pub fn vertex_count(&self) -> usize {
        self.terminal() + 1
    }
    /// bucket of a slot vertex, `None` for any other vertex
    pub fn bucket_of(&self, v: usize) -> Option<usize> {
        if v >= self.entities && v < self.entities + 2 * self.buckets {
            Some((v - self.entities) / 2)
        } else {
            None
        }
    }
}

///
/// Build the reduced network of the getaway problem.
///
/// Fails if a preference is not a valid bucket, or an eligible index is not a valid entity.
///
pub fn build_reduction(
    preferences: &[Vec<usize>],
    eligible: &[usize],
    rules: &AllocationRules,
) -> Result<(Reduction, VertexLayout), AllocationError> {
    rules.validate()?;
    let n = preferences.len();
    let k = rules.bucket_count(n);
    let layout = VertexLayout::new(n, k);

    let mut is_eligible = vec![false; n];
    for &index in eligible {
        if index >= n {
            return Err(AllocationError::EligibleOutOfRange { index, entities: n });
        }
        is_eligible[index] = true;
    }

    let mut builder = CirculationBuilder::new(layout.vertex_count());

    // (1) origin -> person -> slot
    for (person, buckets) in preferences.iter().enumerate() {
        builder.add_arc(layout.origin(), person, 0, 1)?;
        for &bucket in buckets {
            if bucket >= k {
                return Err(AllocationError::BucketOutOfRange {
                    entity: person,
                    bucket,
                    buckets: k,
                });
            }
            let slot = if is_eligible[person] {
                layout.eligible_slot(bucket)
            } else {
                layout.ineligible_slot(bucket)
            };
            builder.add_arc(person, slot, 0, 1)?;
        }
    }

    // (2) slot -> destination -> terminal
    let size: Capacity = rules.bucket_size;
    for bucket in 0..k {
        let destination = layout.destination(bucket);
        builder.add_arc(
            layout.eligible_slot(bucket),
            destination,
            rules.min_eligible,
            size,
        )?;
        builder.add_arc(
            layout.ineligible_slot(bucket),
            destination,
            0,
            rules.ineligible_capacity(),
        )?;
        builder.add_arc(destination, layout.terminal(), 0, size)?;
    }

    // (3) everyone has to go: terminal -> origin carries exactly n..k*size
    builder.close(layout.terminal(), layout.origin(), n, k * size)?;

    Ok((builder.build(), layout))
}

#[cfg(test)]
mod tests {
    use super::super::reduction::{Arc, Terminal};
    use super::*;

    #[test]
    fn layout_of_six_people() {
        let layout = VertexLayout::new(6, 2);
        assert_eq!(layout.eligible_slot(0), 6);
        assert_eq!(layout.ineligible_slot(0), 7);
        assert_eq!(layout.eligible_slot(1), 8);
        assert_eq!(layout.ineligible_slot(1), 9);
        assert_eq!(layout.destination(0), 10);
        assert_eq!(layout.destination(1), 11);
        assert_eq!(layout.origin(), 12);
        assert_eq!(layout.terminal(), 13);
        assert_eq!(layout.vertex_count(), 14);

        assert_eq!(layout.bucket_of(5), None);
        assert_eq!(layout.bucket_of(6), Some(0));
        assert_eq!(layout.bucket_of(7), Some(0));
        assert_eq!(layout.bucket_of(9), Some(1));
        assert_eq!(layout.bucket_of(10), None);
    }

    #[test]
    fn reduction_of_two_people() {
        let rules = AllocationRules::new(2, 1).unwrap();
        let (r, layout) = build_reduction(&[vec![0], vec![0]], &[1], &rules).unwrap();
        assert_eq!(layout, VertexLayout::new(2, 1));
        // 0, 1: people / 2, 3: slots / 4: destination / 5: origin / 6: terminal
        assert_eq!(
            r.arcs,
            vec![
                Arc::new(5, 0, 1),
                Arc::new(0, 3, 1),
                Arc::new(5, 1, 1),
                Arc::new(1, 2, 1),
                Arc::new(2, 4, 1),
                Arc::new(3, 4, 1),
                Arc::new(4, 6, 2),
                Arc::new(6, 5, 0),
            ]
        );
        assert_eq!(r.lower_bounds, vec![0, 0, 0, 0, 1, 0, 0, 2]);
        assert_eq!(r.sources, vec![Terminal::new(5, 2), Terminal::new(4, 1)]);
        assert_eq!(r.sinks, vec![Terminal::new(6, 2), Terminal::new(2, 1)]);
        assert_eq!(r.saturation(), 3);
        assert_eq!(r.vertex_count, 7);
    }

    #[test]
    fn empty_problem() {
        let (r, layout) = build_reduction(&[], &[], &AllocationRules::default()).unwrap();
        assert_eq!(layout.buckets(), 0);
        assert_eq!(r.arcs, vec![Arc::new(1, 0, 0)]);
        assert_eq!(r.saturation(), 0);
    }

    #[test]
    fn malformed_input_is_rejected() {
        let rules = AllocationRules::default();
        assert_eq!(
            build_reduction(&[vec![1]], &[], &rules).err(),
            Some(AllocationError::BucketOutOfRange {
                entity: 0,
                bucket: 1,
                buckets: 1
            })
        );
        assert_eq!(
            build_reduction(&[vec![0]], &[3], &rules).err(),
            Some(AllocationError::EligibleOutOfRange {
                index: 3,
                entities: 1
            })
        );
        let rules = AllocationRules {
            bucket_size: 0,
            min_eligible: 0,
        };
        assert!(build_reduction(&[vec![0]], &[], &rules).is_err());
    }
}
