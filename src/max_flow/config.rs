//!
//! `AllocationRules`: how entities are packed into buckets
//!
use super::error::AllocationError;
use serde::{Deserialize, Serialize};

/// Rules of the allocation problem.
///
/// * `bucket_size`: maximum number of entities in a bucket
/// * `min_eligible`: minimum number of eligible entities in a bucket
///
/// Missing fields fall back to the defaults (5 and 2).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationRules {
    pub bucket_size: usize,
    pub min_eligible: usize,
}

impl Default for AllocationRules {
    fn default() -> Self {
        AllocationRules {
            bucket_size: 5,
            min_eligible: 2,
        }
    }
}

impl AllocationRules {
    pub fn new(bucket_size: usize, min_eligible: usize) -> Result<AllocationRules, AllocationError> {
        let rules = AllocationRules {
            bucket_size,
            min_eligible,
        };
        rules.validate()?;
        Ok(rules)
    }
    pub fn validate(&self) -> Result<(), AllocationError> {
        if self.bucket_size == 0 || self.min_eligible > self.bucket_size {
            return Err(AllocationError::InvalidRules {
                bucket_size: self.bucket_size,
                min_eligible: self.min_eligible,
            });
        }
        Ok(())
    }
    /// number of buckets needed for `entities` entities, `ceil(entities / bucket_size)`
    pub fn bucket_count(&self, entities: usize) -> usize {
        entities.div_ceil(self.bucket_size)
    }
    /// upper bound of the ineligible slot of a bucket
    pub fn ineligible_capacity(&self) -> usize {
        self.bucket_size - self.min_eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules() {
        let rules = AllocationRules::default();
        assert_eq!(rules.bucket_size, 5);
        assert_eq!(rules.min_eligible, 2);
        assert_eq!(rules.ineligible_capacity(), 3);
        assert_eq!(rules.bucket_count(0), 0);
        assert_eq!(rules.bucket_count(5), 1);
        assert_eq!(rules.bucket_count(6), 2);
        assert_eq!(rules.bucket_count(10), 2);
    }

    #[test]
    fn invalid_rules() {
        assert!(AllocationRules::new(0, 0).is_err());
        assert_eq!(
            AllocationRules::new(3, 4),
            Err(AllocationError::InvalidRules {
                bucket_size: 3,
                min_eligible: 4
            })
        );
        assert!(AllocationRules::new(3, 3).is_ok());
    }

    #[test]
    fn deserialize_with_defaults() {
        let rules: AllocationRules = serde_json::from_str(r#"{"bucket_size": 4}"#).unwrap();
        assert_eq!(rules, AllocationRules::new(4, 2).unwrap());
        let rules: AllocationRules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, AllocationRules::default());
    }
}
