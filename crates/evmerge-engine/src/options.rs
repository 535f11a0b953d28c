use serde::{Deserialize, Serialize};

/// Input checks run by [`MergeEngine`](crate::MergeEngine) before merging.
///
/// Bounds checking is always performed. The remaining checks trade time for
/// guarantees: with everything disabled, overlapping or unsorted partitions
/// produce an index sequence that silently violates the ordering property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Reject partitions with `cursor >= end` instead of dropping them. O(P).
    pub reject_empty: bool,
    /// Reject partitions whose ranges overlap. O(P log P).
    pub check_overlap: bool,
    /// Reject partitions whose timestamps decrease. O(E).
    pub check_sorted: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            reject_empty: true,
            check_overlap: false,
            check_sorted: false,
        }
    }
}

impl MergeOptions {
    /// Every check enabled.
    pub fn strict() -> Self {
        Self {
            reject_empty: true,
            check_overlap: true,
            check_sorted: true,
        }
    }

    /// No optional checks: empty partitions are dropped and the caller is
    /// trusted to supply disjoint, sorted ranges.
    pub fn unchecked() -> Self {
        Self {
            reject_empty: false,
            check_overlap: false,
            check_sorted: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_only_rejects_empty() {
        let o = MergeOptions::default();
        assert!(o.reject_empty);
        assert!(!o.check_overlap);
        assert!(!o.check_sorted);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let o: MergeOptions = serde_json::from_str(r#"{"check_sorted":true}"#).unwrap();
        assert!(o.reject_empty);
        assert!(o.check_sorted);
        assert!(!o.check_overlap);
    }

    #[test]
    fn presets() {
        assert!(MergeOptions::strict().check_overlap);
        assert!(!MergeOptions::unchecked().reject_empty);
    }
}
