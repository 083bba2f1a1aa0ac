//! Evaluation settings shared by the accumulation engine and the debug check.

use serde::{Deserialize, Serialize};

/// Controls how rows are spread over the rayon pool.
///
/// Every field has a default, so a partial document such as
/// `{"parallel": false}` deserializes into a complete config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvaluationConfig {
    /// Evaluate rows on the rayon pool.
    pub parallel: bool,
    /// Smallest number of rows a single rayon task processes.
    pub min_rows_per_task: usize,
    /// Upper bound on failures collected by `RelationRegistry::failures`.
    pub max_reported_failures: usize,
}

impl EvaluationConfig {
    /// Sequential evaluation, mostly useful in tests and when debugging a
    /// single failing row.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub(crate) fn chunk_len(&self) -> usize {
        self.min_rows_per_task.max(1)
    }
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            min_rows_per_task: 1 << 10,
            max_reported_failures: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EvaluationConfig = serde_json::from_str(r#"{"parallel": false}"#).unwrap();
        assert!(!config.parallel);
        assert_eq!(config.min_rows_per_task, 1024);
        assert_eq!(config.max_reported_failures, 64);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = serde_json::from_str::<EvaluationConfig>(r#"{"threads": 4}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_chunk_len_is_never_zero() {
        let config = EvaluationConfig {
            min_rows_per_task: 0,
            ..EvaluationConfig::default()
        };
        assert_eq!(config.chunk_len(), 1);
    }
}
