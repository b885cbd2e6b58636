//! Simulated latency for LOCAL responses, so both modes feel alike.

use std::time::Duration;

use crate::constants;

/// Operations that get an artificial delay in LOCAL mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Train,
    Predict,
    Explain,
}

/// Per-operation delay. Use [`SimulatedLatency::zero`] in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub train: Duration,
    pub predict: Duration,
    pub explain: Duration,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            train: Duration::from_millis(constants::LOCAL_TRAIN_LATENCY_MS),
            predict: Duration::from_millis(constants::LOCAL_PREDICT_LATENCY_MS),
            explain: Duration::from_millis(constants::LOCAL_EXPLAIN_LATENCY_MS),
        }
    }
}

impl SimulatedLatency {
    pub fn zero() -> Self {
        Self {
            train: Duration::ZERO,
            predict: Duration::ZERO,
            explain: Duration::ZERO,
        }
    }

    /// Default delays when enabled, zero otherwise
    pub fn enabled(enabled: bool) -> Self {
        if enabled {
            Self::default()
        } else {
            Self::zero()
        }
    }

    pub fn for_operation(&self, op: Operation) -> Duration {
        match op {
            Operation::Train => self.train,
            Operation::Predict => self.predict,
            Operation::Explain => self.explain,
        }
    }

    /// Sleep for the operation's delay; returns immediately when zero
    pub async fn delay(&self, op: Operation) {
        let duration = self.for_operation(op);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
