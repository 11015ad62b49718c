use thiserror::Error;

/// Expected failure conditions of the simulation core.
/// Everything else is a contract violation and panics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Rejection sampling did not produce a valid polygon within the allowed number of attempts
    #[error("no valid object generated after {attempts} attempts")]
    GenerationExhausted { attempts: usize },
}
