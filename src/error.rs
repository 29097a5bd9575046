use thiserror::Error;

use crate::entity::EntityClass;

/// Failures raised by the world-state stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// No entity of the addressed class carries the requested id.
    #[error("no {class} with id {id}")]
    EntityNotFound { class: EntityClass, id: i64 },

    /// A raw class tag did not map onto a known entity class.
    #[error("unknown entity class {0}")]
    UnknownClass(i64),

    /// A raw state tag did not map onto a known state flag.
    #[error("unknown state flag {0}")]
    UnknownState(i64),

    /// A settings query used an unrecognized key.
    #[error("unknown setting `{0}`")]
    UnknownSetting(String),
}
