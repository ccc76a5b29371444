use thiserror::Error;

use crate::scope::ScopeKind;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("factory error: {0}")]
    Factory(#[from] eref_factory::FactoryError),

    #[error("list error: {0}")]
    List(#[from] eref_list::ListError),

    #[error("hierarchy error: {0}")]
    Hierarchy(#[from] eref_hierarchy::HierarchyError),

    #[error("misplaced scope: expected {expected}, got {actual}")]
    MisplacedScope {
        expected: ScopeKind,
        actual: ScopeKind,
    },
}

pub type SdkResult<T> = Result<T, SdkError>;
