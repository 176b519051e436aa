use crate::strategy::LayoutStrategyKind;

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Layout failures. A failed pass never touches its input nodes, so callers keep rendering the
/// previous layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout request {generation} was superseded by request {latest}")]
    Superseded { generation: u64, latest: u64 },

    #[error("stress solver failed: {message}")]
    Solver { message: String },

    #[error("no layout strategy registered for `{kind}`")]
    UnknownStrategy { kind: LayoutStrategyKind },

    #[error("unknown layout strategy name `{name}`")]
    UnknownStrategyName { name: String },

    #[error("unknown layout scope `{name}` (expected `all` or `new-only`)")]
    UnknownScope { name: String },

    #[error("invalid layout options: {message}")]
    InvalidOptions { message: String },
}

impl LayoutError {
    /// Every layout failure leaves the input nodes untouched; callers keep the previous layout.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// The same request may succeed when retried. Option and registration errors will not.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Superseded { .. } | Self::Solver { .. })
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded { .. })
    }
}

impl From<mapgraph_core::Error> for LayoutError {
    fn from(value: mapgraph_core::Error) -> Self {
        Self::InvalidOptions {
            message: value.to_string(),
        }
    }
}
