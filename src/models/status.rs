/// User-facing state of the last operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OperationStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(String),
}

/// Everything the status line can show at once.
///
/// A fetch can be in flight while an earlier error is still on screen, so the
/// slots are tracked separately and folded into an [`OperationStatus`] on read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl StatusSnapshot {
    pub fn status(&self) -> OperationStatus {
        if self.loading {
            OperationStatus::Loading
        } else if let Some(message) = &self.error {
            OperationStatus::Error(message.clone())
        } else if let Some(message) = &self.success {
            OperationStatus::Success(message.clone())
        } else {
            OperationStatus::Idle
        }
    }
}
