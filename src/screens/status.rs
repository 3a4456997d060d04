use crate::error::ScreenError;

/// Progress of a screen's primary data.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Shown full-screen with a retry action.
    Failed(ScreenError),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&ScreenError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}
