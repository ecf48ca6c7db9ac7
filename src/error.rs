pub type PlayscopeResult<T> = Result<T, PlayscopeError>;

#[derive(thiserror::Error, Debug)]
pub enum PlayscopeError {
    #[error("load error: {0}")]
    Load(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("capture error: {0}")]
    Capture(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlayscopeError {
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            PlayscopeError::load("x").to_string().contains("load error:")
        );
        assert!(
            PlayscopeError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            PlayscopeError::capture("x")
                .to_string()
                .contains("capture error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PlayscopeError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
