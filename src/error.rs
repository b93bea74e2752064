use thiserror::Error;

/// Errors reported by the filters in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FilterError {
    /// A construction parameter was out of range.
    #[error("invalid argument `{name}` = {value}: must be positive and finite")]
    InvalidArgument { name: &'static str, value: f64 },

    /// A sample was NaN or infinite and was not buffered.
    #[error("non-finite input {0} rejected")]
    NonFiniteInput(f64),

    /// A finite sample whose time-weighted value would overflow the running
    /// sum. It was not buffered.
    #[error("input {value} over {dt}s overflows the running sum")]
    Overflow { value: f64, dt: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = FilterError::InvalidArgument {
            name: "window_seconds",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid argument `window_seconds` = -1: must be positive and finite"
        );
        assert_eq!(
            FilterError::NonFiniteInput(f64::NAN).to_string(),
            "non-finite input NaN rejected"
        );
        assert_eq!(
            FilterError::Overflow { value: -2.5, dt: 0.5 }.to_string(),
            "input -2.5 over 0.5s overflows the running sum"
        );
    }
}
