//! State machine trait for state enums.
//!
//! Gives every lifecycle enum in the crate the same way of validating a
//! transition before it is applied.

use super::ValidationError;

/// Trait for enums whose values form a state machine.
///
/// Implementors list the legal transitions; `transition_to` and
/// `is_terminal` come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for ResponseState {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Completed, Retry) | (Completed, Failed))
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             Completed => vec![Retry, Failed],
///             _ => vec![],
///         }
///     }
/// }
///
/// let state = ResponseState::Completed.transition_to(ResponseState::Retry)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Ringing,
        Connected,
        OnHold,
        HungUp,
    }

    impl StateMachine for Call {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Call::*;
            matches!(
                (self, target),
                (Ringing, Connected)
                    | (Ringing, HungUp)
                    | (Connected, OnHold)
                    | (Connected, HungUp)
                    | (OnHold, Connected)
                    | (OnHold, HungUp)
            )
        }

        fn valid_transitions(&self) -> Vec<Self> {
            use Call::*;
            match self {
                Ringing => vec![Connected, HungUp],
                Connected => vec![OnHold, HungUp],
                OnHold => vec![Connected, HungUp],
                HungUp => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Call::Ringing.transition_to(Call::Connected), Ok(Call::Connected));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Call::HungUp.transition_to(Call::Connected).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from HungUp to Connected"));
    }

    #[test]
    fn hung_up_is_terminal() {
        assert!(Call::HungUp.is_terminal());
        assert!(!Call::OnHold.is_terminal());
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for state in [Call::Ringing, Call::Connected, Call::OnHold, Call::HungUp] {
            for target in state.valid_transitions() {
                assert!(
                    state.can_transition_to(&target),
                    "can_transition_to should return true for {:?} -> {:?}",
                    state,
                    target
                );
            }
        }
    }
}
