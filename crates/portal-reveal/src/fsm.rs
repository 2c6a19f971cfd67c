//! Reveal state machine using rust-fsm.
//!
//! ## State Diagram
//!
//! ```text
//! ┌──────────┐  Request   ┌──────────┐  FetchSucceeded  ┌──────────┐
//! │  Hidden  │ ─────────► │ Fetching │ ───────────────► │ Revealed │
//! └──────────┘            └──────────┘                  └──────────┘
//!      ▲                       │                             │
//!      │    FetchFailed / Hide │            Expired / Hide   │
//!      └───────────────────────┴─────────────────────────────┘
//! ```
//!
//! `Hide` is accepted in every state so early-hide, target-switch, and
//! unmount all funnel through one input.

use rust_fsm::*;
use serde::{Deserialize, Serialize};

state_machine! {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub reveal_machine(Hidden)

    Hidden => {
        Request => Fetching,
        Hide => Hidden
    },
    Fetching => {
        FetchSucceeded => Revealed,
        FetchFailed => Hidden,
        Hide => Hidden
    },
    Revealed => {
        Expired => Hidden,
        Hide => Hidden
    }
}

// Re-export the generated types with clearer names
pub use reveal_machine::Input as RevealMachineInput;
pub use reveal_machine::State as RevealMachineState;
pub use reveal_machine::StateMachine as RevealMachine;

/// Simplified view of the machine state for display surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// No secret displayed, no fetch in flight.
    Hidden,
    /// A reveal call is in flight; further requests are ignored.
    Fetching,
    /// Plaintext is displayed and counting down.
    Revealed,
}

impl From<&RevealMachineState> for RevealState {
    fn from(state: &RevealMachineState) -> Self {
        match state {
            RevealMachineState::Hidden => RevealState::Hidden,
            RevealMachineState::Fetching => RevealState::Fetching,
            RevealMachineState::Revealed => RevealState::Revealed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let mut fsm = RevealMachine::new();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Hidden);

        fsm.consume(&RevealMachineInput::Request).unwrap();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Fetching);

        fsm.consume(&RevealMachineInput::FetchSucceeded).unwrap();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Revealed);

        fsm.consume(&RevealMachineInput::Expired).unwrap();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Hidden);
    }

    #[test]
    fn test_hide_accepted_everywhere() {
        let mut fsm = RevealMachine::new();
        fsm.consume(&RevealMachineInput::Hide).unwrap();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Hidden);

        fsm.consume(&RevealMachineInput::Request).unwrap();
        fsm.consume(&RevealMachineInput::Hide).unwrap();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Hidden);

        fsm.consume(&RevealMachineInput::Request).unwrap();
        fsm.consume(&RevealMachineInput::FetchSucceeded).unwrap();
        fsm.consume(&RevealMachineInput::Hide).unwrap();
        assert_eq!(RevealState::from(fsm.state()), RevealState::Hidden);
    }

    #[test]
    fn test_cannot_reveal_without_fetch() {
        let mut fsm = RevealMachine::new();
        assert!(fsm.consume(&RevealMachineInput::FetchSucceeded).is_err());
        assert!(fsm.consume(&RevealMachineInput::Expired).is_err());
    }
}
