//! Time-boxed secret disclosure for game credentials.
//!
//! A revealed credential pair lives for a server-granted window and not a
//! second longer on this side either: the controller fetches the plaintext,
//! holds it for `expires_in_seconds` one-second ticks, then clears it from
//! memory. Manual hide, switching to another item, and unmount all cancel the
//! countdown immediately so a stale timer can never clear (or leak) the wrong
//! item's secret.
//!
//! The lifecycle is an explicit finite state machine
//! (`Hidden -> Fetching -> Revealed -> Hidden`) rather than cleanup calls
//! scattered around a timer handle.

mod controller;
mod error;
mod fsm;


pub use controller::{RevealBackend, RevealController, RevealOutcome, RevealSession};
pub use error::{RevealError, RevealResult};
pub use fsm::reveal_machine;
pub use fsm::{RevealMachine, RevealMachineInput, RevealMachineState, RevealState};
