//! Rondo Selection Protocol
//!
//! Concurrent independent-set selection over a ring of actors: `N` actors,
//! each with exactly two neighbors, race to be committed into a result set
//! of size `K` under the invariant that no two committed actors are
//! adjacent.
//!
//! # How a run works
//!
//! Every actor runs as its own task and repeatedly tries to *signal*
//! availability (raise a hand). Signaling is advisory - the authoritative
//! act is the coordinator's *commit*, which re-validates eligibility under
//! the same critical section that marks the actor selected and retracts its
//! neighbors' signals.
//!
//! ```text
//! workers ──raise/lower hands──► SharedState ◄──snapshot/commit── coordinator
//!                                (one mutex)
//! ```
//!
//! The adjacency invariant is enforced twice: at signal time (a hand cannot
//! go up next to a raised or selected seat) and at commit time. Fairness is
//! best-effort via randomized backoff and a uniform random pick among the
//! eligible candidates; termination is guaranteed by the coordinator's
//! attempt budget, with runs that exhaust it reporting a degraded
//! [`Outcome`] rather than hanging or erroring.
//!
//! # Example
//!
//! ```no_run
//! use rondo_select::{SelectionConfig, SelectionRun};
//!
//! # async fn demo() -> rondo_select::Result<()> {
//! let mut run = SelectionRun::with_config(12, 5, SelectionConfig::fast())?;
//! let outcome = run.run().await;
//! println!("{outcome}: {:?}", run.selected_ids());
//! assert!(run.is_valid() || !outcome.is_complete());
//! # Ok(())
//! # }
//! ```

mod config;
mod coordinator;
mod error;
mod state;
mod validator;
mod worker;

pub use config::SelectionConfig;
pub use coordinator::{Outcome, SelectionRun};
pub use error::{Error, Result};
pub use validator::is_valid_selection;
