pub mod manager;
pub mod state;

pub use manager::{AssessmentSession, SessionPolicy};
pub use state::{DispatchTicket, SessionPhase, SessionResults, SessionState};
