mod outcome;
mod state;

pub use outcome::DispatchOutcome;
pub use state::RequestState;
