pub mod errors;
pub mod sample;
pub mod state;
pub mod likelihood;

pub use errors::ObjectiveError;
pub use sample::Sample;
pub use state::ObjectiveState;
pub use likelihood::{
    Objective, info_mu, likelihood_of_mu, likelihood_of_sigma, log_likelihood, score_mu,
};
