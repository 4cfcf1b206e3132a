// Analytics engine: pure functions over roster, team, and scenario data.
//
// Every component here is a synchronous, side-effect-free function of its
// arguments. Failure is expressed as data (infeasible lineups, empty
// rankings), never as errors.

pub mod anomaly;
pub mod chemistry;
pub mod lineup;
pub mod projection;
pub mod radar;
pub mod recommend;
pub mod scouting;
pub mod sensitivity;
pub mod simulation;
pub mod tournament;

/// Round to a fixed number of decimal places.
///
/// All user-facing numeric outputs go through this so floating-point noise
/// never changes a displayed tie.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
