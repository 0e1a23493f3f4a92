pub mod evaluations;
pub mod intake;
pub mod recruitment;
