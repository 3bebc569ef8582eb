pub mod sumcheck;
