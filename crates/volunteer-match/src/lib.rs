//! Volunteer to opportunity matchmaking: a pure scoring engine plus the
//! application intake service that records scored applications.

pub mod applications;
pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod telemetry;
