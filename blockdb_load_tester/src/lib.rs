//! Fires the sample write operations at a set of servers, all at once,
//! and tallies what came back.

pub mod logic;

pub use logic::{
    build_client, classify, plan_requests, run_load, send_all, LoadReport, Outcome,
    PlannedRequest,
};
