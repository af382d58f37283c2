//! Core library for the real-trends-report command line application.
//!
//! Ranking tables for agents and teams are fetched per state, the "sides" and
//! "volume" views are merged on agent or team identity, re-ranked, and written
//! to one workbook. Fetching and workbook output live under [`io`], the
//! row variants under [`record`], the merge engine in [`rank`], and the run
//! orchestration in [`report`].

pub mod config;
pub mod currency;
pub mod error;
pub mod io;
pub mod model;
pub mod rank;
pub mod record;
pub mod report;

pub use config::ReportConfig;
pub use error::{ReportError, Result};
