// src/lib.rs — Library root for epiminer

pub mod cli;
pub mod episode;
pub mod infra;
pub mod trace;
pub mod util;
