//! f1dash: sorting, searching, hashing, trees and recursion over Formula 1 results

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
