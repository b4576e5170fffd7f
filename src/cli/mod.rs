//! CLI infrastructure for the tic-tac-toe solver
//!
//! This module provides the command-line interface for playing against the
//! solver, running matches between players and analyzing positions.

pub mod commands;
pub mod output;
