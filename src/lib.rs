//! # Connect Four Match
//!
//! A Connect Four game played over a best-of-N match of sets, human vs.
//! human or human vs. a minimax opponent with alpha-beta pruning.
//! Features a terminal UI built with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player, set state machine, match controller
//! - [`ai`] — Agent trait, minimax search, board heuristics
//! - [`ui`] — Terminal UI: game view with match scoreboard
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
