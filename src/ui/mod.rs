//! Terminal UI: column selector, match scoreboard, and the status line
//! standing in for the winner/next-set dialogs. Contains no game rules;
//! it submits columns to the engine and renders whatever comes back.

mod app;
mod game_view;

pub use app::App;
