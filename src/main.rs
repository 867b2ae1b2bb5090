use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use connect_four_match::config::{AppConfig, GameMode};
use connect_four_match::ui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Play Connect Four over a best-of-N match of sets.
#[derive(Parser)]
#[command(name = "connect-four-match", about = "Connect Four, best-of-N sets, in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override game mode: pvp or pvai
    #[arg(long)]
    mode: Option<String>,

    /// Override number of sets (odd)
    #[arg(long)]
    sets: Option<usize>,

    /// Override the opponent's search depth in plies
    #[arg(long)]
    depth: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    if let Some(mode) = cli.mode.as_deref() {
        config.game.mode = match mode {
            "pvp" => GameMode::Pvp,
            "pvai" => GameMode::Pvai,
            other => bail!("unknown mode '{other}', expected 'pvp' or 'pvai'"),
        };
    }
    if let Some(sets) = cli.sets {
        config.game.best_of = sets;
    }
    if let Some(depth) = cli.depth {
        config.game.search_depth = depth;
    }
    config.validate().context("invalid configuration")?;

    let mut app = App::new(config.game).context("starting match")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running the UI")
}
