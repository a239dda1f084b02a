//! This crate contains the source code for the mazetrail binary.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazetrail::{print_solution, App, Cli};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();

    if cli.print {
        return print_solution(&cli);
    }

    let mut app = App::from_cli(&cli)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
