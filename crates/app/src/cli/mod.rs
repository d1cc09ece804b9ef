use clap::{Parser, Subcommand};

mod room;
mod token;

#[derive(Debug, Parser)]
#[command(name = "roost-app", about = "Roost CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Token(token::TokenCommand),
    Room(room::RoomCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Token(command) => token::run(command).await,
            Commands::Room(command) => room::run(command).await,
        }
    }
}
