use std::{env, io, process};

use bank_sim::Bank;
use bank_sim::csv::{read_commands, write_accounts};
use bank_sim::demo;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse().unwrap()))
        .with_writer(std::io::stderr)
        .init();

    let mut bank = Bank::new();

    let Some(path) = env::args().nth(1) else {
        bank.run(tokio_stream::iter(demo::script())).await;
        for account in bank.accounts() {
            println!("{account}");
            println!("  {}", account.balance_summary());
        }
        return;
    };

    if !path.ends_with(".csv") {
        warn!(path, "script file seems to not be a csv file");
    }

    let commands = read_commands(path.clone()).expect("usage: bank-sim [script.csv]");
    let (command_sender, command_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in commands {
            match result {
                Ok(command) => {
                    if command_sender.send(command).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    bank.run(ReceiverStream::new(command_receiver)).await;

    if let Err(e) = write_accounts(io::stdout().lock(), bank.accounts()) {
        error!("{e}");
        process::exit(1);
    }
}
