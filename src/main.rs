use clap::Parser;
use log::error;
use std::{fs, process};
use tiny_mdns::{query, responder::Responder, Config, Error};

#[derive(Parser)]
#[command(name = "tiny-mdns")]
#[command(about = "Tiny mDNS responder answering A queries for this host")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Detach from the terminal and write a pid file
    #[arg(short = 'D', long)]
    daemon: bool,

    /// Send one query and print the answer instead of serving
    #[arg(long)]
    query: bool,

    /// Host name to query for
    name: Option<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let config = Config::load(cli.config.as_deref())?;
    let address = config.interface_address()?;
    let hostname = config.hostname()?;

    if cli.query {
        let name = cli.name.unwrap_or(hostname);
        println!("query {}", name);

        let rdata = query::resolve(&config, &name, address)?;
        println!("answer {}", query::format_address(&rdata));

        return Ok(());
    }

    let mut responder = Responder::new(&config, &hostname, address)?;

    if cli.daemon {
        let pid_file = config.pid_file()?;
        nix::unistd::daemon(false, false)?;

        fs::write(&pid_file, format!("{}\n", process::id()))?;
    } else {
        println!("server wait");
    }

    responder.listener_loop();

    Ok(())
}
