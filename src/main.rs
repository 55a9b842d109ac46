pub use error::Error;
mod analysis;
mod command;
mod conf;
mod draw;
mod error;
mod region;
mod render;
mod selection;
mod service;
mod session;
use conf::Conf;
use std::env;
use tracing_subscriber::EnvFilter;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[actix_web::main]
async fn main() -> Result<()> {
    init_logging();

    let conf = Conf::from_env()?;

    let args: Vec<String> = env::args().collect();

    let command = match args.get(1) {
        Some(some) => some,
        None => Err(Error::CLI("No actions passed".into()))?,
    };

    match command.as_str() {
        "draw" => command::draw::run(&args[2..], &conf).await?,
        "session" => command::session::run(&conf).await?,
        first_arg => Err(Error::CLI(format!("Unknown command: {first_arg}")))?,
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if cfg!(debug_assertions) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
