mod demo;
mod list;
mod logging;
mod script;

use std::io::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::list::{AnyList, Topology};
use crate::logging::TracingConfig;

#[derive(Debug, Parser)]
#[command(
    version = option_env!("APP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
    about = "Drive singly, doubly, and circular linked lists",
)]
struct Listutl {
    #[command(flatten, next_display_order = 100)]
    tracing: TracingConfig,

    #[arg(
        long,
        global = true,
        default_value_t = 0,
        help = "Preallocate node slots for this many nodes"
    )]
    capacity: usize,

    #[command(subcommand, next_display_order = 0)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Run the demonstration scenario of a list")]
    Demo {
        #[arg(value_enum)]
        topology: Topology,
    },
    #[command(about = "Apply a YAML sequence of operations to a list")]
    Run {
        #[arg(value_enum)]
        topology: Topology,
        #[arg(default_value = "-", help = "Operation script path, or `-` for stdin")]
        script: PathBuf,
    },
}

impl Listutl {
    fn execute(&self) -> Result<(), Error> {
        let (topology, operations) = match &self.command {
            Command::Demo { topology } => (*topology, demo::scenario(*topology)),
            Command::Run { topology, script } => (*topology, script::load(script)?),
        };

        let mut list = AnyList::new(topology, self.capacity).map_err(|error| {
            tracing::error!(capacity = self.capacity, %error, "new");
            Error::other(error)
        })?;
        let _span = tracing::info_span!("run", %topology).entered();
        tracing::info!(num_operations = operations.len(), "start");
        for operation in operations {
            match list.apply(operation) {
                Ok(outcome) => println!("{outcome}"),
                Err(error) if error.is_recoverable() => {
                    println!("{}", list.describe(operation, &error));
                }
                Err(error) => {
                    tracing::error!(%operation, %error, "apply");
                    return Err(Error::other(error));
                }
            }
        }
        Ok(())
    }
}

fn main() -> Result<(), Error> {
    let listutl = Listutl::parse();
    listutl.tracing.init();
    listutl.execute()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command() {
        Listutl::command().debug_assert();
    }

    #[test]
    fn parse() {
        let listutl = Listutl::try_parse_from(["listutl", "demo", "circular"]).unwrap();
        assert_eq!(listutl.capacity, 0);
        assert!(matches!(
            listutl.command,
            Command::Demo {
                topology: Topology::Circular,
            },
        ));

        let listutl =
            Listutl::try_parse_from(["listutl", "run", "doubly", "--capacity", "8"]).unwrap();
        assert_eq!(listutl.capacity, 8);
        match listutl.command {
            Command::Run { topology, script } => {
                assert_eq!(topology, Topology::Doubly);
                assert_eq!(script, PathBuf::from("-"));
            }
            command => std::panic!("{command:?}"),
        }

        assert!(Listutl::try_parse_from(["listutl", "demo", "skip"]).is_err());
    }

    #[test]
    fn execute_capacity_overflow() {
        let capacity = usize::MAX.to_string();
        let args = ["listutl", "demo", "singly", "--capacity", capacity.as_str()];
        let listutl = Listutl::try_parse_from(args).unwrap();
        assert_eq!(listutl.capacity, usize::MAX);
        let error = listutl.execute().unwrap_err();
        assert_eq!(error.kind(), std::io::ErrorKind::Other);
        assert!(error.to_string().starts_with("node allocation failed: "));
    }
}
