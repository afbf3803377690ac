use std::env;
use std::io;

use clap::{ArgAction, Args};
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt::{self, format::FmtSpan},
    prelude::*,
};

#[derive(Args, Clone, Debug)]
pub(crate) struct TracingConfig {
    #[arg(
        long,
        short = 'v',
        action = ArgAction::Count,
        global = true,
        help = "Make tracing output more verbose (-vv reports every list operation)",
    )]
    verbose: u8,
    #[arg(
        long,
        action = ArgAction::Count,
        global = true,
        help = "Make tracing output less verbose",
    )]
    silent: u8,

    #[arg(long, global = true, help = "Enable colored tracing output")]
    color: bool,
}

// Relative to the default level, which is `WARN` because the list outcomes are printed to stdout
// anyway.
const OFF: i16 = -2;
const ERROR: i16 = -1;
const WARN: i16 = 0;
const INFO: i16 = 1;
const DEBUG: i16 = 2;
const TRACE: i16 = 3;

// `-v` and `--silent` adjust only these targets; everything else stays at `WARN`.
const TARGETS: &[&str] = &["linked_list", "listutl"];

impl TracingConfig {
    pub(crate) fn init(&self) {
        let layer = fmt::layer()
            .compact()
            .with_ansi(self.color)
            .with_file(self.level() >= TRACE)
            .with_line_number(true)
            .with_span_events(self.span_events())
            .with_target(true)
            .with_writer(io::stderr)
            .with_filter(self.env_filter());
        tracing_subscriber::registry().with(layer).init();
    }

    fn level(&self) -> i16 {
        i16::from(self.verbose).saturating_sub(i16::from(self.silent))
    }

    fn span_events(&self) -> FmtSpan {
        if self.level() >= TRACE {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Uses `RUST_LOG` verbatim when it is set, and the verbosity flags otherwise.
    fn env_filter(&self) -> EnvFilter {
        let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
        match env::var(EnvFilter::DEFAULT_ENV) {
            Ok(directives) => builder.parse_lossy(directives),
            Err(_) => builder.parse_lossy(self.directives()),
        }
    }

    fn directives(&self) -> String {
        let level = self.level_filter().to_string().to_lowercase();
        TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn level_filter(&self) -> LevelFilter {
        match self.level() {
            level if level <= OFF => LevelFilter::OFF,
            ERROR => LevelFilter::ERROR,
            WARN => LevelFilter::WARN,
            INFO => LevelFilter::INFO,
            DEBUG => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
