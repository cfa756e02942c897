// Copyright 2020 Google LLC
//
// Use of this source code is governed by an MIT-style license that can be found
// in the LICENSE file or at https://opensource.org/licenses/MIT.

use std::time::Duration;

use structopt::clap::AppSettings;
use structopt::StructOpt;

use crate::find::walker::Options;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rfind",
    about = "Recursively walks a remote resource tree and prints the entries matching an expression.",
    setting = AppSettings::TrailingVarArg,
    setting = AppSettings::AllowLeadingHyphen
)]
pub struct Opts {
    #[structopt(long = "api-url", name = "URL", env = "RFIND_API_URL",
                default_value = "http://localhost:8911",
                help = "Base URL of the resource API")]
    pub api_url: String,

    #[structopt(long = "timeout", name = "DURATION", default_value = "30s",
                parse(try_from_str = humantime::parse_duration),
                help = "Time after which an API request is abandoned")]
    pub timeout: Duration,

    #[structopt(long = "verbosity", name = "LEVEL", default_value = "warn",
                help = "Verbosity of logging")]
    pub log_verbosity: log::LevelFilter,

    #[structopt(long = "depth",
                help = "Visit an entry's children before the entry itself")]
    pub depth: bool,

    #[structopt(long = "mindepth", name = "MIN", default_value = "0",
                help = "Do not test entries at depths less than MIN")]
    pub mindepth: u32,

    #[structopt(long = "maxdepth", name = "MAX",
                help = "Do not descend more than MAX levels below the root")]
    pub maxdepth: Option<u32>,

    #[structopt(long = "fullmeta",
                help = "Test -meta against each entry's full metadata")]
    pub fullmeta: bool,

    #[structopt(name = "PATH", default_value = ".",
                help = "Path of the entry to start the walk at")]
    pub path: String,

    #[structopt(name = "EXPRESSION",
                help = "Expression entries are tested against")]
    pub expression: Vec<String>,
}

impl Opts {
    /// Traversal options derived from the command line flags.
    pub fn walk_options(&self) -> Options {
        Options {
            depth: self.depth,
            mindepth: self.mindepth,
            maxdepth: self.maxdepth.unwrap_or(u32::MAX),
            fullmeta: self.fullmeta,
        }
    }
}

/// Parses command-line arguments.
///
/// This is just a convenience function intended to be used as a shortcut for
/// creating instances of `Opts`. If the arguments are invalid, the process
/// exits with an error message.
pub fn from_args() -> Opts {
    Opts::from_args()
}
