// Copyright 2020 Google LLC
//
// Use of this source code is governed by an MIT-style license that can be found
// in the LICENSE file or at https://opensource.org/licenses/MIT.

use log::{debug, error};

use rfind::client::http::HttpClient;
use rfind::find::walker::Walker;
use rfind::{find, opts};

fn main() {
    let opts = opts::from_args();
    init(&opts);

    std::process::exit(run(&opts));
}

/// Initializes the logging subsystem. Logs go to the standard error, the
/// standard output is reserved for matches.
fn init(opts: &opts::Opts) {
    let config = simplelog::Config::default();
    let stderr = std::io::stderr();
    if let Err(error) = simplelog::WriteLogger::init(opts.log_verbosity, config, stderr) {
        eprintln!("failed to initialize logger: {}", error);
    }
}

/// Runs the walk and returns the process exit status.
fn run(opts: &opts::Opts) -> i32 {
    let query = match find::parse(&opts.expression) {
        Ok(query) => query,
        Err(error) => {
            eprintln!("rfind: {}", error);
            return 2;
        }
    };
    debug!("compiled query: {:?}", query.predicate());

    let client = match HttpClient::new(&opts.api_url, opts.timeout) {
        Ok(client) => client,
        Err(error) => {
            error!("failed to create the API client: {}", error);
            eprintln!("rfind: {}", error);
            return 2;
        }
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut walker = Walker::new(
        &query,
        opts.walk_options(),
        &client,
        stdout.lock(),
        stderr.lock(),
    );

    if walker.walk(&opts.path) {
        0
    } else {
        1
    }
}
