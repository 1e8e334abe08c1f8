use std::collections::BTreeSet;

use tracing::error;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Args {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub datapath: Option<String>,
    pub scope: Option<u32>,
    pub upcoming: Option<usize>,
    pub debug: bool,
}

impl Args {
    // parse arguments, return set of unrecognized args
    pub fn parse(args: &[String]) -> (Self, BTreeSet<String>) {
        let mut unrecognized_args = BTreeSet::new();
        let mut res = Args::default();

        let mut i = 0;
        let len = args.len();
        while i < len {
            let arg = &args[i];

            if arg == "--debug" {
                res.debug = true;
            } else if arg == "--api-url" {
                i += 1;
                let Some(url) = args.get(i) else {
                    error!("api-url argument missing?");
                    continue;
                };
                res.api_url = Some(url.clone());
            } else if arg == "--token" {
                i += 1;
                let Some(token) = args.get(i) else {
                    error!("token argument missing?");
                    continue;
                };
                res.token = Some(token.clone());
            } else if arg == "--datapath" {
                i += 1;
                let Some(path) = args.get(i) else {
                    error!("datapath argument missing?");
                    continue;
                };
                res.datapath = Some(path.clone());
            } else if arg == "--scope" {
                i += 1;
                let Some(scope) = args.get(i) else {
                    error!("scope argument missing?");
                    continue;
                };
                match scope.parse::<u32>() {
                    Ok(id) => res.scope = Some(id),
                    Err(err) => error!("failed to parse scope '{scope}': {err}"),
                }
            } else if arg == "--upcoming" {
                i += 1;
                let Some(count) = args.get(i) else {
                    error!("upcoming argument missing?");
                    continue;
                };
                match count.parse::<usize>() {
                    Ok(n) => res.upcoming = Some(n),
                    Err(err) => error!("failed to parse upcoming count '{count}': {err}"),
                }
            } else {
                unrecognized_args.insert(arg.clone());
            }

            i += 1;
        }

        (res, unrecognized_args)
    }
}
