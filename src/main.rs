//! Headless delivery runner
//!
//! Runs a single delivery from `key=value` arguments and prints the JSON
//! summary, so ice and tuning changes can be checked from a shell:
//!
//! ```text
//! hurry-hard power=0.45 spin=-1 profile=discovery seed=7 sweep=true trace=true
//! ```

use hurry_hard::sim::{simulate_delivery, DeliveryParams, IceProfile};

fn main() {
    env_logger::init();

    let mut params = DeliveryParams::default();
    let mut print_trace = false;

    for arg in std::env::args().skip(1) {
        let Some((key, value)) = arg.split_once('=') else {
            log::warn!("ignoring malformed argument {arg:?} (expected key=value)");
            continue;
        };
        match key {
            "aim" => parse_into(&mut params.aim, key, value),
            "power" => parse_into(&mut params.power, key, value),
            "spin" => parse_into(&mut params.spin, key, value),
            "paper" => {
                let mut paper = 1.0;
                parse_into(&mut paper, key, value);
                params.paper_turns = Some(paper);
            }
            "sweep" => parse_into(&mut params.sweep, key, value),
            "dt" => parse_into(&mut params.dt, key, value),
            "seed" => parse_into(&mut params.seed, key, value),
            "profile" => match IceProfile::from_str(value) {
                Some(profile) => params.profile = profile,
                None => log::warn!("unknown profile {value:?}, keeping {}", params.profile.as_str()),
            },
            "trace" => parse_into(&mut print_trace, key, value),
            _ => log::warn!("ignoring unknown argument {key:?}"),
        }
    }

    log::info!(
        "delivering: power {:.2}, aim {:.3}, spin {:+.0}, profile {}, seed {}",
        params.power,
        params.aim,
        params.spin,
        params.profile.as_str(),
        params.seed
    );

    let result = simulate_delivery(&params);

    if print_trace {
        println!("{}", serde_json::to_string(&result.trace).expect("trace serializes"));
    }
    println!("{}", serde_json::to_string_pretty(&result.summary).expect("summary serializes"));
}

/// Parse a value into `target`, logging and keeping the default on failure
fn parse_into<T: std::str::FromStr>(target: &mut T, key: &str, value: &str) {
    match value.parse() {
        Ok(parsed) => *target = parsed,
        Err(_) => log::warn!("could not parse {key}={value:?}, keeping default"),
    }
}
