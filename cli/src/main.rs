//! Demo tool wiring a command file to actions.
//!
//! `conf/commands.json` declares the commands; the closures below supply
//! their behavior. Everything else (parsing, validation, help, version,
//! exit handling) comes from the dispatch library.

use std::path::Path;

use commandeer_dispatch::{Actions, CommandOpts, Invocation, command, exit};
use commandeer_proc::{ExecOpts, Output, collect};

fn main() {
    let base = Path::new(env!("CARGO_MANIFEST_DIR"));
    let actions = Actions::new()
        .with("add", add)
        .with("shout", shout)
        .with("sysinfo", sysinfo);

    exit::exit(command(base, actions, CommandOpts::default()));
}

fn add(invocation: &Invocation) {
    let augend = parse_number(invocation.args.first());
    let addend = parse_number(invocation.args.get(1));
    if invocation.is_set("verbose") {
        eprintln!("adding {augend} and {addend}");
    }

    let total = augend + addend;
    match invocation.args.get(2) {
        Some(label) => println!("{label}: {total}"),
        None => println!("{total}"),
    }
}

fn shout(invocation: &Invocation) {
    let message = invocation
        .args
        .first()
        .map(String::as_str)
        .unwrap_or_default();
    let repeat = invocation
        .value("count")
        .and_then(|count| count.parse::<u32>().ok())
        .unwrap_or(1);

    for _ in 0..repeat {
        println!("{}", message.to_uppercase());
    }
}

fn sysinfo(_: &Invocation) {
    match collect("uname", &["-sr"], ExecOpts::default()).and_then(Output::require_success) {
        Ok(output) => print!("{}", output.stdout),
        Err(err) => eprintln!("{err}"),
    }
}

fn parse_number(value: Option<&String>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0.0)
}
