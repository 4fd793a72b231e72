//! Simple command that prints the classification, fields, and alternate representations of each
//! argument.

use std::{env, process::ExitCode};

use uuidx::{Fields, Format, Uuid};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: inspect <uuid>...");
        return ExitCode::FAILURE;
    }

    for arg in &args {
        match Uuid::parse(arg) {
            Ok(e) => describe(e),
            Err(err) => {
                eprintln!("Error: {}: {}", arg, err);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}

fn describe(e: Uuid) {
    println!("{}", e);
    println!("  variant: {:?}", e.variant());
    match e.version() {
        Some(v) => println!("  version: {}", v),
        None => println!("  version: none (sentinel)"),
    }
    println!("  hex:     {}", e.render(Format::Simple));
    println!("  urn:     {}", e.render(Format::Urn));
    println!("  decimal: {}", e.render(Format::Decimal));
    println!("  guid:    {:02x?}", e.to_guid_bytes());

    match e.fields() {
        Some(Fields::V1 {
            timestamp,
            clock_seq,
            node,
        })
        | Some(Fields::V6 {
            timestamp,
            clock_seq,
            node,
        }) => {
            println!("  time:    {}", timestamp.to_datetime());
            println!("  clock:   {:#06x}", clock_seq);
            println!("  node:    {:012x}", node);
        }
        Some(Fields::V2 {
            local_id,
            domain,
            timestamp,
            clock_seq,
            node,
        }) => {
            println!("  local:   {} in {:?}", local_id, domain);
            println!("  time:    {} (truncated)", timestamp.to_datetime());
            println!("  clock:   {:#04x}", clock_seq);
            println!("  node:    {:012x}", node);
        }
        Some(Fields::V7 {
            unix_ts_ms,
            rand_a,
            rand_b,
        }) => {
            println!("  unix ms: {}", unix_ts_ms);
            println!("  rand:    {:03x} {:016x}", rand_a, rand_b);
        }
        Some(Fields::V8 {
            custom_a,
            custom_b,
            custom_c,
        }) => {
            println!("  custom:  {:012x} {:03x} {:016x}", custom_a, custom_b, custom_c);
        }
        None => {}
    }
}
