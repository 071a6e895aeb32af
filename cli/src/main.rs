//! dappindex CLI — inspect engine defaults and build info.
//!
//! Usage:
//! ```bash
//! dappindex info
//! dappindex version
//! ```

use std::env;
use std::process;

use dappindex_core::EngineConfig;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "info" => cmd_info(),
        "version" | "--version" | "-V" => {
            println!("dappindex {}", env!("CARGO_PKG_VERSION"));
        }
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("dappindex {}", env!("CARGO_PKG_VERSION"));
    println!("Deterministic dapp history indexing engine\n");
    println!("USAGE:");
    println!("    dappindex <COMMAND>\n");
    println!("COMMANDS:");
    println!("    info     Show DappIndex configuration info");
    println!("    version  Print version");
    println!("    help     Print this help");
}

fn cmd_info() {
    let defaults = EngineConfig::default();
    println!("DappIndex v{}", env!("CARGO_PKG_VERSION"));
    println!("  Token sub-ledger decoding: {}", defaults.decode_token_ops);
    println!("  Token sub-operations: token_create, token_transfer, token_extransfer, token_approve");
    println!("  Storage backends: memory");
    println!("  Tables: operation records, dapp history, token history");
}
