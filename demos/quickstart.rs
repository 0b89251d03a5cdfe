//! Parsing and rendering CPL, and bridging to structured values.
//!
//! Run with: cargo run --example quickstart

use cpl::{cpl, flatten, parse, render, unflatten, Ledger};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Parse a couple of flat records
    let text = "name:Adi,role:scribe\nname:Lev,role:scout\n";
    let ledger = parse(text)?;
    println!("Parsed {} records", ledger.len());
    for record in &ledger {
        println!("  name = {:?}", record.get("name"));
    }

    // Rendering reproduces the input
    println!("\nRendered:\n{}", render(&ledger));

    // Build a structured value and flatten it into a record
    let value = cpl!({
        "user": { "name": "Adi", "tags": ["scribe", "archivist"] },
        "verified": true
    });
    let record = flatten(&value)?;
    let ledger: Ledger = vec![record].into();
    let line = render(&ledger);
    println!("Flattened:\n{}", line);

    // And back again, with native types restored
    let parsed = parse(&line)?;
    let back = unflatten(&parsed.records()[0])?;
    assert_eq!(back, value);
    println!("Round-trip OK: {:?}", back);

    Ok(())
}
