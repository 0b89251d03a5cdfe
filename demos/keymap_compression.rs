//! Key-map compression: repeated dotted paths collapse to short aliases.
//!
//! Run with: cargo run --example keymap_compression

use cpl::{parse, render, render_with_options, RenderOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let text = "\
person.name:Adi,person.role:scribe,address.city:Jerusalem
person.name:Lev,person.role:scout,address.city:Hebron
person.name:Noa,person.role:smith,address.city:Jaffa
";
    let ledger = parse(text)?;

    let plain = render(&ledger);
    println!("Plain ({} bytes):\n{}", plain.len(), plain);

    let compressed = render_with_options(&ledger, RenderOptions::compressed());
    println!("Compressed ({} bytes):\n{}", compressed.len(), compressed);

    // Compression is purely a wire-level policy: both forms parse to the
    // same resolved ledger.
    assert_eq!(parse(&plain)?, parse(&compressed)?);
    println!(
        "Saved {} bytes with no semantic difference",
        plain.len() - compressed.len()
    );

    // A higher threshold aliases only heavily repeated paths
    let selective = render_with_options(
        &ledger,
        RenderOptions::compressed().with_alias_threshold(4),
    );
    println!("\nThreshold 4 (no path repeats 4 times):\n{}", selective);

    Ok(())
}
