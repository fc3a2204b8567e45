//! Customizing the text and binary output.
//!
//! Run with: cargo run --example custom_options

use nbt_codec::{
    from_snbt, to_bytes, to_snbt_with_options, BinaryOptions, Compression, QuoteStyle, SnbtMode,
    SnbtOptions, Tag,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let payload = from_snbt(
        r#"{display: {Name: 'Steve''s "lucky" pick', Lore: ["Mined 1000 blocks"]}, Unbreakable: 1b, Damage: 3s}"#,
    );
    // a doubled quote ends the string early
    println!("Invalid input:\n{}\n", payload.unwrap_err());

    let payload = from_snbt(
        r#"{display: {Name: "Steve's \"lucky\" pick", Lore: ["Mined 1000 blocks"]}, Unbreakable: 1b, Damage: 3s}"#,
    )?;

    println!("Default (pretty):");
    println!("{}\n", to_snbt_with_options(&payload, &SnbtOptions::default()));

    println!("Compact:");
    println!("{}\n", to_snbt_with_options(&payload, &SnbtOptions::compact()));

    println!("Multiline, two-space indent:");
    let multiline = SnbtOptions::new()
        .with_mode(SnbtMode::Multiline)
        .with_indent("  ")
        .with_line_width(24);
    println!("{}\n", to_snbt_with_options(&payload, &multiline));

    println!("Single quotes, quoted keys, boolean bytes:");
    let quoted = SnbtOptions::new()
        .with_quote(QuoteStyle::ForceSingle)
        .with_unquoted_keys(false)
        .with_bool_literals(true);
    println!("{}\n", to_snbt_with_options(&payload, &quoted));

    let root = Tag::root(payload)?;
    for (label, options) in [
        ("java, gzip", BinaryOptions::java()),
        ("java, zlib", BinaryOptions::java().with_compression(Compression::Zlib)),
        ("bedrock, raw", BinaryOptions::bedrock().with_compression(Compression::None)),
    ] {
        let bytes = to_bytes(&root, &options)?;
        println!("{:<14} {:>4} bytes, starts with {:02x?}", label, bytes.len(), &bytes[..4]);
    }

    Ok(())
}
