//! Text, binary and back again.
//!
//! Run with: cargo run --example simple

use nbt_codec::{from_bytes, from_snbt_tag, to_bytes, to_value, BinaryOptions, Payload};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let player = from_snbt_tag(
        r#"{
            Name: "Steve",
            Health: 20.0f,
            XpLevel: 30,
            Pos: [-12.5d, 64.0d, 301.25d],
            Inventory: [{id: "minecraft:diamond_sword", Count: 1b, Slot: 0b}],
            UUID: uuid("550e8400-e29b-41d4-a716-446655440000")
        }"#,
    )?;
    println!("Parsed:\n{}\n", player);

    let bytes = to_bytes(&player, &BinaryOptions::java())?;
    println!("Encoded to {} gzip-compressed bytes", bytes.len());

    let back = from_bytes(&bytes, &BinaryOptions::java())?;
    assert_eq!(back, player);
    println!("✓ Round-trip successful");

    if let Some(uuid) = back.payload().get("UUID").and_then(Payload::to_uuid) {
        println!("UUID: {}", uuid);
    }

    println!("As JSON: {}", serde_json::to_string(&to_value(back.payload()))?);
    Ok(())
}
