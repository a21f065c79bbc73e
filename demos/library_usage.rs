//! Example: Using chatstats as a library
//!
//! This example demonstrates how to run the pipeline in your own projects.
//!
//! Run with: cargo run --example library_usage

use chatstats::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== chatstats Library Usage Examples ===\n");

    // Example 1: Build an export in code
    println!("1. Building an export:");
    let export = ChatExport::new("Weekend plans")
        .with_participant("Alice")
        .with_participant("Bob")
        .with_message(Message::new("Bob", 1_705_400_000_000).with_content("Sunday works"))
        .with_message(
            Message::new("Alice", 1_705_314_600_000)
                .with_content("Hiking on the weekend?")
                .with_reaction(Reaction::new("👍", "Bob")),
        )
        .with_message(
            Message::new("Alice", 1_706_800_000_000).with_photo(MediaRef::new("photos/summit.jpg")),
        );

    for msg in sorted_by_time(&export.messages) {
        println!(
            "   {} {}: {}",
            msg.timestamp_ms,
            msg.sender_name,
            msg.content.as_deref().unwrap_or("[media]")
        );
    }

    // Example 2: Statistics
    println!("\n2. Statistics:");
    let stats = aggregate(&export);
    for line in stats.summary_lines() {
        println!("   {}", line);
    }

    // Example 3: Timeline
    println!("\n3. Messages per month:");
    for bucket in timeline(&export)? {
        println!("   {}: {}", bucket.period, bucket.message_count);
    }

    // Example 4: Content listing
    println!("\n4. Photos, most recent first:");
    for record in extract_by_kind(&export, ContentKind::Photos) {
        println!("   {} ({})", record.content.as_display(), record.sender);
    }

    // Example 5: Validate raw JSON
    println!("\n5. Validating uploaded JSON:");
    let json = serde_json::to_string(&export)?;
    let parsed = parse_export(&json)?;
    println!("   Round trip ok: {}", parsed == export);

    match parse_export(r#"{"messages": []}"#) {
        Ok(_) => println!("   Unexpectedly valid"),
        Err(e) => println!("   Rejected: {}", e.user_message()),
    }

    // Example 6: Upload boundary
    println!("\n6. Processing an upload:");
    let file = UploadedFile::new("message_1.json", "application/json", json.into_bytes());
    let outcome = process_upload(&file, &StatsConfig::default());
    println!("   success={} messages={}", outcome.success, stats.message_count);

    // Example 7: Output formats
    println!("\n7. Timeline as JSONL:");
    print!("{}", to_format_string(&timeline(&export)?, OutputFormat::Jsonl)?);

    println!("\n=== Done! ===");
    Ok(())
}
