//! Batch processing example.
//!
//! Run with: `cargo run --example batch`

use pan_validator::{batch, stream::ParseExt, BatchParser};

fn main() {
    println!("=== Batch PAN Parsing ===\n");

    // Sample numbers (mix of valid and invalid)
    let pans = vec![
        "4000000000000002",    // Visa
        "5100000000000008",    // MasterCard
        "378282246310005",     // American Express
        "6011000000000004",    // Discover
        "4000000000000003",    // Bad check digit
        "invalid",             // Not a number
        "6334500000000000002", // Solo, 19 digits
        "3528000000000007",    // JCB
    ];

    // Method 1: BatchParser
    println!("Using BatchParser:");
    let parser = BatchParser::new();

    let results = parser.parse_all(&pans);
    println!("  Total: {}", results.len());
    println!(
        "  Valid: {}",
        results.iter().filter(|r| r.is_ok()).count()
    );
    println!(
        "  Invalid: {}",
        results.iter().filter(|r| r.is_err()).count()
    );
    println!();

    // Method 2: Partitioned results keep the input index of each error
    println!("Partitioned:");
    let (valid, invalid) = parser.parse_partitioned(&pans);
    for pan in &valid {
        println!("  ok   {}", pan.masked_with_iin());
    }
    for (index, error) in &invalid {
        println!("  err  #{}: {}", index, error);
    }
    println!();

    // Method 3: Product counts
    println!("Product counts:");
    let mut counts: Vec<_> = parser.product_counts(&pans).into_iter().collect();
    counts.sort_by_key(|(product, _)| *product);
    for (product, count) in counts {
        let name = product.map_or("Unknown", |p| p.name());
        println!("  {:16}: {}", name, count);
    }
    println!();

    // Method 4: Quick counting
    let (valid_count, invalid_count) = batch::count_valid(&pans);
    println!("Quick count: {} valid, {} invalid", valid_count, invalid_count);
    println!();

    // Method 5: Streaming over formatted input
    println!("Streaming:");
    let formatted = ["4000 0000 0000 0002", "6011-0000-0000-0004"];
    let lenient = BatchParser::new().allow_separators(true);
    println!(
        "  strict stream accepts {} of {}",
        formatted.iter().copied().parse_valid_only().count(),
        formatted.len()
    );
    println!(
        "  lenient batch accepts {} of {}",
        lenient.parse_valid_only(&formatted).len(),
        formatted.len()
    );
    for result in pans.iter().copied().classify_pans().take(3) {
        match result {
            Ok((pan, product)) => println!(
                "  {} -> {}",
                pan,
                product.map_or("Unknown", |p| p.name())
            ),
            Err(e) => println!("  error: {}", e),
        }
    }
}
