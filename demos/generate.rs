//! Test PAN generation example.
//!
//! Run with: `cargo run --example generate --features generate`

use pan_validator::{classify, generate, parse_pan, Product};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("=== Test PAN Generation ===\n");

    // -------------------------------------------------------------------------
    // Generate a PAN for each product
    // -------------------------------------------------------------------------
    println!("--- Generate PANs by Product ---\n");

    for product in Product::ALL {
        let text = generate::generate_pan(product);
        let classified = parse_pan(&text).ok().and_then(|pan| classify(&pan));
        println!(
            "  {:16}: {:19} (classifies back: {})",
            product.name(),
            text,
            if classified == Some(product) { "yes" } else { "no" }
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Deterministic generation (for reproducible tests)
    // -------------------------------------------------------------------------
    println!("--- Deterministic Generation ---\n");

    for product in Product::ALL {
        println!(
            "  {:16}: {} (IIN {:06})",
            product.name(),
            generate::generate_pan_deterministic(product),
            generate::representative_iin(product)
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Seeded generation
    // -------------------------------------------------------------------------
    println!("--- Seeded Generation ---\n");

    let mut rng = StdRng::seed_from_u64(7812);
    for i in 0..3 {
        println!(
            "  Run {}: {}",
            i + 1,
            generate::generate_pan_with_rng(Product::Solo, &mut rng)
        );
    }
    println!();

    // -------------------------------------------------------------------------
    // Generate with custom prefix
    // -------------------------------------------------------------------------
    println!("--- Custom Prefix Generation ---\n");

    let prefixes = [
        ("490303", 16, "UK Maestro"),
        ("601100", 16, "Discover"),
        ("633450", 19, "Solo, 19 digits"),
        ("4000", 16, "Too short for an IIN"),
    ];

    for (prefix, length, description) in prefixes {
        println!("  {} (prefix: {}, length: {})", description, prefix, length);
        match generate::generate_with_prefix(prefix, length, &mut rng) {
            Some(text) => {
                let valid = parse_pan(&text).is_ok();
                println!("    Generated: {}", text);
                println!("    Valid: {}", if valid { "yes" } else { "no" });
            }
            None => println!("    Rejected"),
        }
        println!();
    }

    // -------------------------------------------------------------------------
    // Verify generated PANs classify back
    // -------------------------------------------------------------------------
    println!("--- Classification Check ---\n");

    let test_count = 1000;
    let mut all_match = true;

    for product in Product::ALL {
        let matching = (0..test_count)
            .filter(|_| {
                let text = generate::generate_pan(product);
                parse_pan(&text).ok().and_then(|pan| classify(&pan)) == Some(product)
            })
            .count();
        let success = matching == test_count;
        all_match &= success;
        println!(
            "  {:16}: {}/{} ({})",
            product.name(),
            matching,
            test_count,
            if success { "PASS" } else { "FAIL" }
        );
    }
    println!();

    if all_match {
        println!("  All generated PANs classify back to their product!");
    } else {
        println!("  WARNING: Some generated PANs classified differently!");
    }
}
