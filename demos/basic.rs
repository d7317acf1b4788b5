//! Basic PAN parsing and classification example.
//!
//! Run with: `cargo run --example basic`

use pan_validator::{
    classify, classify::ranges, classify_checked, parse_pan, parse_pan_components, ErrorKind,
    Product,
};

fn main() {
    println!("=== Basic PAN Parsing ===\n");

    // Example 1: Parse a Visa number into its components
    let visa_number = "4000000000000002";
    println!("Parsing: {}", visa_number);

    match parse_pan(visa_number) {
        Ok(pan) => {
            println!("  Valid: yes");
            println!("  Issuer Identifier: {}", pan.issuer_identifier_string());
            println!("  Major Industry Identifier: {}", pan.mii_char());
            println!(
                "  Account Identifier: {} digits",
                pan.account_identifier_width()
            );
            println!("  Check Digit: {}", pan.check_digit_char());
            println!("  Masked: {}", pan.masked());
            println!("  Masked (IIN): {}", pan.masked_with_iin());
            println!("  Length: {} digits", pan.length());
        }
        Err(e) => {
            println!("  Valid: no");
            println!("  Error: {}", e);
        }
    }
    println!();

    // Example 2: Classification by IIN
    let samples = [
        ("4000000000000002", "Visa"),
        ("4903030000000007", "UK Maestro inside the Visa range"),
        ("6011000000000004", "Discover inside the Maestro catch-all"),
        ("6334500000000003", "Solo inside the Maestro catch-all"),
        ("378282246310005", "American Express"),
        ("1000000000000008", "No product"),
    ];

    println!("Classification:");
    for (number, description) in samples {
        let product = parse_pan(number)
            .ok()
            .and_then(|pan| classify(&pan))
            .map_or("Unknown", |p| p.name());
        println!("  {} - {}: {}", number, description, product);
    }
    println!();

    // Example 3: Handling validation errors
    println!("Error handling examples:");

    let error_cases = [
        ("", "Empty input"),
        ("4000002", "Too short"),
        ("40000000000000000000", "Too long"),
        ("40000000000x0002", "Invalid character"),
        ("4000000000000003", "Bad check digit"),
    ];

    for (number, description) in error_cases {
        match parse_pan(number) {
            Ok(_) => println!("  {}: Unexpectedly valid", description),
            Err(e) => {
                let error_type = match e.kind() {
                    ErrorKind::MissingInput => "MissingInput",
                    ErrorKind::InvalidLength => "InvalidLength",
                    ErrorKind::InvalidCharacters => "InvalidCharacters",
                    ErrorKind::ChecksumMismatch => "ChecksumMismatch",
                    ErrorKind::InvalidLengthForProduct => "InvalidLengthForProduct",
                };
                println!("  {}: {} - {}", description, error_type, e);
            }
        }
    }
    println!();

    // Example 4: Building from components and checking the product length
    println!("Component construction:");
    match parse_pan_components("370000", "000000000", '7') {
        Ok(pan) => {
            println!("  Built: {}", pan.masked_with_iin());
            match classify_checked(&pan) {
                Ok(product) => println!("  Product: {:?}", product),
                Err(e) => println!("  Length check: {}", e),
            }
        }
        Err(e) => println!("  Error: {}", e),
    }
    println!();

    // Example 5: Supported products
    println!("Supported products:");
    for product in Product::ALL {
        let lengths: Vec<String> = product
            .pan_lengths()
            .iter()
            .map(|l| l.to_string())
            .collect();
        let range_count = ranges().iter().filter(|r| r.product == product).count();
        println!(
            "  {:16} - Lengths: {:10} IIN ranges: {}",
            product.name(),
            lengths.join(", "),
            range_count
        );
    }
}
