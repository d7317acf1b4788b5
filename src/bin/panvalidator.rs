//! CLI tool for PAN validation and classification.
//!
//! # Usage
//!
//! ```bash
//! # Parse and classify a PAN
//! panvalidator parse 4000000000000002
//!
//! # Classify only, with a product length cross-check
//! panvalidator classify 6011000000000004 --check-length
//!
//! # Compute a Luhn check digit
//! panvalidator luhn 7992739871
//!
//! # Generate test PANs
//! panvalidator generate --product solo --count 5
//!
//! # Parse a file of PANs, one per line ("-" for stdin)
//! panvalidator batch pans.txt
//! ```
//!
//! Set `RUST_LOG=debug` (or pass `-v`) for diagnostics on stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use pan_validator::classify::ranges;
use pan_validator::{
    classify, classify_checked, generate, luhn, mask, BatchParser, Pan, PanError, Product,
};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "panvalidator")]
#[command(
    author,
    version,
    about = "ISO/IEC 7812-1 primary account number validation tool"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a PAN and show its components
    Parse {
        /// PAN to parse (digits only unless --lenient)
        pan: String,

        /// Accept spaces and hyphens between digit groups
        #[arg(short, long)]
        lenient: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Determine the product a PAN belongs to
    Classify {
        /// PAN to classify
        pan: String,

        /// Also check the PAN length against the product's lengths
        #[arg(short, long)]
        check_length: bool,
    },

    /// Compute the Luhn check digit for base digits
    Luhn {
        /// Digits without the check digit
        digits: String,
    },

    /// Generate test PANs (for testing only)
    Generate {
        /// Product to generate
        #[arg(short, long, default_value = "visa")]
        product: ProductArg,

        /// Number of PANs to generate
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Mask a PAN for display
    Mask {
        /// PAN to mask
        pan: String,

        /// Keep the issuer identifier (first 6 digits) visible
        #[arg(short, long)]
        with_iin: bool,
    },

    /// Print the IIN range table in priority order
    Ranges,

    /// Parse PANs from a file, one per line
    Batch {
        /// Input file, or "-" for stdin
        path: String,

        /// Accept spaces and hyphens between digit groups
        #[arg(short, long)]
        lenient: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProductArg {
    Amex,
    Discover,
    Jcb,
    Mastercard,
    Maestro,
    Solo,
    Visa,
}

impl From<ProductArg> for Product {
    fn from(arg: ProductArg) -> Self {
        match arg {
            ProductArg::Amex => Product::AmericanExpress,
            ProductArg::Discover => Product::Discover,
            ProductArg::Jcb => Product::Jcb,
            ProductArg::Mastercard => Product::Mastercard,
            ProductArg::Maestro => Product::Maestro,
            ProductArg::Solo => Product::Solo,
            ProductArg::Visa => Product::Visa,
        }
    }
}

/// JSON shape for a parse result.
#[derive(Serialize)]
struct PanReport {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    issuer_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    major_industry_identifier: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_identifier_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_digit: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    masked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl PanReport {
    fn from_result(result: &Result<Pan, PanError>) -> Self {
        match result {
            Ok(pan) => Self {
                valid: true,
                issuer_identifier: Some(pan.issuer_identifier_string()),
                major_industry_identifier: Some(pan.major_industry_identifier()),
                account_identifier_width: Some(pan.account_identifier_width()),
                check_digit: Some(pan.check_digit()),
                length: Some(pan.length()),
                product: classify(pan),
                masked: Some(pan.masked()),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                issuer_identifier: None,
                major_industry_identifier: None,
                account_identifier_width: None,
                check_digit: None,
                length: None,
                product: None,
                masked: None,
                error: Some(e.to_string()),
            },
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Parse {
            pan,
            lenient,
            output,
        } => cmd_parse(&pan, lenient, output),
        Commands::Classify { pan, check_length } => cmd_classify(&pan, check_length),
        Commands::Luhn { digits } => cmd_luhn(&digits),
        Commands::Generate { product, count } => cmd_generate(product.into(), count),
        Commands::Mask { pan, with_iin } => cmd_mask(&pan, with_iin),
        Commands::Ranges => cmd_ranges(),
        Commands::Batch {
            path,
            lenient,
            output,
        } => cmd_batch(&path, lenient, output),
    }
}

fn parse_input(input: &str, lenient: bool) -> Result<Pan, PanError> {
    let result = if lenient {
        Pan::parse_formatted(input)
    } else {
        Pan::parse(input)
    };
    match &result {
        Ok(pan) => tracing::debug!(pan = %pan.masked_with_iin(), "parsed"),
        Err(e) => tracing::debug!(input = %mask::mask_string(input), error = %e, "rejected"),
    }
    result
}

fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            false
        }
    }
}

fn cmd_parse(input: &str, lenient: bool, output: OutputFormat) -> ExitCode {
    let result = parse_input(input, lenient);

    if let OutputFormat::Json = output {
        let printed = print_json(&PanReport::from_result(&result));
        return if printed && result.is_ok() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    match result {
        Ok(pan) => {
            println!("Valid: yes");
            println!("Issuer Identifier: {}", pan.issuer_identifier_string());
            println!("Major Industry Identifier: {}", pan.mii_char());
            println!(
                "Account Identifier: {} digits",
                pan.account_identifier_width()
            );
            println!("Check Digit: {}", pan.check_digit_char());
            println!("Length: {}", pan.length());
            match classify(&pan) {
                Some(product) => println!("Product: {}", product),
                None => println!("Product: Unknown"),
            }
            println!("Masked: {}", pan.masked());
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("Valid: no");
            println!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_classify(input: &str, check_length: bool) -> ExitCode {
    let pan = match parse_input(input, false) {
        Ok(pan) => pan,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let product = if check_length {
        match classify_checked(&pan) {
            Ok(product) => product,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        classify(&pan)
    };

    match product {
        Some(p) => {
            println!("Product: {}", p);
            println!("Valid Lengths: {:?}", p.pan_lengths());
        }
        None => println!("Product: Unknown"),
    }
    ExitCode::SUCCESS
}

fn cmd_luhn(digits: &str) -> ExitCode {
    match luhn::check_digit_str(digits) {
        Some(check) if !digits.is_empty() => {
            println!("Check Digit: {}", check);
            println!("Full Number: {}{}", digits, check);
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Error: expected one or more decimal digits");
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(product: Product, count: usize) -> ExitCode {
    tracing::debug!(%product, count, "generating");
    for _ in 0..count {
        println!("{}", generate::generate_pan(product));
    }
    ExitCode::SUCCESS
}

fn cmd_mask(input: &str, with_iin: bool) -> ExitCode {
    match parse_input(input, true) {
        Ok(pan) if with_iin => println!("{}", pan.masked_with_iin()),
        Ok(pan) => println!("{}", pan.masked()),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}

fn cmd_ranges() -> ExitCode {
    for (priority, range) in ranges().iter().enumerate() {
        println!(
            "{:>2}  {:06}-{:06}  {}",
            priority + 1,
            range.low,
            range.high,
            range.product
        );
    }
    ExitCode::SUCCESS
}

fn read_lines(path: &str) -> io::Result<Vec<String>> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        Box::new(BufReader::new(File::open(path)?))
    };
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty()))
        .map(|line| line.map(|l| l.trim().to_string()))
        .collect()
}

fn cmd_batch(path: &str, lenient: bool, output: OutputFormat) -> ExitCode {
    let lines = match read_lines(path) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(count = lines.len(), "read inputs");

    let results = BatchParser::new().allow_separators(lenient).parse_all(&lines);
    let invalid = results.iter().filter(|r| r.is_err()).count();

    match output {
        OutputFormat::Json => {
            let reports: Vec<PanReport> = results.iter().map(PanReport::from_result).collect();
            if !print_json(&reports) {
                return ExitCode::FAILURE;
            }
        }
        OutputFormat::Text => {
            for (line, result) in results.iter().enumerate() {
                match result {
                    Ok(pan) => {
                        let product = classify(pan).map_or("Unknown", |p| p.name());
                        println!("{:>5}  {}  {}", line + 1, pan.masked_with_iin(), product);
                    }
                    Err(e) => println!("{:>5}  invalid: {}", line + 1, e),
                }
            }
            println!(
                "Total: {}, valid: {}, invalid: {}",
                results.len(),
                results.len() - invalid,
                invalid
            );
        }
    }

    if invalid == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
