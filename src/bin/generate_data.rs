use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use serde_json::{Value, json};

use rewardeur_rs::RawTransaction;

/// A utility for generating a demo transaction dataset for rewardeur_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the JSON dataset to.
    #[arg(long, short)]
    output_path: String,

    /// The number of transaction records to generate.
    #[arg(long, short, default_value_t = 50)]
    count: usize,

    /// The seed for the record generator.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const CUSTOMERS: &[(u64, &str)] = &[
    (101, "Amit Sharma"),
    (102, "Neha Gupta"),
    (103, "Ravi Kumar"),
    (104, "Priya Singh"),
    (105, "Arjun Mehta"),
    (106, "Sara Ali"),
    (107, "Vikram Rao"),
    (108, "Anita Desai"),
];

const PRODUCTS: &[&str] = &[
    "Laptop",
    "Monitor",
    "Keyboard",
    "Mouse",
    "Headphones",
    "Tablet",
    "Webcam",
    "Desk Lamp",
    "USB Cable",
    "Phone Case",
];

/// The months generated purchase dates fall in, with the last valid day of
/// each.
const MONTHS: &[(i32, u8, u8)] = &[(2024, 1, 31), (2024, 2, 28), (2024, 3, 31)];

/// Generate a dataset file for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if extension == "json" => {}
        _ => {
            eprintln!("Output path must end in '.json' (e.g., 'transactions.json').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Generating {} records...", args.count);

    let mut rng = Lcg::new(args.seed);
    let mut records = Vec::with_capacity(args.count);

    for index in 0..args.count {
        // Every tenth record is deliberately malformed so the lenient
        // parsing and enrichment paths have something to chew on.
        if index % 10 == 9 {
            records.push(broken_record(index as u64 + 1, &mut rng));
            continue;
        }

        let (customer_id, customer_name) = CUSTOMERS[rng.pick(CUSTOMERS.len())];
        let (year, month, last_day) = MONTHS[rng.pick(MONTHS.len())];
        let day = rng.pick(last_day as usize) + 1;
        // Prices from $1.00 to $350.99 cover all three reward tiers.
        let price = (rng.pick(35000) + 100) as f64 / 100.0;

        let record = RawTransaction {
            transaction_id: Some(index as u64 + 1),
            customer_id: Some(customer_id),
            customer_name: Some(customer_name.to_owned()),
            purchase_date: Some(format!("{year}-{month:02}-{day:02}")),
            product_purchased: Some(PRODUCTS[rng.pick(PRODUCTS.len())].to_owned()),
            price: Some(price),
        };

        records.push(serde_json::to_value(record)?);
    }

    fs::write(output_path, serde_json::to_string_pretty(&records)?)?;

    println!("Saved {} records to {output_path:#?}", args.count);

    Ok(())
}

/// A record that is malformed in one of the ways real exports are.
fn broken_record(transaction_id: u64, rng: &mut Lcg) -> Value {
    match rng.pick(6) {
        0 => Value::Null,
        1 => json!({
            "transactionId": transaction_id,
            "customerId": 109,
            "customerName": "Divya Nair",
            "purchaseDate": "not-a-date",
            "productPurchased": "Speaker",
            "price": 140.0,
        }),
        2 => json!({
            "transactionId": transaction_id,
            "customerId": 110,
            "customerName": "Rahul Joshi",
            "purchaseDate": "2024-02-30",
            "productPurchased": "Charger",
            "price": "89.99",
        }),
        3 => json!({
            "transactionId": transaction_id,
            "customerId": 111,
            "customerName": "Meera Iyer",
            "purchaseDate": "2024-03-05",
            "productPurchased": "Notebook",
            "price": null,
        }),
        4 => json!({
            "transactionId": transaction_id,
            "customerId": 112,
            "customerName": "Karan Malhotra",
            "purchaseDate": "2024-01-18",
            "productPurchased": "Gift Card",
            "price": "free",
        }),
        _ => json!({
            "transactionId": transaction_id,
            "customerId": 113,
            "customerName": "Sunita Patel",
            "purchaseDate": "2024-02-14",
            "productPurchased": "Refunded Headphones",
            "price": if rng.pick(2) == 0 { 0.0 } else { -45.0 },
        }),
    }
}

/// A small linear congruential generator. The same seed always produces the
/// same dataset.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(
            seed.wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407),
        )
    }

    /// The next index in `0..bound`.
    fn pick(&mut self, bound: usize) -> usize {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);

        ((self.0 >> 33) as usize) % bound
    }
}
