#![allow(dead_code)]

use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const HEADER: [&str; 8] = [
    "tid",
    "amount",
    "installments",
    "product",
    "card_number",
    "brand",
    "holder",
    "expiry",
];

/// Random string of ASCII digits with a length in `min..=max`.
pub fn random_digits(rng: &mut impl Rng, min: usize, max: usize) -> String {
    let len = rng.gen_range(min..=max);
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Interleaves random letters between the characters of `digits`.
pub fn sprinkle_letters(rng: &mut impl Rng, digits: &str) -> String {
    let mut out = String::new();
    for c in digits.chars() {
        for _ in 0..rng.gen_range(0..3) {
            out.push(char::from(b'a' + rng.gen_range(0..26u8)));
        }
        out.push(c);
    }
    out
}

pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(HEADER)?;

    for i in 1..=rows {
        wtr.write_record([
            format!("tid{i}").as_str(),
            (i * 100).to_string().as_str(),
            "1",
            "1",
            "4923993827951627",
            "visa",
            "Thiago Paes",
            "203012",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
