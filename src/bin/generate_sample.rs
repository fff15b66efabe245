use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }
}

const REGIONS: [&str; 4] = ["East", "West", "North", "South"];
const LOCATIONS: [&str; 2] = ["Urban", "Rural"];
const STATES: [&str; 8] = [
    "Arusha",
    "Dar es Salaam",
    "Dodoma",
    "Kagera",
    "Kilimanjaro",
    "Mbeya",
    "Mwanza",
    "Tanga",
];
const CONSTRUCTIONS: [&str; 4] = ["Frame", "Masonry", "Fire Resist", "Metal Clad"];
const BUSINESS_TYPES: [&str; 7] = [
    "Apartment",
    "Construction",
    "Farming",
    "Hospitality",
    "Office Bldg",
    "Organization",
    "Retail",
];
const YES_NO: [&str; 2] = ["Y", "N"];

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_records = 500;

    let mut policy = Vec::with_capacity(n_records);
    let mut expiry = Vec::with_capacity(n_records);
    let mut location = Vec::with_capacity(n_records);
    let mut state = Vec::with_capacity(n_records);
    let mut region = Vec::with_capacity(n_records);
    let mut investment = Vec::with_capacity(n_records);
    let mut construction = Vec::with_capacity(n_records);
    let mut business_type = Vec::with_capacity(n_records);
    let mut earthquake = Vec::with_capacity(n_records);
    let mut flood = Vec::with_capacity(n_records);
    let mut rating = Vec::with_capacity(n_records);
    let mut id = Vec::with_capacity(n_records);

    for i in 0..n_records {
        policy.push(format!("P-{:05}", i + 1));
        expiry.push(format!(
            "{}-{:02}-{:02}",
            2024 + (rng.next_u64() % 4),
            1 + (rng.next_u64() % 12),
            1 + (rng.next_u64() % 28),
        ));
        location.push(rng.pick(&LOCATIONS).to_string());
        state.push(rng.pick(&STATES).to_string());
        region.push(rng.pick(&REGIONS).to_string());
        // Heavy right tail so sums land in the billions, like real books.
        investment.push((rng.range(50.0, 25_000.0) * rng.range(50.0, 1_000.0)).round());
        construction.push(rng.pick(&CONSTRUCTIONS).to_string());
        business_type.push(rng.pick(&BUSINESS_TYPES).to_string());
        earthquake.push(rng.pick(&YES_NO).to_string());
        flood.push(rng.pick(&YES_NO).to_string());
        rating.push((rng.range(1.0, 5.0) * 10.0).round() / 10.0);
        id.push(i as i64 + 1);
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Policy", DataType::Utf8, false),
        Field::new("Expiry", DataType::Utf8, false),
        Field::new("Location", DataType::Utf8, false),
        Field::new("State", DataType::Utf8, false),
        Field::new("Region", DataType::Utf8, false),
        Field::new("Investment", DataType::Float64, false),
        Field::new("Construction", DataType::Utf8, false),
        Field::new("BusinessType", DataType::Utf8, false),
        Field::new("Earthquake", DataType::Utf8, false),
        Field::new("Flood", DataType::Utf8, false),
        Field::new("Rating", DataType::Float64, false),
        Field::new("id", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(policy)),
            Arc::new(StringArray::from(expiry)),
            Arc::new(StringArray::from(location)),
            Arc::new(StringArray::from(state)),
            Arc::new(StringArray::from(region)),
            Arc::new(Float64Array::from(investment)),
            Arc::new(StringArray::from(construction)),
            Arc::new(StringArray::from(business_type)),
            Arc::new(StringArray::from(earthquake)),
            Arc::new(StringArray::from(flood)),
            Arc::new(Float64Array::from(rating)),
            Arc::new(Int64Array::from(id)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let output_path = "sample_records.parquet";
    let file = std::fs::File::create(output_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n_records} insurance records to {output_path}");
}
