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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in launch order: (category, mean payload kg, success rate).
const GENERATIONS: [(&str, f64, f64); 5] = [
    ("v1.0", 400.0, 0.2),
    ("v1.1", 2500.0, 0.35),
    ("FT", 4500.0, 0.7),
    ("B4", 5500.0, 0.8),
    ("B5", 9000.0, 0.95),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut sites: Vec<String> = Vec::new();
    let mut payloads: Vec<f64> = Vec::new();
    let mut classes: Vec<i64> = Vec::new();
    let mut categories: Vec<String> = Vec::new();
    let mut versions: Vec<String> = Vec::new();

    let mut serial = 1000;
    for (category, mean_payload, success_rate) in GENERATIONS {
        for _ in 0..12 {
            let payload = (mean_payload * (0.4 + 1.2 * rng.next_f64())).round().min(15_600.0);
            let success = rng.next_f64() < success_rate;

            sites.push(rng.pick(&SITES).to_string());
            payloads.push(payload);
            classes.push(i64::from(success));
            categories.push(category.to_string());
            versions.push(format!("F9 {category} B{serial}"));
            serial += 1;
        }
    }

    // ---- CSV ----
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version",
            "Booster Version Category",
        ])
        .expect("Failed to write CSV header");
    for i in 0..sites.len() {
        writer
            .write_record([
                (i + 1).to_string(),
                sites[i].clone(),
                classes[i].to_string(),
                payloads[i].to_string(),
                versions[i].clone(),
                categories[i].clone(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");

    // ---- Parquet ----
    let schema = Arc::new(Schema::new(vec![
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
        Field::new("Booster Version", DataType::Utf8, false),
    ]));

    let n = sites.len();
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(sites)),
            Arc::new(Float64Array::from(payloads)),
            Arc::new(Int64Array::from(classes)),
            Arc::new(StringArray::from(categories)),
            Arc::new(StringArray::from(versions)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {n} launches to {csv_path} and {parquet_path}");
}
