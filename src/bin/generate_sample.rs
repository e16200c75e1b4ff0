use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// One output row, serialized under the dataset's original header names.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    launch_site: String,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Booster generation flown around a given flight number.
fn booster_category(flight: i64) -> &'static str {
    match flight {
        ..=5 => "v1.0",
        6..=19 => "v1.1",
        20..=40 => "FT",
        41..=50 => "B4",
        _ => "B5",
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (site, launches, base success rate)
    let sites = [
        ("CCAFS LC-40", 26usize, 0.58),
        ("CCAFS SLC-40", 7, 0.71),
        ("KSC LC-39A", 13, 0.77),
        ("VAFB SLC-4E", 10, 0.60),
    ];

    // One slot per launch, shuffled so sites interleave across flight numbers.
    let mut slots: Vec<(&str, f64)> = Vec::new();
    for &(site, count, rate) in &sites {
        for _ in 0..count {
            slots.push((site, rate));
        }
    }
    for i in (1..slots.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        slots.swap(i, j);
    }

    let mut rows: Vec<SampleRow> = Vec::new();
    for (idx, &(site, rate)) in slots.iter().enumerate() {
        let flight = idx as i64 + 1;
        let payload = rng.gauss(4400.0, 2600.0).clamp(0.0, 9600.0).round();
        // Later flights succeed more often.
        let p_success = (rate + if flight > 40 { 0.2 } else { 0.0 }).min(0.95);
        let class = i64::from(rng.next_f64() < p_success);
        let category = booster_category(flight);

        rows.push(SampleRow {
            flight_number: flight,
            launch_site: site.to_string(),
            class,
            payload_mass_kg: payload,
            booster_version: format!("F9 {category} B{}", 1000 + flight),
            booster_category: category.to_string(),
        });
    }

    // Write CSV
    let csv_path = "sample_launches.csv";
    let mut wtr = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for row in &rows {
        wtr.serialize(row).expect("Failed to write CSV row");
    }
    wtr.flush().expect("Failed to flush CSV file");

    // Build Arrow arrays
    let flight_array = Int64Array::from(rows.iter().map(|r| r.flight_number).collect::<Vec<_>>());
    let site_array = StringArray::from(
        rows.iter().map(|r| r.launch_site.as_str()).collect::<Vec<_>>(),
    );
    let class_array = Int64Array::from(rows.iter().map(|r| r.class).collect::<Vec<_>>());
    let payload_array = Float64Array::from(rows.iter().map(|r| r.payload_mass_kg).collect::<Vec<_>>());
    let version_array = StringArray::from(
        rows.iter().map(|r| r.booster_version.as_str()).collect::<Vec<_>>(),
    );
    let category_array = StringArray::from(
        rows.iter().map(|r| r.booster_category.as_str()).collect::<Vec<_>>(),
    );

    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(flight_array),
            Arc::new(site_array),
            Arc::new(class_array),
            Arc::new(payload_array),
            Arc::new(version_array),
            Arc::new(category_array),
        ],
    )
    .expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_launches.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!(
        "Wrote {} launches across {} sites to {csv_path} and {parquet_path}",
        rows.len(),
        sites.len()
    );
}
