use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One CSV row, in the column order of the public source dataset.
#[derive(Serialize)]
struct Row {
    ano: i64,
    senioridade: &'static str,
    contrato: &'static str,
    cargo: &'static str,
    salario: f64,
    moeda: &'static str,
    usd: f64,
    remoto: &'static str,
    tamanho_empresa: &'static str,
    residencia_iso3: &'static str,
}

const YEARS: [i64; 4] = [2022, 2023, 2024, 2025];
const SENIORITY: [(&str, f64); 4] = [
    ("junior", 0.6),
    ("pleno", 1.0),
    ("senior", 1.4),
    ("executivo", 2.0),
];
const CONTRACTS: [&str; 4] = ["integral", "parcial", "contrato", "freelancer"];
const SIZES: [&str; 3] = ["pequena", "media", "grande"];
const REMOTE: [&str; 3] = ["presencial", "hibrido", "remoto"];
const ROLES: [(&str, f64); 8] = [
    ("Data Scientist", 130_000.0),
    ("Data Engineer", 125_000.0),
    ("Data Analyst", 85_000.0),
    ("Machine Learning Engineer", 150_000.0),
    ("Research Scientist", 160_000.0),
    ("Analytics Engineer", 110_000.0),
    ("Data Architect", 155_000.0),
    ("BI Developer", 80_000.0),
];
/// Residence country with a cost-of-labour factor and local currency rate.
const COUNTRIES: [(&str, f64, &str, f64); 6] = [
    ("USA", 1.0, "USD", 1.0),
    ("CAN", 0.8, "CAD", 1.35),
    ("GBR", 0.75, "GBP", 0.79),
    ("DEU", 0.7, "EUR", 0.92),
    ("BRA", 0.3, "BRL", 5.0),
    ("IND", 0.2, "INR", 83.0),
];

fn main() {
    let mut rng = SimpleRng::new(42);
    let n_rows = 2_000;

    let mut rows = Vec::with_capacity(n_rows);
    for _ in 0..n_rows {
        let &(role, base) = rng.pick(&ROLES);
        let &(seniority, level) = rng.pick(&SENIORITY);
        let &(iso3, factor, currency, rate) = rng.pick(&COUNTRIES);

        let usd = rng.gauss(base * level * factor, base * 0.15).max(5_000.0).round();
        rows.push(Row {
            ano: *rng.pick(&YEARS),
            senioridade: seniority,
            contrato: *rng.pick(&CONTRACTS),
            cargo: role,
            salario: (usd * rate).round(),
            moeda: currency,
            usd,
            remoto: *rng.pick(&REMOTE),
            tamanho_empresa: *rng.pick(&SIZES),
            residencia_iso3: iso3,
        });
    }

    // Write CSV
    let csv_path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    for row in &rows {
        writer.serialize(row).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Build Arrow arrays
    let text = |f: fn(&Row) -> &'static str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let schema = Arc::new(Schema::new(vec![
        Field::new("ano", DataType::Int64, false),
        Field::new("senioridade", DataType::Utf8, false),
        Field::new("contrato", DataType::Utf8, false),
        Field::new("cargo", DataType::Utf8, false),
        Field::new("salario", DataType::Float64, false),
        Field::new("moeda", DataType::Utf8, false),
        Field::new("usd", DataType::Float64, false),
        Field::new("remoto", DataType::Utf8, false),
        Field::new("tamanho_empresa", DataType::Utf8, false),
        Field::new("residencia_iso3", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(rows.iter().map(|r| r.ano).collect::<Vec<_>>())),
        text(|r| r.senioridade),
        text(|r| r.contrato),
        text(|r| r.cargo),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.salario).collect::<Vec<_>>())),
        text(|r| r.moeda),
        Arc::new(Float64Array::from(rows.iter().map(|r| r.usd).collect::<Vec<_>>())),
        text(|r| r.remoto),
        text(|r| r.tamanho_empresa),
        text(|r| r.residencia_iso3),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns).expect("Failed to create RecordBatch");

    // Write Parquet
    let parquet_path = "sample_salaries.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    println!("Wrote {} salary records to {csv_path} and {parquet_path}", rows.len());
}
