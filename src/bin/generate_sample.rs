use cyclescope::pipeline::{CATEGORY_COLUMN, TARGET_CATEGORY};

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

/// Index level at month `t`: trend growth, a business-cycle swing, and
/// measurement noise, all in log space around a base of 100.
fn index_value(t: usize, cycle_period: f64, cycle_amp: f64, rng: &mut SimpleRng) -> f64 {
    let t = t as f64;
    let trend = 0.0022 * t;
    let cycle = cycle_amp * (2.0 * std::f64::consts::PI * t / cycle_period).sin();
    let noise = rng.gauss(0.0, 0.004);
    100.0 * (trend + cycle + noise).exp()
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // 2000.01 through 2024.12, the last two months provisional.
    let months: Vec<(i32, u32)> = (0..300)
        .map(|i| (2000 + (i / 12) as i32, (i % 12 + 1) as u32))
        .collect();
    let period_labels: Vec<String> = months
        .iter()
        .enumerate()
        .map(|(i, (year, month))| {
            if i >= months.len() - 2 {
                format!("{year}.{month:02} p)")
            } else {
                format!("{year}.{month:02}")
            }
        })
        .collect();

    // Target row plus decoys, so row extraction has something to reject.
    let categories: [(&str, f64, f64); 3] = [
        (TARGET_CATEGORY, 60.0, 0.035),
        ("광공업", 48.0, 0.055),
        ("서비스업", 72.0, 0.020),
    ];

    let output_path = "sample_index.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");

    let mut header = vec![CATEGORY_COLUMN.to_string()];
    header.extend(period_labels.iter().cloned());
    writer.write_record(&header).expect("Failed to write header");

    for (category, cycle_period, cycle_amp) in categories {
        let mut record = vec![category.to_string()];
        for t in 0..months.len() {
            record.push(format!(
                "{:.1}",
                index_value(t, cycle_period, cycle_amp, &mut rng)
            ));
        }
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush writer");

    println!(
        "Wrote {} category rows ({} months each) to {output_path}",
        categories.len(),
        months.len()
    );
}
