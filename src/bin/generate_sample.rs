use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic student survey CSV for trying out the aggregation.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Number of survey rows
    #[arg(short, long, default_value_t = 500)]
    rows: usize,

    /// PRNG seed; the same seed always yields the same file
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long, default_value = "sample_survey.csv")]
    output: PathBuf,
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const GRADES: [&str; 5] = ["A", "B", "C", "D", "F"];
const GENDERS: [&str; 2] = ["Female", "Male"];
const DEPARTMENTS: [&str; 4] = ["Engineering", "Business", "CS", "Mathematics"];

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "Student_ID",
        "Sleep_Hours_per_Night",
        "Stress_Level (1-10)",
        "Grade",
        "Gender",
        "Department",
    ])?;

    let mut malformed = 0usize;
    for id in 0..args.rows {
        let grade = rng.pick(&GRADES);
        let gender = rng.pick(&GENDERS);
        let department = rng.pick(&DEPARTMENTS);

        let sleep = rng.gauss(6.5, 1.5).clamp(3.0, 10.0);
        // Less sleep, more stress; weaker grades add a little on top.
        let grade_penalty = GRADES.iter().position(|g| *g == grade).unwrap_or(0) as f64 * 0.3;
        let stress = (14.0 - sleep + grade_penalty + rng.gauss(0.0, 1.0)).clamp(1.0, 10.0);

        // Roughly one row in fifty has an unanswered stress question.
        let stress_field = if rng.next_f64() < 0.02 {
            malformed += 1;
            "N/A".to_string()
        } else {
            format!("{:.0}", stress)
        };

        writer.write_record([
            format!("S{id:05}"),
            format!("{sleep:.1}"),
            stress_field,
            grade.to_string(),
            gender.to_string(),
            department.to_string(),
        ])?;
    }
    writer.flush().context("flushing sample CSV")?;

    println!(
        "Wrote {} survey rows ({malformed} with missing stress) to {}",
        args.rows,
        args.output.display()
    );
    Ok(())
}
