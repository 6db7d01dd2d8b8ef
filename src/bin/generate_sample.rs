//! Write a demo collection to an `.xlsx` (or `.csv`) file.
//!
//! Usage: `generate_sample [OUTPUT] [COUNT]` (defaults: `sample_pins.xlsx`, 3).
//! The first three pins are the built-in sample; further pins are generated
//! deterministically from it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use pin_collector::data::model::Record;
use pin_collector::data::sample::make_sample;
use pin_collector::data::writer::write_file;

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }
}

const SERIES: [&str; 4] = ["Kanto", "Johto", "Hoenn", "Sinnoh"];
const STATES: [&str; 4] = ["Neuf", "Très bon", "Bon", "Abîmé"];

fn variant(base: &Record, n: usize, rng: &mut SimpleRng) -> Record {
    let mut pin = Record {
        id: Default::default(),
        ..base.clone()
    };
    pin.name = format!("{} (var. {n})", base.name);
    pin.serie = SERIES[rng.below(SERIES.len() as u64) as usize].to_string();
    pin.state = STATES[rng.below(STATES.len() as u64) as usize].to_string();
    pin.quantity = 1 + rng.below(4) as u32;
    pin.tradeable = rng.below(2) == 1;
    pin.price = (100 + rng.below(2000)) as f64 / 100.0;
    pin
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output = PathBuf::from(args.next().unwrap_or_else(|| "sample_pins.xlsx".to_string()));
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid count '{n}'"))?,
        None => 3,
    };

    let mut table = make_sample();
    let base = table.records.clone();
    let mut rng = SimpleRng::new(42);
    let mut n = 1;
    while table.len() < count {
        let pin = variant(&base[table.len() % base.len()], n, &mut rng);
        table.push(pin);
        n += 1;
    }
    table.records.truncate(count);

    write_file(&output, &table)?;
    println!("Wrote {} pins to {}", table.len(), output.display());
    Ok(())
}
