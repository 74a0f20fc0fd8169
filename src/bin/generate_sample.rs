use anyhow::{Context, Result};

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

    /// Uniform index in `0..n`.
    fn index(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn choose<'a, T: ?Sized>(&mut self, items: &'a [&'a T]) -> &'a T {
        items[self.index(items.len())]
    }
}

const TITLE_OPENERS: &[&str] = &[
    "Modeling", "Estimating", "Tracking", "Predicting", "Mapping", "Reviewing", "Comparing",
];

const TITLE_TOPICS: &[&str] = &[
    "viral spread",
    "transmission dynamics",
    "vaccine efficacy",
    "antibody response",
    "genome sequencing",
    "clinical outcomes",
    "social distancing",
    "hospital capacity",
];

const TITLE_CONTEXTS: &[&str] = &[
    "in urban populations",
    "across age groups",
    "during lockdown",
    "with wastewater data",
    "under uncertainty",
    "in primary care",
];

const JOURNALS: &[&str] = &[
    "Nature", "The Lancet", "Cell", "BMJ", "PLOS ONE", "JAMA", "Science", "Virology Journal",
];

const SOURCES: &[&str] = &["PMC", "WHO", "Elsevier", "medRxiv", "bioRxiv"];

fn publish_time(rng: &mut SimpleRng) -> String {
    // Weighted toward the pandemic years, with a few older papers.
    let year = match rng.index(10) {
        0 => 2015 + rng.index(4) as i32,
        1 | 2 => 2019,
        3..=6 => 2020,
        _ => 2021 + rng.index(3) as i32,
    };
    match rng.index(10) {
        // Mostly full dates.
        0..=6 => {
            let month = 1 + rng.index(12);
            let day = 1 + rng.index(28);
            format!("{year}-{month:02}-{day:02}")
        }
        7 => format!("{year}-{:02}", 1 + rng.index(12)),
        8 => format!("{year}"),
        // Unparseable on purpose: the loader must coerce these to null.
        _ => "n.d.".to_string(),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "metadata.csv";

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer
        .write_record(["title", "journal", "publish_time", "source_x"])
        .context("writing header")?;

    let rows = 600;
    for _ in 0..rows {
        let title = if rng.index(20) == 0 {
            String::new()
        } else {
            format!(
                "{} {} {}",
                rng.choose(TITLE_OPENERS),
                rng.choose(TITLE_TOPICS),
                rng.choose(TITLE_CONTEXTS)
            )
        };
        let journal = if rng.index(5) == 0 {
            ""
        } else {
            rng.choose(JOURNALS)
        };
        let time = if rng.index(25) == 0 {
            String::new()
        } else {
            publish_time(&mut rng)
        };
        let source = if rng.index(8) == 0 {
            ""
        } else {
            rng.choose(SOURCES)
        };

        writer
            .write_record([title.as_str(), journal, time.as_str(), source])
            .context("writing row")?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {rows} papers to {output_path}");
    Ok(())
}
