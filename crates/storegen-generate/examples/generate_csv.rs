use std::env;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use storegen_generate::{GenerateOptions, GenerationEngine};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = GenerateOptions::new(Local::now().date_naive());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => options.out_dir = args.next().map(PathBuf::from).ok_or("missing --out value")?,
            "--seed" => options.seed = args.next().ok_or("missing --seed value")?.parse()?,
            "--today" => {
                let value = args.next().ok_or("missing --today value")?;
                options.today = NaiveDate::parse_from_str(&value, "%Y-%m-%d")?;
            }
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let result = GenerationEngine::new(options).run()?;

    println!("out_dir={}", result.out_dir.display());
    println!("bytes_written={}", result.report.bytes_written);
    Ok(())
}
