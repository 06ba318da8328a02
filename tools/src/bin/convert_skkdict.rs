//! Convert a text SKK dictionary (Shift-JIS encoded) into the binary
//! container. Lines are `yomigana /candidate1/candidate2;annotation/`;
//! annotations are stripped, comment lines start with `;`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use libskk_core::DictBuilder;

#[derive(Parser)]
#[command(about = "Convert a text SKK dictionary into the binary .skd container")]
struct Args {
    /// Input text dictionary, Shift-JIS encoded
    input: PathBuf,

    /// Output .skd file
    output: PathBuf,

    /// Comment stored in the container header
    #[arg(long, default_value = "converted by skk-tools")]
    comment: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let data = fs::read(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let mut builder = DictBuilder::new();
    builder.set_comment(&args.comment);

    let mut skipped = 0usize;
    for line in data.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() || line[0] == b';' {
            continue;
        }
        let Some(split) = line.iter().position(|&b| b == b' ') else {
            skipped += 1;
            continue;
        };
        let (yomigana, rest) = line.split_at(split);
        let candidates: Vec<&[u8]> = rest[1..]
            .split(|&b| b == b'/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                // strip the annotation after ';'
                match part.iter().position(|&b| b == b';') {
                    Some(pos) => &part[..pos],
                    None => part,
                }
            })
            .filter(|part| !part.is_empty())
            .collect();
        if yomigana.is_empty() || yomigana.len() > 0x7F || candidates.is_empty() {
            skipped += 1;
            continue;
        }
        builder.add_entry(yomigana, &candidates);
    }

    let image = builder.build();
    fs::write(&args.output, &image)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "{} entries ({} lines skipped), {} bytes -> {}",
        builder.entry_count(),
        skipped,
        image.len(),
        args.output.display()
    );
    Ok(())
}
