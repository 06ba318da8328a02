//! Dump the header, index and table of a binary dictionary container.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::Parser;

use libskk_core::{DictStorage, FileStorage};

#[derive(Parser)]
#[command(about = "Dump the sections of a binary .skd dictionary")]
struct Args {
    /// Dictionary file to inspect
    input: PathBuf,

    /// Also list every table entry
    #[arg(long)]
    entries: bool,
}

fn need<T>(v: Option<T>) -> Result<T> {
    v.ok_or_else(|| anyhow!("unexpected end of file"))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut st = FileStorage::open(&args.input)?;

    let magic = [need(st.read())?, need(st.read())?, need(st.read())?];
    let file_size = need(st.read_u24())?;
    let comment_len = need(st.read_u16())?;
    let mut comment = Vec::with_capacity(comment_len as usize);
    for _ in 0..comment_len {
        comment.push(need(st.read())?);
    }
    let yomigana_max = need(st.read_u16())?;

    println!("magic:            {}", String::from_utf8_lossy(&magic));
    println!("file size:        {file_size}");
    println!("comment:          {}", String::from_utf8_lossy(&comment));
    println!("max yomigana len: {yomigana_max}");

    if [need(st.read())?, need(st.read())?, need(st.read())?] != *b"IDX" {
        bail!("'IDX' tag not found");
    }
    let index_len = need(st.read_u24())?;
    let index_tail = st.position() + index_len;
    println!("\nindex ({index_len} bytes):");
    let mut index_entries = 0usize;
    while st.position() < index_tail {
        let key_len = need(st.read())?;
        let mut key = Vec::with_capacity(key_len as usize);
        for _ in 0..key_len {
            key.push(need(st.read())?);
        }
        let jump_addr = need(st.read_u24())?;
        println!("  {} -> {jump_addr:#08x}", hex(&key));
        index_entries += 1;
    }
    println!("  ({index_entries} index entries)");

    if [need(st.read())?, need(st.read())?, need(st.read())?] != *b"TBL" {
        bail!("'TBL' tag not found");
    }
    let table_len = need(st.read_u24())?;
    let table_tail = if table_len > 0 {
        st.position() + table_len
    } else {
        file_size
    };
    println!("\ntable ({table_len} bytes):");

    let mut entries = 0usize;
    let mut candidates_total = 0usize;
    let mut disabled = 0usize;
    while st.position() < table_tail {
        let addr = st.position();
        let raw_key_len = need(st.read())?;
        let is_disabled = raw_key_len & 0x80 != 0;
        // the stored key is always the masked length; the search path
        // reads it unmasked, which is what makes disabled entries
        // unreachable there
        let key_len = raw_key_len & 0x7F;
        let mut key = Vec::with_capacity(key_len as usize);
        for _ in 0..key_len {
            key.push(need(st.read())?);
        }
        let count = need(st.read())?;
        let block_len = need(st.read_u16())?;
        if args.entries {
            println!(
                "  {addr:#08x}: {}{} ({count} candidates, {block_len} bytes)",
                hex(&key),
                if is_disabled { " [disabled]" } else { "" },
            );
        }
        entries += 1;
        candidates_total += count as usize;
        if is_disabled {
            disabled += 1;
        }
        st.seek_delta(block_len as i32);
    }
    println!("  ({entries} entries, {candidates_total} candidates, {disabled} disabled)");
    Ok(())
}
