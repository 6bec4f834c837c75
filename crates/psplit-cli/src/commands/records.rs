//! `psplit records ...`: record book maintenance.
//!
//! Every mutating command loads the book, applies one change, and saves it
//! back with the active record's snapshot unchanged.

use anyhow::Result;
use psplit_config::OutputFormat;
use psplit_engine::compute;
use psplit_snapshot::{load_record_book, save_record_book, RecordBook};
use std::path::Path;
use std::process::ExitCode;

use super::print_result;

fn save(book_path: &Path, book: &RecordBook) -> Result<()> {
    let state = book.active_state().clone();
    save_record_book(book_path, book, &state)
}

pub fn list(book_path: &Path) -> Result<ExitCode> {
    let book = load_record_book(book_path)?;
    for r in book.records() {
        let marker = if r.id == book.active_id() { '*' } else { ' ' };
        println!("{marker} {} {} {}", r.id, r.date, r.title);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn show(book_path: &Path, format: OutputFormat) -> Result<ExitCode> {
    let book = load_record_book(book_path)?;
    let state = book.active_state();
    print_result(state, &compute(state), format)
}

pub fn add(book_path: &Path) -> Result<ExitCode> {
    let mut book = load_record_book(book_path)?;
    let id = book.add_blank().id.clone();
    save(book_path, &book)?;
    println!("added=true active_id={id}");
    Ok(ExitCode::SUCCESS)
}

pub fn remove(book_path: &Path, id: &str) -> Result<ExitCode> {
    let mut book = load_record_book(book_path)?;
    book.remove(id)?;
    save(book_path, &book)?;
    println!("removed=true id={id} active_id={}", book.active_id());
    Ok(ExitCode::SUCCESS)
}

pub fn select(book_path: &Path, id: &str) -> Result<ExitCode> {
    let mut book = load_record_book(book_path)?;
    book.select(id)?;
    save(book_path, &book)?;
    println!("active_id={}", book.active_id());
    Ok(ExitCode::SUCCESS)
}
