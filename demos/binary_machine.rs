//! Binary Machine
//!
//! This example builds the classic "ends in 1" machine over the alphabet
//! `{0, 1}`, runs a few inputs through it, then saves and restores it.
//!
//! Key concepts:
//! - Programmatic construction with `FsmBuilder`
//! - Traces with a `YES`/`NO` verdict
//! - Checkpoints in both encodings (binary `.fs`, readable `.json`)
//! - Driving a `Session` with the same commands a script would use
//!
//! Run with: cargo run --example binary_machine

use fsm_designer::builder::FsmBuilder;
use fsm_designer::checkpoint::Checkpoint;
use fsm_designer::interpreter::Session;
use std::env;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    println!("=== Binary Machine Example ===\n");

    let fsm = FsmBuilder::new()
        .symbols(["0", "1"])
        .states(["s0", "s1"])
        .initial("s0")
        .finals(["s1"])
        .transition("0", "s0", "s0")
        .transition("1", "s0", "s1")
        .transition("1", "s1", "s1")
        .transition("0", "s1", "s0")
        .build()?;

    println!("Executing inputs:");
    for input in ["11", "10", "0101", ""] {
        let trace = fsm.execute(input)?;
        println!("  {input:>6} -> {trace}");
    }

    let dir = env::temp_dir().join("fsm-designer-demo");
    fs::create_dir_all(&dir)?;

    println!("\nSaving checkpoints:");
    for name in ["binary.fs", "binary.json"] {
        let path = dir.join(name);
        Checkpoint::new(fsm.clone()).save(&path)?;
        let restored = Checkpoint::load(&path)?.into_machine();
        let same = restored.execute("0101")? == fsm.execute("0101")?;
        let bytes = fs::metadata(&path)?.len();
        println!(
            "  {} ({bytes} bytes), restored trace matches: {same}",
            path.display()
        );
    }

    println!("\nSame machine through the command language:");
    let mut session = Session::new(Vec::new());
    for command in [
        "SYMBOLS 0 1",
        "STATES s0 s1",
        "INITIAL-STATE s0",
        "FINAL-STATES s1",
        "TRANSITIONS 0 s0 s0, 1 s0 s1, 1 s1 s1, 0 s1 s0",
        "EXECUTE 0101",
        "PRINT",
    ] {
        session.process(command);
    }
    print!("{}", String::from_utf8(session.into_output())?);

    println!("\n=== Example Complete ===");
    Ok(())
}
