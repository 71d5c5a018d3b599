//! Loads the zoo data, ranks its attributes, grows an unpruned tree,
//! classifies a hand-built animal, and cross validates a pruned tree.
//!
//! ```text
//! cargo run --example classification_demo [path/to/zoo.arff]
//! ```
//! Set `RUST_LOG=minitrees=debug` to follow the splits and folds.
use minitrees::prelude::*;
use minitrees::rank;
use tracing_subscriber::EnvFilter;

use std::env;
use std::error::Error;
use std::fs;


const DOT_FILE: &str = "zoo_tree.dot";


fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| {
            concat!(env!("CARGO_MANIFEST_DIR"), "/tests/dataset/zoo.arff")
                .to_string()
        });

    let table = ArffReader::default()
        .file(&path)
        .read()?;
    println!("{} instances loaded!", table.n_instances());
    println!("{table}");

    // The animal name identifies each row and carries no information.
    let table = table.project_by_name(&["animal"])?;

    println!("=== Attribute ranking (information gain) ===");
    for ranked in rank(&table) {
        println!("{ranked}");
    }
    println!();

    let learner = DecisionTreeBuilder::new()
        .pruned(false)
        .build()?;
    let tree = learner.fit(&table)?;
    println!("{tree}");

    fs::write(DOT_FILE, tree.to_dot())?;
    println!("Wrote the tree to {DOT_FILE}");
    println!();

    let unicorn = Instance::from_pairs(table.catalog(), &[
        ("hair", "true"), ("feathers", "false"), ("eggs", "false"),
        ("milk", "true"), ("airborne", "false"), ("aquatic", "false"),
        ("predator", "false"), ("toothed", "true"), ("backbone", "true"),
        ("breathes", "true"), ("venomous", "true"), ("fins", "false"),
        ("legs", "4"), ("tail", "true"), ("domestic", "true"),
        ("catsize", "false"),
    ])?;
    println!("And the animal is... {}", tree.classify_label(&unicorn));
    println!();

    let evaluation = CrossValidation::new(&table)
        .n_folds(10)
        .seed(1)
        .verbose(true)
        .evaluate(&TreeLearner::default())?;
    println!();
    println!("{evaluation}");

    Ok(())
}
