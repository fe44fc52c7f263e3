//! Builds a tree from samples of a shifted cosine, then takes it apart again.
//!
//! Run with `RUST_LOG=debug cargo run --example sinusoid` to see the tree's own log events.

use std::f64::consts::{FRAC_PI_4, PI};

use linkwood::{InsertError, NodeHandle, Tree};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Number of samples taken over one period.
const RANGE: i32 = 200;

/// Maps sample `i` to its angle and to a key in `0..=RANGE`.
fn sample(i: i32) -> (i32, f64) {
    let theta = f64::from(i) / f64::from(RANGE) * 2.0 * PI;
    #[allow(clippy::cast_possible_truncation)]
    let key = (f64::from(RANGE / 2) * (1.0 + (3.0 * FRAC_PI_4 + theta).cos())) as i32;
    (key, theta)
}

fn main() -> Result<(), InsertError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Two nodes are each other's neighbours.
    let mut tree: Tree<i32, f64> = Tree::new();
    let one = tree.insert(1, 1.0)?;
    let two = tree.insert(2, 2.0)?;
    assert_eq!(tree.predecessor(two), Some(one));
    assert_eq!(tree.successor(one), Some(two));
    assert_eq!(tree.predecessor(one), None);
    assert_eq!(tree.successor(two), None);
    tree.delete(one);
    tree.delete(two);

    // The cosine visits most keys twice, so the tree holds duplicates.
    let mut handles: Vec<(NodeHandle, f64)> = Vec::new();
    for i in 0..RANGE {
        let (key, theta) = sample(i);
        info!(theta, key, "insert");
        handles.push((tree.insert(key, theta)?, theta));
    }

    for (key, theta) in tree.iter() {
        info!(key, theta, "walk");
    }
    info!(len = tree.len(), "built tree");

    for i in 0..RANGE {
        let (key, _) = sample(i);
        assert!(tree.search(&key).is_some(), "sample {i} is missing");
    }

    // Moving the tree keeps every handle pointing at its node.
    let mut moved = tree.take();
    assert!(tree.is_empty());
    info!(len = moved.len(), "moved tree");

    for (handle, theta) in handles {
        assert_eq!(moved.delete(handle), Some(theta));
    }
    assert!(moved.is_empty());
    info!("deleted every sample by handle");

    Ok(())
}
