//! Builds a small two-room plan, edits it, and prints the saved JSON.
//!
//! Run with `cargo run --example editor`.

use floorplan::operations::creation::{AddCorner, AddWall};
use floorplan::operations::modification::MoveCorner;
use floorplan::{FloorPlan, Result};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut plan = FloorPlan::default();
    plan.subscribe(|event| println!("event: {event:?}"));

    // Two squares sharing the wall b-c.
    let a = AddCorner::new(0.0, 0.0).execute(&mut plan)?;
    let b = AddCorner::new(4.0, 0.0).execute(&mut plan)?;
    let c = AddCorner::new(4.0, 4.0).execute(&mut plan)?;
    let d = AddCorner::new(0.0, 4.0).execute(&mut plan)?;
    let e = AddCorner::new(8.0, 0.0).execute(&mut plan)?;
    let f = AddCorner::new(8.0, 4.0).execute(&mut plan)?;
    for (from, to) in [(a, b), (b, c), (c, d), (d, a), (b, e), (e, f), (f, c)] {
        AddWall::new(from, to).execute(&mut plan)?;
    }

    println!("rooms detected: {}", plan.rooms().len());
    for room in plan.rooms() {
        println!("  {} ({} corners)", room.uuid, room.corners.len());
    }

    // Drag a corner; rooms and mitered geometry rebuild automatically.
    MoveCorner::new(d, -0.5, 4.5).execute(&mut plan)?;
    println!("after drag, first room outline:");
    for point in &plan.rooms()[0].interior_corners {
        println!("  ({:.3}, {:.3})", point.x, point.y);
    }

    println!("{}", floorplan::io::to_json(&plan)?);
    Ok(())
}
