//! Weld an exploded, jittered cube and print what happened.
//!
//! Usage:
//!   cargo run -p meshweld --example weld_soup -- [tolerance] [jitter]

use meshweld::mesh_gen::{cube_3d, explode, jitter};
use meshweld::DuplicatedVertexRemoval;

fn main() {
    let mut args = std::env::args().skip(1);
    let tol: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1e-3);
    let amp: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1e-5);

    let (points, elements) = cube_3d();
    let (soup_p, soup_e) = explode(&points, &elements);
    let noisy = jitter(&soup_p, amp, 2025);
    let mut remover = match DuplicatedVertexRemoval::new(noisy, soup_e) {
        Ok(r) => r,
        Err(err) => {
            eprintln!("invalid mesh: {err}");
            return;
        }
    };
    match remover.run(tol) {
        Ok(stats) => {
            println!(
                "tol={tol:e} jitter={amp:e}: {} -> {} points ({} removed, {} pairs)",
                stats.points_in,
                stats.points_out,
                stats.removed(),
                stats.proximity_pairs
            );
            if let Ok(map) = remover.index_map() {
                println!("survivors: {:?}", map.survivors());
            }
        }
        Err(err) => eprintln!("weld failed: {err}"),
    }
}
