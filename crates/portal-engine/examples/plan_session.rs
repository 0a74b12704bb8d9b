//! Command-line planning demo -- builds a small world, links portals, and
//! prints where each one leads.
//!
//! Run with:
//!   cargo run --example plan_session -p portal-engine
//!
//! Pass a JSON document path to plan an existing world instead:
//!   cargo run --example plan_session -p portal-engine -- my_world.json

use std::path::Path;

use anyhow::Context;
use portal_engine::prelude::*;
use portal_world::links::LinkResult;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut session = Session::new();

    match std::env::args().nth(1) {
        Some(path) => {
            session
                .open(Path::new(&path))
                .with_context(|| format!("failed to open {path}"))?;
        }
        None => {
            // A base near spawn and two nether-side portals competing for it.
            session.add_portal(
                Dimension::Overworld,
                WorldPos {
                    x: 80.0,
                    y: 64.0,
                    z: 80.0,
                },
            );
            session.add_portal(
                Dimension::Nether,
                WorldPos {
                    x: 80.0,
                    y: 64.0,
                    z: 80.0,
                },
            );
            session.add_portal(
                Dimension::Nether,
                WorldPos {
                    x: 152.0,
                    y: 64.0,
                    z: 80.0,
                },
            );
            session.commit()?;
        }
    }

    for dimension in [Dimension::Overworld, Dimension::Nether] {
        println!("{dimension}:");
        let portals: Vec<(PortalId, String, BlockPos)> = session.world().portals[dimension]
            .iter()
            .map(|p| (p.id, p.display_name().to_owned(), p.region.min))
            .collect();
        for (id, name, pos) in portals {
            let links = session.links();
            match &links.get(id).map(|entry| &entry.outgoing) {
                Some(LinkResult::Portals {
                    ids,
                    may_generate_new,
                }) => {
                    let destinations: Vec<String> =
                        ids.iter().map(|id| id.to_string()).collect();
                    println!(
                        "  {id} {name} at {}, {}, {} -> [{}]{}",
                        pos.x,
                        pos.y,
                        pos.z,
                        destinations.join(", "),
                        if *may_generate_new {
                            " (may generate a new portal)"
                        } else {
                            ""
                        }
                    );
                }
                Some(LinkResult::EntityWontFit) => {
                    println!("  {id} {name}: entity does not fit");
                }
                None => {}
            }
        }
    }

    Ok(())
}
