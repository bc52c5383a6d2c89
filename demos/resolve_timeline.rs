use segue::{FrameResolver, TimelineBuilder, TimelineDef};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/three_scenes.json");
    let def = TimelineDef::from_json_str(s)?;
    let schedule = def.build(&TimelineBuilder::new())?;
    println!(
        "{} scenes, {} frames",
        schedule.scenes().len(),
        schedule.total_duration_frames()
    );

    for f in [0i64, 44, 45, 50, 59, 60, 125, 179, 180] {
        let frame = FrameResolver::resolve_styled(&schedule, f);
        let layers: Vec<String> = frame
            .layers
            .iter()
            .map(|l| {
                format!(
                    "{}@{} {:?} p={:.3} opacity={:.3}",
                    l.instruction.scene_id,
                    l.instruction.local_frame,
                    l.instruction.direction,
                    l.instruction.progress,
                    l.style.opacity
                )
            })
            .collect();
        println!("frame {f}: {}", layers.join(" | "));
    }

    Ok(())
}
