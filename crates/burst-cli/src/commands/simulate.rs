//! Simulate command — drives an engine through the frame scheduler with a
//! synthetic display clock and prints every frame

use anyhow::{bail, Result};
use burst_core::Transform2D;
use burst_particles::{Engine, Impulse, PayloadKey};
use burst_runtime::FrameScheduler;
use serde::Serialize;

pub struct SimulateArgs {
    pub preset: String,
    pub config: Option<String>,
    pub impulses: u32,
    pub interval: u32,
    pub velocity: Option<f32>,
    pub fps: f64,
    pub max_frames: u32,
    pub seed: u128,
    pub format: String,
}

#[derive(Serialize)]
struct ParticleReport {
    id: String,
    key: PayloadKey,
    progress: f32,
    velocity: f32,
    transform: Transform2D,
}

#[derive(Serialize)]
struct FrameReport {
    frame: u32,
    time: f64,
    particles: Vec<ParticleReport>,
}

#[derive(Serialize)]
struct SimulationReport {
    effect: String,
    impulses: u32,
    /// Frame at which the scheduler last paused, if it did
    idle_at: Option<u32>,
    frames: Vec<FrameReport>,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    if !(args.fps > 0.0) {
        bail!("fps must be positive, got {}", args.fps);
    }
    if !matches!(args.format.as_str(), "text" | "json") {
        bail!("Unknown format: {}", args.format);
    }

    let config = super::resolve_effect(&args.preset, args.config.as_deref())?;
    let engine = Engine::new(config).with_sequential_ids(args.seed);
    let report = simulate(engine, &args);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }
    Ok(())
}

fn simulate(engine: Engine, args: &SimulateArgs) -> SimulationReport {
    let effect = engine.config().name.clone();
    let mut scheduler = FrameScheduler::new(engine);
    let interval = args.interval.max(1);

    let mut delivered = 0u32;
    let mut idle_at = None;
    let mut frames = Vec::new();

    for frame in 0..args.max_frames {
        let time = frame as f64 / args.fps;

        if delivered < args.impulses && frame % interval == 0 {
            delivered += 1;
            let mut impulse = Impulse::new(i64::from(delivered));
            if let Some(v) = args.velocity {
                impulse = impulse.with_velocity(v);
            }
            scheduler.deliver(|engine| engine.on_impulse(&impulse));
        }

        if !scheduler.is_active() {
            if delivered >= args.impulses {
                break;
            }
            continue;
        }

        if !scheduler.on_frame(time) {
            idle_at = Some(frame);
        }
        frames.push(FrameReport {
            frame,
            time,
            particles: scheduler
                .system()
                .particles()
                .iter()
                .map(|p| ParticleReport {
                    id: p.id().to_string(),
                    key: p.key().clone(),
                    progress: p.progress(),
                    velocity: p.velocity(),
                    transform: *p.transform(),
                })
                .collect(),
        });
    }

    if scheduler.is_active() {
        log::warn!(
            "{} still has {} live particle(s) after {} frames",
            effect,
            scheduler.system().len(),
            args.max_frames
        );
    }

    SimulationReport {
        effect,
        impulses: delivered,
        idle_at,
        frames,
    }
}

fn print_text(report: &SimulationReport) {
    println!("Effect: {}", report.effect);
    println!("Impulses: {}", report.impulses);
    println!();

    for frame in &report.frames {
        println!(
            "frame {:>4}  t={:>7.3}s  live={}",
            frame.frame,
            frame.time,
            frame.particles.len()
        );
        for p in &frame.particles {
            let t = &p.transform;
            println!(
                "    {:<12} p={:>6.3} v={:>7.3}  pos=({:>7.2},{:>7.2}) rot={:>6.2} scale={:.3} alpha={:.3}",
                p.key.to_string(),
                p.progress,
                p.velocity,
                t.position.x,
                t.position.y,
                t.rotation_degrees,
                t.scale,
                t.opacity
            );
        }
    }

    println!();
    match report.idle_at {
        Some(frame) => println!("Idle after frame {}", frame),
        None => println!("Still active when the run ended"),
    }
}
