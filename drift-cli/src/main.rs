//! Drift CLI — headless renderer for rigs and hash draws.
//!
//! Prints CSV to stdout; logs go to stderr through `env_logger`
//! (default filter `info`, override with `RUST_LOG`).

use drift_core::hash;
use drift_engine::{Driver, Rig, RigConfig};
use std::error::Error;
use std::io::{self, BufWriter, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Mode {
    #[default]
    Rig,
    Hash,
}

#[derive(Debug, Default)]
struct Args {
    mode: Mode,
    frames: Option<usize>,
    fps: Option<f32>,
    seed: Option<u32>,
    preset: Option<String>,
}

fn parse_args() -> Args {
    let mut a = Args::default();
    for s in std::env::args().skip(1) {
        if let Some(rest) = s.strip_prefix("--mode=") {
            match rest.to_ascii_lowercase().as_str() {
                "rig" => a.mode = Mode::Rig,
                "hash" => a.mode = Mode::Hash,
                other => log::warn!("unknown mode {other:?}, using rig"),
            }
            continue;
        }
        if let Some(rest) = s.strip_prefix("--frames=") { a.frames = rest.parse().ok(); continue; }
        if let Some(rest) = s.strip_prefix("--fps=")    { a.fps    = rest.parse().ok(); continue; }
        if let Some(rest) = s.strip_prefix("--seed=")   { a.seed   = rest.parse().ok(); continue; }
        if let Some(rest) = s.strip_prefix("--preset=") { a.preset = Some(rest.to_string()); continue; }
        log::warn!("unknown arg: {s}");
    }
    a
}

fn load_config(args: &Args) -> Result<RigConfig, Box<dyn Error>> {
    let mut config = match &args.preset {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<RigConfig>(&text)?
        }
        None => RigConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

fn render_rig(args: &Args, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let config = load_config(args)?;
    let frames = args.frames.unwrap_or(300);
    let fps = args.fps.unwrap_or(60.0);
    if !(fps.is_finite() && fps > 0.0) {
        return Err(format!("--fps must be > 0, got {fps}").into());
    }
    log::info!("rendering {frames} frames at {fps} fps");
    log::info!("config: {}", serde_json::to_string(&config)?);

    let mut driver = Driver::new(Rig::new(config)?);
    writeln!(out, "frame,time,px,py,pz,qx,qy,qz,qw")?;
    let mut result = Ok(());
    driver.run(frames, fps, |i, pose| {
        if result.is_err() {
            return;
        }
        let (p, q) = (pose.position, pose.rotation);
        let t = i as f32 / fps;
        result = writeln!(
            out,
            "{i},{t:.5},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6},{:.6}",
            p.x, p.y, p.z, q.x, q.y, q.z, q.w
        );
    });
    result?;
    Ok(())
}

fn dump_hash(args: &Args, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or(1);
    let count = args.frames.unwrap_or(16);
    log::info!("dumping {count} draws for seed {seed}");

    writeln!(out, "key,calculate,int_0_100,float_01,dx,dy,dz")?;
    for key in 0..u32::try_from(count)? {
        let h = hash::calculate(seed, key);
        let i: i32 = hash::int(seed, key, 0, 100)?;
        let f = hash::float(seed, key, 0.0, 1.0);
        let d = hash::direction(seed, key);
        writeln!(out, "{key},{h},{i},{f:.6},{:.6},{:.6},{:.6}", d.x, d.y, d.z)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match args.mode {
        Mode::Rig => render_rig(&args, &mut out)?,
        Mode::Hash => dump_hash(&args, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
