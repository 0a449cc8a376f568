use std::{fs, process};

use anyhow::{Context, Result, bail};

use polygon_rings::{
    engine::{Engine, source::SceneSource},
    player::{CompiledPlayback, LivePlayback, Player, config::PlayerConfig},
    random::random_scene,
    renderer::{RenderOptions, Renderer},
    types::{PlayablePresentation, TerminalContract},
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

const COMPILE_USAGE: &str = "polygon-rings compile <scene.json> <output.json>";
const PLAY_USAGE: &str = "polygon-rings play <presentation.json>";
const LIVE_USAGE: &str = "polygon-rings live <scene.json>";
const CHECK_USAGE: &str = "polygon-rings check <scene.json>";
const RANDOM_USAGE: &str = "polygon-rings random <output.json> [seed]";

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    match args.next().as_deref() {
        Some("compile") => {
            let source_path = args.next().context(COMPILE_USAGE)?;
            let output_path = args.next().context(COMPILE_USAGE)?;
            compile(&source_path, &output_path)
        }
        Some("play") => {
            let path = args.next().context(PLAY_USAGE)?;
            play(&path)
        }
        Some("live") => {
            let path = args.next().context(LIVE_USAGE)?;
            live(&path)
        }
        Some("check") => {
            let path = args.next().context(CHECK_USAGE)?;
            check(&path)
        }
        Some("random") => {
            let path = args.next().context(RANDOM_USAGE)?;
            let seed = match args.next() {
                Some(s) => s.parse::<u64>().with_context(|| format!("Invalid seed {s:?}"))?,
                None => fastrand::u64(..),
            };
            random(&path, seed)
        }
        _ => bail!(
            "Polygon Rings — animated regular polygons in the terminal\n\nUsage:\n  {COMPILE_USAGE}\n  {PLAY_USAGE}\n  {LIVE_USAGE}\n  {CHECK_USAGE}\n  {RANDOM_USAGE}"
        ),
    }
}

fn read_scene(path: &str) -> Result<SceneSource> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))
}

fn compile(source_path: &str, output_path: &str) -> Result<()> {
    let source = read_scene(source_path)?;

    let scenes = Engine::compile(&source).with_context(|| format!("Invalid scene {source_path}"))?;
    let options = RenderOptions {
        background: source.background.clone(),
        redraw_background: source.redraw_background,
        frame_rate: source.frame_rate,
    };
    let contract = TerminalContract {
        width: source.width,
        height: source.height,
    };
    let presentation = Renderer::render(&scenes, contract, &options);

    let output_json = serde_json::to_string(&presentation)?;
    fs::write(output_path, &output_json)
        .with_context(|| format!("Failed to write {output_path}"))?;

    log::info!(
        "compiled {} frames from {} -> {}",
        presentation.frames.len(),
        source_path,
        output_path,
    );

    Ok(())
}

fn play(path: &str) -> Result<()> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let presentation: PlayablePresentation =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse {path}"))?;

    let mut playback = CompiledPlayback::new(presentation)?;
    Player::new(&mut playback, PlayerConfig::load()).play()
}

fn live(path: &str) -> Result<()> {
    let source = read_scene(path)?;
    let mut playback = LivePlayback::new(source).with_context(|| format!("Invalid scene {path}"))?;
    Player::new(&mut playback, PlayerConfig::load()).play()
}

fn check(path: &str) -> Result<()> {
    let source = read_scene(path)?;
    source
        .validate()
        .with_context(|| format!("Invalid scene {path}"))?;
    println!(
        "{path}: {} groups, {} rings, {}x{} at {} fps",
        source.groups.len(),
        source.ring_count(),
        source.width,
        source.height,
        source.frame_rate,
    );
    Ok(())
}

fn random(path: &str, seed: u64) -> Result<()> {
    let scene = random_scene(seed);
    let json = serde_json::to_string_pretty(&scene)?;
    fs::write(path, json).with_context(|| format!("Failed to write {path}"))?;
    println!("Wrote random scene (seed {seed}) to {path}");
    Ok(())
}
