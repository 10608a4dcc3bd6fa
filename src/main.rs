//! Terminal ray-caster (default binary).
//!
//! Renders a first-person view of a grid map into the terminal with crossterm
//! and a framebuffer-based presenter.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use console_raycaster::config::{AppConfig, Command, USAGE};
use console_raycaster::core::{Map, Simulation, ViewerState};
use console_raycaster::input::{should_quit, toggle_for_key, InputHandler, ViewToggle};
use console_raycaster::term::{FrameBuffer, HudStats, SceneView, TerminalRenderer};
use console_raycaster::types::{MAX_FRAME_DT_MS, SCREEN_HEIGHT, SCREEN_WIDTH};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = AppConfig::from_env()?;
    if config.apply_args(&args)? == Command::Help {
        print!("{}", USAGE);
        return Ok(());
    }

    init_logging(&config)?;
    let map = config.load_map()?;
    log::info!(
        "starting: map {}x{}, fov {}deg, depth {}, step {}, parallel {}",
        map.width(),
        map.height(),
        config.fov_deg,
        config.max_depth,
        config.step,
        config.parallel
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, map);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Logs go to `RAYCAST_LOG_PATH` when set; the terminal is in raw alternate
/// screen mode, so stderr output is only enabled through `RUST_LOG`.
fn init_logging(config: &AppConfig) -> Result<()> {
    let mut builder = match &config.log_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.try_init()?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, map: Map) -> Result<()> {
    let (w, h) = config.size.unwrap_or_else(|| {
        crossterm::terminal::size().unwrap_or((SCREEN_WIDTH, SCREEN_HEIGHT))
    });

    let viewer = ViewerState::spawn_on(&map);
    let mut sim = Simulation::new(map, viewer)
        .with_render(config.render_config())
        .with_size(w, h);
    let mut view = SceneView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(w, h);

    let frame_interval = Duration::from_millis(config.frame_ms as u64);
    let max_dt = Duration::from_millis(MAX_FRAME_DT_MS as u64);
    let started = Instant::now();
    let mut last_frame = started;
    let mut fps = 0.0f32;

    loop {
        // Input until the next frame is due.
        let deadline = last_frame + frame_interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            log_shutdown(&sim, started);
                            return Ok(());
                        }
                        if key.kind == KeyEventKind::Press {
                            match toggle_for_key(key) {
                                Some(ViewToggle::Minimap) => view.toggle_minimap(),
                                Some(ViewToggle::Hud) => view.toggle_hud(),
                                None => {}
                            }
                        }
                        input.handle_key_press(key.code);
                    }
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(cols, rows) => {
                    if config.size.is_none() {
                        log::debug!("resize: {}x{}", cols, rows);
                        sim.resize(cols, rows);
                    }
                    term.invalidate();
                }
                Event::FocusLost => input.reset(),
                _ => {}
            }
        }

        let now = Instant::now();
        let elapsed = now - last_frame;
        last_frame = now;

        // A stalled frame (debugger, suspended terminal) must not teleport the viewer.
        let dt = elapsed.min(max_dt);
        for action in input.update(dt.as_millis() as u32) {
            log::trace!("auto-released {}", action.as_str());
        }

        let secs = elapsed.as_secs_f32();
        if secs > 0.0 {
            let instant = 1.0 / secs;
            fps = if fps == 0.0 {
                instant
            } else {
                fps * 0.9 + instant * 0.1
            };
        }

        sim.step(input.move_input(), dt.as_secs_f32());
        view.render_into(sim.frame(), sim.map(), &sim.viewer, &HudStats { fps }, &mut fb);
        term.present(&mut fb)?;
    }
}

fn log_shutdown(sim: &Simulation, started: Instant) {
    let secs = started.elapsed().as_secs_f64();
    let avg = if secs > 0.0 {
        sim.frames() as f64 / secs
    } else {
        0.0
    };
    log::info!("shutdown: {} frames, {:.1} fps average", sim.frames(), avg);
}
