//! Scene view composition and diff presentation, headless.

use console_raycaster::core::Simulation;
use console_raycaster::term::{FrameBuffer, HudStats, SceneView, TerminalRenderer};
use console_raycaster::types::MoveInput;

fn sim(w: u16, h: u16) -> Simulation {
    let mut sim = Simulation::default().with_size(w, h);
    sim.step(MoveInput::default(), 0.0);
    sim
}

#[test]
fn hud_line_shows_viewer_and_fps() {
    let sim = sim(60, 20);
    let view = SceneView::default();
    let fb = view.render(sim.frame(), sim.map(), &sim.viewer, &HudStats { fps: 59.94 });
    let hud = fb.row_text(0).unwrap();
    assert!(
        hud.starts_with("X=13.00 Y=6.00 A=1.57 FPS=59.9"),
        "hud: {:?}",
        hud
    );
    assert_eq!(fb.row_text(1).map(|r| r.chars().count()), Some(60));
}

#[test]
fn minimap_marks_walls_and_viewer() {
    let sim = sim(60, 20);
    let view = SceneView::new(true, true);
    let fb = view.render(sim.frame(), sim.map(), &sim.viewer, &HudStats::default());

    // Map rows start below the HUD line.
    let top = fb.row_text(1).unwrap();
    assert!(top.starts_with("################"));
    assert_eq!(fb.get(13, 1 + 6).unwrap().ch, 'P');
    assert_eq!(fb.get(13, 1 + 11).unwrap().ch, '#');
    assert_eq!(fb.get(5, 1 + 5).unwrap().ch, '.');
}

#[test]
fn minimap_is_skipped_when_it_does_not_fit() {
    let sim = sim(12, 10);
    let mut view = SceneView::new(false, false);
    let plain = view.render(sim.frame(), sim.map(), &sim.viewer, &HudStats::default());
    view.toggle_minimap();
    assert!(view.show_minimap());
    let with_map = view.render(sim.frame(), sim.map(), &sim.viewer, &HudStats::default());
    assert_eq!(plain, with_map);
}

#[test]
fn presenter_only_redraws_changed_runs() {
    let mut sim = sim(40, 12);
    let view = SceneView::new(false, false);
    let mut renderer = TerminalRenderer::with_writer(Vec::new());
    let mut fb = FrameBuffer::new(40, 12);

    view.render_into(sim.frame(), sim.map(), &sim.viewer, &HudStats::default(), &mut fb);
    assert!(renderer.present(&mut fb).unwrap().full_redraw);

    // Same scene again: nothing to send.
    view.render_into(sim.frame(), sim.map(), &sim.viewer, &HudStats::default(), &mut fb);
    let stats = renderer.present(&mut fb).unwrap();
    assert!(!stats.full_redraw);
    assert_eq!(stats.runs, 0);
    assert_eq!(stats.bytes, 0);

    // Turning changes the picture.
    let turn = MoveInput {
        turn_right: true,
        ..MoveInput::default()
    };
    sim.step(turn, 0.5);
    view.render_into(sim.frame(), sim.map(), &sim.viewer, &HudStats::default(), &mut fb);
    let stats = renderer.present(&mut fb).unwrap();
    assert!(stats.runs > 0);
}
