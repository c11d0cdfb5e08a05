//! Headless gallery walkthrough demo
//!
//! Drives the viewer through a scripted session at a fixed 60 Hz step: walk
//! across the room, bump into a bench, focus a painting, idle in the orbit,
//! and back out. No window or renderer; state transitions and positions are
//! reported through the log.
//!
//! Usage: `gallery_walkthrough [layout.ron] [viewer.toml]`

use gallery_engine::events::ViewerEvent;
use gallery_engine::prelude::*;

const DT: f32 = 1.0 / 60.0;

struct WalkthroughApp {
    viewer: GalleryViewer,
    frame: u64,
}

impl WalkthroughApp {
    fn new(layout: &GalleryLayout, config: ViewerConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let scene = GalleryScene::from_layout(layout)?;
        let mut viewer = GalleryViewer::new(scene, config)?;

        // The host would do this on pointer-lock; the demo is always locked.
        viewer.set_pointer_locked(true);
        viewer.rig_mut().look_at(Vec3::new(0.0, 1.6, -5.0));

        Ok(Self { viewer, frame: 0 })
    }

    /// Advance the viewer by whole seconds of simulated time
    fn run_seconds(&mut self, seconds: f32) -> Result<(), Box<dyn std::error::Error>> {
        let steps = (seconds / DT).round() as u64;
        for _ in 0..steps {
            self.viewer.update(DT)?;
            self.frame += 1;
            if self.frame % 30 == 0 {
                let p = self.viewer.position();
                log::info!(
                    "t={:6.2}s position=({:6.2}, {:4.2}, {:6.2}) grounded={} presenting={}",
                    self.frame as f32 * DT,
                    p.x,
                    p.y,
                    p.z,
                    self.viewer.is_grounded(),
                    self.viewer.is_presenting(),
                );
            }
        }
        Ok(())
    }

    fn press(&mut self, action: Action) -> Result<(), Box<dyn std::error::Error>> {
        self.viewer.handle_action(action, true)?;
        Ok(())
    }

    fn release(&mut self, action: Action) -> Result<(), Box<dyn std::error::Error>> {
        self.viewer.handle_action(action, false)?;
        Ok(())
    }

    /// Report queued viewer events the way a HUD overlay would
    fn report_events(&mut self) {
        for event in self.viewer.events_mut().drain() {
            match event {
                ViewerEvent::PresentationEntered(info) => {
                    log::info!("overlay: \"{}\" ({}) — {}", info.title, info.ai_model, info.prompt);
                }
                ViewerEvent::PresentationExited => {
                    log::info!("overlay hidden");
                }
            }
        }
    }

    fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("walking toward the north wall");
        self.press(Action::MoveForward)?;
        self.run_seconds(2.0)?;

        log::info!("sprinting with a jump");
        self.press(Action::Sprint)?;
        self.press(Action::Jump)?;
        self.run_seconds(0.5)?;
        self.release(Action::Jump)?;
        self.run_seconds(1.5)?;
        self.release(Action::Sprint)?;

        log::info!("steering into a bench to show collision push-back");
        self.viewer.rig_mut().look_at(Vec3::new(-3.0, 1.6, 2.0));
        self.run_seconds(2.0)?;
        self.release(Action::MoveForward)?;

        let key = self
            .viewer
            .scene()
            .paintings()
            .next()
            .map(|(key, _)| key)
            .ok_or("layout has no paintings to focus")?;

        log::info!("focusing the first painting");
        self.viewer.focus_painting(key)?;
        self.report_events();
        self.run_seconds(2.0)?; // fly-in
        self.run_seconds(4.0)?; // idle orbit

        log::info!("backing out of presentation mode");
        self.press(Action::FocusExit)?;
        self.report_events();
        self.run_seconds(1.0)?;

        let p = self.viewer.position();
        log::info!("walkthrough finished at ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z);
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    gallery_engine::foundation::logging::init();

    let layout = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading gallery layout from {path}");
            GalleryLayout::load_from_file(&path)?
        }
        None => {
            log::info!("using built-in gallery layout");
            GalleryLayout::default()
        }
    };

    let config = match std::env::args().nth(2) {
        Some(path) => {
            log::info!("loading viewer config from {path}");
            ViewerConfig::load_from_file(&path)?
        }
        None => ViewerConfig::default(),
    };

    let mut timer = Timer::new();
    let mut app = WalkthroughApp::new(&layout, config)?;
    app.run()?;

    timer.update();
    log::info!(
        "session simulated in {:.0} ms of wall time",
        timer.delta_time() * 1000.0
    );
    Ok(())
}
