//! Top-level app flow: Title → Loading → Playing
//!
//! Transitions are evaluated once per frame. The global cancel gesture
//! (Escape) runs before any per-state logic.

use crate::error::Result;
use crate::input::{DeviceSnapshot, Key, KeyboardState};
use crate::session::{ConfigSource, SessionLifecycleController, SimulationService};
use crate::settings::ClientSettings;

use super::render::{Renderer, ScreenView};
use super::screens::{LoadingScreen, TitleScreen};

/// Top-level app state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Title,
    Loading,
    Playing,
}

/// What the host loop should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppControl {
    Continue,
    Exit,
}

pub struct AppStateMachine<S: SimulationService + ?Sized, C: ConfigSource> {
    state: AppState,
    session: SessionLifecycleController<S, C>,
    settings: ClientSettings,
    title: TitleScreen,
    loading: LoadingScreen,
    prev_keyboard: KeyboardState,
    cursor_visible: bool,
    /// Presentation version last pushed to the renderer
    applied_presentation: Option<u32>,
}

impl<S, C> AppStateMachine<S, C>
where
    S: SimulationService + ?Sized + 'static,
    C: ConfigSource,
{
    pub fn new(session: SessionLifecycleController<S, C>, settings: ClientSettings) -> Self {
        Self {
            state: AppState::Title,
            session,
            settings,
            title: TitleScreen::new(),
            loading: LoadingScreen::new(),
            prev_keyboard: KeyboardState::new(),
            cursor_visible: true,
            applied_presentation: None,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    /// Mouse cursor shown on Title and Loading, hidden while playing
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn session(&self) -> &SessionLifecycleController<S, C> {
        &self.session
    }

    pub fn title_mut(&mut self) -> &mut TitleScreen {
        &mut self.title
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Load the active config synchronously so the host can size its window
    pub fn initialize(&mut self) -> Result<()> {
        self.session.load_active_config(&self.settings.content_root)?;
        let p = self.session.presentation();
        log::info!(
            "Stage {}x{} (border {})",
            p.stage_width(),
            p.stage_height(),
            p.border_size()
        );
        Ok(())
    }

    fn set_state(&mut self, next: AppState) {
        if next != self.state {
            log::info!("App state {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.cursor_visible = matches!(next, AppState::Title | AppState::Loading);
    }

    /// Run one frame
    pub fn update(&mut self, dt: f32, devices: &DeviceSnapshot) -> Result<AppControl> {
        let prev_keyboard = std::mem::replace(&mut self.prev_keyboard, devices.keyboard.clone());
        if let Some(control) = self.handle_global_cancel(devices, &prev_keyboard) {
            return Ok(control);
        }

        match self.state {
            AppState::Title => {
                self.title.update(devices, &prev_keyboard);
                if self.title.quit_requested() {
                    log::info!("Quit requested");
                    return Ok(AppControl::Exit);
                }
                if self.title.start_requested() {
                    self.title.reset_flags();
                    self.begin_session_load()?;
                    self.set_state(AppState::Loading);
                }
            }
            AppState::Loading => {
                self.session.poll_load();
                if self.session.has_load_error() {
                    self.title.reset_flags();
                    self.set_state(AppState::Title);
                    return Ok(AppControl::Continue);
                }

                self.loading.update(dt, self.session.is_load_completed());
                if self.loading.is_completed() {
                    self.set_state(AppState::Playing);
                }
            }
            AppState::Playing => {
                let dt = dt.min(self.settings.max_frame_dt);
                self.session
                    .update_playing(dt, &self.settings.content_root, devices)?;
            }
        }
        Ok(AppControl::Continue)
    }

    fn begin_session_load(&mut self) -> Result<()> {
        self.loading.begin(
            &self.settings.loading_message,
            self.settings.effective_min_loading_secs(),
        );
        self.session.begin_load(&self.settings.content_root)
    }

    /// Escape: Playing/Loading back to Title, Title exits
    fn handle_global_cancel(
        &mut self,
        devices: &DeviceSnapshot,
        prev_keyboard: &KeyboardState,
    ) -> Option<AppControl> {
        if !devices.keyboard.just_pressed(Key::Escape, prev_keyboard) {
            return None;
        }

        match self.state {
            AppState::Playing => {
                self.title.reset_flags();
                self.set_state(AppState::Title);
                Some(AppControl::Continue)
            }
            AppState::Loading => {
                // The worker keeps running; its result is ignored
                self.set_state(AppState::Title);
                Some(AppControl::Continue)
            }
            AppState::Title => {
                log::info!("Exit from title");
                Some(AppControl::Exit)
            }
        }
    }

    /// Draw the current state
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R, time: f32) {
        let presentation = self.session.presentation();
        if self.applied_presentation != Some(presentation.version) {
            renderer.apply_presentation(presentation);
            self.applied_presentation = Some(presentation.version);
        }

        match self.state {
            AppState::Title => renderer.draw_screen(ScreenView::Title, time),
            AppState::Loading => renderer.draw_screen(
                ScreenView::Loading {
                    message: self.loading.message(),
                    progress: self.loading.progress(),
                },
                time,
            ),
            AppState::Playing if self.session.has_session() => {
                renderer.draw_session(&self.session.snapshot(), time)
            }
            AppState::Playing => renderer.draw_screen(ScreenView::Blank, time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{GameSnapshot, PresentationConfig};
    use crate::test_support::{MemoryConfigSource, RecordingSimulation, SimCall, stage_doc};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    type App = AppStateMachine<RecordingSimulation, MemoryConfigSource>;

    fn app_with(sim: RecordingSimulation) -> (Arc<RecordingSimulation>, App) {
        let source = MemoryConfigSource::with_documents(&[
            ("s0.json", stage_doc(100.0, 40.0, 40.0, 920.0, 500.0)),
            ("s1.json", stage_doc(110.0, 20.0, 30.0, 600.0, 400.0)),
        ]);
        let sim = Arc::new(sim);
        let session = SessionLifecycleController::new(sim.clone(), source);
        (sim, AppStateMachine::new(session, ClientSettings::default()))
    }

    fn idle() -> DeviceSnapshot {
        DeviceSnapshot::default()
    }

    fn step(app: &mut App, dt: f32, devices: &DeviceSnapshot) -> AppControl {
        app.update(dt, devices).expect("update")
    }

    /// Poll with zero dt until the backend settles
    fn settle_load(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.state() == AppState::Loading
            && !app.session().is_load_completed()
            && !app.session().has_load_error()
        {
            assert!(Instant::now() < deadline, "load timed out");
            step(app, 0.0, &idle());
            thread::sleep(Duration::from_millis(1));
        }
    }

    fn to_playing(app: &mut App) {
        step(app, 0.0, &DeviceSnapshot::keys(&[Key::Enter]));
        assert_eq!(app.state(), AppState::Loading);
        settle_load(app);
        step(app, 2.0, &idle());
        assert_eq!(app.state(), AppState::Playing);
    }

    #[derive(Default)]
    struct RecordingRenderer {
        presentations: Vec<u32>,
        screens: Vec<String>,
        sessions: usize,
    }

    impl Renderer for RecordingRenderer {
        fn apply_presentation(&mut self, presentation: &PresentationConfig) {
            self.presentations.push(presentation.version);
        }

        fn draw_screen(&mut self, view: ScreenView<'_>, _time: f32) {
            self.screens.push(format!("{view:?}"));
        }

        fn draw_session(&mut self, _snapshot: &GameSnapshot, _time: f32) {
            self.sessions += 1;
        }
    }

    #[test]
    fn test_starts_on_title_with_cursor() {
        let (_, app) = app_with(RecordingSimulation::new());
        assert_eq!(app.state(), AppState::Title);
        assert!(app.cursor_visible());
    }

    #[test]
    fn test_enter_starts_loading() {
        let (sim, mut app) = app_with(RecordingSimulation::new());
        step(&mut app, 0.0, &DeviceSnapshot::keys(&[Key::Enter]));
        assert_eq!(app.state(), AppState::Loading);
        assert!(app.cursor_visible());
        settle_load(&mut app);
        assert!(matches!(sim.calls().first(), Some(SimCall::Start(_))));
    }

    #[test]
    fn test_ui_start_request() {
        let (_, mut app) = app_with(RecordingSimulation::new());
        app.title_mut().request_start();
        step(&mut app, 0.0, &idle());
        assert_eq!(app.state(), AppState::Loading);
    }

    #[test]
    fn test_ui_quit_request_exits() {
        let (_, mut app) = app_with(RecordingSimulation::new());
        app.title_mut().request_quit();
        assert_eq!(step(&mut app, 0.0, &idle()), AppControl::Exit);
    }

    #[test]
    fn test_loading_holds_for_minimum_duration() {
        let (_, mut app) = app_with(RecordingSimulation::new());
        step(&mut app, 0.0, &DeviceSnapshot::keys(&[Key::Enter]));
        settle_load(&mut app);

        step(&mut app, 0.5, &idle());
        step(&mut app, 0.5, &idle());
        assert_eq!(app.state(), AppState::Loading);

        step(&mut app, 0.5, &idle());
        assert_eq!(app.state(), AppState::Playing);
        assert!(!app.cursor_visible());
    }

    #[test]
    fn test_loading_waits_for_backend() {
        let (sim, mut app) = app_with(RecordingSimulation::gated());
        step(&mut app, 0.0, &DeviceSnapshot::keys(&[Key::Enter]));
        step(&mut app, 5.0, &idle());
        assert_eq!(app.state(), AppState::Loading);

        sim.open_gate();
        settle_load(&mut app);
        step(&mut app, 0.0, &idle());
        assert_eq!(app.state(), AppState::Playing);
    }

    #[test]
    fn test_load_failure_returns_to_title() {
        let (_, mut app) = app_with(RecordingSimulation::failing("bad level"));
        step(&mut app, 0.0, &DeviceSnapshot::keys(&[Key::Enter]));
        settle_load(&mut app);
        step(&mut app, 0.0, &idle());
        assert_eq!(app.state(), AppState::Title);
        assert!(app.cursor_visible());
    }

    #[test]
    fn test_escape_from_playing_and_title() {
        let (_, mut app) = app_with(RecordingSimulation::new());
        to_playing(&mut app);

        let esc = DeviceSnapshot::keys(&[Key::Escape]);
        assert_eq!(step(&mut app, 0.016, &esc), AppControl::Continue);
        assert_eq!(app.state(), AppState::Title);
        assert!(app.cursor_visible());

        // Still held: no second cancel
        assert_eq!(step(&mut app, 0.016, &esc), AppControl::Continue);
        assert_eq!(app.state(), AppState::Title);

        step(&mut app, 0.016, &idle());
        assert_eq!(step(&mut app, 0.016, &esc), AppControl::Exit);
    }

    #[test]
    fn test_escape_abandons_loading() {
        let (sim, mut app) = app_with(RecordingSimulation::gated());
        step(&mut app, 0.0, &DeviceSnapshot::keys(&[Key::Enter]));
        assert_eq!(app.state(), AppState::Loading);

        step(&mut app, 0.0, &DeviceSnapshot::keys(&[Key::Escape]));
        assert_eq!(app.state(), AppState::Title);
        sim.open_gate();
    }

    #[test]
    fn test_playing_clamps_frame_delta() {
        let (sim, mut app) = app_with(RecordingSimulation::new());
        to_playing(&mut app);
        sim.clear_calls();

        step(&mut app, 1.0, &idle());
        assert!(sim.calls().contains(&SimCall::Tick(0.05)));
    }

    #[test]
    fn test_initialize_sizes_stage() {
        let (_, mut app) = app_with(RecordingSimulation::new());
        app.initialize().expect("initialize");
        let p = app.session().presentation();
        assert_eq!((p.stage_width(), p.stage_height()), (960.0, 540.0));
    }

    #[test]
    fn test_render_follows_state_and_presentation() {
        let (_, mut app) = app_with(RecordingSimulation::new());
        let mut renderer = RecordingRenderer::default();

        app.render(&mut renderer, 0.0);
        app.render(&mut renderer, 0.1);
        assert_eq!(renderer.presentations, vec![0]);
        assert_eq!(renderer.screens, vec!["Title", "Title"]);

        to_playing(&mut app);
        app.render(&mut renderer, 0.2);
        assert_eq!(renderer.presentations, vec![0, 1]);
        assert_eq!(renderer.sessions, 1);
    }
}
