use crate::actions::{ActionKind, ActionOrchestrator};
use crate::anim::AnimationDriver;
use crate::canvas::PixelCanvas;
use crate::config::{load_settings, project_paths, save_settings_atomic, Paths, Settings};
use crate::input::{collect_input_nonblocking, map_event_to_command, Command};
use crate::model::{Mood, SaveFile, Scene};
use crate::storage::{load_or_init, save_atomic};
use crate::term::{canvas_to_cells, draw_text, Cell, Terminal};
use crate::traits::Traits;
use crossterm::style::Color;
use std::cmp::{max, min};
use std::time::{Duration, Instant};

const NAME_MAX: usize = 18;

/// Adoption form state: a name being typed plus a rerollable trait
/// preview, discarded on cancel.
struct AdoptState {
    name: String,
    traits: Traits,
    preview_mood: Mood,
}

impl AdoptState {
    fn new() -> Self {
        Self {
            name: String::new(),
            traits: Traits::generate(),
            preview_mood: Mood::default(),
        }
    }
}

pub(crate) struct App {
    settings: Settings,
    paths: Paths,
    save: SaveFile,
    selected: usize,
    scene: Scene,
    term: Terminal,
    canvas: PixelCanvas,
    driver: AnimationDriver,
    orchestrator: ActionOrchestrator,
    action_start_frame: u64,
    status: Option<String>,
    adopt: AdoptState,
    should_quit: bool,
    autosave_at: Instant,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let paths = project_paths()?;
        let settings = load_settings(&paths.settings_path);
        let save = load_or_init(&paths.save_path)?;

        let scene = if save.monsters.is_empty() {
            Scene::Adopt
        } else {
            Scene::Main
        };

        let term = Terminal::begin()?;
        let mut driver = AnimationDriver::new();
        driver.start();

        Ok(Self {
            settings,
            paths,
            save,
            selected: 0,
            scene,
            term,
            canvas: PixelCanvas::new(),
            driver,
            orchestrator: ActionOrchestrator::new(),
            action_start_frame: 0,
            status: None,
            adopt: AdoptState::new(),
            should_quit: false,
            autosave_at: Instant::now() + Duration::from_secs(10),
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);

        while !self.should_quit {
            let frame_start = Instant::now();
            let _resized = self.term.resize_if_needed()?;

            let events = collect_input_nonblocking(frame_dt)?;
            for ev in events {
                if let Some(cmd) = map_event_to_command(self.scene, ev) {
                    self.handle_command(cmd)?;
                }
            }

            // The action timer is independent of the frame clock; when a
            // duration elapses this frame, fire end + performed.
            if let Some(kind) = self.orchestrator.tick(Instant::now()) {
                self.on_action_performed(kind);
            }

            self.driver.tick();
            self.render_frame()?;

            if Instant::now() >= self.autosave_at {
                self.save_now()?;
                self.autosave_at = Instant::now() + Duration::from_secs(10);
            }

            spin_sleep(frame_dt, frame_start);
        }

        self.driver.stop();
        self.save_now()?;
        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn handle_command(&mut self, cmd: Command) -> anyhow::Result<()> {
        match cmd {
            Command::Quit => self.should_quit = true,
            Command::HelpToggle => {
                self.scene = match self.scene {
                    Scene::Help => Scene::Main,
                    _ => Scene::Help,
                };
            }
            Command::Back => self.scene = Scene::Main,
            Command::TriggerAction(kind) => {
                if self.save.monsters.is_empty() {
                    return Ok(());
                }
                if self.orchestrator.trigger(kind, Instant::now()) {
                    // Animation start: anchor the action-local clock.
                    self.action_start_frame = self.driver.frame();
                    let name = &self.save.monsters[self.selected].name;
                    self.status = Some(format!("{name}: {}...", kind.label()));
                }
            }
            Command::CycleMood => {
                if let Some(m) = self.save.monsters.get_mut(self.selected) {
                    m.mood = m.mood.normalize().next();
                    m.updated_at = chrono::Utc::now();
                    self.restart_display();
                }
            }
            Command::NextMonster | Command::PrevMonster => {
                let len = self.save.monsters.len();
                if len > 1 {
                    let delta = if cmd == Command::NextMonster { 1 } else { len - 1 };
                    self.selected = (self.selected + delta) % len;
                    self.restart_display();
                    self.status = None;
                }
            }
            Command::ToggleColor => self.settings.enable_color = !self.settings.enable_color,
            Command::AdoptOpen => {
                self.adopt = AdoptState::new();
                self.scene = Scene::Adopt;
                self.restart_display();
            }
            Command::Reroll => {
                self.adopt.traits = Traits::generate();
                self.adopt.preview_mood = Mood::default();
            }
            Command::PreviewMood(delta) => {
                let all = Mood::ALL;
                let cur = all
                    .iter()
                    .position(|m| *m == self.adopt.preview_mood)
                    .unwrap_or(0) as i32;
                let next = (cur + delta).rem_euclid(all.len() as i32) as usize;
                self.adopt.preview_mood = all[next];
            }
            Command::NameChar(ch) => {
                if self.adopt.name.len() < NAME_MAX {
                    self.adopt.name.push(ch);
                }
            }
            Command::NameBackspace => {
                self.adopt.name.pop();
            }
            Command::AdoptCommit => {
                let trimmed = self.adopt.name.trim().to_string();
                if trimmed.is_empty() {
                    self.status = Some("a monster needs a name".to_string());
                    return Ok(());
                }
                let payload = self.adopt.traits.to_payload();
                let id = self.save.create_monster(&trimmed, payload);
                self.selected = self
                    .save
                    .monsters
                    .iter()
                    .position(|m| m.id == id)
                    .unwrap_or(0);
                self.scene = Scene::Main;
                self.restart_display();
                self.status = Some(format!("{trimmed} adopted!"));
                self.save_now()?;
            }
            Command::AdoptCancel => {
                if !self.save.monsters.is_empty() {
                    self.scene = Scene::Main;
                }
            }
        }
        Ok(())
    }

    /// Restarts the display clock and discards any in-flight action.
    /// An action lives only as long as the display it started on; a
    /// monster switch, mood cycle or scene change must not let it
    /// replay or complete against whatever is shown next.
    fn restart_display(&mut self) {
        self.driver.restart();
        self.orchestrator.cancel();
        self.action_start_frame = 0;
    }

    fn on_action_performed(&mut self, kind: ActionKind) {
        if let Some(m) = self.save.monsters.get_mut(self.selected) {
            m.updated_at = chrono::Utc::now();
            self.status = Some(format!("{} enjoyed the {}", m.name, kind.label()));
        }
    }

    fn sprite_origin(&self) -> (i32, i32) {
        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;
        let panel_w = min(max(26, cols / 3), max(0, cols - 10));
        let x = panel_w + max(0, (cols - panel_w - 80) / 2);
        let y = max(0, (rows - 40) / 2);
        (x, y)
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let bg = Color::Black;
        let fg = Color::White;
        self.term.cur.clear(bg);

        let frame = self.driver.frame();
        let origin = self.sprite_origin();

        match self.scene {
            Scene::Adopt => {
                // Live preview of the rolled traits in the selected mood.
                crate::sprite::draw_monster(
                    &mut self.canvas,
                    &self.adopt.traits,
                    self.adopt.preview_mood,
                    1,
                    frame,
                    None,
                    0,
                );
                canvas_to_cells(
                    &self.canvas,
                    &mut self.term.cur,
                    origin,
                    self.settings.enable_color,
                    bg,
                );
                self.draw_adopt_panel(fg, bg);
            }
            Scene::Main | Scene::Help => {
                if let Some(monster) = self.save.monsters.get(self.selected) {
                    match Traits::from_payload(&monster.traits) {
                        Some(traits) => {
                            let action = self.orchestrator.active();
                            // The display forces a happy face while an
                            // action animation runs; the stored mood is
                            // untouched.
                            let mood = if action.is_some() {
                                Mood::Happy
                            } else {
                                monster.mood.normalize()
                            };
                            let action_frame = frame.saturating_sub(self.action_start_frame);
                            crate::sprite::draw_monster(
                                &mut self.canvas,
                                &traits,
                                mood,
                                monster.level,
                                frame,
                                action,
                                action_frame,
                            );
                            canvas_to_cells(
                                &self.canvas,
                                &mut self.term.cur,
                                origin,
                                self.settings.enable_color,
                                bg,
                            );
                        }
                        None => {
                            draw_text(
                                &mut self.term.cur,
                                (origin.0 + 10) as u16,
                                (origin.1 + 18) as u16,
                                "this monster's traits are unreadable",
                                Color::Red,
                                bg,
                            );
                        }
                    }
                }
                self.draw_main_panel(fg, bg);
            }
        }

        if self.scene == Scene::Help {
            self.draw_center_box(
                "How to play",
                "Adopt pixel monsters and keep them company.\n\n\
                 F Feed: a snack and a wide-open mouth.\n\
                 C Comfort: floating hearts for a sad friend.\n\
                 U Cuddle: wiggles, sways and sparkles.\n\
                 W Wake: sunrays until the eyes open.\n\n\
                 M cycles the mood, \u{2190}\u{2192} switch monsters,\n\
                 N adopts a new one, V toggles color.\n\n\
                 One action at a time; the rest wait their turn.\n\n\
                 Esc or H to close help.",
            );
        }

        self.term.present(true)?;
        Ok(())
    }

    fn draw_main_panel(&mut self, fg: Color, bg: Color) {
        let title = match self.save.monsters.get(self.selected) {
            Some(m) => format!(
                "Pixmon  |  {}  (lvl {})  |  mood: {}",
                m.name,
                m.level,
                m.mood.normalize().label()
            ),
            None => "Pixmon  |  no monster yet - press N to adopt one".to_string(),
        };
        draw_text(&mut self.term.cur, 1, 0, &title, fg, bg);

        if self.save.monsters.len() > 1 {
            let line = format!(
                "monster {}/{}  (\u{2190}\u{2192} to switch)",
                self.selected + 1,
                self.save.monsters.len()
            );
            draw_text(&mut self.term.cur, 1, 2, &line, fg, bg);
        }

        if let Some(kind) = self.orchestrator.active() {
            let line = format!("performing: {}", kind.label());
            draw_text(&mut self.term.cur, 1, 4, &line, Color::Yellow, bg);
        } else if let Some(status) = &self.status {
            draw_text(&mut self.term.cur, 1, 4, status, Color::Grey, bg);
        }

        let help = "Keys: f feed | c comfort | u cuddle | w wake | m mood | n adopt | h help | q quit";
        let y = self.term.cur.h.saturating_sub(1);
        draw_text(&mut self.term.cur, 1, y, help, fg, bg);
    }

    fn draw_adopt_panel(&mut self, fg: Color, bg: Color) {
        draw_text(&mut self.term.cur, 1, 0, "Pixmon  |  adopt a monster", fg, bg);

        let mut name = self.adopt.name.clone();
        if name.len() < NAME_MAX {
            name.push('_');
        }
        draw_text(&mut self.term.cur, 1, 2, &format!("Name: {name}"), fg, bg);
        draw_text(
            &mut self.term.cur,
            1,
            4,
            &format!("Preview mood: {}", self.adopt.preview_mood.label()),
            fg,
            bg,
        );

        if let Some(status) = &self.status {
            draw_text(&mut self.term.cur, 1, 6, status, Color::Grey, bg);
        }

        let help = "Tab reroll | \u{2191}\u{2193} preview mood | Enter adopt | Esc cancel";
        let y = self.term.cur.h.saturating_sub(1);
        draw_text(&mut self.term.cur, 1, y, help, fg, bg);
    }

    fn draw_center_box(&mut self, title: &str, body: &str) {
        let w = self.term.cols;
        let h = self.term.rows;

        let bw = min(60, w.saturating_sub(4));
        let bh = min(20, h.saturating_sub(4));
        if bw < 8 || bh < 5 {
            return;
        }

        let x0 = (w - bw) / 2;
        let y0 = (h - bh) / 2;
        let fg = Color::White;
        let bg = Color::Black;

        for y in y0..y0 + bh {
            for x in x0..x0 + bw {
                let ch = if y == y0 || y == y0 + bh - 1 {
                    if x == x0 {
                        if y == y0 { '\u{250c}' } else { '\u{2514}' }
                    } else if x == x0 + bw - 1 {
                        if y == y0 { '\u{2510}' } else { '\u{2518}' }
                    } else {
                        '\u{2500}'
                    }
                } else if x == x0 || x == x0 + bw - 1 {
                    '\u{2502}'
                } else {
                    ' '
                };
                self.term.cur.set(x, y, Cell { ch, fg, bg });
            }
        }

        draw_text(&mut self.term.cur, x0 + 2, y0 + 1, title, fg, bg);

        let mut yy = y0 + 3;
        for line in body.lines() {
            if yy >= y0 + bh - 1 {
                break;
            }
            draw_text(&mut self.term.cur, x0 + 2, yy, line.trim_start(), fg, bg);
            yy += 1;
        }
    }

    fn save_now(&mut self) -> anyhow::Result<()> {
        save_atomic(&self.paths.save_path, &mut self.save)?;
        Ok(())
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    app.run()?;
    Ok(())
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
