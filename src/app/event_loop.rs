use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::autosave::SaveFn;
use crate::store;

use super::{App, Model, update};

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft file exists but cannot be read, or
    /// if terminal initialization or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let loaded = store::load_draft(&self.draft_path)
            .with_context(|| format!("Failed to load draft {}", self.draft_path.display()))?;
        let fresh = loaded.is_none();
        let initial = loaded.unwrap_or_default();

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — draftpad requires an interactive terminal")?;
        let size = terminal.size()?;

        let save = Self::make_save_callback(self.draft_path.clone(), self.read_only);
        let mut model = Model::new(
            self.draft_path.clone(),
            initial,
            self.timing,
            save,
            (size.width, size.height),
        );
        model.read_only = self.read_only;
        if fresh {
            model.seed_default_title();
        }

        let result = Self::event_loop(&mut terminal, &mut model);

        ratatui::restore();
        result
    }

    fn make_save_callback(path: PathBuf, read_only: bool) -> SaveFn {
        if read_only {
            Box::new(|_| tracing::debug!("read-only session, skipping save"))
        } else {
            // Persistence failures stay inside the callback; the
            // scheduler is fire-and-forget and the next tick retries
            // naturally because the snapshot stays dirty.
            Box::new(move |doc| {
                if let Err(err) = store::save_draft(&path, doc) {
                    tracing::warn!("autosave failed: {err}");
                }
            })
        }
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            model.clock_ms = now_ms;
            let was_dirty = model.scheduler.is_dirty();
            model.scheduler.tick(now_ms);
            if was_dirty && !model.scheduler.is_dirty() {
                // Status bar save marker flipped.
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else {
                model
                    .scheduler
                    .next_deadline()
                    .map_or(250, |due| due.saturating_sub(now_ms).min(250))
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Refresh the clock after the poll wait so edits carry
                // accurate debounce times.
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                model.clock_ms = event_ms;
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    model.clock_ms = drain_ms;
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                model.ensure_cursor_visible();
                terminal.draw(|frame| crate::ui::draw(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
