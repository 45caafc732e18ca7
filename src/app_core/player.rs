use crate::{app_core::Turntable, key_handler::Action, ui_state::Mode, url_to_path};
use anyhow::{Result, anyhow};

impl Turntable {
    #[rustfmt::skip]
    pub(crate) fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Player
            Action::LoadSelected    => self.load_selected()?,
            Action::TogglePause     => self.ui.player.toggle_play_pause(),
            Action::Stop            => self.ui.player.stop(),
            Action::Restart         => self.ui.player.restart(),
            Action::ToggleRepeat    => self.ui.player.toggle_repeat(),
            Action::PlayNext        => self.play_next(),
            Action::PlayPrev        => self.play_prev(),
            Action::SeekTo(f)       => self.ui.player.seek(f)?,
            Action::SeekBy(delta)   => self.seek_by(delta)?,

            // UI
            Action::TogglePanel     => self.ui.player.toggle_panel_visibility(),
            Action::Scroll(s)       => self.ui.scroll(s),
            Action::QUIT            => self.ui.set_mode(Mode::QUIT),
        }
        Ok(())
    }

    fn load_selected(&mut self) -> Result<()> {
        let idx = self
            .ui
            .get_selected()
            .ok_or_else(|| anyhow!("No track selected"))?;

        let url = self
            .ui
            .player
            .tracks()
            .get(idx)
            .map(|t| t.url.as_str())
            .ok_or_else(|| anyhow!("No track selected"))?;
        if !url_to_path(url).exists() {
            return Err(anyhow!("File not found: {url}"));
        }

        self.ui.player.load_track(idx)?;
        Ok(())
    }

    fn play_next(&mut self) {
        self.ui.player.next();
        self.ui.follow_current();
    }

    fn play_prev(&mut self) {
        self.ui.player.previous();
        self.ui.follow_current();
    }

    fn seek_by(&mut self, delta: f64) -> Result<()> {
        let Some(total) = self.ui.player.duration().filter(|d| !d.is_zero()) else {
            return Ok(());
        };

        let now = self.ui.player.position().as_secs_f64() / total.as_secs_f64();
        self.ui.player.seek((now + delta).clamp(0.0, 1.0))?;
        Ok(())
    }
}
