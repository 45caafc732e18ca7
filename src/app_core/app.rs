use crate::{
    Config, Library, PlayerController,
    key_handler,
    logging, overwrite_line,
    player::RodioEngine,
    store::{SqliteStore, session_id},
    tui,
    ui_state::{Mode, UiState},
    viewport::{BreakpointClassifier, ResizeDebouncer, viewport_width},
};
use anyhow::Result;
use ratatui::{
    DefaultTerminal,
    crossterm::{
        ExecutableCommand,
        event::{DisableFocusChange, EnableFocusChange, Event, KeyEventKind},
        terminal,
    },
};
use std::{io::stdout, time::Instant};

pub struct Turntable {
    pub(super) ui: UiState,
    debouncer: ResizeDebouncer,
    cell_width_px: u16,
}

impl Turntable {
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        logging::init(&config.log_level)?;

        let session = session_id(config.session.as_deref());
        log::info!("Starting turntable, session {session}");

        let store = SqliteStore::open_default(&session)?;
        let engine = RodioEngine::spawn()?;

        // A broken library root is reported in the UI; the saved track
        // list still lets the last session resume.
        let (library, startup_error) = match config
            .library_root()
            .and_then(|root| Library::init(root.as_deref()))
        {
            Ok(library) => (library, None),
            Err(e) => (Library::default(), Some(e)),
        };

        let (columns, _) = terminal::size()?;
        let width = viewport_width(columns, config.cell_width_px);

        let mut player = PlayerController::new(
            Box::new(engine),
            Box::new(store),
            Box::new(BreakpointClassifier::new(config.mobile_breakpoint)),
            width,
            config.visualizer_bars,
        );
        player.restore_on_load(library.into_tracks());

        let mut ui = UiState::new(player);
        if let Some(e) = startup_error {
            ui.set_error(e);
        }

        Ok(Turntable {
            ui,
            debouncer: ResizeDebouncer::new(config.resize_debounce()),
            cell_width_px: config.cell_width_px,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        terminal.clear()?;
        stdout().execute(EnableFocusChange)?;

        let result = self.main_loop(&mut terminal);

        // Whatever happened, leave the state resumable
        self.ui.player.on_page_hide();

        let _ = stdout().execute(DisableFocusChange);
        ratatui::restore();
        result?;

        overwrite_line("Thank you for using turntable!\n\n")?;
        Ok(())
    }

    fn main_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut last_tick = Instant::now();

        // MAIN ROUTINE
        loop {
            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(&key) {
                        self.ui.clear_status();
                        if let Err(e) = self.handle_action(action) {
                            self.ui.set_error(e);
                        }
                    }
                }
                Some(Event::Resize(columns, _)) => {
                    let width = viewport_width(columns, self.cell_width_px);
                    self.debouncer.push(width, Instant::now());
                }
                Some(Event::FocusLost) => self.ui.player.on_page_hide(),
                _ => (),
            }

            if let Some(width) = self.debouncer.poll(Instant::now()) {
                self.ui.player.on_viewport_change(width);
            }

            // Auto-advance at the end of a track moves the list with it
            let before = self.ui.player.current_index();
            self.ui.player.pump_engine_events();
            if self.ui.player.current_index() != before {
                self.ui.follow_current();
            }

            let now = Instant::now();
            self.ui.player.tick(now - last_tick);
            last_tick = now;

            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            if self.ui.get_mode() == Mode::QUIT {
                break;
            }
        }

        Ok(())
    }
}
