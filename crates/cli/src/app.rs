//! Interactive and one-shot front-ends over the catalog store.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use pokedex_catalog::{CatalogStore, Debouncer, FilterCriteria, StatusMessage};
use pokedex_client::{load_catalog, CachedSource, CatalogSource};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::config::Settings;
use crate::terminal::Terminal;

/// One parsed REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Typed search text, applied after the debounce window.
    Search(String),
    /// Explicit search, applied immediately.
    SearchNow(String),
    Type(Option<String>),
    Generation(Option<String>),
    Next,
    Prev,
    Page(usize),
    Show(String),
    Clear,
    Types,
    Generations,
    Reload,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Search(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let optional = |arg: &str| (!arg.is_empty()).then(|| arg.to_string());

    let command = match name.to_lowercase().as_str() {
        "search" | "s" => Command::SearchNow(arg.to_string()),
        "type" | "t" => Command::Type(optional(arg)),
        "gen" | "g" | "generation" => Command::Generation(optional(arg)),
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Prev,
        "page" => {
            let page = arg
                .parse()
                .map_err(|_| format!("invalid page number: {arg:?}"))?;
            Command::Page(page)
        }
        "show" | "info" => {
            if arg.is_empty() {
                return Err("usage: /show <name>".to_string());
            }
            Command::Show(arg.to_string())
        }
        "clear" => Command::Clear,
        "types" => Command::Types,
        "gens" | "generations" => Command::Generations,
        "reload" => Command::Reload,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command: /{other} (try /help)")),
    };
    Ok(Some(command))
}

/// One read from stdin.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Line(String),
    Eof,
    /// The line was consumed but could not be decoded; keep reading.
    Unreadable(String),
}

fn read_input(result: std::io::Result<Option<String>>) -> Input {
    match result {
        Ok(Some(line)) => Input::Line(line),
        Ok(None) => Input::Eof,
        Err(e) => Input::Unreadable(format!("failed to read input: {e}")),
    }
}

/// Owns the store and the source for the lifetime of the program.
pub struct App<S> {
    source: CachedSource<S>,
    store: CatalogStore,
    terminal: Terminal,
    settings: Settings,
}

impl<S: CatalogSource> App<S> {
    pub fn new(source: CachedSource<S>, settings: Settings) -> Self {
        let terminal = Terminal::new(settings.language);
        let store = CatalogStore::new(settings.config.view.page_size, settings.language);
        Self {
            source,
            store,
            terminal,
            settings,
        }
    }

    /// Fetch the index and every record into the store.
    pub async fn load(&mut self) -> Result<()> {
        self.store.set_status(StatusMessage::Loading);
        let concurrency = self.settings.config.api.fetch_concurrency;
        let store = &mut self.store;
        let report = load_catalog(&self.source, concurrency, |p| {
            store.set_status(StatusMessage::Progress {
                done: p.done,
                total: p.total,
            })
        })
        .await;

        match report {
            Ok(report) => {
                let (total, failed) = (report.records.len(), report.failed.len());
                self.store.set_catalog(report.records);
                self.store.set_status(StatusMessage::Ready { total, failed });
                Ok(())
            }
            Err(e) => {
                self.store.set_status(StatusMessage::Error(e.to_string()));
                Err(e).context("failed to load catalog index")
            }
        }
    }

    /// Print a single page (or a single detail) and return.
    pub async fn run_once(
        &mut self,
        criteria: FilterCriteria,
        page: usize,
        show: Option<&str>,
    ) -> Result<()> {
        if let Some(name) = show {
            let pokemon = self
                .source
                .fetch_by_name(name)
                .await
                .with_context(|| format!("failed to fetch {name}"))?;
            return self.terminal.print_detail(&self.store.detail(&pokemon));
        }

        self.load().await?;
        if let Err(e) = self.store.set_criteria(criteria) {
            bail!("{e}");
        }
        self.store.go_to_page(page);
        self.terminal.draw_table(&self.store.snapshot())
    }

    /// Read commands until EOF or `/quit`.
    ///
    /// Typed search text goes through a debouncer; everything else is
    /// applied as soon as it is read. Both arrive on this one task, so
    /// the store is never touched concurrently.
    pub async fn run_interactive(&mut self, criteria: FilterCriteria) -> Result<()> {
        self.terminal.print_banner()?;
        self.store.subscribe(Box::new(self.terminal));

        match self.load().await {
            Ok(()) => self.apply_initial(criteria)?,
            Err(e) => self.terminal.print_error(&format!("{e:#} (use /reload to retry)"))?,
        }

        let delay = Duration::from_millis(self.settings.config.view.debounce_ms);
        let (mut debouncer, mut searches) = Debouncer::new(delay);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        self.terminal.prompt()?;
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let line = match read_input(line) {
                        Input::Line(line) => line,
                        Input::Eof => break,
                        Input::Unreadable(msg) => {
                            self.terminal.print_error(&msg)?;
                            self.terminal.prompt()?;
                            continue;
                        }
                    };
                    match parse_command(&line) {
                        Ok(None) => {}
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(Command::Search(text))) => {
                            debug!(text = %text, "Search scheduled");
                            debouncer.schedule(text);
                            continue;
                        }
                        Ok(Some(Command::SearchNow(text))) => debouncer.flush_now(text),
                        Ok(Some(Command::Clear)) => {
                            debouncer.cancel();
                            self.store.clear_filters();
                        }
                        Ok(Some(command)) => self.execute(command).await?,
                        Err(msg) => self.terminal.print_error(&msg)?,
                    }
                    self.terminal.prompt()?;
                }
                Some(text) = searches.recv() => {
                    if let Err(e) = self.store.set_search(text) {
                        self.terminal.print_error(&e.to_string())?;
                    }
                    self.terminal.prompt()?;
                }
            }
        }

        debouncer.cancel();
        self.terminal.print_info("Goodbye.")?;
        Ok(())
    }

    fn apply_initial(&mut self, criteria: FilterCriteria) -> Result<()> {
        if criteria.is_empty() {
            return Ok(());
        }
        if let Err(e) = self.store.set_criteria(criteria) {
            self.terminal.print_error(&e.to_string())?;
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        let outcome = match command {
            Command::Type(t) => self.store.set_category(t),
            Command::Generation(g) => self.store.set_generation(g),
            Command::Next => {
                if !self.store.next_page() {
                    self.terminal.print_info("Already on the last page")?;
                }
                Ok(())
            }
            Command::Prev => {
                if !self.store.prev_page() {
                    self.terminal.print_info("Already on the first page")?;
                }
                Ok(())
            }
            Command::Page(n) => {
                self.store.go_to_page(n);
                Ok(())
            }
            Command::Show(name) => {
                self.show(&name).await?;
                Ok(())
            }
            Command::Types => {
                self.terminal.print_types()?;
                Ok(())
            }
            Command::Generations => {
                self.terminal.print_generations()?;
                Ok(())
            }
            Command::Reload => {
                info!("Reloading catalog");
                if let Err(e) = self.load().await {
                    self.terminal.print_error(&format!("{e:#}"))?;
                }
                Ok(())
            }
            Command::Help => {
                self.terminal.print_help()?;
                Ok(())
            }
            // Handled by the input loop.
            Command::Search(_) | Command::SearchNow(_) | Command::Clear | Command::Quit => Ok(()),
        };

        if let Err(e) = outcome {
            self.terminal.print_error(&e.to_string())?;
        }
        Ok(())
    }

    async fn show(&mut self, name: &str) -> Result<()> {
        let pokemon = match self.store.find(name) {
            Some(p) => p.clone(),
            None => match self.source.fetch_by_name(name).await {
                Ok(p) => p,
                Err(e) => {
                    return self.terminal.print_error(&format!("{name}: {e}"));
                }
            },
        };
        self.terminal.print_detail(&self.store.detail(&pokemon))
    }
}
