use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use pokedex_catalog::{
    CatalogSnapshot, PageInfo, PokemonDetail, PokemonRow, RenderSink, StatusMessage,
};
use pokedex_core::{Generation, Language, PokemonType};
use std::io::{self, Write};
use tracing::warn;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const PROMPT: Color = Color::Green;
    const HEADER: Color = Color::Magenta;
    const TYPE: Color = Color::Yellow;
    const STATUS: Color = Color::Cyan;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

const NAME_WIDTH: usize = 14;
const TYPES_WIDTH: usize = 20;

/// Terminal renderer for catalog pages, details and status lines.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    language: Language,
}

impl Terminal {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Print the startup banner.
    pub fn print_banner(&self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::HEADER),
            Print("Pokédex"),
            ResetColor,
            Print(" - PokeAPI catalog\n"),
            SetForegroundColor(Colors::DIM),
            Print("Type to search, /help for commands, /quit to exit.\n"),
            Print("---\n"),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_help(&self) -> Result<()> {
        let help = "\
  <text>          search by name (applied after you stop typing)
  /search <text>  search immediately
  /type [type]    filter by type, no argument clears it
  /gen [1-9]      filter by generation, no argument clears it
  /next, /prev    change page
  /page <n>       jump to page
  /show <name>    detail view
  /clear          reset all filters
  /types, /gens   list filter values
  /reload         load the catalog again
  /quit           exit
";
        let mut stdout = io::stdout();
        execute!(stdout, SetForegroundColor(Colors::DIM), Print(help), ResetColor)?;
        stdout.flush()?;
        Ok(())
    }

    pub fn prompt(&self) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::PROMPT),
            Print("pokedex> "),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn draw_table(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Colors::HEADER),
            Print(format!("{}\n", header_line(self.language))),
            ResetColor,
        )?;
        for row in &snapshot.rows {
            let (left, types, right) = row_cells(row);
            execute!(
                stdout,
                Print(left),
                SetForegroundColor(Colors::TYPE),
                Print(types),
                ResetColor,
                Print(format!("{}\n", right)),
            )?;
        }
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", footer(&snapshot.page, self.language))),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_detail(&self, detail: &PokemonDetail) -> Result<()> {
        let mut stdout = io::stdout();
        let row = &detail.row;
        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Colors::HEADER),
            Print(format!("{} {}\n", row.id, row.name)),
            ResetColor,
            SetForegroundColor(Colors::TYPE),
            Print(format!("  {}\n", row.types.join(" / "))),
            ResetColor,
        )?;
        let exp = detail
            .base_experience
            .map(|e| e.to_string())
            .unwrap_or_else(|| "-".to_string());
        let (w, h, x) = match self.language {
            Language::Es => ("Peso", "Altura", "Exp. base"),
            Language::En => ("Weight", "Height", "Base exp."),
        };
        execute!(
            stdout,
            Print(format!("  {:<10} {}\n", w, row.weight)),
            Print(format!("  {:<10} {}\n", h, row.height)),
            Print(format!("  {:<10} {}\n", x, exp)),
        )?;
        for (label, value) in &detail.stats {
            execute!(
                stdout,
                Print(format!("  {:<10} {:>3} ", label, value)),
                SetForegroundColor(Colors::STATUS),
                Print(format!("{}\n", stat_bar(*value))),
                ResetColor,
            )?;
        }
        execute!(
            stdout,
            Print(format!("  {:<10} {:>3}\n", "Total", detail.stat_total())),
        )?;
        if let Some(image) = &row.image {
            execute!(
                stdout,
                SetForegroundColor(Colors::DIM),
                Print(format!("  {}\n", image)),
                ResetColor,
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_types(&self) -> Result<()> {
        let list = PokemonType::ALL
            .iter()
            .map(|t| format!("{} ({})", t.key(), t.label(self.language)))
            .collect::<Vec<_>>()
            .join(", ");
        self.print_info(&list)
    }

    pub fn print_generations(&self) -> Result<()> {
        let mut stdout = io::stdout();
        for g in Generation::all() {
            execute!(
                stdout,
                Print(format!("  {}  {:<26} #{:03}-#{:03}\n", g.key, g.name, g.start, g.end)),
            )?;
        }
        stdout.flush()?;
        Ok(())
    }

    pub fn print_status(&self, status: &StatusMessage) -> Result<()> {
        let mut stdout = io::stdout();
        let color = match status {
            StatusMessage::Error(_) => Colors::ERROR,
            _ => Colors::STATUS,
        };
        execute!(
            stdout,
            SetForegroundColor(color),
            Print(format!("{}\n", status)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_info(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            SetForegroundColor(Colors::DIM),
            Print(format!("{}\n", msg)),
            ResetColor,
        )?;
        stdout.flush()?;
        Ok(())
    }

    pub fn print_error(&self, msg: &str) -> Result<()> {
        let mut stderr = io::stderr();
        execute!(
            stderr,
            SetForegroundColor(Colors::ERROR),
            Print(format!("Error: {}\n", msg)),
            ResetColor,
        )?;
        stderr.flush()?;
        Ok(())
    }
}

impl RenderSink for Terminal {
    fn render(&mut self, snapshot: &CatalogSnapshot) {
        if let Err(e) = self.draw_table(snapshot) {
            warn!(error = %e, "Failed to draw table");
        }
    }

    fn status(&mut self, status: &StatusMessage) {
        // Progress is noisy; only every 100th step and the last one are shown.
        if let StatusMessage::Progress { done, total } = status {
            if done % 100 != 0 && done != total {
                return;
            }
        }
        if let Err(e) = self.print_status(status) {
            warn!(error = %e, "Failed to print status");
        }
    }
}

fn header_line(lang: Language) -> String {
    let (id, name, types, weight, height) = match lang {
        Language::Es => ("Nº", "Nombre", "Tipo", "Peso", "Altura"),
        Language::En => ("No.", "Name", "Type", "Weight", "Height"),
    };
    format!(
        "{:<6}{:<nw$}{:<tw$}{:>9}{:>8}",
        id,
        name,
        types,
        weight,
        height,
        nw = NAME_WIDTH,
        tw = TYPES_WIDTH
    )
}

/// A row split around the type column so it can be colored on its own.
fn row_cells(row: &PokemonRow) -> (String, String, String) {
    (
        format!("{:<6}{:<nw$}", row.id, truncate(&row.name, NAME_WIDTH - 1), nw = NAME_WIDTH),
        format!("{:<tw$}", row.types.join("/"), tw = TYPES_WIDTH),
        format!("{:>9}{:>8}", row.weight, row.height),
    )
}

/// Header line followed by one line per row, without colors.
#[cfg(test)]
fn table_lines(snapshot: &CatalogSnapshot, lang: Language) -> Vec<String> {
    let mut lines = vec![header_line(lang)];
    for row in &snapshot.rows {
        let (left, types, right) = row_cells(row);
        lines.push(format!("{}{}{}", left, types, right));
    }
    lines
}

fn footer(page: &PageInfo, lang: Language) -> String {
    if page.total_items == 0 {
        return match lang {
            Language::Es => "Sin resultados".to_string(),
            Language::En => "No results".to_string(),
        };
    }
    let nav = match (page.has_prev, page.has_next) {
        (true, true) => "  [/prev] [/next]",
        (true, false) => "  [/prev]",
        (false, true) => "  [/next]",
        (false, false) => "",
    };
    match lang {
        Language::Es => format!(
            "Página {} de {} · {}-{} de {}{}",
            page.current_page, page.total_pages, page.range_start, page.range_end, page.total_items, nav
        ),
        Language::En => format!(
            "Page {} of {} · {}-{} of {}{}",
            page.current_page, page.total_pages, page.range_start, page.range_end, page.total_items, nav
        ),
    }
}

/// Bar scaled so 255 (the maximum base stat) fills 25 cells.
fn stat_bar(value: u32) -> String {
    let cells = (value.min(255) as usize * 25).div_ceil(255);
    "█".repeat(cells)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_catalog::FilterCriteria;

    fn snapshot() -> CatalogSnapshot {
        CatalogSnapshot {
            rows: vec![PokemonRow {
                image: None,
                name: "Charizard".into(),
                types: vec!["Fuego".into(), "Volador".into()],
                weight: "90.5 kg".into(),
                height: "1.7 m".into(),
                id: "#006".into(),
            }],
            page: PageInfo {
                current_page: 1,
                total_pages: 2,
                has_prev: false,
                has_next: true,
                total_items: 21,
                range_start: 1,
                range_end: 20,
            },
            criteria: FilterCriteria::default(),
            total: 21,
            filtered: 21,
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let lines = table_lines(&snapshot(), Language::Es);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Nº"));
        assert!(lines[1].starts_with("#006  Charizard"));
        assert!(lines[1].contains("Fuego/Volador"));
        assert!(lines[1].ends_with("1.7 m"));
    }

    #[test]
    fn footer_shows_navigation() {
        let snap = snapshot();
        assert_eq!(
            footer(&snap.page, Language::En),
            "Page 1 of 2 · 1-20 of 21  [/next]"
        );
    }

    #[test]
    fn footer_for_empty_result() {
        let mut snap = snapshot();
        snap.page = PageInfo {
            current_page: 1,
            total_pages: 0,
            has_prev: false,
            has_next: false,
            total_items: 0,
            range_start: 0,
            range_end: 0,
        };
        assert_eq!(footer(&snap.page, Language::Es), "Sin resultados");
    }

    #[test]
    fn stat_bar_scales() {
        assert_eq!(stat_bar(0), "");
        assert_eq!(stat_bar(255).chars().count(), 25);
        assert_eq!(stat_bar(999).chars().count(), 25);
        assert_eq!(stat_bar(1).chars().count(), 1);
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("pikachu", 13), "pikachu");
        assert_eq!(truncate("fletchinder-extra", 8), "fletchi…");
    }
}
