//! Interactive session controller for fuzzyfont-core
//!
//! The session is a single state machine driven one input line at a time.
//! `Listing` and `FilterMenu` are entered from `Menu` and return to it through
//! an explicit stack, so the controller can be exercised with a scripted
//! sequence of lines and no terminal at all. All output goes through the
//! [`Console`] port.

use anyhow::Result;
use log::debug;

use crate::catalog::FontRecord;
use crate::category::{Category, CategorySet};
use crate::output::export_fonts;
use crate::pager::Pager;
use crate::query::Query;
use crate::stats::{compute_stats, FontStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Listing,
    FilterMenu,
    Quit,
}

impl Mode {
    pub fn prompt(self) -> &'static str {
        match self {
            Mode::Menu => "TUI> ",
            Mode::Listing => "list> ",
            Mode::FilterMenu => "> ",
            Mode::Quit => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Hint,
    Error,
}

/// A one-line message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Presentation port: everything the session shows or reads.
pub trait Console {
    fn clear(&mut self) -> Result<()>;

    fn panel(&mut self, title: &str, lines: &[String]) -> Result<()>;

    /// Render `fonts[start..start + limit]` numbered from `start + 1`; `None` shows every row.
    fn font_table(&mut self, fonts: &[FontRecord], start: usize, limit: Option<usize>) -> Result<()>;

    fn stats_table(&mut self, stats: &FontStats) -> Result<()>;

    /// Render the toggleable categories with their on/off state.
    fn filter_menu(&mut self, toggles: &[(Category, bool)]) -> Result<()>;

    fn notice(&mut self, notice: &Notice) -> Result<()>;

    /// Read one line; `None` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

pub struct Session<'a> {
    catalog: &'a [FontRecord],
    filters: CategorySet,
    search: String,
    pager: Pager,
    working: Vec<FontRecord>,
    mode: Mode,
    return_to: Vec<Mode>,
    menu_stale: bool,
}

const HELP_LINES: [&str; 8] = [
    " l            List fonts (paged)",
    " n / p        Next / previous page while listing",
    " s <term>     Search fonts by name (empty to clear)",
    " f            Toggle filters (mono/serif/sans/display/symbol)",
    " t            Show statistics",
    " e <path>     Export current list to path (txt or .json)",
    " q            Quit",
    " h            Show this help",
];

impl<'a> Session<'a> {
    pub fn new(catalog: &'a [FontRecord], page_size: usize) -> Self {
        let mut session = Self {
            catalog,
            filters: CategorySet::new(),
            search: String::new(),
            pager: Pager::new(page_size),
            working: Vec::new(),
            mode: Mode::Menu,
            return_to: Vec::new(),
            menu_stale: true,
        };
        session.refresh_working_set();
        session
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn filters(&self) -> &CategorySet {
        &self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    pub fn working_set(&self) -> &[FontRecord] {
        &self.working
    }

    /// Drive the session until `q` or end of input.
    pub fn run(&mut self, console: &mut impl Console) -> Result<()> {
        while self.mode != Mode::Quit {
            self.render(console)?;
            let Some(line) = console.read_line(self.mode.prompt())? else {
                debug!("input closed, leaving session");
                break;
            };
            self.handle_line(&line, console)?;
        }
        Ok(())
    }

    /// Draw whatever the current state shows before reading input.
    pub fn render(&mut self, console: &mut impl Console) -> Result<()> {
        match self.mode {
            Mode::Menu if self.menu_stale => {
                self.menu_stale = false;
                console.clear()?;
                console.panel("FuzzyFont TUI", &self.menu_lines())
            }
            Mode::Listing => {
                let total_pages = self.pager.total_pages(self.working.len());
                console.clear()?;
                console.panel(
                    "List",
                    &[format!(
                        "Listing fonts - page {}/{} (use n/p to navigate, Enter to return)",
                        self.pager.page() + 1,
                        total_pages
                    )],
                )?;
                console.font_table(&self.working, self.pager.start(), Some(self.pager.page_size()))
            }
            Mode::FilterMenu => console.filter_menu(&self.toggles()),
            Mode::Menu | Mode::Quit => Ok(()),
        }
    }

    /// Apply one line of input to the current state.
    pub fn handle_line(&mut self, line: &str, console: &mut impl Console) -> Result<()> {
        match self.mode {
            Mode::Menu => self.handle_menu(line, console),
            Mode::Listing => self.handle_listing(line, console),
            Mode::FilterMenu => self.handle_filter_menu(line, console),
            Mode::Quit => Ok(()),
        }
    }

    fn handle_menu(&mut self, line: &str, console: &mut impl Console) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (trimmed.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "h" => {
                self.menu_stale = true;
                Ok(())
            }
            "q" => {
                self.mode = Mode::Quit;
                console.notice(&Notice::new(Severity::Info, "Goodbye, exiting TUI."))
            }
            "l" => {
                self.pager.reset();
                self.enter(Mode::Listing);
                Ok(())
            }
            "n" | "p" => console.notice(&Notice::new(
                Severity::Hint,
                "Use 'l' to enter listing mode and then 'n'/'p' to navigate.",
            )),
            "s" => {
                self.search = arg.to_string();
                self.refresh_working_set();
                console.notice(&Notice::new(
                    Severity::Success,
                    format!(
                        "Search term set to: '{}' ({} matches)",
                        self.search,
                        self.working.len()
                    ),
                ))
            }
            "f" => {
                self.enter(Mode::FilterMenu);
                Ok(())
            }
            "t" => console.stats_table(&compute_stats(&self.working)),
            "e" => self.export(arg, console),
            _ => console.notice(&Notice::new(
                Severity::Error,
                "Unknown command. Type 'h' for help.",
            )),
        }
    }

    fn handle_listing(&mut self, line: &str, console: &mut impl Console) -> Result<()> {
        match line.trim().to_lowercase().as_str() {
            "n" | "next" => {
                if !self.pager.next(self.working.len()) {
                    console.notice(&Notice::new(Severity::Hint, "Already at last page"))?;
                }
                Ok(())
            }
            "p" | "prev" => {
                if !self.pager.prev() {
                    console.notice(&Notice::new(Severity::Hint, "Already at first page"))?;
                }
                Ok(())
            }
            "" => {
                self.leave();
                Ok(())
            }
            _ => console.notice(&Notice::new(
                Severity::Error,
                "Unknown command in listing. Use n / p or Enter to return.",
            )),
        }
    }

    fn handle_filter_menu(&mut self, line: &str, console: &mut impl Console) -> Result<()> {
        let choice = line.trim();
        if choice.is_empty() || choice == "0" {
            self.leave();
            return Ok(());
        }

        let Ok(index) = choice.parse::<i64>() else {
            return console.notice(&Notice::new(Severity::Error, "Enter a number"));
        };
        let category = usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Category::SELECTABLE.get(i).copied());

        match category {
            Some(category) => {
                self.toggle(category);
                Ok(())
            }
            None => console.notice(&Notice::new(Severity::Error, "Invalid number")),
        }
    }

    fn export(&self, arg: &str, console: &mut impl Console) -> Result<()> {
        if arg.is_empty() {
            return console.notice(&Notice::new(Severity::Error, "Usage: e <output_path>"));
        }
        let notice = match export_fonts(&self.working, arg) {
            Ok(summary) => Notice::new(
                Severity::Success,
                format!(
                    "Exported {} fonts to {}",
                    summary.count,
                    summary.path.display()
                ),
            ),
            Err(err) => Notice::new(Severity::Error, format!("Export failed: {err:#}")),
        };
        console.notice(&notice)
    }

    fn toggle(&mut self, category: Category) {
        if !self.filters.remove(&category) {
            self.filters.insert(category);
        }
        self.refresh_working_set();
    }

    fn toggles(&self) -> Vec<(Category, bool)> {
        Category::SELECTABLE
            .iter()
            .map(|c| (*c, self.filters.contains(c)))
            .collect()
    }

    fn enter(&mut self, mode: Mode) {
        self.return_to.push(self.mode);
        self.mode = mode;
    }

    fn leave(&mut self) {
        let previous = self.return_to.pop().unwrap_or(Mode::Menu);
        // Leaving the listing replaces the screen, so the menu has to be drawn again.
        if self.mode == Mode::Listing {
            self.menu_stale = true;
        }
        self.mode = previous;
    }

    fn refresh_working_set(&mut self) {
        self.working = Query::new()
            .with_categories(self.filters.iter().copied())
            .with_search(&self.search)
            .apply(self.catalog);
    }

    fn menu_lines(&self) -> Vec<String> {
        let active: Vec<&str> = self.filters.iter().map(|c| c.as_str()).collect();
        let active = if active.is_empty() {
            "none".to_string()
        } else {
            active.join(", ")
        };

        let mut lines = vec!["Commands".to_string()];
        lines.extend(HELP_LINES.iter().map(|l| l.to_string()));
        lines.push(String::new());
        lines.push(format!("Active filters: {active}"));
        lines.push(format!(
            "Search: '{}'  Matching fonts: {}",
            self.search,
            self.working.len()
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Clear,
        Panel(String, Vec<String>),
        Table { start: usize, rows: Vec<String> },
        Stats(FontStats),
        Filters(Vec<(Category, bool)>),
        Notice(Notice),
    }

    #[derive(Default)]
    struct ScriptedConsole {
        input: VecDeque<String>,
        events: Vec<Event>,
    }

    impl ScriptedConsole {
        fn with_input(lines: &[&str]) -> Self {
            Self {
                input: lines.iter().map(|l| l.to_string()).collect(),
                events: Vec::new(),
            }
        }

        fn notices(&self) -> Vec<&str> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Notice(n) => Some(n.message.as_str()),
                    _ => None,
                })
                .collect()
        }

        fn tables(&self) -> Vec<(usize, Vec<String>)> {
            self.events
                .iter()
                .filter_map(|e| match e {
                    Event::Table { start, rows } => Some((*start, rows.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    impl Console for ScriptedConsole {
        fn clear(&mut self) -> Result<()> {
            self.events.push(Event::Clear);
            Ok(())
        }

        fn panel(&mut self, title: &str, lines: &[String]) -> Result<()> {
            self.events.push(Event::Panel(title.to_string(), lines.to_vec()));
            Ok(())
        }

        fn font_table(&mut self, fonts: &[FontRecord], start: usize, limit: Option<usize>) -> Result<()> {
            let end = limit.map_or(fonts.len(), |l| (start + l).min(fonts.len()));
            let rows = fonts[start.min(end)..end].iter().map(|f| f.name.clone()).collect();
            self.events.push(Event::Table { start, rows });
            Ok(())
        }

        fn stats_table(&mut self, stats: &FontStats) -> Result<()> {
            self.events.push(Event::Stats(stats.clone()));
            Ok(())
        }

        fn filter_menu(&mut self, toggles: &[(Category, bool)]) -> Result<()> {
            self.events.push(Event::Filters(toggles.to_vec()));
            Ok(())
        }

        fn notice(&mut self, notice: &Notice) -> Result<()> {
            self.events.push(Event::Notice(notice.clone()));
            Ok(())
        }

        fn read_line(&mut self, _prompt: &str) -> Result<Option<String>> {
            Ok(self.input.pop_front())
        }
    }

    fn catalog(count: usize) -> Vec<FontRecord> {
        (0..count)
            .map(|i| FontRecord::new(format!("Font {i:02}"), format!("/f/{i}.ttf")).with_categories([Category::Other]))
            .collect()
    }

    fn mixed_catalog() -> Vec<FontRecord> {
        vec![
            FontRecord::new("Fira Code", "/f/fira.ttf").with_categories([Category::Mono]),
            FontRecord::new("RandoFont123", "/f/rando.ttf").with_categories([Category::Other]),
            FontRecord::new("Times New Roman", "/f/times.ttf").with_categories([Category::Serif]),
        ]
    }

    #[test]
    fn listing_pages_through_twenty_fonts() {
        let fonts = catalog(20);
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::with_input(&["l", "n", "n", "p", "p", ""]);

        session.run(&mut console).expect("run");

        let tables = console.tables();
        assert_eq!(tables[0].0, 0);
        assert_eq!(tables[0].1.len(), 16);
        assert_eq!(tables[1].0, 16);
        assert_eq!(tables[1].1, vec!["Font 16", "Font 17", "Font 18", "Font 19"]);
        // The second `n` left the page unchanged.
        assert_eq!(tables[2].0, 16);
        assert_eq!(
            console.notices(),
            vec!["Already at last page", "Already at first page"]
        );
        assert_eq!(session.mode(), Mode::Menu);
    }

    #[test]
    fn listing_rejects_unknown_tokens_and_stays() {
        let fonts = catalog(3);
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        session.handle_line("l", &mut console).unwrap();
        session.handle_line("zzz", &mut console).unwrap();

        assert_eq!(session.mode(), Mode::Listing);
        assert_eq!(
            console.notices(),
            vec!["Unknown command in listing. Use n / p or Enter to return."]
        );
    }

    #[test]
    fn entering_listing_resets_page() {
        let fonts = catalog(40);
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        for line in ["l", "n", "n", "", "l"] {
            session.handle_line(line, &mut console).unwrap();
        }

        assert_eq!(session.page(), 0);
    }

    #[test]
    fn search_rebuilds_from_full_catalog() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        session.handle_line("s rando", &mut console).unwrap();
        assert_eq!(session.working_set().len(), 1);
        assert_eq!(session.working_set()[0].name, "RandoFont123");

        session.handle_line("s", &mut console).unwrap();
        assert_eq!(session.search(), "");
        assert_eq!(session.working_set().len(), 3);
        assert_eq!(
            console.notices(),
            vec![
                "Search term set to: 'rando' (1 matches)",
                "Search term set to: '' (3 matches)"
            ]
        );
    }

    #[test]
    fn filter_menu_toggles_and_returns() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::with_input(&["f", "1", "2", "2", "9", "x", "0", "q"]);

        session.run(&mut console).expect("run");

        assert_eq!(session.filters(), &CategorySet::from([Category::Mono]));
        assert_eq!(session.working_set().len(), 1);
        assert_eq!(session.working_set()[0].name, "Fira Code");
        assert_eq!(
            console.notices(),
            vec!["Invalid number", "Enter a number", "Goodbye, exiting TUI."]
        );
        assert_eq!(session.mode(), Mode::Quit);

        let first_menu = console
            .events
            .iter()
            .find_map(|e| match e {
                Event::Filters(t) => Some(t.clone()),
                _ => None,
            })
            .expect("filter menu rendered");
        assert!(first_menu.iter().all(|(_, on)| !on));
        assert_eq!(first_menu.len(), 5);
    }

    #[test]
    fn filter_and_search_compose() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        for line in ["f", "1", "2", "", "s times"] {
            session.handle_line(line, &mut console).unwrap();
        }

        let names: Vec<&str> = session.working_set().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Times New Roman"]);
    }

    #[test]
    fn stats_reflect_working_set() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        session.handle_line("s fira", &mut console).unwrap();
        session.handle_line("t", &mut console).unwrap();

        let stats = console
            .events
            .iter()
            .find_map(|e| match e {
                Event::Stats(s) => Some(s.clone()),
                _ => None,
            })
            .expect("stats rendered");
        assert_eq!(stats.total, 1);
        assert_eq!(stats.count(Category::Mono), 1);
        assert_eq!(stats.count(Category::Serif), 0);
    }

    #[test]
    fn export_without_path_reports_usage() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        session.handle_line("e", &mut console).unwrap();

        assert_eq!(console.notices(), vec!["Usage: e <output_path>"]);
        assert_eq!(session.mode(), Mode::Menu);
    }

    #[test]
    fn export_failure_is_reported_not_raised() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"file, not a directory").expect("write");
        let dest = blocker.join("fonts.json");

        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        session
            .handle_line(&format!("e {}", dest.display()), &mut console)
            .expect("export errors stay inside the session");

        let notices = console.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].starts_with("Export failed:"));
    }

    #[test]
    fn export_writes_working_set() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dest = tmp.path().join("out/fonts.json");
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        session.handle_line("s roman", &mut console).unwrap();
        session
            .handle_line(&format!("e {}", dest.display()), &mut console)
            .unwrap();

        let exported = crate::output::read_export(&dest).expect("read export");
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "Times New Roman");
    }

    #[test]
    fn unknown_menu_command_and_paging_hints() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::default();

        for line in ["", "wat", "n"] {
            session.handle_line(line, &mut console).unwrap();
        }

        assert_eq!(
            console.notices(),
            vec![
                "Unknown command. Type 'h' for help.",
                "Use 'l' to enter listing mode and then 'n'/'p' to navigate."
            ]
        );
    }

    #[test]
    fn menu_is_redrawn_on_help_and_after_listing_only() {
        let fonts = mixed_catalog();
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::with_input(&["s fira", "h", "l", "", "f", "", "q"]);

        session.run(&mut console).expect("run");

        let menus: Vec<&Vec<String>> = console
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Panel(title, lines) if title == "FuzzyFont TUI" => Some(lines),
                _ => None,
            })
            .collect();
        // start, after `h`, after leaving the listing
        assert_eq!(menus.len(), 3);
        assert!(menus[1].contains(&"Search: 'fira'  Matching fonts: 1".to_string()));
        assert!(menus[0].contains(&"Active filters: none".to_string()));
    }

    #[test]
    fn end_of_input_ends_the_session() {
        let fonts = catalog(2);
        let mut session = Session::new(&fonts, 16);
        let mut console = ScriptedConsole::with_input(&["l"]);

        session.run(&mut console).expect("run");

        assert_eq!(session.mode(), Mode::Listing);
    }
}
