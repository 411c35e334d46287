//! Output folder browser for the interactive form

use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use super::form::{centered_fixed_rect, truncate_path_start};

/// Result of a key press in the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    Stay,
    /// User chose this directory
    Selected(PathBuf),
    Cancelled,
}

/// A directory entry in the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub path: PathBuf,
}

/// State for the directory browser
#[derive(Debug, Clone)]
pub struct DirectoryBrowser {
    pub current_dir: PathBuf,
    pub entries: Vec<DirEntry>,
    pub selected: usize,
    pub search: String,
    pub filtered: Vec<usize>,
}

impl DirectoryBrowser {
    pub fn new(start_dir: PathBuf) -> Self {
        let start_dir = absolute_dir(&start_dir);
        let entries = list_directories(&start_dir);
        let filtered: Vec<usize> = (0..entries.len()).collect();
        Self {
            current_dir: start_dir,
            entries,
            selected: 0,
            search: String::new(),
            filtered,
        }
    }

    /// Start in the current output folder when it exists, else the home directory
    pub fn start_dir_for(output_path: &str) -> PathBuf {
        let candidate = Path::new(output_path.trim());
        if !output_path.trim().is_empty() && candidate.is_dir() {
            return absolute_dir(candidate);
        }
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
    }

    fn refresh(&mut self) {
        self.entries = list_directories(&self.current_dir);
        self.search.clear();
        self.filtered = (0..self.entries.len()).collect();
        self.selected = 0;
    }

    pub fn navigate_to(&mut self, path: PathBuf) {
        self.current_dir = path;
        self.refresh();
    }

    fn update_filter(&mut self) {
        let search_lower = self.search.to_lowercase();
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.name.to_lowercase().contains(&search_lower))
            .map(|(i, _)| i)
            .collect();
        self.selected = 0;
    }

    pub fn highlighted(&self) -> Option<&DirEntry> {
        self.filtered
            .get(self.selected)
            .and_then(|&idx| self.entries.get(idx))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> BrowserAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Tab => BrowserAction::Selected(self.current_dir.clone()),
            KeyCode::Char('s') if ctrl => BrowserAction::Selected(self.current_dir.clone()),
            KeyCode::Enter => {
                if let Some(entry) = self.highlighted() {
                    let path = entry.path.clone();
                    self.navigate_to(path);
                }
                BrowserAction::Stay
            }
            KeyCode::Backspace => {
                if self.search.is_empty() {
                    if let Some(parent) = parent_dir(&self.current_dir) {
                        let parent = parent.to_path_buf();
                        self.navigate_to(parent);
                    }
                } else {
                    self.search.pop();
                    self.update_filter();
                }
                BrowserAction::Stay
            }
            KeyCode::Esc => {
                // Clear the filter first, cancel on a second Esc
                if self.search.is_empty() {
                    BrowserAction::Cancelled
                } else {
                    self.search.clear();
                    self.update_filter();
                    BrowserAction::Stay
                }
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                BrowserAction::Stay
            }
            KeyCode::Down => {
                if self.selected + 1 < self.filtered.len() {
                    self.selected += 1;
                }
                BrowserAction::Stay
            }
            KeyCode::PageUp => {
                self.selected = self.selected.saturating_sub(10);
                BrowserAction::Stay
            }
            KeyCode::PageDown => {
                self.selected = (self.selected + 10).min(self.filtered.len().saturating_sub(1));
                BrowserAction::Stay
            }
            KeyCode::Home => {
                self.selected = 0;
                BrowserAction::Stay
            }
            KeyCode::End => {
                self.selected = self.filtered.len().saturating_sub(1);
                BrowserAction::Stay
            }
            KeyCode::Char(c) if !ctrl && !c.is_control() => {
                self.search.push(c);
                self.update_filter();
                BrowserAction::Stay
            }
            _ => BrowserAction::Stay,
        }
    }
}

/// List subdirectories of `path`, with ".." first when there is a parent.
/// Hidden directories are skipped.
pub fn list_directories(path: &Path) -> Vec<DirEntry> {
    let mut entries = Vec::new();

    if let Ok(read_dir) = std::fs::read_dir(path) {
        for entry in read_dir.flatten() {
            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            if name.starts_with('.') || !entry_path.is_dir() {
                continue;
            }

            entries.push(DirEntry {
                name,
                path: entry_path,
            });
        }
    }

    entries.sort_by_key(|entry| entry.name.to_lowercase());

    if let Some(parent) = parent_dir(path) {
        entries.insert(
            0,
            DirEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
            },
        );
    }

    entries
}

/// Parent of `path`, or `None` at a root or for a single relative segment
fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty() && *parent != path)
}

/// Resolve `path` against the working directory so ".." always has somewhere to go
fn absolute_dir(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Draw the browser as a popup over the form
pub fn draw_browser(frame: &mut Frame, browser: &DirectoryBrowser) {
    let popup_area = centered_fixed_rect(66, 22, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Output Folder ")
        .title_style(Style::default().fg(Color::Cyan).bold())
        .title_alignment(Alignment::Center);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Current path
            Constraint::Length(3), // Search box
            Constraint::Min(1),    // Directory list
            Constraint::Length(2), // Help text
        ])
        .split(inner);

    let path_str = browser.current_dir.display().to_string();
    let max_path_len = (chunks[0].width as usize).saturating_sub(12);
    let path_line = Line::from(vec![
        Span::styled("  Current: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            truncate_path_start(&path_str, max_path_len),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(Paragraph::new(path_line), chunks[0]);

    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Filter ")
        .title_style(Style::default().fg(Color::DarkGray));

    let search_text = if browser.search.is_empty() {
        Span::styled("Type to filter...", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(browser.search.as_str(), Style::default().fg(Color::White))
    };
    let search_content = Line::from(vec![
        search_text,
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ]);
    frame.render_widget(Paragraph::new(search_content).block(search_block), chunks[1]);

    let list_height = chunks[2].height as usize;
    let start_idx = if browser.selected >= list_height {
        browser.selected - list_height + 1
    } else {
        0
    };

    let items: Vec<ListItem> = browser
        .filtered
        .iter()
        .enumerate()
        .skip(start_idx)
        .take(list_height)
        .map(|(display_idx, &entry_idx)| {
            let entry = &browser.entries[entry_idx];
            let suffix = if entry.name == ".." { "" } else { "/" };
            let style = if display_idx == browser.selected {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Cyan)
            };
            ListItem::new(format!("  ▸ {}{}", entry.name, suffix)).style(style)
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(browser.selected.saturating_sub(start_idx)));
    frame.render_stateful_widget(List::new(items), chunks[2], &mut list_state);

    if browser.filtered.is_empty() {
        let msg = if browser.search.is_empty() {
            "No folders here"
        } else {
            "No matching folders"
        };
        let msg_area = Rect::new(
            chunks[2].x + 2,
            chunks[2].y + chunks[2].height / 2,
            chunks[2].width.saturating_sub(4),
            1,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                msg,
                Style::default().fg(Color::DarkGray).italic(),
            ))
            .alignment(Alignment::Center),
            msg_area,
        );
    }

    let help_text = Line::from(vec![
        Span::styled("  Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" open  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::styled(" choose this folder  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Bksp", Style::default().fg(Color::Cyan)),
        Span::styled(" up  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help_text), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Press)
    }

    #[test]
    fn test_lists_only_visible_directories_sorted() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("beta")).unwrap();
        std::fs::create_dir(temp.path().join("Alpha")).unwrap();
        std::fs::create_dir(temp.path().join(".hidden")).unwrap();
        std::fs::write(temp.path().join("notes.txt"), "x").unwrap();

        let entries = list_directories(temp.path());
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["..", "Alpha", "beta"]);
    }

    #[test]
    fn test_enter_descends_and_tab_selects() {
        let temp = TempDir::new().unwrap();
        let root = std::fs::canonicalize(temp.path()).unwrap();
        let libs = root.join("libs");
        std::fs::create_dir(&libs).unwrap();

        let mut browser = DirectoryBrowser::new(root);
        browser.handle_key(press(KeyCode::Down));
        assert_eq!(browser.highlighted().unwrap().name, "libs");

        assert_eq!(browser.handle_key(press(KeyCode::Enter)), BrowserAction::Stay);
        assert_eq!(browser.current_dir, libs);

        assert_eq!(
            browser.handle_key(press(KeyCode::Tab)),
            BrowserAction::Selected(libs)
        );
    }

    #[test]
    fn test_filter_then_escape() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("kicad")).unwrap();
        std::fs::create_dir(temp.path().join("other")).unwrap();

        let mut browser = DirectoryBrowser::new(temp.path().to_path_buf());
        browser.handle_key(press(KeyCode::Char('k')));
        browser.handle_key(press(KeyCode::Char('i')));
        assert_eq!(browser.filtered.len(), 1);
        assert_eq!(browser.highlighted().unwrap().name, "kicad");

        assert_eq!(browser.handle_key(press(KeyCode::Esc)), BrowserAction::Stay);
        assert!(browser.search.is_empty());
        assert_eq!(browser.handle_key(press(KeyCode::Esc)), BrowserAction::Cancelled);
    }

    #[test]
    fn test_relative_start_never_reaches_empty_path() {
        let mut browser = DirectoryBrowser::new(PathBuf::from("e2k-tui-relative-libs"));
        assert!(browser.current_dir.is_absolute());
        if let Some(up) = browser.entries.first() {
            assert!(!up.path.as_os_str().is_empty());
        }

        browser.handle_key(press(KeyCode::Backspace));
        assert!(browser.current_dir.is_absolute());
        assert!(!browser.current_dir.as_os_str().is_empty());

        match browser.handle_key(press(KeyCode::Tab)) {
            BrowserAction::Selected(path) => assert!(!path.as_os_str().is_empty()),
            other => panic!("expected a selection, got {:?}", other),
        }
    }

    #[test]
    fn test_single_relative_segment_has_no_parent_entry() {
        let entries = list_directories(Path::new("e2k-tui-relative-libs"));
        assert!(entries.iter().all(|entry| entry.name != ".."));
        assert_eq!(parent_dir(Path::new("libs")), None);
        assert_eq!(parent_dir(Path::new("/")), None);
        assert_eq!(parent_dir(Path::new("/lib/Foo")), Some(Path::new("/lib")));
    }

    #[test]
    fn test_start_dir_prefers_existing_output() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().display().to_string();
        let expected = std::fs::canonicalize(temp.path()).unwrap();
        assert_eq!(DirectoryBrowser::start_dir_for(&output), expected);
    }
}
