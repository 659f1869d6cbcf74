use std::io::{self, IsTerminal};

use crate::domain::item::TodoItem;
use crate::sections::SectionedView;

pub fn print_sections(view: &SectionedView, include_done: bool) {
    let palette = Palette::auto();
    println!("{}", palette.heading("Agenda"));

    let mut shown = 0usize;
    let mut hidden = 0usize;
    for section in &view.sections {
        let visible: Vec<&TodoItem> = section
            .items
            .iter()
            .filter(|item| include_done || !item.done)
            .collect();
        hidden += section.items.len() - visible.len();
        if visible.is_empty() {
            continue;
        }

        println!("{}", palette.section(&section.label));
        for item in visible {
            println!("{}", format_item_row(item, &palette));
            shown += 1;
        }
    }

    if shown == 0 {
        println!("{}", palette.dim("nothing to do"));
    }
    let mut summary = format!("{} item(s)", shown);
    if hidden > 0 {
        summary.push_str(&format!(", {} done hidden (use --all)", hidden));
    }
    println!("{}", palette.dim(&summary));
}

fn format_item_row(item: &TodoItem, palette: &Palette) -> String {
    let marker = if item.done { "[x]" } else { "[ ]" };
    let mut line = format!(
        "  {} {} {}",
        palette.marker(marker, item.done),
        palette.importance(item.importance.as_str()),
        item.text
    );
    line.push(' ');
    line.push_str(&palette.dim(&item.id));
    line
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn auto() -> Self {
        let enabled = std::env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal();
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        self.paint("1;36", text)
    }

    fn section(&self, text: &str) -> String {
        self.paint("1;33", text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    fn marker(&self, text: &str, done: bool) -> String {
        if done {
            self.paint("32", text)
        } else {
            text.to_string()
        }
    }

    fn importance(&self, level: &str) -> String {
        self.paint(importance_color_code(level), &format!("({level})"))
    }
}

fn importance_color_code(level: &str) -> &'static str {
    match level {
        "low" => "34",
        "important" => "31",
        _ => "37",
    }
}
