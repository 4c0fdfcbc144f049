use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Column aligned output for terminal listings. Cells may carry ANSI colours.
pub struct TablePrint {
    headers: Vec<Cow<'static, str>>,
    rows: Vec<Vec<String>>,
}

impl TablePrint {
    pub fn new_with_headers<S: Into<Cow<'static, str>>>(headers: Vec<S>) -> Self {
        Self {
            headers: headers.into_iter().map(|i| i.into()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) -> &mut Self {
        self.rows.push(row);
        self
    }

    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();

        for (header, width) in self.headers.iter().zip(&widths) {
            out.push_str(&format!("{:<width$}   ", header, width = width));
        }
        out.truncate(out.trim_end().len());
        out.push('\n');

        for row in &self.rows {
            let mut line = String::new();
            for (item, width) in row.iter().zip(&widths) {
                let padding = width.saturating_sub(visible_width(item));
                line.push_str(&format!("{}{:padding$}   ", item, "", padding = padding));
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (width, item) in widths.iter_mut().zip(row) {
                *width = (*width).max(visible_width(item));
            }
        }
        widths
    }
}

fn visible_width(s: &str) -> usize {
    strip_ansi_escapes::strip_str(s).width()
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Colorize;

    #[test]
    fn test_columns_align() {
        let mut table = TablePrint::new_with_headers(vec!["Address", "Status"]);
        table
            .add_row(vec!["10.0.0.1".to_string(), "private".to_string()])
            .add_row(vec!["2001:db8::1".to_string(), "public".to_string()]);

        assert_eq!(
            table.render(),
            "Address       Status\n10.0.0.1      private\n2001:db8::1   public\n"
        );
    }

    #[test]
    fn test_colours_do_not_count_towards_width() {
        colored::control::set_override(true);
        let mut table = TablePrint::new_with_headers(vec!["A", "B"]);
        table.add_row(vec!["xyz".green().to_string(), "1".to_string()]);

        let rendered = table.render();
        let plain = strip_ansi_escapes::strip_str(&rendered);
        assert_eq!(plain, "A     B\nxyz   1\n");
    }
}
