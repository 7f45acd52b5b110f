//! Plain-text table printing for listing commands.

const SEPARATOR: &str = " | ";
const MIN_WIDTH: usize = 12;

/// A column-aligned table written to stdout.
pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain([header.len(), MIN_WIDTH])
                    .max()
                    .unwrap_or(MIN_WIDTH)
            })
            .collect()
    }

    fn format_line(cells: &[&str], widths: &[usize]) -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(SEPARATOR)
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = vec![Self::format_line(&self.headers, &widths)];
        for row in &self.rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            lines.push(Self::format_line(&cells, &widths));
        }
        lines.join("\n")
    }

    pub fn print(&self) {
        println!("{}", self.render());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_align_to_widest_cell() {
        let mut table = Table::new(&["ID", "Name"]);
        table.add_row(vec!["1".into(), "a-rather-long-group".into()]);
        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], format!("{:<12} | Name", "ID"));
        assert_eq!(lines[1], format!("{:<12} | a-rather-long-group", "1"));
    }
}
