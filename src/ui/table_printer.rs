use crate::ui::width_util::WidthUtil;
use std::io::Write;

/// Plain-text tables with a title banner, `|` column separators and dashed rules.
#[derive(Debug, Clone, Default)]
pub struct TablePrinter {
    util: WidthUtil,
    right_aligned: Vec<usize>,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a clone that right-aligns the given column indexes (numbers, prices).
    pub fn with_right_aligned(&self, columns: &[usize]) -> Self {
        let mut c = self.clone();
        c.right_aligned = columns.to_vec();
        c
    }

    fn write_line<W: Write + ?Sized>(&self, out: &mut W, s: &str) -> std::io::Result<()> {
        writeln!(out, "{}", s.trim_end())
    }

    fn write_separator<W: Write + ?Sized>(&self, out: &mut W, width: usize) -> std::io::Result<()> {
        self.write_line(out, &"-".repeat(width.max(1)))
    }

    pub fn render_banner<W: Write + ?Sized>(
        &self,
        title: &str,
        width: usize,
        out: &mut W,
    ) -> std::io::Result<()> {
        let w = width.max(self.util.visible_width(title));
        self.write_separator(out, w)?;
        self.write_line(out, &title.to_uppercase())?;
        self.write_separator(out, w)
    }

    pub fn compute_table_width<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> usize {
        let col_widths = self.compute_col_widths(headers, rows);
        Self::natural_width(&col_widths)
    }

    /// Render into any writer; an empty `rows` prints `empty_message` instead.
    pub fn render_table<T: AsRef<str>, W: Write + ?Sized>(
        &self,
        table_name: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: &str,
        out: &mut W,
    ) -> std::io::Result<()> {
        let col_widths = self.compute_col_widths(headers, rows);
        let total_width = Self::natural_width(&col_widths);

        if rows.is_empty() {
            let width = total_width
                .max(self.util.visible_width(table_name))
                .max(self.util.visible_width(empty_message));
            self.render_banner(table_name, width, out)?;
            self.write_line(out, empty_message)?;
            return self.write_separator(out, width);
        }

        self.render_banner(table_name, total_width, out)?;
        self.write_line(out, &self.build_line(headers, &col_widths, false))?;
        self.write_separator(out, total_width)?;
        for row in rows {
            self.write_line(out, &self.build_line(row, &col_widths, true))?;
        }
        self.write_separator(out, total_width)
    }

    fn compute_col_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut col_widths: Vec<usize> = headers
            .iter()
            .map(|h| self.util.visible_width(h))
            .collect();
        for r in rows {
            for (i, cell) in r.iter().enumerate().take(col_widths.len()) {
                col_widths[i] = col_widths[i].max(self.util.visible_width(cell.as_ref()));
            }
        }
        col_widths
    }

    fn natural_width(col_widths: &[usize]) -> usize {
        if col_widths.is_empty() {
            0
        } else {
            col_widths.iter().sum::<usize>() + (col_widths.len() - 1) * 3
        }
    }

    fn build_line<T: AsRef<str>>(&self, cells: &[T], col_widths: &[usize], align: bool) -> String {
        cells
            .iter()
            .enumerate()
            .take(col_widths.len())
            .map(|(i, cell)| {
                if align && self.right_aligned.contains(&i) {
                    self.util.pad_visible_left(cell.as_ref(), col_widths[i])
                } else {
                    self.util.pad_visible(cell.as_ref(), col_widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
