pub trait ToDashSeparators {
    /// Returns a copy with all `/` and `.` replaced by `-` and leading/trailing
    /// whitespace trimmed.
    fn to_dash_separators(&self) -> String;
}

impl ToDashSeparators for str {
    fn to_dash_separators(&self) -> String {
        self.trim().replace(['/', '.'], "-")
    }
}

impl ToDashSeparators for String {
    fn to_dash_separators(&self) -> String {
        self.as_str().to_dash_separators()
    }
}

pub trait Ellipsize {
    /// Cut to at most `max` characters, ending in `…` when shortened.
    fn ellipsize(&self, max: usize) -> String;
}

impl Ellipsize for str {
    fn ellipsize(&self, max: usize) -> String {
        let flat = self.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() <= max {
            return flat;
        }
        if max == 0 {
            return String::new();
        }
        let mut out: String = flat.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
