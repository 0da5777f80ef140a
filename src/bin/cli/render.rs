use lifeos_lib::courses::FileSystemNode;

/// ANSI color codes
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Human-readable byte count
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Cut `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn stars(rating: Option<u8>) -> String {
    match rating {
        Some(r) => format!("{}{}", "\u{2605}".repeat(r as usize), "\u{2606}".repeat(5 - r.min(5) as usize)),
        None => "-".to_string(),
    }
}

/// Minutes as `1h 05m` or `25m`
pub fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// Seconds as `MM:SS`
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// One line per directory entry, folders first marked with a trailing slash
pub fn entry_line(node: &FileSystemNode, use_color: bool) -> String {
    if node.is_folder() {
        let count = node.children().len();
        format!(
            "{}/  {}",
            paint(&node.name, Color::BLUE, use_color),
            paint(&format!("({} items)", count), Color::GRAY, use_color)
        )
    } else {
        format!(
            "{}  {}",
            node.name,
            paint(&format_size(node.size()), Color::GRAY, use_color)
        )
    }
}

pub fn print_tree(nodes: &[FileSystemNode], prefix: &str, use_color: bool) {
    for (idx, node) in nodes.iter().enumerate() {
        let is_last = idx + 1 == nodes.len();
        let connector = if is_last { "\u{2514}\u{2500}\u{2500} " } else { "\u{251c}\u{2500}\u{2500} " };

        if node.is_folder() {
            println!("{}{}{}/", prefix, connector, paint(&node.name, Color::BLUE, use_color));
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "\u{2502}   " });
            print_tree(node.children(), &child_prefix, use_color);
        } else {
            println!(
                "{}{}{} {}",
                prefix,
                connector,
                node.name,
                paint(&format!("({})", format_size(node.size())), Color::GRAY, use_color)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(60 * 1024 * 1024), "60.0 MB");
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(truncate("Introduction to Algebra", 10), "Introdu...");
        assert_eq!(truncate("Algebra", 10), "Algebra");
        assert_eq!(stars(Some(3)), "\u{2605}\u{2605}\u{2605}\u{2606}\u{2606}");
        assert_eq!(format_minutes(65), "1h 05m");
        assert_eq!(format_clock(1500), "25:00");
    }
}
