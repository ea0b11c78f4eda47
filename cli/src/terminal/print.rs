use crate::terminal::colors;
use crate::terminal::format::Detail;
use colored::*;
use tracing::info;

pub const TOTAL_WIDTH: usize = 64;

/// Events on this target are written verbatim, without a level symbol.
pub const PRINT_TARGET: &str = "rekon::print";

const KEY_WIDTH: usize = 7;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::print::print("");
    };
    ($msg:expr) => {
        $crate::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

const BANNER: &str = r#"
              ____  ____ __ __  ____  _  __
             / __ \/ __// //_/ / __ \/ |/ /
            / /_/ / _/ / ,<   / /_/ /    /
           /_/ |_/___//_/|_|  \____/_/|_/
"#;

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let version: String = format!("⟦ REKON v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&format!("{}", BANNER.color(colors::PRIMARY).bold()));
    print(&padded(&version.bright_green().bold().to_string(), '═'));
}

/// Section title centered in a thin rule.
pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase().bright_green());
    print(&padded(&title, '─'));
}

/// `> Key.....: value`
pub fn aligned_line(key: &str, value: &str) {
    print(&format!(
        "{} {}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        key_dots(key, KEY_WIDTH + 1),
        value.color(colors::TEXT_DEFAULT)
    ));
}

/// `[idx] name` followed by one branch per detail row.
pub fn tree(idx: usize, name: &str, details: &[Detail]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    for (i, (key, value)) in details.iter().enumerate() {
        let branch: &str = if i + 1 == details.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {}",
            branch.color(colors::SEPARATOR),
            key.color(colors::TEXT_DEFAULT),
            key_dots(key, KEY_WIDTH),
            value
        ));
    }
}

/// One `+`/`-` marked line per entry, as in a unified diff.
pub fn change_list(marker: char, entries: &[String]) {
    let color: Color = match marker {
        '+' => colors::ADDED,
        _ => colors::REMOVED,
    };
    for entry in entries {
        print(&format!(" {} {}", marker.to_string().color(color).bold(), entry));
    }
}

/// Closing line of a command, boxed in double rules.
pub fn summary(msg: &str) {
    let rule: String = "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR).to_string();
    print(&rule);
    print(&padded(msg, ' '));
    print(&rule);
}

pub fn no_results() {
    print(&padded(&"∅ nothing to report".red().bold().to_string(), ' '));
}

fn key_dots(key: &str, width: usize) -> String {
    let dots: String = ".".repeat(width.saturating_sub(key.len()));
    format!("{dots}:").color(colors::SEPARATOR).to_string()
}

/// Centers `text` in `TOTAL_WIDTH` columns, filling both sides with `fill`.
fn padded(text: &str, fill: char) -> String {
    let free: usize = TOTAL_WIDTH.saturating_sub(console::measure_text_width(text));
    let left: usize = free / 2;
    let side = |n: usize| fill.to_string().repeat(n).color(colors::SEPARATOR);
    match fill {
        ' ' => format!("{}{text}", " ".repeat(left)),
        _ => format!("{}{text}{}", side(left), side(free - left)),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
