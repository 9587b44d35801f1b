// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the bkmatch CLI.
//!
//! Box drawing, distance badges and timing colors. Colors use the OneDark
//! palette and are dropped entirely when stdout is not a terminal or
//! `NO_COLOR` is set, so piped output stays plain text.

use std::io::IsTerminal;
use std::sync::OnceLock;

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 64;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

// OneDark: https://github.com/joshdick/onedark.vim
pub const RED: &str = "\x1b[38;2;224;108;117m";
pub const GREEN: &str = "\x1b[38;2;152;195;121m";
pub const YELLOW: &str = "\x1b[38;2;229;192;123m";
pub const BLUE: &str = "\x1b[38;2;97;175;239m";
pub const CYAN: &str = "\x1b[38;2;86;182;194m";
pub const GRAY: &str = "\x1b[38;2;92;99;112m";

static USE_COLORS: OnceLock<bool> = OnceLock::new();

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    *USE_COLORS.get_or_init(|| {
        // Respect NO_COLOR standard
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}

/// Apply styles if colors are on, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

fn border(text: &str) -> String {
    styled(&[GRAY], text)
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// Print a `label: value` line with the label column aligned
pub fn field(label: &str, value: &str) {
    let label = styled(&[DIM], &format!("{label:<16}"));
    row(&format!("  {label}{value}"));
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", styled(&[CYAN, BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let label_part = format!("─ {} ", styled(&[CYAN, BOLD], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("├"),
        label_part,
        border(&format!("{}┤", "─".repeat(remaining)))
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded edit distance: exact hits green, near misses yellow, the rest red
pub fn distance_badge(d: u32) -> String {
    let color = match d {
        0 => GREEN,
        1 => YELLOW,
        _ => RED,
    };
    styled(&[color, BOLD], &format!("d={d}"))
}

/// Pass/fail marker
pub fn status(ok: bool) -> String {
    if ok {
        styled(&[GREEN, BOLD], "ok")
    } else {
        styled(&[RED, BOLD], "FAILED")
    }
}

/// Format byte size with appropriate unit
pub fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} B", bytes)
    }
}

/// Format microseconds with color (green < 100µs, yellow < 1ms, red otherwise)
pub fn timing_us(value: f64) -> String {
    let text = if value >= 1000.0 {
        format!("{:.2} ms", value / 1000.0)
    } else {
        format!("{:.1} µs", value)
    };
    let color = if value < 100.0 {
        GREEN
    } else if value < 1000.0 {
        YELLOW
    } else {
        RED
    };
    styled(&[color], &text)
}

/// Blue, for numbers worth noticing
pub fn highlight(text: &str) -> String {
    styled(&[BLUE, BOLD], text)
}
